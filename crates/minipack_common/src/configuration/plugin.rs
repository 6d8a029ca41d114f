use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An instantiated plugin. The compiler never looks inside `options`, it only carries the
/// value to the build engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plugin {
  pub name: String,
  #[serde(default, skip_serializing_if = "Value::is_null")]
  pub options: Value,
  /// Where the plugin module was loaded from, `None` for built-in plugins.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub path: Option<PathBuf>,
}

impl Plugin {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), options: Value::Null, path: None }
  }

  #[must_use]
  pub fn with_options(mut self, options: Value) -> Self {
    self.options = options;
    self
  }

  #[must_use]
  pub fn with_path(mut self, path: PathBuf) -> Self {
    self.path = Some(path);
    self
  }
}
