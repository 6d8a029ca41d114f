use serde_json::{Map, Value};

use minipack_common::Plugin;

/// Options forwarded to every loader.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoaderOptionsPlugin {
  pub debug: Option<bool>,
  pub minimize: Option<bool>,
}

impl LoaderOptionsPlugin {
  pub const NAME: &'static str = "LoaderOptionsPlugin";

  pub fn debug() -> Self {
    Self { debug: Some(true), minimize: None }
  }

  pub fn minimize() -> Self {
    Self { debug: None, minimize: Some(true) }
  }
}

impl From<LoaderOptionsPlugin> for Plugin {
  fn from(plugin: LoaderOptionsPlugin) -> Self {
    let mut options = Map::new();
    if let Some(debug) = plugin.debug {
      options.insert("debug".to_string(), Value::Bool(debug));
    }
    if let Some(minimize) = plugin.minimize {
      options.insert("minimize".to_string(), Value::Bool(minimize));
    }
    Plugin::new(LoaderOptionsPlugin::NAME).with_options(Value::Object(options))
  }
}
