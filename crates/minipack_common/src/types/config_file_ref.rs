use std::path::PathBuf;

/// A config file about to be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFileRef {
  pub path: PathBuf,
  /// The registered extension the file was matched with, including the leading dot.
  pub ext: String,
}

impl ConfigFileRef {
  pub fn new(path: PathBuf, ext: impl Into<String>) -> Self {
    Self { path, ext: ext.into() }
  }
}
