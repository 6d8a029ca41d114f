use std::{fmt::Debug, io, path::Path};

/// The file system operations config discovery and loading rely on.
pub trait FileSystem: Debug + Send + Sync {
  fn exists(&self, path: &Path) -> bool;

  fn is_dir(&self, path: &Path) -> bool;

  fn read_to_string(&self, path: &Path) -> io::Result<String>;
}
