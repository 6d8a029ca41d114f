#![allow(dead_code)]

use std::path::{Path, PathBuf};

use minipack_config::{CliArguments, CompiledConfiguration, ConfigCompiler, ConfigResult};
use tempfile::TempDir;

/// A throwaway project directory to compile configurations in.
pub struct Project {
  dir: TempDir,
}

impl Project {
  pub fn new() -> Self {
    Self { dir: tempfile::tempdir().unwrap() }
  }

  pub fn path(&self) -> &Path {
    self.dir.path()
  }

  pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
    let path = self.path().join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, contents).unwrap();
    path
  }

  pub fn compiler(&self) -> ConfigCompiler {
    ConfigCompiler::new(self.path().to_path_buf())
  }

  pub async fn compile(&self, args: &CliArguments) -> ConfigResult<CompiledConfiguration> {
    self.compiler().compile(args).await
  }
}
