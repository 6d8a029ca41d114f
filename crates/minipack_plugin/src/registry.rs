use std::{fmt::Debug, path::Path, sync::Arc};

use anyhow::Context;
use rustc_hash::FxHashMap;

use minipack_fs::FileSystem;
use minipack_resolver::read_package_name;

use crate::PluginFactory;

/// Turns a resolved plugin module into something that can be instantiated.
pub trait PluginHost: Send + Sync {
  fn require(
    &self,
    fs: &dyn FileSystem,
    path: &Path,
    package_json: Option<&Path>,
  ) -> anyhow::Result<Arc<dyn PluginFactory>>;
}

/// Plugin factories keyed by the package name they are published under.
#[derive(Default, Clone)]
pub struct PluginRegistry {
  factories: FxHashMap<String, Arc<dyn PluginFactory>>,
}

impl Debug for PluginRegistry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let mut names = self.factories.keys().collect::<Vec<_>>();
    names.sort();
    f.debug_struct("PluginRegistry").field("factories", &names).finish()
  }
}

impl PluginRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register(&mut self, name: impl Into<String>, factory: impl PluginFactory + 'static) {
    self.factories.insert(name.into(), Arc::new(factory));
  }

  #[must_use]
  pub fn with(mut self, name: impl Into<String>, factory: impl PluginFactory + 'static) -> Self {
    self.register(name, factory);
    self
  }

  pub fn get(&self, name: &str) -> Option<&Arc<dyn PluginFactory>> {
    self.factories.get(name)
  }

  /// The package name a resolved module is known by: the `name` of its `package.json`, or
  /// the file stem for a module outside any package.
  fn module_id(
    fs: &dyn FileSystem,
    path: &Path,
    package_json: Option<&Path>,
  ) -> anyhow::Result<String> {
    let name = package_json.map(|package_json| read_package_name(fs, package_json));
    if let Some(name) = name.transpose()?.flatten() {
      return Ok(name);
    }

    path
      .file_stem()
      .map(|stem| stem.to_string_lossy().into_owned())
      .with_context(|| format!("Cannot find module '{}'", path.display()))
  }
}

impl PluginHost for PluginRegistry {
  fn require(
    &self,
    fs: &dyn FileSystem,
    path: &Path,
    package_json: Option<&Path>,
  ) -> anyhow::Result<Arc<dyn PluginFactory>> {
    let id = Self::module_id(fs, path, package_json)?;
    self
      .get(&id)
      .map(Arc::clone)
      .ok_or_else(|| anyhow::anyhow!("Cannot find module '{id}' ({})", path.display()))
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use minipack_common::Plugin;
  use minipack_fs::OsFileSystem;
  use serde_json::{json, Value};

  use super::*;

  fn banner(args: Option<&Value>) -> anyhow::Result<Plugin> {
    Ok(Plugin::new("BannerPlugin").with_options(args.cloned().unwrap_or(Value::Null)))
  }

  #[test]
  fn requires_by_package_name() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("node_modules/minipack-banner");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("package.json"), r#"{ "name": "minipack-banner" }"#).unwrap();

    let registry = PluginRegistry::new().with("minipack-banner", banner);
    let package_json = dir.join("package.json");
    let factory =
      registry.require(&OsFileSystem, &dir.join("lib/index.js"), Some(&package_json)).unwrap();
    let plugin = factory.instantiate(Some(&json!({ "text": "hi" }))).unwrap();

    assert_eq!(plugin.name, "BannerPlugin");
    assert_eq!(plugin.options, json!({ "text": "hi" }));
  }

  #[derive(Debug)]
  struct InMemoryManifest;

  impl FileSystem for InMemoryManifest {
    fn exists(&self, path: &Path) -> bool {
      path.ends_with("package.json")
    }

    fn is_dir(&self, _path: &Path) -> bool {
      false
    }

    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
      if path.ends_with("package.json") {
        Ok(r#"{ "name": "minipack-banner" }"#.to_string())
      } else {
        Err(std::io::ErrorKind::NotFound.into())
      }
    }
  }

  #[test]
  fn reads_package_json_through_the_file_system() {
    let registry = PluginRegistry::new().with("minipack-banner", banner);
    let path = Path::new("/virtual/minipack-banner/index.js");
    let package_json = Path::new("/virtual/minipack-banner/package.json");

    assert!(registry.require(&InMemoryManifest, path, Some(package_json)).is_ok());
    assert!(registry.require(&OsFileSystem, path, Some(package_json)).is_err());
  }

  #[test]
  fn falls_back_to_file_stem() {
    let registry = PluginRegistry::new().with("local", banner);
    assert!(registry.require(&OsFileSystem, Path::new("/project/plugins/local.js"), None).is_ok());
  }

  #[test]
  fn unknown_module_is_an_error() {
    let registry = PluginRegistry::new();
    let path = Path::new("/project/plugins/local.js");
    let err = registry.require(&OsFileSystem, path, None).err().unwrap();
    assert!(err.to_string().starts_with("Cannot find module 'local'"));
  }
}
