use std::{path::PathBuf, sync::Arc};

use rustc_hash::FxHashMap;

use minipack_fs::FileSystem;
use minipack_resolver::read_package_name;

use crate::{
  module_resolver::ModuleResolver,
  register::compilers::{JsonCompiler, SourceCompiler},
};

/// The modules a single compile can require, and the compilers installed so far, keyed by
/// extension. JSON is installed from the start.
#[derive(Debug)]
pub struct ModuleHost<'a> {
  resolver: &'a dyn ModuleResolver,
  fs: &'a dyn FileSystem,
  modules: FxHashMap<String, Arc<dyn SourceCompiler>>,
  handlers: FxHashMap<String, Arc<dyn SourceCompiler>>,
  search_paths: Vec<PathBuf>,
}

impl<'a> ModuleHost<'a> {
  pub fn new(
    resolver: &'a dyn ModuleResolver,
    fs: &'a dyn FileSystem,
    modules: &[Arc<dyn SourceCompiler>],
  ) -> Self {
    let modules =
      modules.iter().map(|module| (module.name().to_string(), Arc::clone(module))).collect();
    let mut handlers: FxHashMap<String, Arc<dyn SourceCompiler>> = FxHashMap::default();
    handlers.insert(".json".to_string(), Arc::new(JsonCompiler));
    Self { resolver, fs, modules, handlers, search_paths: vec![] }
  }

  pub fn search_paths(&self) -> &[PathBuf] {
    &self.search_paths
  }

  /// Puts `paths` in front of the current search locations, keeping their order. Paths
  /// already searched are moved rather than repeated.
  pub fn prepend_search_paths(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
    let paths = paths.into_iter().collect::<Vec<_>>();
    self.search_paths.retain(|existing| !paths.contains(existing));
    self.search_paths.splice(0..0, paths);
  }

  /// Finds a module by name, first among the available modules and then by resolving the
  /// name from each search location and matching the package it resolves to.
  pub fn require(&self, name: &str) -> anyhow::Result<Arc<dyn SourceCompiler>> {
    if let Some(module) = self.modules.get(name) {
      return Ok(Arc::clone(module));
    }

    for dir in &self.search_paths {
      let Ok(resolved) = self.resolver.resolve(dir, name) else { continue };
      let package = match resolved.package_json.as_deref() {
        Some(package_json) => read_package_name(self.fs, package_json)?,
        None => None,
      };
      if let Some(module) = package.and_then(|package| self.modules.get(&package)) {
        tracing::debug!("Resolved module '{name}' to {}", resolved.path.display());
        return Ok(Arc::clone(module));
      }
    }

    anyhow::bail!("Cannot find module '{name}'")
  }

  /// Requires `name` and installs it for the extensions it declares.
  pub fn load(&mut self, name: &str) -> anyhow::Result<()> {
    let module = self.require(name)?;
    for ext in module.extensions() {
      self.install(ext, Arc::clone(&module));
    }
    Ok(())
  }

  pub fn install(&mut self, ext: &str, module: Arc<dyn SourceCompiler>) {
    tracing::debug!("Installing config compiler '{}' for {ext}", module.name());
    self.handlers.insert(ext.to_string(), module);
  }

  pub fn handler(&self, ext: &str) -> Option<&Arc<dyn SourceCompiler>> {
    self.handlers.get(ext)
  }

  pub fn is_installed(&self, ext: &str) -> bool {
    self.handlers.contains_key(ext)
  }
}
