use std::path::{Path, PathBuf};

use dashmap::DashMap;

use oxc_resolver::{
  PackageJson as OxcPackageJson, ResolveError, ResolveOptions as OxcResolverOptions,
  Resolver as OxcResolver,
};

#[derive(Debug)]
pub struct Resolver {
  cwd: PathBuf,
  require_resolver: OxcResolver,
  package_json_cache: DashMap<PathBuf, PathBuf>,
}

impl Resolver {
  pub fn new(cwd: PathBuf) -> Self {
    // Modules are looked up the way `require` would find them.
    let condition_names = vec!["require".to_string(), "node".to_string(), "default".to_string()];

    let resolve_options = OxcResolverOptions {
      condition_names,
      main_fields: vec!["main".to_string()],
      extensions: vec![
        String::from(".js"),
        String::from(".json"),
        String::from(".cjs"),
        String::from(".mjs"),
      ],
      builtin_modules: true,
      ..Default::default()
    };

    Self {
      cwd,
      require_resolver: OxcResolver::new(resolve_options),
      package_json_cache: DashMap::default(),
    }
  }

  pub fn cwd(&self) -> &PathBuf {
    &self.cwd
  }
}

#[derive(Debug)]
pub struct ResolveReturn {
  pub path: PathBuf,
  pub package_json: Option<PathBuf>,
}

impl Resolver {
  /// Resolves `specifier` from the directory `context`, or from the cwd when `context` is
  /// `None`.
  pub fn resolve(
    &self,
    context: Option<&Path>,
    specifier: &str,
  ) -> Result<ResolveReturn, ResolveError> {
    let dir = context
      .filter(|inner| inner.components().next().is_some())
      .unwrap_or(self.cwd.as_path());

    self.require_resolver.resolve(dir, specifier).map(|info| {
      let path = info.full_path();
      let package_json = info.package_json().map(|p| self.cached_package_json(p));
      ResolveReturn { path, package_json }
    })
  }

  fn cached_package_json(&self, oxc_pkg_json: &OxcPackageJson) -> PathBuf {
    self.package_json_cache.get(&oxc_pkg_json.realpath).map_or_else(
      || {
        self.package_json_cache.insert(oxc_pkg_json.realpath.clone(), oxc_pkg_json.path.clone());
        oxc_pkg_json.path.clone()
      },
      |v| v.value().clone(),
    )
  }
}
