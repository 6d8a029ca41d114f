use std::path::Path;

use minipack_common::{Plugin, PluginSpecifier};
use minipack_error::{ConfigError, ConfigResult};
use minipack_fs::FileSystem;
use minipack_plugin::PluginHost;

use crate::{module_resolver::ModuleResolver, query::parse_query};

/// Instantiates plugins named on the command line as `name?query`.
pub struct PluginLoader<'a> {
  cwd: &'a Path,
  fs: &'a dyn FileSystem,
  resolver: &'a dyn ModuleResolver,
  host: &'a dyn PluginHost,
}

impl<'a> PluginLoader<'a> {
  pub fn new(
    cwd: &'a Path,
    fs: &'a dyn FileSystem,
    resolver: &'a dyn ModuleResolver,
    host: &'a dyn PluginHost,
  ) -> Self {
    Self { cwd, fs, resolver, host }
  }

  pub fn load(&self, specifier: &str) -> ConfigResult<Plugin> {
    let PluginSpecifier { name, query } = PluginSpecifier::parse(specifier);

    let args = query.as_deref().map(parse_query).transpose().map_err(|err| {
      ConfigError::InvalidPluginArguments { name: specifier.to_string(), reason: err.to_string() }
    })?;

    let resolved = self
      .resolver
      .resolve(self.cwd, &name)
      .map_err(|source| ConfigError::UnresolvablePlugin { name: name.clone(), source })?;
    let path = resolved.path;

    let factory = match self.host.require(self.fs, &path, resolved.package_json.as_deref()) {
      Ok(factory) => factory,
      Err(source) => {
        tracing::error!("Cannot load plugin {name}. ({})", path.display());
        return Err(ConfigError::PluginLoad { name, path, source });
      }
    };

    let plugin = match factory.instantiate(args.as_ref()) {
      Ok(plugin) => plugin,
      Err(source) => {
        tracing::error!("Cannot instantiate plugin {name}. ({})", path.display());
        return Err(ConfigError::PluginInstantiate { name, path, source });
      }
    };

    tracing::debug!("Loaded plugin {name} from {}", path.display());
    Ok(if plugin.path.is_some() { plugin } else { plugin.with_path(path) })
  }
}
