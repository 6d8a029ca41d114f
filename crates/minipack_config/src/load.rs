use std::path::Path;

use minipack_common::{CliArguments, ConfigFileRef, RawConfigValue};
use minipack_error::{ConfigError, ConfigResult};
use minipack_fs::FileSystem;

use crate::register::{module_host::ModuleHost, register_compiler, ExtensionTable};

/// A hook run on every loaded config before it is collected.
pub trait PrepareOptions: Send + Sync {
  fn prepare(&self, value: RawConfigValue, args: &CliArguments) -> RawConfigValue;
}

/// Leaves loaded configs as they are.
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl PrepareOptions for Identity {
  fn prepare(&self, value: RawConfigValue, _args: &CliArguments) -> RawConfigValue {
    value
  }
}

pub struct LoadContext<'a, 'host> {
  pub cwd: &'a Path,
  pub fs: &'a dyn FileSystem,
  pub extensions: &'a ExtensionTable,
  pub host: &'a mut ModuleHost<'host>,
  pub prepare: &'a dyn PrepareOptions,
}

/// Loads every located file. One file gives its own value, several a sequence and none an
/// empty object.
pub fn load_config_files(
  files: &[ConfigFileRef],
  args: &CliArguments,
  cx: &mut LoadContext<'_, '_>,
) -> ConfigResult<RawConfigValue> {
  let mut loaded = Vec::with_capacity(files.len());
  for file in files {
    if let Some(descriptor) = cx.extensions.descriptor(&file.ext) {
      register_compiler(cx.host, descriptor)
        .map_err(|source| ConfigError::CompilerModule { ext: file.ext.clone(), source })?;
    }
    let value = load_config_file(file, args, cx)?;
    loaded.push(cx.prepare.prepare(value, args));
  }

  Ok(match loaded.len() {
    0 => RawConfigValue::empty_object(),
    1 => loaded.remove(0),
    _ => RawConfigValue::Sequence(loaded),
  })
}

fn load_config_file(
  file: &ConfigFileRef,
  args: &CliArguments,
  cx: &mut LoadContext<'_, '_>,
) -> ConfigResult<RawConfigValue> {
  let register = args.get_all("config-register");
  if !register.is_empty() {
    cx.host.prepend_search_paths([cx.cwd.join("node_modules"), cx.cwd.to_path_buf()]);
    for name in register {
      cx.host
        .load(name)
        .map_err(|source| ConfigError::ConfigRegister { name: name.to_string(), source })?;
    }
  }

  let Some(compiler) = cx.host.handler(&file.ext) else {
    let (path, ext) = (file.path.clone(), file.ext.clone());
    return Err(ConfigError::UnsupportedExtension { path, ext });
  };

  tracing::debug!("Loading {} with '{}'", file.path.display(), compiler.name());
  let source = cx
    .fs
    .read_to_string(&file.path)
    .map_err(|source| ConfigError::Io { path: file.path.clone(), source })?;

  compiler
    .compile(&source, &file.path)
    .map_err(|source| ConfigError::Compile { path: file.path.clone(), source })
}
