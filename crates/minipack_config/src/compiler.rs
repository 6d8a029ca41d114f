use std::{path::PathBuf, sync::Arc};

use minipack_common::{CliArguments, CompiledConfiguration};
use minipack_error::ConfigResult;
use minipack_fs::{FileSystem, OsFileSystem};
use minipack_plugin::{PluginHost, PluginRegistry};
use minipack_resolver::Resolver;

use crate::{
  load::{load_config_files, Identity, LoadContext, PrepareOptions},
  locate::locate_config_files,
  merge::MergeContext,
  module_resolver::ModuleResolver,
  pipeline::{Pipeline, PipelineContext},
  plugin_loader::PluginLoader,
  register::{
    compilers::{Json5Compiler, SourceCompiler, TomlCompiler, YamlCompiler},
    module_host::ModuleHost,
    ExtensionTable,
  },
  schema::{ConfigurationSchema, SchemaValidator},
  shortcuts::expand_shortcuts,
};

pub type SharedFileSystem = Arc<dyn FileSystem>;
pub type SharedResolver = Arc<dyn ModuleResolver>;

/// Compiles command line arguments and config files into the configurations handed to the
/// build engine.
pub struct ConfigCompiler {
  cwd: PathBuf,
  fs: SharedFileSystem,
  resolver: SharedResolver,
  plugin_host: Arc<dyn PluginHost>,
  schema: Arc<dyn SchemaValidator>,
  extensions: ExtensionTable,
  modules: Vec<Arc<dyn SourceCompiler>>,
  prepare: Arc<dyn PrepareOptions>,
}

impl ConfigCompiler {
  pub fn new(cwd: PathBuf) -> Self {
    let resolver: SharedResolver = Arc::new(Resolver::new(cwd.clone()));
    Self {
      cwd,
      fs: Arc::new(OsFileSystem),
      resolver,
      plugin_host: Arc::new(PluginRegistry::default()),
      schema: Arc::new(ConfigurationSchema),
      extensions: ExtensionTable::default(),
      modules: vec![Arc::new(Json5Compiler), Arc::new(TomlCompiler), Arc::new(YamlCompiler)],
      prepare: Arc::new(Identity),
    }
  }

  pub fn cwd(&self) -> &PathBuf {
    &self.cwd
  }

  #[must_use]
  pub fn with_fs(mut self, fs: impl FileSystem + 'static) -> Self {
    self.fs = Arc::new(fs);
    self
  }

  #[must_use]
  pub fn with_resolver(mut self, resolver: impl ModuleResolver + 'static) -> Self {
    self.resolver = Arc::new(resolver);
    self
  }

  #[must_use]
  pub fn with_plugin_host(mut self, plugin_host: impl PluginHost + 'static) -> Self {
    self.plugin_host = Arc::new(plugin_host);
    self
  }

  #[must_use]
  pub fn with_schema(mut self, schema: impl SchemaValidator + 'static) -> Self {
    self.schema = Arc::new(schema);
    self
  }

  #[must_use]
  pub fn with_extensions(mut self, extensions: ExtensionTable) -> Self {
    self.extensions = extensions;
    self
  }

  /// Makes another compiler module available to `require`.
  #[must_use]
  pub fn with_module(mut self, module: impl SourceCompiler + 'static) -> Self {
    self.modules.push(Arc::new(module));
    self
  }

  #[must_use]
  pub fn with_prepare_options(mut self, prepare: impl PrepareOptions + 'static) -> Self {
    self.prepare = Arc::new(prepare);
    self
  }

  pub async fn compile(&self, args: &CliArguments) -> ConfigResult<CompiledConfiguration> {
    let args = expand_shortcuts(args, &self.cwd);
    let files = locate_config_files(&args, &self.cwd, &self.extensions, &*self.fs);

    let mut host = ModuleHost::new(&*self.resolver, &*self.fs, &self.modules);
    let raw = load_config_files(
      &files,
      &args,
      &mut LoadContext {
        cwd: &self.cwd,
        fs: &*self.fs,
        extensions: &self.extensions,
        host: &mut host,
        prepare: &*self.prepare,
      },
    )?;

    let plugins = PluginLoader::new(&self.cwd, &*self.fs, &*self.resolver, &*self.plugin_host);
    let cx = PipelineContext {
      schema: &*self.schema,
      merge: MergeContext { args: &args, cwd: &self.cwd, fs: &*self.fs, plugins: &plugins },
    };
    Pipeline::new(raw, &cx).run().await
  }
}
