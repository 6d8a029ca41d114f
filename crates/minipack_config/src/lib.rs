mod compiler;
pub mod load;
pub mod locate;
pub mod merge;
mod module_resolver;
pub mod pipeline;
mod plugin_loader;
pub mod query;
pub mod register;
pub mod schema;
pub mod shortcuts;

pub use crate::{
  compiler::{ConfigCompiler, SharedFileSystem, SharedResolver},
  load::{Identity, PrepareOptions},
  module_resolver::ModuleResolver,
  plugin_loader::PluginLoader,
  register::{compilers::SourceCompiler, CompilerDescriptor, ExtensionTable},
  schema::{ConfigurationSchema, SchemaValidator},
};

pub use minipack_common::{CliArguments, CompiledConfiguration, RawConfigValue};
pub use minipack_error::{ConfigError, ConfigResult};
