mod configuration;
mod types;

pub use crate::{
  configuration::{
    entry::{Entry, EntryItem},
    mode::Mode,
    module_rule::{Enforce, ModuleOptions, Rule, RulePattern},
    output::Output,
    plugin::Plugin,
    resolve::ResolveOptions,
    watch_options::{WatchOptions, WatchPoll},
    Configuration,
  },
  types::{
    arg_value::{ArgScalar, ArgValue},
    cli_arguments::CliArguments,
    compiled_configuration::{CompiledConfiguration, MultiConfiguration},
    config_file_ref::ConfigFileRef,
    plugin_specifier::PluginSpecifier,
    raw_config_value::{DeferredConfig, RawConfigValue},
  },
};
