pub mod entry;
pub mod mode;
pub mod module_rule;
pub mod output;
pub mod plugin;
pub mod resolve;
pub mod watch_options;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Entry, Mode, ModuleOptions, Output, Plugin, ResolveOptions, WatchOptions};

/// The options handed to the build engine.
///
/// Every nested option group is `None` until something writes into it. Writers go through
/// the `*_mut` accessors, which create the group on first use and never replace it.
/// Keys this struct doesn't model are kept in `extra` and written back untouched.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub mode: Option<Mode>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub context: Option<PathBuf>,

  // --- Input
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub entry: Option<Entry>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub module: Option<ModuleOptions>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub resolve: Option<ResolveOptions>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub resolve_loader: Option<ResolveOptions>,

  // --- Output
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub output: Option<Output>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub target: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub devtool: Option<Value>,

  // --- Plugins
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub plugins: Option<Vec<Plugin>>,

  // --- Build behaviour
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cache: Option<Value>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub bail: Option<bool>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub profile: Option<bool>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub records_input_path: Option<PathBuf>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub records_output_path: Option<PathBuf>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub records_path: Option<PathBuf>,

  // --- Watch
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub watch: Option<bool>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub watch_options: Option<WatchOptions>,

  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl Configuration {
  pub fn output_mut(&mut self) -> &mut Output {
    self.output.get_or_insert_with(Output::default)
  }

  pub fn module_mut(&mut self) -> &mut ModuleOptions {
    self.module.get_or_insert_with(ModuleOptions::default)
  }

  pub fn resolve_mut(&mut self) -> &mut ResolveOptions {
    self.resolve.get_or_insert_with(ResolveOptions::default)
  }

  pub fn resolve_loader_mut(&mut self) -> &mut ResolveOptions {
    self.resolve_loader.get_or_insert_with(ResolveOptions::default)
  }

  pub fn watch_options_mut(&mut self) -> &mut WatchOptions {
    self.watch_options.get_or_insert_with(WatchOptions::default)
  }

  pub fn plugins_mut(&mut self) -> &mut Vec<Plugin> {
    self.plugins.get_or_insert_with(Vec::new)
  }

  /// Plugins installed from the command line go in front of the ones already configured.
  pub fn add_plugin(&mut self, plugin: Plugin) {
    self.plugins_mut().insert(0, plugin);
  }
}
