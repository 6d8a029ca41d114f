use std::path::PathBuf;

use serde::Serialize;

use crate::{Configuration, WatchOptions};

/// Several configurations compiled from one command line. `context`, `watch` and
/// `watch_options` belong to the whole set rather than to any one configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiConfiguration {
  pub configurations: Vec<Configuration>,
  pub context: PathBuf,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub watch: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub watch_options: Option<WatchOptions>,
}

impl MultiConfiguration {
  pub fn watch_options_mut(&mut self) -> &mut WatchOptions {
    self.watch_options.get_or_insert_with(WatchOptions::default)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CompiledConfiguration {
  Single(Configuration),
  Multi(MultiConfiguration),
}

impl CompiledConfiguration {
  pub fn as_single(&self) -> Option<&Configuration> {
    match self {
      Self::Single(config) => Some(config),
      Self::Multi(_) => None,
    }
  }

  pub fn as_multi(&self) -> Option<&MultiConfiguration> {
    match self {
      Self::Multi(multi) => Some(multi),
      Self::Single(_) => None,
    }
  }

  pub fn configurations(&self) -> &[Configuration] {
    match self {
      Self::Single(config) => std::slice::from_ref(config),
      Self::Multi(multi) => &multi.configurations,
    }
  }
}
