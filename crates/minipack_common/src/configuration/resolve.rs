use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use minipack_utils::indexmap::FxIndexMap;

/// Shared by `resolve` and `resolveLoader`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolveOptions {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub alias: Option<FxIndexMap<String, Value>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub extensions: Option<Vec<String>>,

  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl ResolveOptions {
  pub fn alias_mut(&mut self) -> &mut FxIndexMap<String, Value> {
    self.alias.get_or_insert_with(FxIndexMap::default)
  }
}
