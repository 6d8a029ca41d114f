use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub path: Option<PathBuf>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub filename: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub chunk_filename: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub source_map_filename: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub public_path: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub jsonp_function: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pathinfo: Option<bool>,
  /// A name, a list of names or a per-target mapping.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub library: Option<Value>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub library_target: Option<String>,

  #[serde(flatten)]
  pub extra: Map<String, Value>,
}
