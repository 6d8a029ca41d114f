use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WatchPoll {
  Enabled(bool),
  /// Polling interval in milliseconds.
  Interval(Number),
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchOptions {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub aggregate_timeout: Option<Number>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub poll: Option<WatchPoll>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub stdin: Option<bool>,

  #[serde(flatten)]
  pub extra: Map<String, Value>,
}
