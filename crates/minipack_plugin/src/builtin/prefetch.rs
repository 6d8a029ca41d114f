use serde_json::json;

use minipack_common::Plugin;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefetchPlugin {
  pub request: String,
}

impl PrefetchPlugin {
  pub const NAME: &'static str = "PrefetchPlugin";

  pub fn new(request: impl Into<String>) -> Self {
    Self { request: request.into() }
  }
}

impl From<PrefetchPlugin> for Plugin {
  fn from(plugin: PrefetchPlugin) -> Self {
    Plugin::new(PrefetchPlugin::NAME).with_options(json!({ "request": plugin.request }))
  }
}
