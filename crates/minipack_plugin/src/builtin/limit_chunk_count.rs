use serde_json::json;

use minipack_common::Plugin;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitChunkCountPlugin {
  pub max_chunks: i64,
}

impl LimitChunkCountPlugin {
  pub const NAME: &'static str = "LimitChunkCountPlugin";
}

impl From<LimitChunkCountPlugin> for Plugin {
  fn from(plugin: LimitChunkCountPlugin) -> Self {
    Plugin::new(LimitChunkCountPlugin::NAME).with_options(json!({ "maxChunks": plugin.max_chunks }))
  }
}
