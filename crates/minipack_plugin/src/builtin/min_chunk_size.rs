use serde_json::json;

use minipack_common::Plugin;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinChunkSizePlugin {
  pub min_chunk_size: i64,
}

impl MinChunkSizePlugin {
  pub const NAME: &'static str = "MinChunkSizePlugin";
}

impl From<MinChunkSizePlugin> for Plugin {
  fn from(plugin: MinChunkSizePlugin) -> Self {
    Plugin::new(MinChunkSizePlugin::NAME)
      .with_options(json!({ "minChunkSize": plugin.min_chunk_size }))
  }
}
