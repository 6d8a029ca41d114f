mod builtin;
mod factory;
mod registry;

pub use crate::{
  builtin::{
    define::DefinePlugin, hot_module_replacement::HotModuleReplacementPlugin,
    limit_chunk_count::LimitChunkCountPlugin, loader_options::LoaderOptionsPlugin,
    min_chunk_size::MinChunkSizePlugin, prefetch::PrefetchPlugin, provide::ProvidePlugin,
  },
  factory::PluginFactory,
  registry::{PluginHost, PluginRegistry},
};

pub use minipack_common::Plugin;

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use minipack_utils::indexmap::FxIndexMap;

  #[test]
  fn builtin_plugins_carry_their_options() {
    let mut definitions = FxIndexMap::default();
    definitions.insert("FOO".to_string(), json!(true));
    let define = Plugin::from(DefinePlugin::new(definitions));
    assert_eq!(define.name, "DefinePlugin");
    assert_eq!(define.options, json!({ "FOO": true }));

    let loader_options = Plugin::from(LoaderOptionsPlugin::debug());
    assert_eq!(loader_options.options, json!({ "debug": true }));

    let limit = Plugin::from(LimitChunkCountPlugin { max_chunks: 3 });
    assert_eq!(limit.options, json!({ "maxChunks": 3 }));

    let provide = Plugin::from(ProvidePlugin::new("$", "jquery"));
    assert_eq!(provide.options, json!({ "$": "jquery" }));

    let hot = Plugin::from(HotModuleReplacementPlugin);
    assert!(hot.options.is_null());
    assert!(hot.path.is_none());
  }
}
