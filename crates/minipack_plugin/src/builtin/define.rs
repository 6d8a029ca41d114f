use serde_json::{Map, Value};

use minipack_common::Plugin;
use minipack_utils::indexmap::FxIndexMap;

/// Replaces free identifiers with the given expressions at compile time.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DefinePlugin {
  pub definitions: FxIndexMap<String, Value>,
}

impl DefinePlugin {
  pub const NAME: &'static str = "DefinePlugin";

  pub fn new(definitions: FxIndexMap<String, Value>) -> Self {
    Self { definitions }
  }
}

impl From<DefinePlugin> for Plugin {
  fn from(plugin: DefinePlugin) -> Self {
    let definitions = plugin.definitions.into_iter().collect::<Map<String, Value>>();
    Plugin::new(DefinePlugin::NAME).with_options(Value::Object(definitions))
  }
}
