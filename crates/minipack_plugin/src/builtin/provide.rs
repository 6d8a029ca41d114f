use serde_json::{Map, Value};

use minipack_common::Plugin;

/// Makes `name` available as a free variable that loads `request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvidePlugin {
  pub name: String,
  pub request: String,
}

impl ProvidePlugin {
  pub const NAME: &'static str = "ProvidePlugin";

  pub fn new(name: impl Into<String>, request: impl Into<String>) -> Self {
    Self { name: name.into(), request: request.into() }
  }
}

impl From<ProvidePlugin> for Plugin {
  fn from(plugin: ProvidePlugin) -> Self {
    let mut definitions = Map::new();
    definitions.insert(plugin.name, Value::String(plugin.request));
    Plugin::new(ProvidePlugin::NAME).with_options(Value::Object(definitions))
  }
}
