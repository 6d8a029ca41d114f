use serde_json::Value;

use minipack_common::Plugin;

/// Builds a plugin from the arguments parsed out of the `--plugin` query, if any.
pub trait PluginFactory: Send + Sync {
  fn instantiate(&self, args: Option<&Value>) -> anyhow::Result<Plugin>;
}

impl<F> PluginFactory for F
where
  F: Fn(Option<&Value>) -> anyhow::Result<Plugin> + Send + Sync,
{
  fn instantiate(&self, args: Option<&Value>) -> anyhow::Result<Plugin> {
    self(args)
  }
}
