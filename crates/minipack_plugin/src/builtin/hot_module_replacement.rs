use minipack_common::Plugin;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HotModuleReplacementPlugin;

impl HotModuleReplacementPlugin {
  pub const NAME: &'static str = "HotModuleReplacementPlugin";
}

impl From<HotModuleReplacementPlugin> for Plugin {
  fn from(_: HotModuleReplacementPlugin) -> Self {
    Plugin::new(HotModuleReplacementPlugin::NAME)
  }
}
