mod handlers;
mod positional;

use std::path::Path;

use serde_json::Value;

use minipack_common::{ArgScalar, ArgValue, CliArguments, Configuration};
use minipack_error::{ConfigError, ConfigResult};
use minipack_fs::FileSystem;
use minipack_utils::indexmap::FxIndexMap;

use crate::plugin_loader::PluginLoader;

pub use self::{handlers::FLAG_HANDLERS, positional::apply_positional};

/// What the flag handlers can see besides the configuration they write to.
pub struct MergeContext<'a> {
  pub args: &'a CliArguments,
  pub cwd: &'a Path,
  pub fs: &'a dyn FileSystem,
  pub plugins: &'a PluginLoader<'a>,
}

pub type ScalarFn = fn(&mut Configuration, &str, &MergeContext<'_>) -> ConfigResult<()>;
pub type PairedFn =
  fn(&mut Configuration, Option<&str>, &str, &MergeContext<'_>) -> ConfigResult<()>;
pub type TriggerFn = fn(&mut Configuration, &MergeContext<'_>) -> ConfigResult<()>;
pub type TriStateFn = fn(&mut Configuration, bool);
pub type RawFn = fn(&mut Configuration, &ArgValue, &MergeContext<'_>) -> ConfigResult<()>;

pub type Group = FxIndexMap<String, Value>;

/// A paired handler that collects every occurrence before writing once.
#[derive(Clone, Copy)]
pub struct GroupedHandler {
  pub init: fn() -> Group,
  pub each: fn(&mut Group, Option<&str>, &str),
  pub finalize: fn(&mut Configuration, Group),
}

#[derive(Clone, Copy)]
pub enum HandlerKind {
  /// Called once per value.
  Scalar(ScalarFn),
  /// Called once per value, split on the first `=` into a key and a value.
  Paired(PairedFn),
  /// Called once per truthy value.
  BooleanTriggering(TriggerFn),
  /// Called only for literal booleans.
  TriState(TriStateFn),
  Grouped(GroupedHandler),
  /// Called with the value as given.
  Raw(RawFn),
}

#[derive(Clone, Copy)]
pub struct FlagHandler {
  pub flag: &'static str,
  pub kind: HandlerKind,
}

/// Splits on the first `=`. Without one the whole string is the value.
pub fn split_pair(content: &str) -> (Option<&str>, &str) {
  match content.split_once('=') {
    Some((key, value)) => (Some(key), value),
    None => (None, content),
  }
}

fn expect_str<'a>(flag: &'static str, scalar: ArgScalar<'a>) -> ConfigResult<&'a str> {
  match scalar {
    ArgScalar::Str(value) => Ok(value),
    ArgScalar::Bool(value) => Err(ConfigError::InvalidFlagValue { flag, value: value.to_string() }),
  }
}

/// Applies one handler to `config`. A flag that was not given leaves the configuration
/// untouched.
pub fn apply_handler(
  handler: &FlagHandler,
  config: &mut Configuration,
  cx: &MergeContext<'_>,
) -> ConfigResult<()> {
  let Some(value) = cx.args.get(handler.flag) else { return Ok(()) };
  let flag = handler.flag;

  match handler.kind {
    HandlerKind::Scalar(apply) => {
      for (_, scalar) in value.scalars() {
        apply(config, expect_str(flag, scalar)?, cx)?;
      }
    }
    HandlerKind::Paired(apply) => {
      for (_, scalar) in value.scalars() {
        let (key, content) = split_pair(expect_str(flag, scalar)?);
        apply(config, key, content, cx)?;
      }
    }
    HandlerKind::BooleanTriggering(apply) => {
      for (_, scalar) in value.scalars() {
        if scalar.is_truthy() {
          apply(config, cx)?;
        }
      }
    }
    HandlerKind::TriState(apply) => {
      if let ArgValue::Bool(value) = value {
        apply(config, *value);
      }
    }
    HandlerKind::Grouped(GroupedHandler { init, each, finalize }) => {
      let mut group = init();
      for (_, scalar) in value.scalars() {
        let (key, content) = split_pair(expect_str(flag, scalar)?);
        each(&mut group, key, content);
      }
      finalize(config, group);
    }
    HandlerKind::Raw(apply) => apply(config, value, cx)?,
  }

  Ok(())
}

/// Writes every command line option into `config`: the flag handlers in table order, then
/// the positional entries.
pub fn merge_configuration(
  config: &mut Configuration,
  cx: &MergeContext<'_>,
) -> ConfigResult<()> {
  for handler in FLAG_HANDLERS {
    apply_handler(handler, config, cx)?;
  }
  apply_positional(config, cx)
}
