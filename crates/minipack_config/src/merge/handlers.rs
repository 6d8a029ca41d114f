use std::{
  path::{Path, PathBuf},
  str::FromStr,
  sync::LazyLock,
};

use regex::Regex;
use serde_json::Value;

use minipack_common::{ArgValue, Configuration, Enforce, Entry, EntryItem, Mode, Rule, RulePattern};
use minipack_error::{ConfigError, ConfigResult};
use minipack_plugin::{
  DefinePlugin, HotModuleReplacementPlugin, LimitChunkCountPlugin, LoaderOptionsPlugin,
  MinChunkSizePlugin, PrefetchPlugin, ProvidePlugin,
};
use minipack_utils::{escape_regex::escape_regex, parse_int::parse_int, path_ext::PathExt};

use super::{FlagHandler, Group, GroupedHandler, HandlerKind, MergeContext};

static EXTENSIONS_SEPARATOR_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r",\s*").expect("valid separator pattern"));

/// Every flag that maps onto the configuration, in the order they are applied.
pub static FLAG_HANDLERS: &[FlagHandler] = &[
  FlagHandler { flag: "mode", kind: HandlerKind::Scalar(mode) },
  FlagHandler { flag: "entry", kind: HandlerKind::Paired(entry) },
  FlagHandler { flag: "module-bind", kind: HandlerKind::Paired(module_bind) },
  FlagHandler { flag: "module-bind-pre", kind: HandlerKind::Paired(module_bind_pre) },
  FlagHandler { flag: "module-bind-post", kind: HandlerKind::Paired(module_bind_post) },
  FlagHandler {
    flag: "define",
    kind: HandlerKind::Grouped(GroupedHandler {
      init: Group::default,
      each: define,
      finalize: define_plugin,
    }),
  },
  FlagHandler { flag: "output-path", kind: HandlerKind::Scalar(output_path) },
  FlagHandler { flag: "output-filename", kind: HandlerKind::Scalar(output_filename) },
  FlagHandler { flag: "output-chunk-filename", kind: HandlerKind::Scalar(output_chunk_filename) },
  FlagHandler {
    flag: "output-source-map-filename",
    kind: HandlerKind::Scalar(output_source_map_filename),
  },
  FlagHandler { flag: "output-public-path", kind: HandlerKind::Scalar(output_public_path) },
  FlagHandler { flag: "output-jsonp-function", kind: HandlerKind::Scalar(output_jsonp_function) },
  FlagHandler { flag: "output-pathinfo", kind: HandlerKind::BooleanTriggering(output_pathinfo) },
  FlagHandler { flag: "output-library", kind: HandlerKind::Scalar(output_library) },
  FlagHandler { flag: "output-library-target", kind: HandlerKind::Scalar(output_library_target) },
  FlagHandler { flag: "records-input-path", kind: HandlerKind::Scalar(records_input_path) },
  FlagHandler { flag: "records-output-path", kind: HandlerKind::Scalar(records_output_path) },
  FlagHandler { flag: "records-path", kind: HandlerKind::Scalar(records_path) },
  FlagHandler { flag: "target", kind: HandlerKind::Scalar(target) },
  FlagHandler { flag: "cache", kind: HandlerKind::TriState(cache) },
  FlagHandler { flag: "hot", kind: HandlerKind::BooleanTriggering(hot) },
  FlagHandler { flag: "debug", kind: HandlerKind::BooleanTriggering(debug) },
  FlagHandler { flag: "devtool", kind: HandlerKind::Scalar(devtool) },
  FlagHandler { flag: "resolve-alias", kind: HandlerKind::Paired(resolve_alias) },
  FlagHandler { flag: "resolve-loader-alias", kind: HandlerKind::Paired(resolve_loader_alias) },
  FlagHandler { flag: "resolve-extensions", kind: HandlerKind::Raw(resolve_extensions) },
  FlagHandler { flag: "optimize-max-chunks", kind: HandlerKind::Scalar(optimize_max_chunks) },
  FlagHandler {
    flag: "optimize-min-chunk-size",
    kind: HandlerKind::Scalar(optimize_min_chunk_size),
  },
  FlagHandler {
    flag: "optimize-minimize",
    kind: HandlerKind::BooleanTriggering(optimize_minimize),
  },
  FlagHandler { flag: "prefetch", kind: HandlerKind::Scalar(prefetch) },
  FlagHandler { flag: "provide", kind: HandlerKind::Scalar(provide) },
  FlagHandler { flag: "plugin", kind: HandlerKind::Scalar(plugin) },
  FlagHandler { flag: "bail", kind: HandlerKind::TriState(bail) },
  FlagHandler { flag: "profile", kind: HandlerKind::TriState(profile) },
];

fn mode(config: &mut Configuration, value: &str, _: &MergeContext<'_>) -> ConfigResult<()> {
  let mode = Mode::from_str(value)
    .map_err(|_| ConfigError::InvalidFlagValue { flag: "mode", value: value.to_string() })?;
  config.mode = Some(mode);
  Ok(())
}

// --- Entries

fn entry(
  config: &mut Configuration,
  name: Option<&str>,
  request: &str,
  _: &MergeContext<'_>,
) -> ConfigResult<()> {
  let name = name.unwrap_or(Entry::MAIN);
  config
    .entry
    .get_or_insert_with(|| Entry::Named(Default::default()))
    .named_mut()
    .entry(name.to_string())
    .and_modify(|existing| existing.push(request.to_string()))
    .or_insert_with(|| EntryItem::Single(request.to_string()));
  Ok(())
}

// --- Module rules

fn bind_rule(
  config: &mut Configuration,
  flag: &'static str,
  name: Option<&str>,
  binding: &str,
  enforce: Option<Enforce>,
) -> ConfigResult<()> {
  let (extension, loader) = match name {
    Some(extension) => (extension, binding.to_string()),
    None => (binding, format!("{binding}-loader")),
  };

  let test = RulePattern::new(&format!(r"\.{}$", escape_regex(extension)))
    .map_err(|_| ConfigError::InvalidFlagValue { flag, value: extension.to_string() })?;
  config.module_mut().rules_mut().push(Rule::new(test, loader, enforce));
  Ok(())
}

fn module_bind(
  config: &mut Configuration,
  name: Option<&str>,
  binding: &str,
  _: &MergeContext<'_>,
) -> ConfigResult<()> {
  bind_rule(config, "module-bind", name, binding, None)
}

fn module_bind_pre(
  config: &mut Configuration,
  name: Option<&str>,
  binding: &str,
  _: &MergeContext<'_>,
) -> ConfigResult<()> {
  bind_rule(config, "module-bind-pre", name, binding, Some(Enforce::Pre))
}

fn module_bind_post(
  config: &mut Configuration,
  name: Option<&str>,
  binding: &str,
  _: &MergeContext<'_>,
) -> ConfigResult<()> {
  bind_rule(config, "module-bind-post", name, binding, Some(Enforce::Post))
}

// --- Define

fn define(definitions: &mut Group, name: Option<&str>, value: &str) {
  match name {
    Some(name) => definitions.insert(name.to_string(), Value::String(value.to_string())),
    None => definitions.insert(value.to_string(), Value::Bool(true)),
  };
}

fn define_plugin(config: &mut Configuration, definitions: Group) {
  config.add_plugin(DefinePlugin::new(definitions).into());
}

// --- Output

fn resolve_path(value: &str, cx: &MergeContext<'_>) -> PathBuf {
  Path::new(value).resolve_from(cx.cwd)
}

fn output_path(config: &mut Configuration, value: &str, cx: &MergeContext<'_>) -> ConfigResult<()> {
  config.output_mut().path = Some(resolve_path(value, cx));
  Ok(())
}

fn output_filename(
  config: &mut Configuration,
  value: &str,
  _: &MergeContext<'_>,
) -> ConfigResult<()> {
  config.output_mut().filename = Some(value.to_string());
  Ok(())
}

fn output_chunk_filename(
  config: &mut Configuration,
  value: &str,
  _: &MergeContext<'_>,
) -> ConfigResult<()> {
  config.output_mut().chunk_filename = Some(value.to_string());
  Ok(())
}

fn output_source_map_filename(
  config: &mut Configuration,
  value: &str,
  _: &MergeContext<'_>,
) -> ConfigResult<()> {
  config.output_mut().source_map_filename = Some(value.to_string());
  Ok(())
}

fn output_public_path(
  config: &mut Configuration,
  value: &str,
  _: &MergeContext<'_>,
) -> ConfigResult<()> {
  config.output_mut().public_path = Some(value.to_string());
  Ok(())
}

fn output_jsonp_function(
  config: &mut Configuration,
  value: &str,
  _: &MergeContext<'_>,
) -> ConfigResult<()> {
  config.output_mut().jsonp_function = Some(value.to_string());
  Ok(())
}

fn output_pathinfo(config: &mut Configuration, _: &MergeContext<'_>) -> ConfigResult<()> {
  config.output_mut().pathinfo = Some(true);
  Ok(())
}

fn output_library(
  config: &mut Configuration,
  value: &str,
  _: &MergeContext<'_>,
) -> ConfigResult<()> {
  config.output_mut().library = Some(Value::String(value.to_string()));
  Ok(())
}

fn output_library_target(
  config: &mut Configuration,
  value: &str,
  _: &MergeContext<'_>,
) -> ConfigResult<()> {
  config.output_mut().library_target = Some(value.to_string());
  Ok(())
}

// --- Records

fn records_input_path(
  config: &mut Configuration,
  value: &str,
  cx: &MergeContext<'_>,
) -> ConfigResult<()> {
  config.records_input_path = Some(resolve_path(value, cx));
  Ok(())
}

fn records_output_path(
  config: &mut Configuration,
  value: &str,
  cx: &MergeContext<'_>,
) -> ConfigResult<()> {
  config.records_output_path = Some(resolve_path(value, cx));
  Ok(())
}

fn records_path(
  config: &mut Configuration,
  value: &str,
  cx: &MergeContext<'_>,
) -> ConfigResult<()> {
  config.records_path = Some(resolve_path(value, cx));
  Ok(())
}

// --- Build behaviour

fn target(config: &mut Configuration, value: &str, _: &MergeContext<'_>) -> ConfigResult<()> {
  config.target = Some(value.to_string());
  Ok(())
}

fn cache(config: &mut Configuration, value: bool) {
  config.cache = Some(Value::Bool(value));
}

fn hot(config: &mut Configuration, _: &MergeContext<'_>) -> ConfigResult<()> {
  config.add_plugin(HotModuleReplacementPlugin.into());
  Ok(())
}

fn debug(config: &mut Configuration, _: &MergeContext<'_>) -> ConfigResult<()> {
  config.add_plugin(LoaderOptionsPlugin::debug().into());
  Ok(())
}

fn devtool(config: &mut Configuration, value: &str, _: &MergeContext<'_>) -> ConfigResult<()> {
  config.devtool = Some(Value::String(value.to_string()));
  Ok(())
}

fn bail(config: &mut Configuration, value: bool) {
  config.bail = Some(value);
}

fn profile(config: &mut Configuration, value: bool) {
  config.profile = Some(value);
}

// --- Resolve

fn resolve_alias(
  config: &mut Configuration,
  name: Option<&str>,
  value: &str,
  _: &MergeContext<'_>,
) -> ConfigResult<()> {
  let name = name.filter(|name| !name.is_empty());
  let name = name.ok_or(ConfigError::MissingAliasKey { flag: "resolve-alias" })?;
  config.resolve_mut().alias_mut().insert(name.to_string(), Value::String(value.to_string()));
  Ok(())
}

fn resolve_loader_alias(
  config: &mut Configuration,
  name: Option<&str>,
  value: &str,
  _: &MergeContext<'_>,
) -> ConfigResult<()> {
  let name = name.filter(|name| !name.is_empty());
  let name = name.ok_or(ConfigError::MissingAliasKey { flag: "resolve-loader-alias" })?;
  config
    .resolve_loader_mut()
    .alias_mut()
    .insert(name.to_string(), Value::String(value.to_string()));
  Ok(())
}

fn resolve_extensions(
  config: &mut Configuration,
  value: &ArgValue,
  _: &MergeContext<'_>,
) -> ConfigResult<()> {
  let extensions = match value {
    ArgValue::Seq(extensions) => extensions.clone(),
    ArgValue::Str(extensions) => {
      EXTENSIONS_SEPARATOR_RE.split(extensions).map(ToString::to_string).collect()
    }
    ArgValue::Bool(value) => {
      return Err(ConfigError::InvalidFlagValue {
        flag: "resolve-extensions",
        value: value.to_string(),
      });
    }
  };
  config.resolve_mut().extensions = Some(extensions);
  Ok(())
}

// --- Optimization

fn optimize_max_chunks(
  config: &mut Configuration,
  value: &str,
  _: &MergeContext<'_>,
) -> ConfigResult<()> {
  let max_chunks = parse_int(value).ok_or_else(|| ConfigError::InvalidFlagValue {
    flag: "optimize-max-chunks",
    value: value.to_string(),
  })?;
  config.add_plugin(LimitChunkCountPlugin { max_chunks }.into());
  Ok(())
}

fn optimize_min_chunk_size(
  config: &mut Configuration,
  value: &str,
  _: &MergeContext<'_>,
) -> ConfigResult<()> {
  let min_chunk_size = parse_int(value).ok_or_else(|| ConfigError::InvalidFlagValue {
    flag: "optimize-min-chunk-size",
    value: value.to_string(),
  })?;
  config.add_plugin(MinChunkSizePlugin { min_chunk_size }.into());
  Ok(())
}

fn optimize_minimize(config: &mut Configuration, _: &MergeContext<'_>) -> ConfigResult<()> {
  config.add_plugin(LoaderOptionsPlugin::minimize().into());
  Ok(())
}

// --- Plugins

fn prefetch(config: &mut Configuration, request: &str, _: &MergeContext<'_>) -> ConfigResult<()> {
  config.add_plugin(PrefetchPlugin::new(request).into());
  Ok(())
}

fn provide(config: &mut Configuration, value: &str, _: &MergeContext<'_>) -> ConfigResult<()> {
  let (name, request) = value.split_once('=').unwrap_or((value, value));
  config.add_plugin(ProvidePlugin::new(name, request).into());
  Ok(())
}

fn plugin(config: &mut Configuration, specifier: &str, cx: &MergeContext<'_>) -> ConfigResult<()> {
  let plugin = cx.plugins.load(specifier)?;
  config.add_plugin(plugin);
  Ok(())
}
