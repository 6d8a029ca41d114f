use std::path::{Path, PathBuf};

use minipack_common::{ArgValue, CliArguments, CompiledConfiguration, WatchOptions, WatchPoll};
use minipack_utils::path_ext::PathExt;
use serde_json::Number;

use crate::merge::MergeContext;

/// Settles the options that belong to the whole compile: `context` and the watch flags.
pub fn normalize(
  mut compiled: CompiledConfiguration,
  cx: &MergeContext<'_>,
) -> CompiledConfiguration {
  let context = cx.args.get_str("context").map(|context| Path::new(context).resolve_from(cx.cwd));

  match &mut compiled {
    CompiledConfiguration::Single(config) => {
      let own = config.context.take();
      config.context = Some(resolve_context(context, own, cx.cwd));
      apply_watch_flags(cx.args, &mut config.watch, &mut config.watch_options);
    }
    CompiledConfiguration::Multi(multi) => {
      multi.context = resolve_context(context, None, cx.cwd);
      apply_watch_flags(cx.args, &mut multi.watch, &mut multi.watch_options);
    }
  }

  compiled
}

fn resolve_context(flag: Option<PathBuf>, own: Option<PathBuf>, cwd: &Path) -> PathBuf {
  flag.or(own).unwrap_or_else(|| cwd.to_path_buf())
}

fn apply_watch_flags(
  args: &CliArguments,
  watch: &mut Option<bool>,
  watch_options: &mut Option<WatchOptions>,
) {
  if args.is_truthy("watch") {
    *watch = Some(true);
  }

  if let Some(value) = args.get("watch-aggregate-timeout").filter(|value| value.is_truthy()) {
    match value.last_str().and_then(to_number) {
      Some(timeout) => {
        watch_options.get_or_insert_with(WatchOptions::default).aggregate_timeout = Some(timeout);
      }
      None => tracing::warn!("Ignoring non-numeric --watch-aggregate-timeout {value:?}"),
    }
  }

  if let Some(value) = args.get("watch-poll") {
    match watch_poll(value) {
      Some(poll) => watch_options.get_or_insert_with(WatchOptions::default).poll = Some(poll),
      None => tracing::warn!("Ignoring --watch-poll {value:?}, expected true or an interval"),
    }
  }

  if args.is_truthy("watch-stdin") {
    watch_options.get_or_insert_with(WatchOptions::default).stdin = Some(true);
    *watch = Some(true);
  }
}

fn watch_poll(value: &ArgValue) -> Option<WatchPoll> {
  match value {
    ArgValue::Bool(true) => Some(WatchPoll::Enabled(true)),
    ArgValue::Bool(false) => Some(WatchPoll::Interval(Number::from(0))),
    ArgValue::Str(_) | ArgValue::Seq(_) => match value.last_str()? {
      "true" | "" => Some(WatchPoll::Enabled(true)),
      interval => to_number(interval).map(WatchPoll::Interval),
    },
  }
}

/// Reads a decimal number, keeping integers integral. Surrounding whitespace is ignored.
fn to_number(value: &str) -> Option<Number> {
  let value = value.trim();
  if let Ok(int) = value.parse::<i64>() {
    return Some(Number::from(int));
  }
  // `f64::from_str` also takes words like `inf` and `NaN`.
  if !value.bytes().all(|byte| byte.is_ascii_digit() || b".eE+-".contains(&byte)) {
    return None;
  }
  value.parse::<f64>().ok().and_then(Number::from_f64)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn watch_poll_accepts_true_and_intervals() {
    assert_eq!(watch_poll(&ArgValue::from("250")), Some(WatchPoll::Interval(250.into())));
    assert_eq!(watch_poll(&ArgValue::from("true")), Some(WatchPoll::Enabled(true)));
    assert_eq!(watch_poll(&ArgValue::from("")), Some(WatchPoll::Enabled(true)));
    assert_eq!(watch_poll(&ArgValue::Bool(true)), Some(WatchPoll::Enabled(true)));
    assert_eq!(watch_poll(&ArgValue::from("often")), None);
  }

  #[test]
  fn watch_numbers_keep_decimals_and_signs() {
    let interval = |value: f64| Some(WatchPoll::Interval(Number::from_f64(value).unwrap()));
    assert_eq!(watch_poll(&ArgValue::from("1.5")), interval(1.5));
    assert_eq!(watch_poll(&ArgValue::from(" 2e3 ")), interval(2000.0));
    assert_eq!(watch_poll(&ArgValue::from("-1")), Some(WatchPoll::Interval((-1).into())));
    assert_eq!(watch_poll(&ArgValue::Bool(false)), Some(WatchPoll::Interval(0.into())));
    assert_eq!(watch_poll(&ArgValue::from("false")), None);
    assert_eq!(watch_poll(&ArgValue::from("inf")), None);
    assert_eq!(watch_poll(&ArgValue::from("NaN")), None);
  }

  #[test]
  fn watch_stdin_turns_watch_on() {
    let args = CliArguments::new().with("watch-stdin", true).with("watch-aggregate-timeout", "300");
    let (mut watch, mut watch_options) = (None, None);
    apply_watch_flags(&args, &mut watch, &mut watch_options);

    assert_eq!(watch, Some(true));
    let watch_options = watch_options.unwrap();
    assert_eq!(watch_options.stdin, Some(true));
    assert_eq!(watch_options.aggregate_timeout, Some(300.into()));
  }

  #[test]
  fn context_flag_wins_over_own_context() {
    let cwd = Path::new("/project");
    assert_eq!(
      resolve_context(Some(PathBuf::from("/flag")), Some(PathBuf::from("/own")), cwd),
      Path::new("/flag")
    );
    assert_eq!(resolve_context(None, Some(PathBuf::from("/own")), cwd), Path::new("/own"));
    assert_eq!(resolve_context(None, None, cwd), cwd);
  }
}
