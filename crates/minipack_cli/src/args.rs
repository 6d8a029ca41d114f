use clap::{ArgAction, Args};

use minipack_config::CliArguments;

use crate::types::mode::Mode;

#[derive(Args)]
pub struct ConfigArgs {
  /// Path to a config file. Repeat to compile several configurations.
  #[clap(long, action = ArgAction::Append)]
  pub config: Vec<String>,

  /// Only keep the configurations with this name.
  #[clap(long)]
  pub config_name: Option<String>,

  /// Module to load before the config files, e.g. a compiler for a new extension.
  #[clap(long, action = ArgAction::Append)]
  pub config_register: Vec<String>,

  #[clap(long)]
  pub context: Option<String>,

  #[clap(long)]
  pub mode: Option<Mode>,
}

#[derive(Args)]
pub struct InputArgs {
  /// Entry modules, `name=request` or a bare request for `main`.
  pub entries: Vec<String>,

  #[clap(long, action = ArgAction::Append)]
  pub entry: Vec<String>,

  #[clap(long, action = ArgAction::Append)]
  pub module_bind: Vec<String>,

  #[clap(long, action = ArgAction::Append)]
  pub module_bind_pre: Vec<String>,

  #[clap(long, action = ArgAction::Append)]
  pub module_bind_post: Vec<String>,

  #[clap(long, action = ArgAction::Append)]
  pub resolve_alias: Vec<String>,

  #[clap(long, action = ArgAction::Append)]
  pub resolve_loader_alias: Vec<String>,

  #[clap(long, action = ArgAction::Append)]
  pub resolve_extensions: Vec<String>,
}

#[derive(Args)]
pub struct OutputArgs {
  /// Shorthand for `--output-path` and `--output-filename`.
  #[clap(long, short = 'o')]
  pub output: Option<String>,

  #[clap(long)]
  pub output_path: Option<String>,

  #[clap(long)]
  pub output_filename: Option<String>,

  #[clap(long)]
  pub output_chunk_filename: Option<String>,

  #[clap(long)]
  pub output_source_map_filename: Option<String>,

  #[clap(long)]
  pub output_public_path: Option<String>,

  #[clap(long)]
  pub output_jsonp_function: Option<String>,

  #[clap(long)]
  pub output_pathinfo: bool,

  #[clap(long)]
  pub output_library: Option<String>,

  #[clap(long)]
  pub output_library_target: Option<String>,

  #[clap(long)]
  pub records_input_path: Option<String>,

  #[clap(long)]
  pub records_output_path: Option<String>,

  #[clap(long)]
  pub records_path: Option<String>,
}

#[derive(Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct EnhanceArgs {
  /// Development shortcut: debug, pathinfo and a cheap source map.
  #[clap(short = 'd')]
  pub development: bool,

  /// Production shortcut: minimize and define NODE_ENV.
  #[clap(short = 'p')]
  pub production: bool,

  #[clap(long)]
  pub target: Option<String>,

  #[clap(long)]
  pub devtool: Option<String>,

  #[clap(long, num_args = 0..=1, default_missing_value = "true")]
  pub cache: Option<bool>,

  #[clap(long, num_args = 0..=1, default_missing_value = "true")]
  pub bail: Option<bool>,

  #[clap(long, num_args = 0..=1, default_missing_value = "true")]
  pub profile: Option<bool>,

  #[clap(long)]
  pub hot: bool,

  #[clap(long)]
  pub debug: bool,

  #[clap(long, action = ArgAction::Append)]
  pub define: Vec<String>,

  #[clap(long, action = ArgAction::Append)]
  pub provide: Vec<String>,

  #[clap(long, action = ArgAction::Append)]
  pub prefetch: Vec<String>,

  /// Plugin to instantiate, `name?query`.
  #[clap(long, action = ArgAction::Append)]
  pub plugin: Vec<String>,

  #[clap(long)]
  pub optimize_max_chunks: Option<String>,

  #[clap(long)]
  pub optimize_min_chunk_size: Option<String>,

  #[clap(long)]
  pub optimize_minimize: bool,
}

#[derive(Args)]
pub struct WatchArgs {
  #[clap(long, short = 'w')]
  pub watch: bool,

  #[clap(long)]
  pub watch_aggregate_timeout: Option<String>,

  /// Poll for changes, optionally every given number of milliseconds.
  #[clap(long, num_args = 0..=1, default_missing_value = "true")]
  pub watch_poll: Option<String>,

  #[clap(long)]
  pub watch_stdin: bool,
}

/// Collects parsed flags under their long names.
#[derive(Default)]
pub struct ArgumentsBuilder {
  args: CliArguments,
}

impl ArgumentsBuilder {
  fn value(&mut self, flag: &str, value: Option<String>) -> &mut Self {
    if let Some(value) = value {
      self.args.set(flag, value);
    }
    self
  }

  fn values(&mut self, flag: &str, values: Vec<String>) -> &mut Self {
    if !values.is_empty() {
      self.args.set(flag, values);
    }
    self
  }

  fn switch(&mut self, flag: &str, on: bool) -> &mut Self {
    if on {
      self.args.set(flag, true);
    }
    self
  }

  fn tri_state(&mut self, flag: &str, value: Option<bool>) -> &mut Self {
    if let Some(value) = value {
      self.args.set(flag, value);
    }
    self
  }

  pub fn config(&mut self, args: ConfigArgs) -> &mut Self {
    self
      .values("config", args.config)
      .value("config-name", args.config_name)
      .values("config-register", args.config_register)
      .value("context", args.context)
      .value("mode", args.mode.map(|mode| minipack_common::Mode::from(mode).to_string()))
  }

  pub fn input(&mut self, args: InputArgs) -> &mut Self {
    self.args = std::mem::take(&mut self.args).with_positional(args.entries);
    self
      .values("entry", args.entry)
      .values("module-bind", args.module_bind)
      .values("module-bind-pre", args.module_bind_pre)
      .values("module-bind-post", args.module_bind_post)
      .values("resolve-alias", args.resolve_alias)
      .values("resolve-loader-alias", args.resolve_loader_alias)
      .values("resolve-extensions", args.resolve_extensions)
  }

  pub fn output(&mut self, args: OutputArgs) -> &mut Self {
    self
      .value("output", args.output)
      .value("output-path", args.output_path)
      .value("output-filename", args.output_filename)
      .value("output-chunk-filename", args.output_chunk_filename)
      .value("output-source-map-filename", args.output_source_map_filename)
      .value("output-public-path", args.output_public_path)
      .value("output-jsonp-function", args.output_jsonp_function)
      .switch("output-pathinfo", args.output_pathinfo)
      .value("output-library", args.output_library)
      .value("output-library-target", args.output_library_target)
      .value("records-input-path", args.records_input_path)
      .value("records-output-path", args.records_output_path)
      .value("records-path", args.records_path)
  }

  pub fn enhance(&mut self, args: EnhanceArgs) -> &mut Self {
    self
      .switch("d", args.development)
      .switch("p", args.production)
      .value("target", args.target)
      .value("devtool", args.devtool)
      .tri_state("cache", args.cache)
      .tri_state("bail", args.bail)
      .tri_state("profile", args.profile)
      .switch("hot", args.hot)
      .switch("debug", args.debug)
      .values("define", args.define)
      .values("provide", args.provide)
      .values("prefetch", args.prefetch)
      .values("plugin", args.plugin)
      .value("optimize-max-chunks", args.optimize_max_chunks)
      .value("optimize-min-chunk-size", args.optimize_min_chunk_size)
      .switch("optimize-minimize", args.optimize_minimize)
  }

  pub fn watch(&mut self, args: WatchArgs) -> &mut Self {
    self
      .switch("watch", args.watch)
      .value("watch-aggregate-timeout", args.watch_aggregate_timeout)
      .value("watch-poll", args.watch_poll)
      .switch("watch-stdin", args.watch_stdin)
  }

  pub fn build(&mut self) -> CliArguments {
    std::mem::take(&mut self.args)
  }
}
