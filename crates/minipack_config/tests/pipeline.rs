mod common;

use std::path::Path;

use minipack_common::WatchPoll;
use minipack_config::{
  merge::MergeContext,
  pipeline::{Pipeline, PipelineContext},
  CliArguments, ConfigError, ConfigurationSchema, PluginLoader, PrepareOptions, RawConfigValue,
};
use minipack_fs::OsFileSystem;
use minipack_plugin::PluginRegistry;
use minipack_resolver::Resolver;
use pretty_assertions::assert_eq;
use serde_json::json;

use common::Project;

/// Runs `raw` to completion one step at a time and returns the states it went through.
async fn trace_states(raw: RawConfigValue, cwd: &Path) -> Vec<&'static str> {
  let args = CliArguments::new();
  let resolver = Resolver::new(cwd.to_path_buf());
  let registry = PluginRegistry::new();
  let plugins = PluginLoader::new(cwd, &OsFileSystem, &resolver, &registry);
  let cx = PipelineContext {
    schema: &ConfigurationSchema,
    merge: MergeContext { args: &args, cwd, fs: &OsFileSystem, plugins: &plugins },
  };

  let mut pipeline = Pipeline::new(raw, &cx);
  let mut states = vec![];
  while !pipeline.is_done() {
    states.push(pipeline.state().name());
    pipeline = pipeline.step().await.unwrap();
  }
  states
}

#[tokio::test]
async fn deferred_default_export_settles_before_merging() {
  let project = Project::new();
  let raw = RawConfigValue::deferred(async {
    Ok(RawConfigValue::from_value(json!({ "default": { "name": "late", "entry": "./a.js" } })))
  });

  let states = trace_states(raw, project.path()).await;
  assert_eq!(
    states,
    ["validate", "deferred", "validate", "default-wrapped", "validate", "merge", "normalize"]
  );
}

#[tokio::test]
async fn plain_object_goes_straight_to_merge() {
  let project = Project::new();
  let raw = RawConfigValue::from_value(json!({ "name": "plain" }));
  assert_eq!(trace_states(raw, project.path()).await, ["validate", "merge", "normalize"]);
}

/// Hands every loaded config to the pipeline as a value that settles later.
struct Defer;

impl PrepareOptions for Defer {
  fn prepare(&self, value: RawConfigValue, _args: &CliArguments) -> RawConfigValue {
    RawConfigValue::deferred(async move { Ok(value) })
  }
}

/// Rejects every loaded config.
struct Reject;

impl PrepareOptions for Reject {
  fn prepare(&self, _value: RawConfigValue, _args: &CliArguments) -> RawConfigValue {
    RawConfigValue::deferred(async { Err(anyhow::anyhow!("config promise rejected")) })
  }
}

#[tokio::test]
async fn prepared_configs_are_awaited() {
  let project = Project::new();
  project.write("minipack.config.json", r#"{ "default": { "name": "wrapped" } }"#);

  let compiled = project
    .compiler()
    .with_prepare_options(Defer)
    .compile(&CliArguments::new())
    .await
    .unwrap();
  assert_eq!(compiled.as_single().unwrap().name.as_deref(), Some("wrapped"));

  let err = project
    .compiler()
    .with_prepare_options(Reject)
    .compile(&CliArguments::new())
    .await
    .unwrap_err();
  assert!(matches!(err, ConfigError::Deferred(_)));
}

fn write_named_configs(project: &Project) {
  project.write(
    "minipack.config.json",
    r#"[
      { "name": "client", "target": "web" },
      { "name": "server", "target": "node" },
      { "name": "client", "target": "electron-renderer" }
    ]"#,
  );
}

#[tokio::test]
async fn config_name_keeps_every_match() {
  let project = Project::new();
  write_named_configs(&project);

  let args = CliArguments::new().with("config-name", "client");
  let compiled = project.compile(&args).await.unwrap();
  let targets = compiled
    .configurations()
    .iter()
    .map(|config| config.target.as_deref())
    .collect::<Vec<_>>();
  assert_eq!(targets, [Some("web"), Some("electron-renderer")]);
  assert!(compiled.as_multi().is_some());
}

#[tokio::test]
async fn config_name_with_one_match_is_a_single_configuration() {
  let project = Project::new();
  write_named_configs(&project);

  let args = CliArguments::new().with("config-name", "server");
  let compiled = project.compile(&args).await.unwrap();
  assert_eq!(compiled.as_single().unwrap().target.as_deref(), Some("node"));
}

#[tokio::test]
async fn config_name_without_match_fails() {
  let project = Project::new();
  write_named_configs(&project);

  let args = CliArguments::new().with("config-name", "worker");
  let err = project.compile(&args).await.unwrap_err();
  assert_eq!(err.to_string(), "Configuration with name 'worker' was not found.");
  assert!(err.is_user_error());
}

#[tokio::test]
async fn schema_violations_are_reported_together() {
  let project = Project::new();
  project.write("minipack.config.json", r#"{ "mode": "fast", "output": { "path": "dist" } }"#);

  let err = project.compile(&CliArguments::new()).await.unwrap_err();
  let message = err.to_string();
  assert!(message.starts_with("Invalid configuration object."));
  assert!(message.contains("configuration.mode should be one of"));
  assert!(message.contains("The provided value \"dist\" is not an absolute path!"));
  assert!(message.contains("Received: object : {"));
  assert!(err.is_user_error());
}

#[tokio::test]
async fn watch_flags_apply_to_a_single_configuration() {
  let project = Project::new();
  let args = CliArguments::new()
    .with("watch-poll", "250")
    .with("watch-aggregate-timeout", "300")
    .with("watch-stdin", true);

  let compiled = project.compile(&args).await.unwrap();
  let config = compiled.as_single().unwrap();
  assert_eq!(config.watch, Some(true));

  let watch_options = config.watch_options.as_ref().unwrap();
  assert_eq!(watch_options.poll, Some(WatchPoll::Interval(250.into())));
  assert_eq!(watch_options.aggregate_timeout, Some(300.into()));
  assert_eq!(watch_options.stdin, Some(true));
}

#[tokio::test]
async fn fractional_watch_values_are_kept() {
  let project = Project::new();
  let args =
    CliArguments::new().with("watch-poll", "1.5").with("watch-aggregate-timeout", "-1");

  let compiled = project.compile(&args).await.unwrap();
  let watch_options = compiled.as_single().unwrap().watch_options.clone().unwrap();
  assert_eq!(
    serde_json::to_value(&watch_options).unwrap(),
    json!({ "aggregateTimeout": -1, "poll": 1.5 })
  );
}

#[tokio::test]
async fn watch_flags_apply_to_the_whole_multi_configuration() {
  let project = Project::new();
  write_named_configs(&project);

  let args = CliArguments::new().with("watch", true).with("watch-poll", true);
  let compiled = project.compile(&args).await.unwrap();
  let multi = compiled.as_multi().unwrap();

  assert_eq!(multi.watch, Some(true));
  assert_eq!(multi.watch_options.as_ref().unwrap().poll, Some(WatchPoll::Enabled(true)));
  assert!(multi.configurations.iter().all(|config| config.watch.is_none()));
}

#[tokio::test]
async fn context_flag_is_resolved_against_the_working_directory() {
  let project = Project::new();
  project.write("minipack.config.json", r#"{ "context": "/elsewhere" }"#);

  let compiled = project.compile(&CliArguments::new()).await.unwrap();
  assert_eq!(compiled.as_single().unwrap().context.as_deref(), Some(Path::new("/elsewhere")));

  let args = CliArguments::new().with("context", "app");
  let compiled = project.compile(&args).await.unwrap();
  assert_eq!(compiled.as_single().unwrap().context, Some(project.path().join("app")));
}
