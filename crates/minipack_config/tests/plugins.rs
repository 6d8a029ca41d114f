mod common;

use minipack_common::Plugin;
use minipack_config::{CliArguments, ConfigError};
use minipack_plugin::PluginRegistry;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::Project;

fn banner(args: Option<&Value>) -> anyhow::Result<Plugin> {
  Ok(Plugin::new("BannerPlugin").with_options(args.cloned().unwrap_or(Value::Null)))
}

fn broken(_args: Option<&Value>) -> anyhow::Result<Plugin> {
  anyhow::bail!("banner text is required")
}

fn project_with_plugin() -> Project {
  let project = Project::new();
  project.write(
    "node_modules/minipack-banner-plugin/package.json",
    r#"{ "name": "minipack-banner-plugin", "main": "index.js" }"#,
  );
  project.write("node_modules/minipack-banner-plugin/index.js", "");
  project
}

#[tokio::test]
async fn plugins_are_instantiated_with_query_arguments() {
  let project = project_with_plugin();
  let registry = PluginRegistry::new().with("minipack-banner-plugin", banner);

  let args = CliArguments::new().with("plugin", "minipack-banner-plugin?text=hello&+raw");
  let compiled = project.compiler().with_plugin_host(registry).compile(&args).await.unwrap();

  let plugins = compiled.as_single().unwrap().plugins.clone().unwrap();
  assert_eq!(plugins.len(), 1);
  assert_eq!(plugins[0].name, "BannerPlugin");
  assert_eq!(plugins[0].options, json!({ "text": "hello", "raw": true }));
  let path = plugins[0].path.as_ref().unwrap();
  assert!(path.ends_with("node_modules/minipack-banner-plugin/index.js"));
}

#[tokio::test]
async fn json_query_arguments() {
  let project = project_with_plugin();
  let registry = PluginRegistry::new().with("minipack-banner-plugin", banner);

  let specifier = "minipack-banner-plugin?{ text: 'hi', lines: [1] }";
  let args = CliArguments::new().with("plugin", specifier);
  let compiled = project.compiler().with_plugin_host(registry).compile(&args).await.unwrap();
  let plugins = compiled.as_single().unwrap().plugins.clone().unwrap();
  assert_eq!(plugins[0].options, json!({ "text": "hi", "lines": [1] }));
}

#[tokio::test]
async fn malformed_arguments_name_the_whole_specifier() {
  let project = project_with_plugin();
  let registry = PluginRegistry::new().with("minipack-banner-plugin", banner);

  let args = CliArguments::new().with("plugin", "minipack-banner-plugin?{ text: }");
  let err = project.compiler().with_plugin_host(registry).compile(&args).await.unwrap_err();
  assert!(matches!(
    &err,
    ConfigError::InvalidPluginArguments { name, .. } if name == "minipack-banner-plugin?{ text: }"
  ));
  assert!(err.is_user_error());
}

#[tokio::test]
async fn broken_percent_escapes_are_invalid_arguments() {
  let project = project_with_plugin();
  let registry = PluginRegistry::new().with("minipack-banner-plugin", banner);

  let args = CliArguments::new().with("plugin", "minipack-banner-plugin?text=%E0%A4%A");
  let err = project.compiler().with_plugin_host(registry).compile(&args).await.unwrap_err();
  assert!(matches!(err, ConfigError::InvalidPluginArguments { .. }));
  assert!(err.is_user_error());
}

#[tokio::test]
async fn unresolvable_plugin() {
  let project = Project::new();
  let args = CliArguments::new().with("plugin", "minipack-missing-plugin");
  let err = project.compile(&args).await.unwrap_err();

  assert_eq!(err.to_string(), "Cannot resolve plugin minipack-missing-plugin.");
  assert!(err.is_user_error());
}

#[tokio::test]
async fn plugin_without_a_factory_fails_to_load() {
  let project = project_with_plugin();
  let args = CliArguments::new().with("plugin", "minipack-banner-plugin");
  let err = project.compile(&args).await.unwrap_err();

  assert!(matches!(&err, ConfigError::PluginLoad { name, .. } if name == "minipack-banner-plugin"));
  assert!(err.is_module_load_error());
  assert!(!err.is_user_error());
}

#[tokio::test]
async fn failing_factory_fails_to_instantiate() {
  let project = project_with_plugin();
  let registry = PluginRegistry::new().with("minipack-banner-plugin", broken);

  let args = CliArguments::new().with("plugin", "minipack-banner-plugin");
  let err = project.compiler().with_plugin_host(registry).compile(&args).await.unwrap_err();

  let ConfigError::PluginInstantiate { source, .. } = &err else { panic!("unexpected {err:?}") };
  assert_eq!(source.to_string(), "banner text is required");
  assert!(err.is_module_load_error());
}
