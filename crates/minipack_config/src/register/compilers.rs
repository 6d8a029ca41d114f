use std::{fmt::Debug, path::Path};

use minipack_common::RawConfigValue;

/// Turns the source of a config file into a raw configuration value.
pub trait SourceCompiler: Debug + Send + Sync {
  /// The module name the compiler is required by.
  fn name(&self) -> &str;

  /// The extensions the compiler installs itself for when it is loaded.
  fn extensions(&self) -> &[&'static str];

  fn compile(&self, source: &str, path: &Path) -> anyhow::Result<RawConfigValue>;
}

/// Plain JSON, always installed for `.json`.
#[derive(Debug, Default)]
pub struct JsonCompiler;

impl SourceCompiler for JsonCompiler {
  fn name(&self) -> &str {
    "json"
  }

  fn extensions(&self) -> &[&'static str] {
    &[".json"]
  }

  fn compile(&self, source: &str, _path: &Path) -> anyhow::Result<RawConfigValue> {
    Ok(RawConfigValue::from_value(serde_json::from_str(source)?))
  }
}

#[derive(Debug, Default)]
pub struct Json5Compiler;

impl SourceCompiler for Json5Compiler {
  fn name(&self) -> &str {
    "json5"
  }

  fn extensions(&self) -> &[&'static str] {
    &[".json5"]
  }

  fn compile(&self, source: &str, _path: &Path) -> anyhow::Result<RawConfigValue> {
    Ok(RawConfigValue::from_value(json5::from_str(source)?))
  }
}

#[derive(Debug, Default)]
pub struct TomlCompiler;

impl SourceCompiler for TomlCompiler {
  fn name(&self) -> &str {
    "toml"
  }

  fn extensions(&self) -> &[&'static str] {
    &[".toml"]
  }

  fn compile(&self, source: &str, _path: &Path) -> anyhow::Result<RawConfigValue> {
    Ok(RawConfigValue::from_value(toml::from_str(source)?))
  }
}

#[derive(Debug, Default)]
pub struct YamlCompiler;

impl SourceCompiler for YamlCompiler {
  fn name(&self) -> &str {
    "serde_yaml"
  }

  fn extensions(&self) -> &[&'static str] {
    &[".yaml", ".yml"]
  }

  fn compile(&self, source: &str, _path: &Path) -> anyhow::Result<RawConfigValue> {
    Ok(RawConfigValue::from_value(serde_yaml::from_str(source)?))
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn compile(compiler: &dyn SourceCompiler, source: &str) -> serde_json::Value {
    compiler.compile(source, Path::new("/project/minipack.config")).unwrap().to_value()
  }

  #[test]
  fn every_format_compiles_to_the_same_value() {
    let expected = json!({ "mode": "production", "output": { "filename": "[name].js" } });

    let json = r#"{ "mode": "production", "output": { "filename": "[name].js" } }"#;
    assert_eq!(compile(&JsonCompiler, json), expected);

    let json5 = "{ mode: 'production', output: { filename: '[name].js', }, // trailing\n }";
    assert_eq!(compile(&Json5Compiler, json5), expected);

    let toml = "mode = \"production\"\n\n[output]\nfilename = \"[name].js\"\n";
    assert_eq!(compile(&TomlCompiler, toml), expected);

    let yaml = "mode: production\noutput:\n  filename: '[name].js'\n";
    assert_eq!(compile(&YamlCompiler, yaml), expected);
  }

  #[test]
  fn syntax_errors_are_reported() {
    assert!(JsonCompiler.compile("{ mode: ", Path::new("a.json")).is_err());
    assert!(TomlCompiler.compile("mode = ", Path::new("a.toml")).is_err());
  }
}
