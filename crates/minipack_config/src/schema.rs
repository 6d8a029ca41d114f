use std::path::Path;

use serde_json::{Map, Value};

use minipack_common::RulePattern;
use minipack_error::{ValidationError, ValidationErrors};

/// Checks the shape of a loaded configuration before anything reads from it.
pub trait SchemaValidator: Send + Sync {
  fn validate(&self, value: &Value) -> ValidationErrors;
}

/// The schema of the options `Configuration` models. Unknown keys are accepted and handed
/// to the build engine as they are.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigurationSchema;

impl SchemaValidator for ConfigurationSchema {
  fn validate(&self, value: &Value) -> ValidationErrors {
    let mut checker = Checker::default();
    match value {
      Value::Array(items) => {
        for (idx, item) in items.iter().enumerate() {
          checker.configuration(&format!("[{idx}]"), item);
        }
      }
      _ => checker.configuration("", value),
    }
    checker.errors
  }
}

#[derive(Default)]
struct Checker {
  errors: ValidationErrors,
}

impl Checker {
  fn error(&mut self, path: &str, message: impl Into<String>) {
    self.errors.push(ValidationError::new(path, message));
  }

  fn object<'a>(&mut self, path: &str, value: &'a Value) -> Option<&'a Map<String, Value>> {
    let object = value.as_object();
    if object.is_none() {
      self.error(path, "should be an object.");
    }
    object
  }

  fn configuration(&mut self, path: &str, value: &Value) {
    let Some(config) = self.object(path, value) else { return };

    for (key, value) in config {
      let path = format!("{path}.{key}");
      match key.as_str() {
        "name" | "target" => self.string(&path, value),
        "mode" => self.one_of(&path, value, &["development", "production", "none"]),
        "context" | "recordsInputPath" | "recordsOutputPath" | "recordsPath" => {
          self.absolute_path(&path, value);
        }
        "entry" => self.entry(&path, value),
        "output" => self.output(&path, value),
        "module" => self.module(&path, value),
        "resolve" | "resolveLoader" => self.resolve(&path, value),
        "plugins" => self.plugins(&path, value),
        "devtool" => {
          if !(value.is_string() || value == &Value::Bool(false)) {
            self.error(&path, "should be a string or false.");
          }
        }
        "cache" => {
          if !(value.is_boolean() || value.is_object()) {
            self.error(&path, "should be a boolean or an object.");
          }
        }
        "bail" | "profile" | "watch" => self.boolean(&path, value),
        "watchOptions" => self.watch_options(&path, value),
        _ => {}
      }
    }
  }

  fn string(&mut self, path: &str, value: &Value) {
    if !value.is_string() {
      self.error(path, "should be a string.");
    }
  }

  fn boolean(&mut self, path: &str, value: &Value) {
    if !value.is_boolean() {
      self.error(path, "should be a boolean.");
    }
  }

  fn non_negative_integer(&mut self, path: &str, value: &Value) {
    if value.as_u64().is_none() {
      self.error(path, "should be a non-negative integer.");
    }
  }

  fn one_of(&mut self, path: &str, value: &Value, allowed: &[&str]) {
    if !value.as_str().is_some_and(|value| allowed.contains(&value)) {
      let allowed = allowed.iter().map(|value| format!("\"{value}\"")).collect::<Vec<_>>();
      self.error(path, format!("should be one of {}.", allowed.join(", ")));
    }
  }

  fn absolute_path(&mut self, path: &str, value: &Value) {
    match value.as_str() {
      Some(dir) if Path::new(dir).is_absolute() => {}
      Some(dir) => {
        self.error(path, format!("The provided value \"{dir}\" is not an absolute path!"));
      }
      None => self.error(path, "should be a string."),
    }
  }

  fn non_empty_string(&mut self, path: &str, value: &Value) {
    if value.as_str().is_none_or(str::is_empty) {
      self.error(path, "should be a non-empty string.");
    }
  }

  fn entry_item(&mut self, path: &str, value: &Value) {
    match value {
      Value::Array(items) if items.is_empty() => self.error(path, "should not be empty."),
      Value::Array(items) => {
        for (idx, item) in items.iter().enumerate() {
          self.non_empty_string(&format!("{path}[{idx}]"), item);
        }
      }
      _ => self.non_empty_string(path, value),
    }
  }

  fn entry(&mut self, path: &str, value: &Value) {
    match value {
      Value::Object(named) => {
        if named.is_empty() {
          self.error(path, "should not be empty.");
        }
        for (name, item) in named {
          self.entry_item(&format!("{path}['{name}']"), item);
        }
      }
      _ => self.entry_item(path, value),
    }
  }

  fn output(&mut self, path: &str, value: &Value) {
    let Some(output) = self.object(path, value) else { return };
    for (key, value) in output {
      let path = format!("{path}.{key}");
      match key.as_str() {
        "path" => self.absolute_path(&path, value),
        "filename"
        | "chunkFilename"
        | "sourceMapFilename"
        | "publicPath"
        | "jsonpFunction"
        | "libraryTarget" => self.string(&path, value),
        "pathinfo" => self.boolean(&path, value),
        "library" => {
          if !(value.is_string() || value.is_array() || value.is_object()) {
            self.error(&path, "should be a string, an array or an object.");
          }
        }
        _ => {}
      }
    }
  }

  fn module(&mut self, path: &str, value: &Value) {
    let Some(module) = self.object(path, value) else { return };
    let Some(rules) = module.get("rules") else { return };

    let path = format!("{path}.rules");
    let Some(rules) = rules.as_array() else {
      self.error(&path, "should be an array.");
      return;
    };

    for (idx, rule) in rules.iter().enumerate() {
      let path = format!("{path}[{idx}]");
      let Some(rule) = self.object(&path, rule) else { continue };

      if let Some(test) = rule.get("test") {
        let path = format!("{path}.test");
        match test.as_str() {
          Some(source) => {
            if let Err(err) = RulePattern::new(source) {
              self.error(&path, format!("should be a valid regular expression ({err})."));
            }
          }
          None => self.error(&path, "should be a string."),
        }
      }
      if let Some(loader) = rule.get("loader") {
        self.non_empty_string(&format!("{path}.loader"), loader);
      }
      if let Some(enforce) = rule.get("enforce") {
        self.one_of(&format!("{path}.enforce"), enforce, &["pre", "post"]);
      }
    }
  }

  fn resolve(&mut self, path: &str, value: &Value) {
    let Some(resolve) = self.object(path, value) else { return };
    if let Some(alias) = resolve.get("alias") {
      self.object(&format!("{path}.alias"), alias);
    }
    if let Some(extensions) = resolve.get("extensions") {
      let path = format!("{path}.extensions");
      match extensions.as_array() {
        Some(extensions) => {
          for (idx, extension) in extensions.iter().enumerate() {
            self.string(&format!("{path}[{idx}]"), extension);
          }
        }
        None => self.error(&path, "should be an array."),
      }
    }
  }

  fn plugins(&mut self, path: &str, value: &Value) {
    let Some(plugins) = value.as_array() else {
      self.error(path, "should be an array.");
      return;
    };

    for (idx, plugin) in plugins.iter().enumerate() {
      let path = format!("{path}[{idx}]");
      let Some(plugin) = self.object(&path, plugin) else { continue };
      match plugin.get("name") {
        Some(name) => self.non_empty_string(&format!("{path}.name"), name),
        None => self.error(&path, "misses the property 'name'."),
      }
      if let Some(plugin_path) = plugin.get("path") {
        self.string(&format!("{path}.path"), plugin_path);
      }
    }
  }

  fn watch_options(&mut self, path: &str, value: &Value) {
    let Some(watch_options) = self.object(path, value) else { return };
    for (key, value) in watch_options {
      let path = format!("{path}.{key}");
      match key.as_str() {
        "aggregateTimeout" => self.non_negative_integer(&path, value),
        "poll" => {
          if !(value.is_boolean() || value.is_u64()) {
            self.error(&path, "should be a boolean or a non-negative integer.");
          }
        }
        "stdin" => self.boolean(&path, value),
        _ => {}
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn messages(value: &Value) -> Vec<String> {
    ConfigurationSchema.validate(value).iter().map(ToString::to_string).collect()
  }

  #[test]
  fn accepts_valid_configurations() {
    let config = json!({
      "name": "client",
      "mode": "production",
      "entry": { "main": "./src/index.js", "vendor": ["react", "react-dom"] },
      "output": { "path": "/project/dist", "filename": "[name].js", "pathinfo": true },
      "module": { "rules": [{ "test": "\\.css$", "loader": "css-loader", "enforce": "pre" }] },
      "resolve": { "alias": { "@": "./src" }, "extensions": [".js", ".json"] },
      "plugins": [{ "name": "DefinePlugin", "options": { "DEBUG": true } }],
      "devtool": false,
      "watchOptions": { "aggregateTimeout": 300, "poll": 1000 },
      "optimization": { "splitChunks": false },
    });
    assert!(messages(&config).is_empty());
    assert!(messages(&json!([config, {}])).is_empty());
  }

  #[test]
  fn collects_every_error() {
    let config = json!({
      "mode": "fast",
      "entry": "",
      "output": { "path": "dist" },
      "module": { "rules": [{ "test": "(", "enforce": "middle" }] },
      "watchOptions": { "poll": "often" },
    });
    let messages = messages(&config);
    assert_eq!(messages.len(), 6);
    assert_eq!(
      messages[0],
      "configuration.mode should be one of \"development\", \"production\", \"none\"."
    );
    assert_eq!(messages[1], "configuration.entry should be a non-empty string.");
    assert_eq!(
      messages[2],
      "configuration.output.path The provided value \"dist\" is not an absolute path!"
    );
    assert!(messages[3]
      .starts_with("configuration.module.rules[0].test should be a valid regular expression"));
    assert_eq!(
      messages[4],
      "configuration.module.rules[0].enforce should be one of \"pre\", \"post\"."
    );
    assert_eq!(
      messages[5],
      "configuration.watchOptions.poll should be a boolean or a non-negative integer."
    );
  }

  #[test]
  fn multi_configurations_report_their_index() {
    assert_eq!(
      messages(&json!([{}, { "bail": "yes" }, 3])),
      ["configuration[1].bail should be a boolean.", "configuration[2] should be an object."]
    );
  }

  #[test]
  fn root_must_be_an_object() {
    assert_eq!(messages(&json!("minipack.config.js")), ["configuration should be an object."]);
  }
}
