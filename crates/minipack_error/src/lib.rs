use std::{
  fmt::{self, Display},
  ops::{Deref, DerefMut},
  path::PathBuf,
};

/// A single schema violation. `path` is a dotted/indexed property path below the
/// configuration root, e.g. `.output.path` or `[1].entry`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
  pub path: String,
  pub message: String,
}

impl ValidationError {
  pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
    Self { path: path.into(), message: message.into() }
  }
}

impl Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "configuration{} {}", self.path, self.message)
  }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl Deref for ValidationErrors {
  type Target = Vec<ValidationError>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for ValidationErrors {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl From<Vec<ValidationError>> for ValidationErrors {
  fn from(errors: Vec<ValidationError>) -> Self {
    Self(errors)
  }
}

impl Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Invalid configuration object. minipack has been initialised using a configuration \
       object that does not match the API schema."
    )?;
    for error in &self.0 {
      write!(f, "\n - {error}")?;
    }
    Ok(())
  }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("{errors}\nReceived: {received_type} : {received}")]
  InvalidConfiguration { errors: ValidationErrors, received_type: &'static str, received: String },

  #[error("Configuration with name '{0}' was not found.")]
  ConfigNameNotFound(String),

  #[error("--{flag} <string>=<string>")]
  MissingAliasKey { flag: &'static str },

  #[error("Invalid value '{value}' for --{flag}.")]
  InvalidFlagValue { flag: &'static str, value: String },

  #[error("Invalid plugin arguments {name} ({reason}).")]
  InvalidPluginArguments { name: String, reason: String },

  #[error("Cannot resolve plugin {name}.")]
  UnresolvablePlugin {
    name: String,
    #[source]
    source: anyhow::Error,
  },

  #[error("Cannot load plugin {name}. ({})", .path.display())]
  PluginLoad {
    name: String,
    path: PathBuf,
    #[source]
    source: anyhow::Error,
  },

  #[error("Cannot instantiate plugin {name}. ({})", .path.display())]
  PluginInstantiate {
    name: String,
    path: PathBuf,
    #[source]
    source: anyhow::Error,
  },

  #[error("Cannot load the config compiler for {ext}")]
  CompilerModule {
    ext: String,
    #[source]
    source: anyhow::Error,
  },

  #[error("Cannot load config register module '{name}'")]
  ConfigRegister {
    name: String,
    #[source]
    source: anyhow::Error,
  },

  #[error("No compiler is registered for '{ext}', unable to load {}", .path.display())]
  UnsupportedExtension { path: PathBuf, ext: String },

  #[error("Failed to read config file {}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to compile config file {}", .path.display())]
  Compile {
    path: PathBuf,
    #[source]
    source: anyhow::Error,
  },

  #[error("Deferred configuration was rejected")]
  Deferred(#[source] anyhow::Error),
}

impl ConfigError {
  /// User and configuration mistakes. These end in a controlled exit with a short
  /// message, everything else carries a source chain worth printing.
  pub fn is_user_error(&self) -> bool {
    matches!(
      self,
      Self::InvalidConfiguration { .. }
        | Self::ConfigNameNotFound(_)
        | Self::MissingAliasKey { .. }
        | Self::InvalidFlagValue { .. }
        | Self::InvalidPluginArguments { .. }
        | Self::UnresolvablePlugin { .. }
    )
  }

  /// Failures raised while requiring or constructing a plugin module.
  pub fn is_module_load_error(&self) -> bool {
    matches!(self, Self::PluginLoad { .. } | Self::PluginInstantiate { .. })
  }

  pub fn invalid_configuration(errors: ValidationErrors, received: &serde_json::Value) -> Self {
    let received_type = match received {
      serde_json::Value::Null => "null",
      serde_json::Value::Bool(_) => "boolean",
      serde_json::Value::Number(_) => "number",
      serde_json::Value::String(_) => "string",
      serde_json::Value::Array(_) => "array",
      serde_json::Value::Object(_) => "object",
    };
    let received =
      serde_json::to_string_pretty(received).unwrap_or_else(|_| received.to_string());
    Self::InvalidConfiguration { errors, received_type, received }
  }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn invalid_configuration_lists_every_error() {
    let errors = ValidationErrors::from(vec![
      ValidationError::new(".mode", "should be one of \"development\", \"production\", \"none\"."),
      ValidationError::new(".output.path", "should be a string."),
    ]);
    let error = ConfigError::invalid_configuration(errors, &serde_json::json!({ "mode": 1 }));
    let message = error.to_string();

    assert!(message.starts_with("Invalid configuration object."));
    assert!(message.contains("\n - configuration.mode should be one of"));
    assert!(message.contains("\n - configuration.output.path should be a string."));
    assert!(message.contains("Received: object : {\n  \"mode\": 1\n}"));
    assert!(error.is_user_error());
  }

  #[test]
  fn missing_alias_key_renders_usage() {
    let error = ConfigError::MissingAliasKey { flag: "resolve-alias" };
    assert_eq!(error.to_string(), "--resolve-alias <string>=<string>");
  }

  #[test]
  fn plugin_load_is_not_a_user_error() {
    let error = ConfigError::PluginLoad {
      name: "banner".to_string(),
      path: PathBuf::from("/project/node_modules/banner/index.js"),
      source: anyhow::anyhow!("boom"),
    };
    assert!(!error.is_user_error());
    assert!(error.is_module_load_error());
    assert_eq!(
      error.to_string(),
      "Cannot load plugin banner. (/project/node_modules/banner/index.js)"
    );
  }
}
