use std::fmt::Debug;

use futures::future::BoxFuture;
use serde_json::Value;

pub type DeferredConfig = BoxFuture<'static, anyhow::Result<RawConfigValue>>;

/// A loaded configuration before it has been normalized.
pub enum RawConfigValue {
  /// Plain data, normally a configuration object.
  Value(Value),
  /// A multi-config.
  Sequence(Vec<RawConfigValue>),
  /// A value that is only available once the future settles.
  Deferred(DeferredConfig),
  /// The payload found under an object's `default` key.
  DefaultWrapped(Box<RawConfigValue>),
}

impl RawConfigValue {
  /// Classifies loaded data. Arrays become sequences and an object whose `default` is an
  /// object or array becomes `DefaultWrapped`.
  pub fn from_value(value: Value) -> Self {
    match value {
      Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from_value).collect()),
      Value::Object(mut map)
        if map.get("default").is_some_and(|default| default.is_object() || default.is_array()) =>
      {
        let default = map.remove("default").unwrap_or_default();
        Self::DefaultWrapped(Box::new(Self::from_value(default)))
      }
      value => Self::Value(value),
    }
  }

  pub fn deferred(
    future: impl std::future::Future<Output = anyhow::Result<RawConfigValue>> + Send + 'static,
  ) -> Self {
    Self::Deferred(Box::pin(future))
  }

  pub fn empty_object() -> Self {
    Self::Value(Value::Object(serde_json::Map::new()))
  }

  /// The data this value would be seen as by a schema. A deferred value has no data yet and
  /// shows up as `null`.
  pub fn to_value(&self) -> Value {
    match self {
      Self::Value(value) => value.clone(),
      Self::Sequence(items) => Value::Array(items.iter().map(Self::to_value).collect()),
      Self::Deferred(_) => Value::Null,
      Self::DefaultWrapped(inner) => {
        let mut map = serde_json::Map::new();
        map.insert("default".to_string(), inner.to_value());
        Value::Object(map)
      }
    }
  }

  pub fn kind(&self) -> &'static str {
    match self {
      Self::Value(_) => "value",
      Self::Sequence(_) => "sequence",
      Self::Deferred(_) => "deferred",
      Self::DefaultWrapped(_) => "default-wrapped",
    }
  }
}

impl From<Value> for RawConfigValue {
  fn from(value: Value) -> Self {
    Self::from_value(value)
  }
}

impl Debug for RawConfigValue {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
      Self::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
      Self::Deferred(_) => f.write_str("Deferred(..)"),
      Self::DefaultWrapped(inner) => f.debug_tuple("DefaultWrapped").field(inner).finish(),
    }
  }
}
