use std::fmt::Display;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A rule's `test`, serialized as the regex source.
#[derive(Debug, Clone)]
pub struct RulePattern(Regex);

impl RulePattern {
  pub fn new(source: &str) -> Result<Self, regex::Error> {
    Regex::new(source).map(Self)
  }

  pub fn as_str(&self) -> &str {
    self.0.as_str()
  }

  pub fn is_match(&self, path: &str) -> bool {
    self.0.is_match(path)
  }
}

impl PartialEq for RulePattern {
  fn eq(&self, other: &Self) -> bool {
    self.as_str() == other.as_str()
  }
}

impl Display for RulePattern {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "/{}/", self.as_str())
  }
}

impl Serialize for RulePattern {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}

impl<'de> Deserialize<'de> for RulePattern {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let source = String::deserialize(deserializer)?;
    Self::new(&source).map_err(serde::de::Error::custom)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Enforce {
  Pre,
  Post,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub test: Option<RulePattern>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub loader: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub enforce: Option<Enforce>,

  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl Rule {
  pub fn new(test: RulePattern, loader: String, enforce: Option<Enforce>) -> Self {
    Self { test: Some(test), loader: Some(loader), enforce, extra: Map::new() }
  }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleOptions {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rules: Option<Vec<Rule>>,

  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl ModuleOptions {
  pub fn rules_mut(&mut self) -> &mut Vec<Rule> {
    self.rules.get_or_insert_with(Vec::new)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rule_test_is_stored_as_regex_source() {
    let rule: Rule =
      serde_json::from_str(r#"{ "test": "\\.css$", "use": ["css-loader"] }"#).unwrap();
    let test = rule.test.as_ref().unwrap();
    assert!(test.is_match("src/app.css"));
    assert!(!test.is_match("src/app.css.map"));
    assert!(rule.extra.contains_key("use"));

    let value = serde_json::to_value(&rule).unwrap();
    assert_eq!(value["test"], r"\.css$");
  }

  #[test]
  fn invalid_rule_test_fails_to_deserialize() {
    assert!(serde_json::from_str::<Rule>(r#"{ "test": "(" }"#).is_err());
  }
}
