use minipack_utils::indexmap::FxIndexMap;

use crate::ArgValue;

/// Parsed command line: flags by their long name (without dashes) plus the positional
/// arguments in the order they were given.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CliArguments {
  flags: FxIndexMap<String, ArgValue>,
  positional: Vec<String>,
}

impl CliArguments {
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn with(mut self, flag: &str, value: impl Into<ArgValue>) -> Self {
    self.set(flag, value);
    self
  }

  #[must_use]
  pub fn with_positional<S>(mut self, positional: impl IntoIterator<Item = S>) -> Self
  where
    S: Into<String>,
  {
    self.positional.extend(positional.into_iter().map(Into::into));
    self
  }

  pub fn set(&mut self, flag: &str, value: impl Into<ArgValue>) {
    self.flags.insert(flag.to_string(), value.into());
  }

  /// Adds one more occurrence of `flag`, turning an existing value into a sequence.
  pub fn append(&mut self, flag: &str, value: impl Into<String>) {
    let value = value.into();
    match self.flags.shift_remove(flag) {
      None => self.set(flag, value),
      Some(existing) => {
        let mut values = existing.into_strings();
        values.push(value);
        self.set(flag, ArgValue::Seq(values));
      }
    }
  }

  pub fn get(&self, flag: &str) -> Option<&ArgValue> {
    self.flags.get(flag)
  }

  pub fn contains(&self, flag: &str) -> bool {
    self.flags.contains_key(flag)
  }

  /// The last string value of `flag`, the one that wins when a single value is expected.
  pub fn get_str(&self, flag: &str) -> Option<&str> {
    self.get(flag).and_then(ArgValue::last_str)
  }

  pub fn is_truthy(&self, flag: &str) -> bool {
    self.get(flag).is_some_and(ArgValue::is_truthy)
  }

  /// Every string value of `flag`, in the order given.
  pub fn get_all(&self, flag: &str) -> Vec<&str> {
    match self.get(flag) {
      Some(ArgValue::Str(value)) => vec![value.as_str()],
      Some(ArgValue::Seq(values)) => values.iter().map(String::as_str).collect(),
      Some(ArgValue::Bool(_)) | None => vec![],
    }
  }

  pub fn positional(&self) -> &[String] {
    &self.positional
  }

  pub fn flags(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
    self.flags.iter().map(|(flag, value)| (flag.as_str(), value))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn append_turns_repeated_flags_into_sequences() {
    let mut args = CliArguments::new();
    args.append("define", "A=1");
    assert_eq!(args.get("define"), Some(&ArgValue::Str("A=1".to_string())));

    args.append("define", "B=2");
    assert_eq!(args.get_all("define"), ["A=1", "B=2"]);
    assert_eq!(args.get_str("define"), Some("B=2"));
  }

  #[test]
  fn builder_keeps_positional_order() {
    let args = CliArguments::new().with("watch", true).with_positional(["./a.js", "b=./b.js"]);
    assert!(args.is_truthy("watch"));
    assert!(!args.is_truthy("hot"));
    assert_eq!(args.positional(), ["./a.js", "b=./b.js"]);
  }
}
