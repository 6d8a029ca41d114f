/// The value of one command line flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
  Bool(bool),
  Str(String),
  /// The flag was given more than once.
  Seq(Vec<String>),
}

/// One element of an [`ArgValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgScalar<'a> {
  Bool(bool),
  Str(&'a str),
}

impl<'a> ArgScalar<'a> {
  /// JavaScript truthiness: `true` and non empty strings.
  pub fn is_truthy(self) -> bool {
    match self {
      Self::Bool(value) => value,
      Self::Str(value) => !value.is_empty(),
    }
  }

  pub fn as_str(self) -> Option<&'a str> {
    match self {
      Self::Str(value) => Some(value),
      Self::Bool(_) => None,
    }
  }
}

impl ArgValue {
  /// Every element paired with its position, `None` for a flag given once.
  pub fn scalars(&self) -> Vec<(Option<usize>, ArgScalar<'_>)> {
    match self {
      Self::Bool(value) => vec![(None, ArgScalar::Bool(*value))],
      Self::Str(value) => vec![(None, ArgScalar::Str(value))],
      Self::Seq(values) => {
        values.iter().enumerate().map(|(idx, value)| (Some(idx), ArgScalar::Str(value))).collect()
      }
    }
  }

  /// The last string given for the flag.
  pub fn last_str(&self) -> Option<&str> {
    match self {
      Self::Str(value) => Some(value),
      Self::Seq(values) => values.last().map(String::as_str),
      Self::Bool(_) => None,
    }
  }

  pub fn is_truthy(&self) -> bool {
    match self {
      Self::Bool(value) => *value,
      Self::Str(value) => !value.is_empty(),
      Self::Seq(_) => true,
    }
  }

  pub fn into_strings(self) -> Vec<String> {
    match self {
      Self::Bool(value) => vec![value.to_string()],
      Self::Str(value) => vec![value],
      Self::Seq(values) => values,
    }
  }
}

impl From<bool> for ArgValue {
  fn from(value: bool) -> Self {
    Self::Bool(value)
  }
}

impl From<&str> for ArgValue {
  fn from(value: &str) -> Self {
    Self::Str(value.to_string())
  }
}

impl From<String> for ArgValue {
  fn from(value: String) -> Self {
    Self::Str(value)
  }
}

impl<S: Into<String>> From<Vec<S>> for ArgValue {
  /// A single element stays a scalar, the way a flag given once is parsed.
  fn from(values: Vec<S>) -> Self {
    let mut values = values.into_iter().map(Into::into).collect::<Vec<String>>();
    if values.len() == 1 {
      Self::Str(values.remove(0))
    } else {
      Self::Seq(values)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn scalars_mark_single_values_without_index() {
    assert_eq!(ArgValue::from("a").scalars(), vec![(None, ArgScalar::Str("a"))]);
    assert_eq!(
      ArgValue::from(vec!["a", "b"]).scalars(),
      vec![(Some(0), ArgScalar::Str("a")), (Some(1), ArgScalar::Str("b"))]
    );
  }

  #[test]
  fn truthiness_follows_javascript() {
    assert!(ArgScalar::Str("false").is_truthy());
    assert!(!ArgScalar::Str("").is_truthy());
    assert!(!ArgScalar::Bool(false).is_truthy());
    assert!(!ArgValue::Bool(false).is_truthy());
  }

  #[test]
  fn single_element_vec_is_a_scalar() {
    assert_eq!(ArgValue::from(vec!["only"]), ArgValue::Str("only".to_string()));
  }
}
