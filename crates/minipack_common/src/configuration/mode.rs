use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
  Development,
  Production,
  None,
}

impl FromStr for Mode {
  type Err = String;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value {
      "development" => Ok(Self::Development),
      "production" => Ok(Self::Production),
      "none" => Ok(Self::None),
      _ => Err(format!("unknown mode '{value}'")),
    }
  }
}

impl Display for Mode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Development => write!(f, "development"),
      Self::Production => write!(f, "production"),
      Self::None => write!(f, "none"),
    }
  }
}
