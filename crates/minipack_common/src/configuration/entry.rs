use serde::{Deserialize, Serialize};

use minipack_utils::indexmap::FxIndexMap;

/// One bundle's entry modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryItem {
  Single(String),
  Multi(Vec<String>),
}

impl EntryItem {
  /// Appends `request`, promoting a single request to a sequence first.
  pub fn push(&mut self, request: String) {
    match self {
      Self::Single(existing) => {
        let existing = std::mem::take(existing);
        *self = Self::Multi(vec![existing, request]);
      }
      Self::Multi(requests) => requests.push(request),
    }
  }

  pub fn requests(&self) -> &[String] {
    match self {
      Self::Single(request) => std::slice::from_ref(request),
      Self::Multi(requests) => requests,
    }
  }
}

impl From<&str> for EntryItem {
  fn from(value: &str) -> Self {
    Self::Single(value.to_string())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
  Single(String),
  Multi(Vec<String>),
  Named(FxIndexMap<String, EntryItem>),
}

impl Entry {
  /// The bundle name a bare entry is filed under once it becomes a mapping.
  pub const MAIN: &'static str = "main";

  /// Returns the bundle mapping, turning a bare entry into `{ main: <entry> }` first.
  pub fn named_mut(&mut self) -> &mut FxIndexMap<String, EntryItem> {
    if !matches!(self, Self::Named(_)) {
      let main = match std::mem::replace(self, Self::Named(FxIndexMap::default())) {
        Self::Single(request) => EntryItem::Single(request),
        Self::Multi(requests) => EntryItem::Multi(requests),
        Self::Named(_) => unreachable!(),
      };
      if let Self::Named(named) = self {
        named.insert(Self::MAIN.to_string(), main);
      }
    }

    match self {
      Self::Named(named) => named,
      Self::Single(_) | Self::Multi(_) => unreachable!(),
    }
  }
}
