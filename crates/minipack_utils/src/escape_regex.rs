use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;

static REGEX_META_CHARS_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"[\-\[\]/{}()*+?.\\^$|]").unwrap());

/// Escapes `-[]/{}()*+?.\^$|` so the input matches itself literally.
pub fn escape_regex(str: &str) -> Cow<'_, str> {
  REGEX_META_CHARS_RE.replace_all(str, r"\$0")
}

#[test]
fn test_escape_regex() {
  assert_eq!(escape_regex("jade"), "jade");
  assert_eq!(escape_regex("d.ts"), r"d\.ts");
  assert_eq!(escape_regex("a-b[c]{d}(e)*+?^$|/\\"), r"a\-b\[c\]\{d\}\(e\)\*\+\?\^\$\|\/\\");
}
