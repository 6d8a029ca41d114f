/// Parses a base 10 integer the way `parseInt(value, 10)` does: leading whitespace and an
/// optional sign are skipped, then digits are consumed until the first non digit.
///
/// Returns `None` where `parseInt` would produce `NaN`.
pub fn parse_int(value: &str) -> Option<i64> {
  let trimmed = value.trim_start();
  let (negative, rest) = match trimmed.as_bytes().first() {
    Some(b'-') => (true, &trimmed[1..]),
    Some(b'+') => (false, &trimmed[1..]),
    _ => (false, trimmed),
  };

  let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
  if digits == 0 {
    return None;
  }

  let parsed = rest[..digits].parse::<i64>().ok()?;
  Some(if negative { -parsed } else { parsed })
}

#[test]
fn test_parse_int() {
  assert_eq!(parse_int("15"), Some(15));
  assert_eq!(parse_int("  42kb"), Some(42));
  assert_eq!(parse_int("-3"), Some(-3));
  assert_eq!(parse_int("+7.9"), Some(7));
  assert_eq!(parse_int("abc"), None);
  assert_eq!(parse_int(""), None);
  assert_eq!(parse_int("-"), None);
}
