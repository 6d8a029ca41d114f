use serde_json::{Map, Value};
use url::form_urlencoded;

/// Parses a `?key=value&flag` query, or a `?{ json5 }` object, into a mapping.
///
/// - `name=value` sets a string, `null`, `true` and `false` are turned into their values
/// - `name[]=value` appends to an array
/// - `+name` and a bare `name` set `true`, `-name` sets `false`
///
/// Pairs may be separated by `&` or `,`.
pub fn parse_query(query: &str) -> anyhow::Result<Value> {
  let Some(query) = query.strip_prefix('?') else {
    anyhow::bail!("A valid query string passed to parseQuery should begin with '?'");
  };

  if query.is_empty() {
    return Ok(Value::Object(Map::new()));
  }

  if query.starts_with('{') && query.ends_with('}') {
    return Ok(json5::from_str(query)?);
  }

  let mut result = Map::new();
  for arg in query.split(['&', ',']) {
    match arg.split_once('=') {
      Some((name, value)) => {
        let value = special_value(decode(value)?);
        if let Some(name) = name.strip_suffix("[]") {
          let entry = result.entry(decode(name)?).or_insert_with(|| Value::Array(vec![]));
          if !entry.is_array() {
            *entry = Value::Array(vec![]);
          }
          if let Value::Array(values) = entry {
            values.push(value);
          }
        } else {
          result.insert(decode(name)?, value);
        }
      }
      None => {
        if let Some(name) = arg.strip_prefix('-') {
          result.insert(decode(name)?, Value::Bool(false));
        } else if let Some(name) = arg.strip_prefix('+') {
          result.insert(decode(name)?, Value::Bool(true));
        } else {
          result.insert(decode(arg)?, Value::Bool(true));
        }
      }
    }
  }

  Ok(Value::Object(result))
}

fn special_value(value: String) -> Value {
  match value.as_str() {
    "null" => Value::Null,
    "true" => Value::Bool(true),
    "false" => Value::Bool(false),
    _ => Value::String(value),
  }
}

/// Percent decodes one component. Unlike form decoding, `+` stays a plus sign, and a `%`
/// that is not a complete escape or escapes that are not UTF-8 are errors.
fn decode(component: &str) -> anyhow::Result<String> {
  let bytes = component.as_bytes();
  let malformed = bytes.iter().enumerate().any(|(at, &byte)| {
    byte == b'%'
      && !bytes.get(at + 1..at + 3).is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
  });
  if malformed {
    anyhow::bail!("URI malformed: '{component}'");
  }

  let escaped = component.replace('+', "%2B").replace('=', "%3D");
  let decoded = form_urlencoded::parse(escaped.as_bytes())
    .next()
    .map(|(name, _)| name.into_owned())
    .unwrap_or_default();

  // Invalid UTF-8 is decoded lossily, which shows up as extra replacement characters.
  let replaced = |text: &str| text.matches(char::REPLACEMENT_CHARACTER).count();
  if replaced(&decoded) > replaced(component) {
    anyhow::bail!("URI malformed: '{component}'");
  }
  Ok(decoded)
}
