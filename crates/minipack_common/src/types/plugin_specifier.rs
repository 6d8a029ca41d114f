/// `name?query`, as given to `--plugin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginSpecifier {
  pub name: String,
  /// Everything from the first `?` on, including the `?` itself.
  pub query: Option<String>,
}

impl PluginSpecifier {
  pub fn parse(specifier: &str) -> Self {
    match specifier.find('?') {
      Some(idx) => Self {
        name: specifier[..idx].to_string(),
        query: Some(specifier[idx..].to_string()),
      },
      None => Self { name: specifier.to_string(), query: None },
    }
  }
}

#[test]
fn test_plugin_specifier_parse() {
  let specifier = PluginSpecifier::parse("banner-plugin?text=hi&raw");
  assert_eq!(specifier.name, "banner-plugin");
  assert_eq!(specifier.query.as_deref(), Some("?text=hi&raw"));

  let specifier = PluginSpecifier::parse("./plugins/local");
  assert_eq!(specifier.name, "./plugins/local");
  assert!(specifier.query.is_none());
}
