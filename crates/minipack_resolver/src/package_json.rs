use std::path::Path;

use anyhow::Context;
use minipack_fs::FileSystem;
use serde_json::Value;

/// Reads the `name` field of a `package.json`.
pub fn read_package_name(
  fs: &dyn FileSystem,
  package_json: &Path,
) -> anyhow::Result<Option<String>> {
  let source = fs
    .read_to_string(package_json)
    .with_context(|| format!("Failed to read {}", package_json.display()))?;
  let manifest: Value = serde_json::from_str(&source)
    .with_context(|| format!("Failed to parse {}", package_json.display()))?;
  Ok(manifest.get("name").and_then(Value::as_str).map(ToString::to_string))
}
