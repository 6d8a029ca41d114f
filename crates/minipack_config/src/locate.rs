use std::path::Path;

use minipack_common::{CliArguments, ConfigFileRef};
use minipack_fs::FileSystem;
use minipack_utils::path_ext::PathExt;

use crate::register::ExtensionTable;

/// Base names probed in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_NAMES: [&str; 2] = ["minipack.config", "minipackfile"];

/// Finds the config files to load. Explicit `--config` paths are taken as given, without
/// checking that they exist. Otherwise the first existing default file wins.
pub fn locate_config_files(
  args: &CliArguments,
  cwd: &Path,
  extensions: &ExtensionTable,
  fs: &dyn FileSystem,
) -> Vec<ConfigFileRef> {
  let sorted_extensions = extensions.sorted_extensions();

  let explicit = args.get_all("config");
  if !explicit.is_empty() {
    return explicit
      .into_iter()
      .map(|config| {
        let path = Path::new(config).resolve_from(cwd);
        let ext = config_extension(&path, &sorted_extensions);
        ConfigFileRef::new(path, ext)
      })
      .collect();
  }

  let found = DEFAULT_CONFIG_NAMES
    .iter()
    .flat_map(|name| {
      sorted_extensions
        .iter()
        .map(move |ext| ConfigFileRef::new(cwd.join(format!("{name}{ext}")), *ext))
    })
    .find(|candidate| fs.exists(&candidate.path));

  match &found {
    Some(file) => tracing::debug!("Found config file {}", file.path.display()),
    None => tracing::debug!("No config file found in {}", cwd.display()),
  }

  found.into_iter().collect()
}

/// The longest known extension the path ends with, or its file system extension.
fn config_extension(path: &Path, sorted_extensions: &[&str]) -> String {
  let path_str = path.to_string_lossy();
  if let Some(ext) = sorted_extensions.iter().rev().find(|ext| path_str.ends_with(**ext)) {
    return (*ext).to_string();
  }

  path.extension().map(|ext| format!(".{}", ext.to_string_lossy())).unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use minipack_fs::OsFileSystem;

  use super::*;

  fn locate(args: &CliArguments, cwd: &Path) -> Vec<ConfigFileRef> {
    locate_config_files(args, cwd, &ExtensionTable::default(), &OsFileSystem)
  }

  #[test]
  fn explicit_configs_are_resolved_without_existence_check() {
    let args =
      CliArguments::new().with("config", vec!["./conf/app.config.json5", "/abs/other.cfg"]);
    let files = locate(&args, Path::new("/project"));

    assert_eq!(
      files,
      [
        ConfigFileRef::new(PathBuf::from("/project/conf/app.config.json5"), ".json5"),
        ConfigFileRef::new(PathBuf::from("/abs/other.cfg"), ".cfg"),
      ]
    );
  }

  #[test]
  fn longest_known_extension_wins() {
    let extensions = ExtensionTable::default().sorted_extensions();
    assert_eq!(config_extension(Path::new("/p/minipack.config.jsonc"), &extensions), ".jsonc");
    assert_eq!(config_extension(Path::new("/p/minipack.config.yml"), &extensions), ".yml");
    assert_eq!(config_extension(Path::new("/p/Makefile"), &extensions), "");
  }

  #[test]
  fn only_the_first_existing_default_file_is_used() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("minipack.config.toml"), "").unwrap();
    std::fs::write(dir.path().join("minipack.config.json"), "{}").unwrap();
    std::fs::write(dir.path().join("minipackfile.json"), "{}").unwrap();

    let files = locate(&CliArguments::new(), dir.path());
    assert_eq!(files, [ConfigFileRef::new(dir.path().join("minipack.config.json"), ".json")]);
  }

  #[test]
  fn nothing_found_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let files = locate(&CliArguments::new(), dir.path());
    assert!(files.is_empty());
  }
}
