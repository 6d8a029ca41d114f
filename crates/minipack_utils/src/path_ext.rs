use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use sugar_path::SugarPath;

pub trait PathExt {
  /// Resolves `self` against `base` unless it is already absolute, normalizing the result.
  fn resolve_from(&self, base: &Path) -> PathBuf;

  /// The path as a string with a trailing separator, the way directory entries are spelled.
  fn to_dir_string(&self) -> String;
}

impl PathExt for Path {
  fn resolve_from(&self, base: &Path) -> PathBuf {
    self.absolutize_with(base)
  }

  fn to_dir_string(&self) -> String {
    let mut str = self.to_string_lossy().into_owned();
    if !str.ends_with(MAIN_SEPARATOR) {
      str.push(MAIN_SEPARATOR);
    }
    str
  }
}

#[test]
fn test_resolve_from() {
  let cwd = Path::new("/project");
  assert_eq!(Path::new("src/index.js").resolve_from(cwd), Path::new("/project/src/index.js"));
  assert_eq!(Path::new("./a/../b.js").resolve_from(cwd), Path::new("/project/b.js"));
  assert_eq!(Path::new("/abs/c.js").resolve_from(cwd), Path::new("/abs/c.js"));
}

#[test]
fn test_to_dir_string() {
  let dir = Path::new("/project").join("src");
  assert_eq!(dir.to_dir_string(), format!("/project{MAIN_SEPARATOR}src{MAIN_SEPARATOR}"));
}
