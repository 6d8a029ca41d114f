use std::path::Path;

use minipack_common::CliArguments;
use minipack_utils::path_ext::PathExt;

pub const DEBUG_DEVTOOL: &str = "eval-cheap-module-source-map";
pub const PRODUCTION_DEFINE: &str = "process.env.NODE_ENV=\"production\"";

/// Expands `-d`, `-p` and `--output` into the flags they stand for. The input is left
/// untouched, the expanded arguments are returned.
pub fn expand_shortcuts(args: &CliArguments, cwd: &Path) -> CliArguments {
  let mut expanded = args.clone();

  if args.is_truthy("d") {
    expanded.set("debug", true);
    expanded.set("output-pathinfo", true);
    if !args.is_truthy("devtool") {
      expanded.set("devtool", DEBUG_DEVTOOL);
    }
    if !args.is_truthy("mode") {
      expanded.set("mode", "development");
    }
  }

  if args.is_truthy("p") {
    expanded.set("optimize-minimize", true);
    expanded.append("define", PRODUCTION_DEFINE);
    if !expanded.is_truthy("mode") {
      expanded.set("mode", "production");
    }
  }

  if let Some(output) = args.get_str("output").filter(|output| !output.is_empty()) {
    let output = Path::new(output).resolve_from(cwd);
    if let Some(filename) = output.file_name() {
      expanded.set("output-filename", filename.to_string_lossy().into_owned());
    }
    if let Some(dir) = output.parent() {
      expanded.set("output-path", dir.to_string_lossy().into_owned());
    }
  }

  expanded
}
