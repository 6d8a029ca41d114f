use std::path::Path;

use minipack_common::{Configuration, Entry, EntryItem};
use minipack_error::ConfigResult;
use minipack_utils::path_ext::PathExt;

use super::MergeContext;

/// Adds the positional arguments as entries. `name=request` files `request` under `name`,
/// anything else goes to `main`. A `?` before the `=` keeps the token whole, so
/// `./a.js?x=1` is not split.
pub fn apply_positional(config: &mut Configuration, cx: &MergeContext<'_>) -> ConfigResult<()> {
  let positional = cx.args.positional();
  if positional.is_empty() {
    return Ok(());
  }

  let named = config.entry.get_or_insert_with(|| Entry::Named(Default::default())).named_mut();
  let mut add_to = |name: &str, request: String| {
    named
      .entry(name.to_string())
      .and_modify(|existing| existing.push(request.clone()))
      .or_insert_with(|| EntryItem::Single(request.clone()));
  };

  for content in positional {
    let eq = content.find('=');
    let question = content.find('?');
    match eq {
      Some(eq) if question.is_none_or(|question| question > eq) => {
        add_to(&content[..eq], content[eq + 1..].to_string());
      }
      _ => {
        let resolved = Path::new(content).resolve_from(cx.cwd);
        if cx.fs.exists(&resolved) {
          let request = if cx.fs.is_dir(&resolved) {
            resolved.to_dir_string()
          } else {
            resolved.to_string_lossy().into_owned()
          };
          add_to(Entry::MAIN, request);
        } else {
          add_to(Entry::MAIN, content.clone());
        }
      }
    }
  }

  Ok(())
}
