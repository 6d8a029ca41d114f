use std::{fmt::Debug, path::Path};

use minipack_resolver::{ResolveReturn, Resolver};

/// Resolves module specifiers the way `require` would, starting from `context`.
pub trait ModuleResolver: Debug + Send + Sync {
  fn resolve(&self, context: &Path, specifier: &str) -> anyhow::Result<ResolveReturn>;
}

impl ModuleResolver for Resolver {
  fn resolve(&self, context: &Path, specifier: &str) -> anyhow::Result<ResolveReturn> {
    Ok(Resolver::resolve(self, Some(context), specifier)?)
  }
}
