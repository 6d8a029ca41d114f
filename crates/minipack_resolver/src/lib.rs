// A wrapper around the `oxc_resolver` crate to resolve plugin and config register modules.

mod package_json;
mod resolver;

pub use crate::{
  package_json::read_package_name,
  resolver::{ResolveReturn, Resolver},
};

pub use oxc_resolver::ResolveError;
