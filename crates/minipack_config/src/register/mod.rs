pub mod compilers;
pub mod module_host;

use std::{fmt::Debug, sync::Arc};

use itertools::Itertools;

use self::{compilers::SourceCompiler, module_host::ModuleHost};

pub type RegisterFn = fn(&mut ModuleHost<'_>, Arc<dyn SourceCompiler>) -> anyhow::Result<()>;

/// How to get a compiler installed for an extension.
#[derive(Clone)]
pub enum CompilerDescriptor {
  /// Load the module, it installs itself for the extensions it declares.
  Module(&'static str),
  /// Require the module and hand it to `register`.
  Register { module: &'static str, register: RegisterFn },
  /// Try each descriptor in turn until one succeeds.
  Alternatives(Vec<CompilerDescriptor>),
}

impl Debug for CompilerDescriptor {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Module(name) => f.debug_tuple("Module").field(name).finish(),
      Self::Register { module, .. } => f.debug_struct("Register").field("module", module).finish(),
      Self::Alternatives(list) => f.debug_tuple("Alternatives").field(list).finish(),
    }
  }
}

/// Known config extensions, in declaration order, with the compiler each one needs. `None`
/// means the extension is handled natively.
#[derive(Debug, Clone)]
pub struct ExtensionTable {
  default_extension: &'static str,
  entries: Vec<(&'static str, Option<CompilerDescriptor>)>,
}

impl Default for ExtensionTable {
  fn default() -> Self {
    let yaml = CompilerDescriptor::Alternatives(vec![
      CompilerDescriptor::Module("yaml"),
      CompilerDescriptor::Module("serde_yaml"),
    ]);

    Self {
      default_extension: ".json",
      entries: vec![
        (".json", None),
        (".json5", Some(CompilerDescriptor::Module("json5"))),
        (
          ".jsonc",
          Some(CompilerDescriptor::Register { module: "json5", register: install_jsonc }),
        ),
        (".toml", Some(CompilerDescriptor::Module("toml"))),
        (".yaml", Some(yaml.clone())),
        (".yml", Some(yaml)),
      ],
    }
  }
}

fn install_jsonc(
  host: &mut ModuleHost<'_>,
  module: Arc<dyn SourceCompiler>,
) -> anyhow::Result<()> {
  host.install(".jsonc", module);
  Ok(())
}

impl ExtensionTable {
  pub fn empty(default_extension: &'static str) -> Self {
    Self { default_extension, entries: vec![] }
  }

  #[must_use]
  pub fn with(mut self, ext: &'static str, descriptor: Option<CompilerDescriptor>) -> Self {
    self.entries.push((ext, descriptor));
    self
  }

  pub fn descriptor(&self, ext: &str) -> Option<&CompilerDescriptor> {
    self
      .entries
      .iter()
      .find(|(known, _)| *known == ext)
      .and_then(|(_, descriptor)| descriptor.as_ref())
  }

  /// The default extension first, then the rest from shortest to longest. Extensions of
  /// equal length keep their declaration order.
  pub fn sorted_extensions(&self) -> Vec<&'static str> {
    self
      .entries
      .iter()
      .map(|(ext, _)| *ext)
      .sorted_by_key(|ext| (*ext != self.default_extension, ext.len()))
      .collect()
  }
}

/// Runs `op` on each item in order and returns the first success. Errors of the failed
/// attempts are dropped.
pub fn first_success<I, T, E>(items: I, mut op: impl FnMut(I::Item) -> Result<T, E>) -> Option<T>
where
  I: IntoIterator,
  E: Debug,
{
  items.into_iter().find_map(|item| match op(item) {
    Ok(value) => Some(value),
    Err(err) => {
      tracing::debug!("Alternative failed: {err:?}");
      None
    }
  })
}

/// Gets the compiler described by `descriptor` installed. Failing alternatives are not an
/// error here, loading a file with no installed compiler is.
pub fn register_compiler(
  host: &mut ModuleHost<'_>,
  descriptor: &CompilerDescriptor,
) -> anyhow::Result<()> {
  match descriptor {
    CompilerDescriptor::Module(name) => host.load(name),
    CompilerDescriptor::Register { module, register } => {
      let module = host.require(module)?;
      register(host, module)
    }
    CompilerDescriptor::Alternatives(list) => {
      first_success(list, |descriptor| register_compiler(host, descriptor));
      Ok(())
    }
  }
}
