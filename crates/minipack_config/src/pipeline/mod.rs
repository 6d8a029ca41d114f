mod normalize;

use serde::Deserialize;
use serde_json::Value;

use minipack_common::{
  CompiledConfiguration, Configuration, DeferredConfig, MultiConfiguration, RawConfigValue,
};
use minipack_error::{ConfigError, ConfigResult, ValidationError, ValidationErrors};

use crate::{
  merge::{merge_configuration, MergeContext},
  schema::SchemaValidator,
};

pub use self::normalize::normalize;

pub struct PipelineContext<'a> {
  pub schema: &'a dyn SchemaValidator,
  pub merge: MergeContext<'a>,
}

/// Where a raw configuration is on its way to the build engine.
pub enum PipelineState {
  /// Checked against the schema, then dispatched on its shape.
  Validate(RawConfigValue),
  Deferred(DeferredConfig),
  /// Holds the payload found under `default`.
  DefaultWrapped(RawConfigValue),
  /// A multi-config waiting for the `--config-name` filter.
  FilterByName(Vec<RawConfigValue>),
  Merge(RawConfigValue),
  Normalize(CompiledConfiguration),
  Done(CompiledConfiguration),
}

impl PipelineState {
  pub fn name(&self) -> &'static str {
    match self {
      Self::Validate(_) => "validate",
      Self::Deferred(_) => "deferred",
      Self::DefaultWrapped(_) => "default-wrapped",
      Self::FilterByName(_) => "filter-by-name",
      Self::Merge(_) => "merge",
      Self::Normalize(_) => "normalize",
      Self::Done(_) => "done",
    }
  }
}

/// Drives a raw configuration through [`PipelineState`]s until it is done. Each call to
/// [`Pipeline::step`] performs exactly one transition.
pub struct Pipeline<'a> {
  cx: &'a PipelineContext<'a>,
  state: PipelineState,
}

impl<'a> Pipeline<'a> {
  pub fn new(raw: RawConfigValue, cx: &'a PipelineContext<'a>) -> Self {
    Self { cx, state: PipelineState::Validate(raw) }
  }

  pub fn state(&self) -> &PipelineState {
    &self.state
  }

  pub fn is_done(&self) -> bool {
    matches!(self.state, PipelineState::Done(_))
  }

  pub async fn step(self) -> ConfigResult<Self> {
    let Self { cx, state } = self;
    tracing::debug!("Pipeline step: {}", state.name());

    let state = match state {
      PipelineState::Validate(value) => {
        cx.validate(&value)?;
        cx.dispatch(value)
      }
      PipelineState::Deferred(future) => {
        PipelineState::Validate(future.await.map_err(ConfigError::Deferred)?)
      }
      PipelineState::DefaultWrapped(payload) => PipelineState::Validate(payload),
      PipelineState::FilterByName(items) => cx.filter_by_name(items)?,
      PipelineState::Merge(value) => PipelineState::Normalize(cx.merge(value)?),
      PipelineState::Normalize(compiled) => {
        PipelineState::Done(normalize(compiled, &cx.merge))
      }
      done @ PipelineState::Done(_) => done,
    };

    Ok(Self { cx, state })
  }

  pub async fn run(self) -> ConfigResult<CompiledConfiguration> {
    let mut pipeline = self;
    loop {
      pipeline = match pipeline.state {
        PipelineState::Done(compiled) => return Ok(compiled),
        state => Pipeline { cx: pipeline.cx, state }.step().await?,
      };
    }
  }
}

impl PipelineContext<'_> {
  fn validate(&self, value: &RawConfigValue) -> ConfigResult<()> {
    // A deferred value has nothing to look at until it settles.
    if matches!(value, RawConfigValue::Deferred(_)) {
      return Ok(());
    }

    let value = value.to_value();
    let errors = self.schema.validate(&value);
    if errors.is_empty() {
      Ok(())
    } else {
      Err(ConfigError::invalid_configuration(errors, &value))
    }
  }

  fn dispatch(&self, value: RawConfigValue) -> PipelineState {
    match value {
      RawConfigValue::Deferred(future) => PipelineState::Deferred(future),
      RawConfigValue::DefaultWrapped(payload) => PipelineState::DefaultWrapped(*payload),
      RawConfigValue::Sequence(items) if self.merge.args.contains("config-name") => {
        PipelineState::FilterByName(items)
      }
      value => PipelineState::Merge(value),
    }
  }

  fn filter_by_name(&self, items: Vec<RawConfigValue>) -> ConfigResult<PipelineState> {
    let name = self.merge.args.get_str("config-name").unwrap_or_default();
    let mut named = items
      .into_iter()
      .filter(|item| config_name(item) == Some(name))
      .collect::<Vec<_>>();

    match named.len() {
      0 => Err(ConfigError::ConfigNameNotFound(name.to_string())),
      1 => Ok(PipelineState::Validate(named.remove(0))),
      _ => Ok(PipelineState::Merge(RawConfigValue::Sequence(named))),
    }
  }

  fn merge(&self, value: RawConfigValue) -> ConfigResult<CompiledConfiguration> {
    match value {
      RawConfigValue::Sequence(items) => {
        let configurations = items
          .into_iter()
          .map(|item| {
            let mut config = to_configuration(&item)?;
            merge_configuration(&mut config, &self.merge)?;
            Ok(config)
          })
          .collect::<ConfigResult<Vec<_>>>()?;

        Ok(CompiledConfiguration::Multi(MultiConfiguration {
          configurations,
          context: self.merge.cwd.to_path_buf(),
          watch: None,
          watch_options: None,
        }))
      }
      value => {
        let mut config = to_configuration(&value)?;
        merge_configuration(&mut config, &self.merge)?;
        Ok(CompiledConfiguration::Single(config))
      }
    }
  }
}

fn config_name(item: &RawConfigValue) -> Option<&str> {
  match item {
    RawConfigValue::Value(Value::Object(map)) => map.get("name").and_then(Value::as_str),
    _ => None,
  }
}

fn to_configuration(item: &RawConfigValue) -> ConfigResult<Configuration> {
  let value = item.to_value();
  Configuration::deserialize(&value).map_err(|err| {
    let errors = ValidationErrors::from(vec![ValidationError::new("", err.to_string())]);
    ConfigError::invalid_configuration(errors, &value)
  })
}
