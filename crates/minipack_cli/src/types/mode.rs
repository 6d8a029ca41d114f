use clap::ValueEnum;

#[derive(PartialEq, Eq, Clone, Copy, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum Mode {
  Development,
  Production,
  None,
}

impl From<Mode> for minipack_common::Mode {
  fn from(value: Mode) -> Self {
    match value {
      Mode::Development => minipack_common::Mode::Development,
      Mode::Production => minipack_common::Mode::Production,
      Mode::None => minipack_common::Mode::None,
    }
  }
}
