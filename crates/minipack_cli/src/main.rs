mod args;
mod types;

use std::{error::Error, io::Write, process::ExitCode};

use ansi_term::Colour;
use args::{ArgumentsBuilder, ConfigArgs, EnhanceArgs, InputArgs, OutputArgs, WatchArgs};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use minipack_config::{CompiledConfiguration, ConfigCompiler, ConfigError};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Commands {
  #[clap(flatten)]
  config: ConfigArgs,

  #[clap(flatten)]
  input: InputArgs,

  #[clap(flatten)]
  output: OutputArgs,

  #[clap(flatten)]
  enhance: EnhanceArgs,

  #[clap(flatten)]
  watch: WatchArgs,

  /// Log what the compiler does to stderr.
  #[clap(long)]
  verbose: bool,
}

/// Exit status for mistakes in the configuration or on the command line.
const USER_ERROR_EXIT: u8 = 255;

fn init_tracing(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_env("MINIPACK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
  };
  let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

fn print_configuration(compiled: &CompiledConfiguration) -> std::io::Result<()> {
  let json = serde_json::to_string_pretty(compiled)?;
  writeln!(std::io::stdout().lock(), "{json}")
}

fn print_error(error: &ConfigError) {
  let mut stderr = std::io::stderr().lock();
  let _ = writeln!(stderr, "{} {error}", Colour::Red.paint("Error:"));

  // User errors already say everything that helps.
  if error.is_user_error() {
    return;
  }

  let mut source = error.source();
  while let Some(cause) = source {
    let _ = writeln!(stderr, "  {} {cause}", Colour::White.dimmed().paint("Caused by:"));
    source = cause.source();
  }
}

#[tokio::main]
async fn main() -> ExitCode {
  let commands = Commands::parse();
  init_tracing(commands.verbose);

  let args = ArgumentsBuilder::default()
    .config(commands.config)
    .input(commands.input)
    .output(commands.output)
    .enhance(commands.enhance)
    .watch(commands.watch)
    .build();

  let cwd = match std::env::current_dir() {
    Ok(cwd) => cwd,
    Err(err) => {
      let _ = writeln!(std::io::stderr(), "{} {err}", Colour::Red.paint("Error:"));
      return ExitCode::FAILURE;
    }
  };

  match ConfigCompiler::new(cwd).compile(&args).await {
    Ok(compiled) => match print_configuration(&compiled) {
      Ok(()) => ExitCode::SUCCESS,
      Err(err) => {
        tracing::error!("Failed to print the configuration: {err}");
        ExitCode::FAILURE
      }
    },
    Err(error) => {
      print_error(&error);
      if error.is_user_error() {
        ExitCode::from(USER_ERROR_EXIT)
      } else {
        ExitCode::FAILURE
      }
    }
  }
}
