use clap::Parser;
use make_env_file::sync::{EnvSync, EnvSyncOptions};
use std::{path::PathBuf, process::ExitCode};

#[derive(Parser)]
#[command(
  name = "make-env-file",
  about = "Create an env file from a template and report diverging keys",
  version,
  author
)]
struct Cli {
  /// Path to the template config file
  #[arg(short, long, env = "MAKE_ENV_SOURCE", default_value = ".env.example")]
  source: PathBuf,

  /// Path to the config file to create or check
  #[arg(short, long, env = "MAKE_ENV_DEST", default_value = ".env")]
  dest: PathBuf,

  /// Overwrite the destination if its values differ from the template
  #[arg(short, long, env = "MAKE_ENV_OVERWRITE")]
  overwrite: bool,

  /// Seconds to sleep at the end if differences are found
  #[arg(
    long,
    env = "MAKE_ENV_SLEEP",
    default_value_t = 0,
    allow_negative_numbers = true
  )]
  sleep: i64,

  /// Verbose output (-v for verbose, -vv for very verbose)
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

fn setup_tracing(verbose: u8) {
  use tracing_subscriber::fmt;
  use tracing_subscriber::prelude::*;

  let log_level = match verbose {
    0 => "info",
    1 => "debug",
    _ => "trace",
  };

  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(tracing_subscriber::EnvFilter::new(
      std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.into()),
    ))
    .init();
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  setup_tracing(cli.verbose);

  let options = EnvSyncOptions {
    source_file: cli.source,
    dest_file: cli.dest,
    overwrite: cli.overwrite,
    sleep_seconds: cli.sleep,
  };

  match EnvSync::sync_with_options(&options) {
    Ok(_) => ExitCode::SUCCESS,
    Err(err) => {
      eprintln!("error: {err}");
      ExitCode::FAILURE
    }
  }
}
