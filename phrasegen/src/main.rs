use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use phrasebones::Scheme;
use tracing_subscriber::EnvFilter;

mod clipboard;
mod config;
mod generator;
mod notify;
mod serde_helpers;
mod ui;

use config::Settings;
use generator::Generator;

#[derive(Parser)]
#[command(
  name = "phrasegen",
  version,
  about = "Turn any text into a 16 character password"
)]
struct Cli {
  /// Settings file to use instead of the one in the config directory
  #[arg(long, value_name = "PATH")]
  config: Option<PathBuf>,

  /// Place the extra characters deterministically so that the same text
  /// always gives the same password
  #[arg(long)]
  deterministic: bool,

  /// Log debug output to stderr
  #[arg(short, long)]
  verbose: bool,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Derive one password from TEXT and print it
  Derive {
    text: String,

    /// Also copy the password to the clipboard
    #[arg(short, long)]
    copy: bool,
  },
}

fn init_logging(verbose: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    EnvFilter::new(if verbose { "debug" } else { "warn" })
  });
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn main() -> anyhow::Result<ExitCode> {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let mut settings = Settings::load(cli.config.as_deref())?;
  if cli.deterministic {
    settings.scheme = Scheme::Deterministic;
  }
  let mut generator = Generator::new(&settings);

  match cli.command {
    Some(Command::Derive { text, copy }) => {
      Ok(ui::run_once(&mut generator, text, copy))
    }
    None => {
      ui::run_interactive(&mut generator)?;
      Ok(ExitCode::SUCCESS)
    }
  }
}
