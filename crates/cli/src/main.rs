use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

use output::OutputFormat;

/// setup-opencv - build and install OpenCV inside a CI job
#[derive(Parser)]
#[command(name = "setup-opencv")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Run the full setup procedure
  Run {
    /// Output format for the run summary
    #[arg(long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Show the steps that would run, without executing anything
  Plan {
    /// Output format for the plan
    #[arg(long, value_enum, default_value = "text")]
    output: OutputFormat,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "info" }));
  // Stdout carries workflow commands and reports; logs go to stderr.
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  // Invoked with no subcommand by the action wrapper; run is the default.
  match cli.command.unwrap_or(Commands::Run {
    output: OutputFormat::default(),
  }) {
    Commands::Run { output } => cmd::cmd_run(output),
    Commands::Plan { output } => cmd::cmd_plan(output),
  }
}
