//! Stride CLI - Drive the locomotion controller from the command line

mod commands;
mod scenario;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{profile, simulate};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stride")]
#[command(about = "First-person locomotion controller simulator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted input scenario against a physics level
    Simulate {
        /// Path to scenario file
        scenario: String,

        /// Path to a tuning profile (falls back to ./stride.toml, then defaults)
        #[arg(long)]
        profile: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,

        /// Emit a sample every N frames
        #[arg(long, default_value = "10")]
        every: u32,

        /// Largest frame delta in seconds
        #[arg(long, default_value = "0.25")]
        max_dt: f64,
    },

    /// Tuning profile operations
    #[command(subcommand)]
    Profile(profile::ProfileCommands),
}

fn parse_format(s: &str) -> std::result::Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}', expected text or json", s)),
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            scenario,
            profile,
            format,
            every,
            max_dt,
        } => simulate::run(simulate::SimulateArgs {
            scenario,
            profile,
            format,
            every,
            max_dt,
        }),
        Commands::Profile(cmd) => profile::run(cmd),
    }
}
