//! Tuning profile commands

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use std::path::Path;
use stride_locomotion::Profile;

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Write a profile containing the default tuning
    Init {
        /// Output path
        path: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate a profile and print the resolved values
    Check {
        /// Path to profile file
        path: String,

        /// Output format (toml or json)
        #[arg(long, default_value = "toml")]
        format: String,
    },
}

pub fn run(cmd: ProfileCommands) -> Result<()> {
    match cmd {
        ProfileCommands::Init { path, force } => init(&path, force),
        ProfileCommands::Check { path, format } => check(&path, &format),
    }
}

fn init(path: &str, force: bool) -> Result<()> {
    if Path::new(path).exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path);
    }
    Profile::default()
        .save(path)
        .with_context(|| format!("Failed to write profile to {}", path))?;
    println!("Wrote default profile to {}", path);
    Ok(())
}

fn check(path: &str, format: &str) -> Result<()> {
    let profile =
        Profile::load(path).with_context(|| format!("Profile {} is invalid", path))?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&profile)?),
        "toml" => {
            println!("# {} is valid", path);
            print!("{}", profile.to_toml_string()?);
        }
        other => bail!("Unknown format '{}'. Use 'toml' or 'json'.", other),
    }
    Ok(())
}
