//! Command-line interface.

pub mod apply;
pub mod check;
pub mod completions;
pub mod delete;
pub mod init;
pub mod list;
pub mod output;
pub mod plan;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::constants;

/// Orgseal - provision GitHub organization secrets from a declarative manifest.
#[derive(Parser)]
#[command(
    name = "orgseal",
    about = "Provision GitHub organization secrets from a declarative manifest",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Provision every secret declared in the manifest
    Apply {
        /// Path to the secrets manifest
        #[arg(default_value = constants::DEFAULT_MANIFEST)]
        manifest: PathBuf,
        /// Emit the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Preview what apply would do, without sealing or writing anything
    Plan {
        /// Path to the secrets manifest
        #[arg(default_value = constants::DEFAULT_MANIFEST)]
        manifest: PathBuf,
        /// Emit the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate the manifest and verify remote access
    Check {
        /// Path to the secrets manifest
        #[arg(default_value = constants::DEFAULT_MANIFEST)]
        manifest: PathBuf,
        /// Validate the manifest only, without any remote calls
        #[arg(long)]
        offline: bool,
    },

    /// List remote secrets for this project
    List {
        /// Path to the secrets manifest
        #[arg(default_value = constants::DEFAULT_MANIFEST)]
        manifest: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete remote secrets
    Delete {
        /// Path to the secrets manifest
        #[arg(default_value = constants::DEFAULT_MANIFEST)]
        manifest: PathBuf,
        /// Remote secret name to delete
        #[arg(long)]
        name: Option<String>,
        /// Delete every secret carrying this project's prefix
        #[arg(long, conflicts_with = "name")]
        all_project: bool,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Write a starter manifest
    Init {
        /// Where to write the manifest
        #[arg(default_value = constants::DEFAULT_MANIFEST)]
        path: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command, returning the process exit code.
pub fn execute(command: Command) -> crate::error::Result<i32> {
    use Command::*;

    match command {
        Apply { manifest, json } => apply::execute(&manifest, json, false),
        Plan { manifest, json } => plan::execute(&manifest, json),
        Check { manifest, offline } => check::execute(&manifest, offline),
        List { manifest, json } => list::execute(&manifest, json),
        Delete {
            manifest,
            name,
            all_project,
            yes,
        } => delete::execute(&manifest, name.as_deref(), all_project, yes),
        Init { path } => init::execute(&path),
        Completions { shell } => completions::execute(shell),
    }
}
