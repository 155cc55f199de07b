//! Orgseal - provision GitHub organization secrets from a declarative manifest.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use orgseal::cli::output;
use orgseal::cli::{execute, Cli};
use orgseal::error::{ApiError, Error, ManifestError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("ORGSEAL_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("orgseal=debug")
        } else {
            EnvFilter::new("orgseal=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    match execute(cli.command) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            let suggestion = match &e {
                Error::Manifest(ManifestError::NotFound(_)) => {
                    Some("run: orgseal init")
                }
                Error::Api(ApiError::Auth { .. }) => {
                    Some("check github.token scopes (admin:org is required)")
                }
                _ => None,
            };

            output::error(&e.to_string());
            if let Some(hint) = suggestion {
                output::hint(hint);
            }
            std::process::exit(1);
        }
    }
}
