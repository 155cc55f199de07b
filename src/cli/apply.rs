//! Apply command - provision secrets from a manifest.

use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::core::github::GithubClient;
use crate::core::provision::{self, Outcome};
use crate::core::{manifest, resolve, validation};
use crate::error::Result;

/// Provision every secret declared in the manifest.
///
/// Returns the process exit code: 0 when no secret failed, 1 otherwise.
pub fn execute(manifest_path: &Path, json: bool, force_dry_run: bool) -> Result<i32> {
    let mut manifest = manifest::load(manifest_path)?;
    if force_dry_run {
        manifest.advanced.dry_run = true;
    }

    let resolved = resolve::resolve(&manifest)?;
    info!(
        secrets = resolved.len(),
        organization = %manifest.github.organization,
        dry_run = manifest.advanced.dry_run,
        "starting provisioning run"
    );

    // Keep stdout pure JSON for automation callers.
    if !json {
        if manifest.advanced.validate_values {
            for secret in &resolved {
                for warning in validation::lint_value(&secret.remote_name, &secret.spec.value) {
                    output::warn(&warning);
                }
            }
        }
        if manifest.advanced.dry_run {
            output::warn("dry-run: no secrets will be written");
        }
    }

    let client = GithubClient::new(&manifest.github.organization, &manifest.github.token)?;
    let report = provision::provision(&manifest, &resolved, &client)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render(&report);
    }

    Ok(if report.ok() { 0 } else { 1 })
}

fn render(report: &provision::RunReport) {
    for result in &report.results {
        let line = match &result.reason {
            Some(reason) => format!(
                "{:<13} {} ({})",
                result.outcome.to_string(),
                result.remote_name,
                reason
            ),
            None => format!("{:<13} {}", result.outcome.to_string(), result.remote_name),
        };

        match result.outcome {
            Outcome::Created | Outcome::Updated => output::success(&line),
            Outcome::WouldCreate | Outcome::WouldUpdate => output::hint(&line),
            Outcome::Skipped => output::warn(&line),
            Outcome::Failed => output::fail(&line),
        }
    }

    output::section("Summary");
    let written = report.count(Outcome::Created) + report.count(Outcome::Updated);
    let planned = report.count(Outcome::WouldCreate) + report.count(Outcome::WouldUpdate);
    if planned > 0 {
        output::kv("would write", planned);
    } else {
        output::kv("written", written);
    }
    output::kv("skipped", report.count(Outcome::Skipped));
    output::kv("failed", report.count(Outcome::Failed));

    if !report.ok() {
        println!();
        output::dimmed("fix the failures above and re-run; writes are idempotent");
    }
}
