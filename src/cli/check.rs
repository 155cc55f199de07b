//! Check command - validate the manifest and verify remote access.

use std::path::Path;

use crate::cli::output;
use crate::core::github::GithubClient;
use crate::core::{manifest, resolve, validation};
use crate::error::Result;

/// Validate the manifest; unless `offline`, also verify the token and
/// organization before any provisioning is attempted.
pub fn execute(manifest_path: &Path, offline: bool) -> Result<i32> {
    let manifest = manifest::load(manifest_path)?;
    let resolved = resolve::resolve(&manifest)?;

    output::success(&format!(
        "manifest valid: {} secrets for project {}",
        resolved.len(),
        manifest.project.name
    ));

    if manifest.advanced.validate_values {
        for secret in &resolved {
            for warning in validation::lint_value(&secret.remote_name, &secret.spec.value) {
                output::warn(&warning);
            }
        }
    }

    if offline {
        return Ok(0);
    }

    let client = GithubClient::new(&manifest.github.organization, &manifest.github.token)?;
    let login = client.verify_access()?;

    output::success(&format!("authenticated as {}", login));
    output::success(&format!(
        "organization '{}' is accessible",
        manifest.github.organization
    ));

    Ok(0)
}
