//! Delete command - remove remote secrets.
//!
//! Deletes one named secret, or every secret carrying the project's
//! prefix. Both paths prompt for confirmation unless `--yes` is given;
//! the prompt lives here at the CLI boundary, never in the core.

use std::path::Path;

use dialoguer::Confirm;

use crate::cli::output;
use crate::core::github::{GithubClient, SecretStore};
use crate::core::manifest;
use crate::error::{Error, Result};

pub fn execute(manifest_path: &Path, name: Option<&str>, all_project: bool, yes: bool) -> Result<i32> {
    let manifest = manifest::load(manifest_path)?;
    let client = GithubClient::new(&manifest.github.organization, &manifest.github.token)?;

    match (name, all_project) {
        (Some(name), false) => delete_one(&client, name, yes),
        (None, true) => delete_project(&client, &manifest.project.name, yes),
        _ => Err(Error::Other(
            "specify --name NAME or --all-project".to_string(),
        )),
    }
}

fn delete_one(client: &GithubClient, name: &str, yes: bool) -> Result<i32> {
    if !confirm(&format!("Delete remote secret '{}'?", name), yes)? {
        output::warn("deletion cancelled");
        return Ok(0);
    }

    client.delete_secret(name)?;
    output::success(&format!("deleted {}", name));
    Ok(0)
}

fn delete_project(client: &GithubClient, project: &str, yes: bool) -> Result<i32> {
    let prefix = format!("{}_", project);
    let targets: Vec<String> = client
        .list_secret_names()?
        .into_iter()
        .filter(|name| name.starts_with(&prefix))
        .collect();

    if targets.is_empty() {
        output::dimmed("no project-specific secrets found to delete");
        return Ok(0);
    }

    let prompt = format!(
        "Delete ALL {} secrets for project '{}'?",
        targets.len(),
        project
    );
    if !confirm(&prompt, yes)? {
        output::warn("deletion cancelled");
        return Ok(0);
    }

    // One failure doesn't stop the rest; report everything at the end.
    let mut deleted = 0usize;
    let mut failed = 0usize;
    for name in &targets {
        match client.delete_secret(name) {
            Ok(()) => {
                output::success(&format!("deleted {}", name));
                deleted += 1;
            }
            Err(e) => {
                output::fail(&format!("failed to delete {} ({})", name, e));
                failed += 1;
            }
        }
    }

    output::section("Summary");
    output::kv("deleted", deleted);
    output::kv("failed", failed);

    Ok(if failed == 0 { 0 } else { 1 })
}

fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }

    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| Error::Other(format!("confirmation prompt failed: {}", e)))
}
