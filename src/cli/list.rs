//! List command - show remote secrets for this project.
//!
//! Splits the organization's secrets into project-specific names (carrying
//! this project's prefix) and shared names the manifest declares
//! unprefixed.

use std::collections::BTreeSet;
use std::path::Path;

use serde_json::json;

use crate::cli::output;
use crate::core::github::{GithubClient, RemoteSecret};
use crate::core::manifest;
use crate::error::Result;

pub fn execute(manifest_path: &Path, json_output: bool) -> Result<i32> {
    let manifest = manifest::load(manifest_path)?;
    let client = GithubClient::new(&manifest.github.organization, &manifest.github.token)?;

    let remote = client.list_secrets()?;
    let prefix = format!("{}_", manifest.project.name);
    let unprefixed: BTreeSet<&str> = manifest
        .secrets
        .iter()
        .filter(|(_, spec)| !spec.prefix)
        .map(|(name, _)| name.as_str())
        .collect();

    let mut project: Vec<&RemoteSecret> = Vec::new();
    let mut shared: Vec<&RemoteSecret> = Vec::new();
    for secret in &remote {
        if secret.name.starts_with(&prefix) {
            project.push(secret);
        } else if unprefixed.contains(secret.name.as_str()) {
            shared.push(secret);
        }
    }
    project.sort_by(|a, b| a.name.cmp(&b.name));
    shared.sort_by(|a, b| a.name.cmp(&b.name));

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "project": project,
                "shared": shared,
            }))?
        );
        return Ok(0);
    }

    output::section(&format!("Secrets for {}", manifest.project.name));
    if project.is_empty() {
        output::dimmed("no project-specific secrets found");
    } else {
        for secret in &project {
            output::kv(&secret.name, format!("visibility: {}", secret.visibility));
        }
    }

    if !shared.is_empty() {
        output::section("Shared");
        for secret in &shared {
            output::kv(&secret.name, format!("visibility: {}", secret.visibility));
        }
    }

    Ok(0)
}
