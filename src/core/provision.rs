//! Provisioning orchestrator.
//!
//! Drives the end-to-end flow for one run: take a read-only snapshot of the
//! remote secret names, then walk the resolved secrets in manifest order,
//! sealing and writing each one. Failures are isolated per secret; the
//! whole batch always produces a full report. Authorization and
//! scope-existence failures abort instead, since every remaining call
//! would fail identically.
//!
//! Each secret's remote effects are durably committed before the next one
//! starts, so interrupting a run leaves a well-defined partial state that
//! a re-run completes (every write is an upsert).

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::github::SecretStore;
use crate::core::manifest::{Manifest, Visibility};
use crate::core::resolve::ResolvedSecret;
use crate::core::sealed_box;
use crate::core::types::RemoteName;
use crate::error::Result;

/// What happened to one secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Created,
    Updated,
    Skipped,
    WouldCreate,
    WouldUpdate,
    Failed,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::Created => "created",
            Outcome::Updated => "updated",
            Outcome::Skipped => "skipped",
            Outcome::WouldCreate => "would create",
            Outcome::WouldUpdate => "would update",
            Outcome::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Per-secret result, in manifest order.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisioningResult {
    pub remote_name: RemoteName,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Full report for one run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub results: Vec<ProvisioningResult>,
}

impl RunReport {
    /// True when no secret failed.
    pub fn ok(&self) -> bool {
        !self
            .results
            .iter()
            .any(|r| r.outcome == Outcome::Failed)
    }

    /// Number of results with the given outcome.
    pub fn count(&self, outcome: Outcome) -> usize {
        self.results.iter().filter(|r| r.outcome == outcome).count()
    }
}

/// Provision every resolved secret against the store.
///
/// Policy, per secret and in manifest order:
/// 1. empty values (allowed only under a relaxed manifest) are skipped
/// 2. under `dry_run`, outcomes are synthesized from the name snapshot
///    without sealing or writing anything
/// 3. with `update_existing: false`, names already present are skipped
/// 4. otherwise seal and upsert, then grant repository access for
///    `selected`-visibility secrets when a repository is configured
///
/// # Errors
///
/// Returns `Err` only for failures that invalidate the whole run
/// (authentication, scope not found). Everything else is captured in the
/// per-secret results.
pub fn provision(
    manifest: &Manifest,
    resolved: &[ResolvedSecret],
    store: &dyn SecretStore,
) -> Result<RunReport> {
    let advanced = &manifest.advanced;

    // One snapshot decides Created vs Updated for the whole run. Not
    // re-queried per secret: that would amplify rate-limit pressure and
    // make the classification drift if another actor mutates the scope
    // mid-run.
    let existing = store.list_secret_names()?;
    debug!(existing = existing.len(), dry_run = advanced.dry_run, "snapshot taken");

    // Lazily resolved at most once per run. Inner None: the configured
    // repository does not exist remotely.
    let mut repository_id: Option<Option<u64>> = None;

    let mut results = Vec::with_capacity(resolved.len());

    for secret in resolved {
        let name = &secret.remote_name;

        if secret.spec.value.is_empty() {
            results.push(ProvisioningResult {
                remote_name: name.clone(),
                outcome: Outcome::Skipped,
                reason: Some("no value provided".to_string()),
            });
            continue;
        }

        if advanced.dry_run {
            let outcome = if existing.contains(name) {
                Outcome::WouldUpdate
            } else {
                Outcome::WouldCreate
            };
            results.push(ProvisioningResult {
                remote_name: name.clone(),
                outcome,
                reason: None,
            });
            continue;
        }

        if !advanced.update_existing && existing.contains(name) {
            results.push(ProvisioningResult {
                remote_name: name.clone(),
                outcome: Outcome::Skipped,
                reason: Some("already exists".to_string()),
            });
            continue;
        }

        match provision_one(manifest, secret, store, &existing, &mut repository_id) {
            Ok(outcome) => results.push(ProvisioningResult {
                remote_name: name.clone(),
                outcome,
                reason: None,
            }),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!(name = %name, error = %e, "secret failed");
                results.push(ProvisioningResult {
                    remote_name: name.clone(),
                    outcome: Outcome::Failed,
                    reason: Some(e.to_string()),
                });
            }
        }
    }

    Ok(RunReport { results })
}

/// Seal and write one secret. At most one upsert attempt per run.
fn provision_one(
    manifest: &Manifest,
    secret: &ResolvedSecret,
    store: &dyn SecretStore,
    existing: &BTreeSet<String>,
    repository_id: &mut Option<Option<u64>>,
) -> Result<Outcome> {
    let key = store.fetch_public_key()?;
    let sealed = sealed_box::seal(&secret.spec.value, &key.key)?;

    store.upsert_secret(
        &secret.remote_name,
        &sealed,
        &key.key_id,
        secret.spec.visibility,
    )?;

    let outcome = if existing.contains(&secret.remote_name) {
        Outcome::Updated
    } else {
        Outcome::Created
    };

    // Access lists only exist for selected visibility; any configured
    // repository is ignored for all/private secrets.
    if secret.spec.visibility == Visibility::Selected {
        if let Some(repository) = &manifest.project.repository {
            let id = match *repository_id {
                Some(id) => id,
                None => {
                    let id = store.repository_id(repository)?;
                    if id.is_none() {
                        warn!(
                            repository = %repository,
                            "repository not found; grant secret access manually"
                        );
                    }
                    *repository_id = Some(id);
                    id
                }
            };

            if let Some(id) = id {
                store.set_repository_access(&secret.remote_name, id)?;
            }
        }
    }

    Ok(outcome)
}
