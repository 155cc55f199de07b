//! Remote name resolution.
//!
//! Computes the final remote name for each declared secret: prefixed
//! secrets become `PROJECT_NAME` + `_` + declared name, unprefixed secrets
//! keep their declared name (the sharing mechanism across projects).
//! Resolution is a pure function of the manifest, so two calls always
//! produce identical sequences.

use std::collections::HashMap;

use crate::core::manifest::{Manifest, SecretSpec};
use crate::core::types::{RemoteName, SecretName};
use crate::error::{ResolveError, Result};

/// A secret with its computed remote name.
#[derive(Debug, Clone)]
pub struct ResolvedSecret {
    /// Name as declared in the manifest.
    pub key: SecretName,
    /// Final name in the remote store.
    pub remote_name: RemoteName,
    pub spec: SecretSpec,
}

/// Resolve every declared secret, in manifest order.
///
/// # Errors
///
/// Returns `ResolveError::NameCollision` if two entries resolve to the
/// same remote name, naming both declared secrets. Nothing is provisioned
/// when resolution fails.
pub fn resolve(manifest: &Manifest) -> Result<Vec<ResolvedSecret>> {
    let mut seen: HashMap<RemoteName, SecretName> = HashMap::new();
    let mut resolved = Vec::with_capacity(manifest.secrets.len());

    for (key, spec) in &manifest.secrets {
        let remote_name = remote_name(&manifest.project.name, key, spec.prefix);

        if let Some(first) = seen.get(&remote_name) {
            return Err(ResolveError::NameCollision {
                name: remote_name,
                first: first.clone(),
                second: key.clone(),
            }
            .into());
        }
        seen.insert(remote_name.clone(), key.clone());

        resolved.push(ResolvedSecret {
            key: key.clone(),
            remote_name,
            spec: spec.clone(),
        });
    }

    Ok(resolved)
}

/// Apply the prefix rule to one declared name.
pub fn remote_name(project: &str, key: &str, prefix: bool) -> RemoteName {
    if prefix {
        format!("{}_{}", project, key)
    } else {
        key.to_string()
    }
}
