//! Error types for orgseal operations.
//!
//! The top-level [`Error`] wraps stage-specific sub-enums so callers can
//! match on the failure class: manifest problems abort before any remote
//! call, API problems carry enough detail to decide between aborting the
//! run and failing a single secret.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Failures while loading or validating the secrets manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("manifest not found: {0}")]
    NotFound(String),

    #[error("failed to read manifest {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Aggregated semantic violations, collected in one pass so a broken
    /// manifest can be fixed without repeated round-trips.
    #[error("invalid manifest:\n  - {}", .violations.join("\n  - "))]
    Invalid { violations: Vec<String> },
}

/// Failures while resolving declared secret names to remote names.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error(
        "name collision: '{first}' and '{second}' both resolve to remote secret '{name}'"
    )]
    NameCollision {
        name: String,
        first: String,
        second: String,
    },
}

/// Local sealed-box encryption failures.
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("invalid store public key: {0}")]
    InvalidPublicKey(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),
}

/// Failures reported by (or while talking to) the remote secret store.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("authentication rejected ({status}): {message}")]
    Auth { status: u16, message: String },

    #[error("not found: {what}")]
    NotFound { what: String },

    #[error("rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("rejected by the API: {message}")]
    Validation { message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected API response ({status}): {message}")]
    Status { status: u16, message: String },
}

impl Error {
    /// Whether this error invalidates the whole run.
    ///
    /// Authentication and scope-existence failures affect every subsequent
    /// call identically, so the batch stops instead of producing a string
    /// of misleading per-secret failures.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Api(ApiError::Auth { .. }) | Error::Api(ApiError::NotFound { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_manifest_lists_every_violation() {
        let err = ManifestError::Invalid {
            violations: vec![
                "project: missing name".to_string(),
                "github: missing organization".to_string(),
            ],
        };

        let msg = err.to_string();
        assert!(msg.contains("project: missing name"));
        assert!(msg.contains("github: missing organization"));
    }

    #[test]
    fn test_fatal_classification() {
        let auth: Error = ApiError::Auth {
            status: 401,
            message: "bad credentials".to_string(),
        }
        .into();
        assert!(auth.is_fatal());

        let validation: Error = ApiError::Validation {
            message: "name too long".to_string(),
        }
        .into();
        assert!(!validation.is_fatal());

        let crypto: Error = CryptoError::EncryptionFailed("bad input".to_string()).into();
        assert!(!crypto.is_fatal());
    }
}
