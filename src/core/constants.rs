//! Constants used throughout orgseal.
//!
//! Centralizes magic strings and configuration values.

use std::time::Duration;

/// Default manifest file name (secrets.yaml).
pub const DEFAULT_MANIFEST: &str = "secrets.yaml";

/// Base URL of the remote secret store API.
pub const API_BASE: &str = "https://api.github.com";

/// Media type the API expects.
pub const API_ACCEPT: &str = "application/vnd.github+json";

/// API version header value.
pub const API_VERSION: &str = "2022-11-28";

/// Bounded timeout applied to every remote request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum attempts for transient remote failures (5xx, 429, transport).
pub const RETRY_ATTEMPTS: u32 = 3;

/// Base delay for doubling retry backoff.
pub const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

/// Page size used when listing remote secrets.
pub const PAGE_SIZE: usize = 100;

/// Environment variable consulted when the manifest omits github.token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";
