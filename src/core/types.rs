//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// A secret name as declared in the manifest (e.g., TELEGRAM_BOT_TOKEN).
///
/// Must be a valid environment variable name in SCREAMING_SNAKE_CASE.
pub type SecretName = String;

/// The final name of a secret in the remote store, after prefixing.
pub type RemoteName = String;
