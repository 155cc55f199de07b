//! Orgseal - provision GitHub organization secrets from a declarative manifest.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── apply         # Provision secrets from a manifest
//! │   ├── plan          # Dry-run preview
//! │   ├── check         # Validate manifest + verify remote access
//! │   ├── list          # List remote secrets (project vs shared)
//! │   ├── delete        # Delete one secret or purge a project prefix
//! │   ├── init          # Write a starter manifest
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── manifest      # Manifest loading and validation
//!     ├── resolve       # Project-prefix name resolution
//!     ├── sealed_box    # Sealed-box encryption for the store public key
//!     ├── github        # Remote secret store client (+ SecretStore trait)
//!     └── provision     # Batch orchestrator with per-secret outcomes
//! ```
//!
//! # Features
//!
//! - Declarative YAML manifest with per-secret visibility and prefixing
//! - Deterministic project-scoped secret naming with collision detection
//! - Sealed-box encryption: plaintext never leaves the process unencrypted
//! - Idempotent create-or-update writes, safe to re-run at any time
//! - Dry-run mode that performs no encryption and no writes

pub mod cli;
pub mod core;
pub mod error;
