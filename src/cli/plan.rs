//! Plan command - preview a run without writing anything.

use std::path::Path;

use crate::cli::apply;
use crate::error::Result;

/// Run apply with dry-run forced, regardless of the manifest flag.
pub fn execute(manifest_path: &Path, json: bool) -> Result<i32> {
    apply::execute(manifest_path, json, true)
}
