//! Init command - write a starter manifest.

use std::path::Path;

use crate::cli::output;
use crate::error::{Error, Result};

const STARTER_MANIFEST: &str = r#"# orgseal secrets manifest
#
# Remote names are computed as PROJECT_NAME + "_" + secret name unless an
# entry sets `prefix: false` (shared across projects).

github:
  organization: your-org
  # Omit to use the GITHUB_TOKEN environment variable instead.
  # The token needs admin:org scope.
  token: ""

project:
  # Uppercase letters, digits, and underscores only.
  name: MY_BOT
  # Repository granted access to selected-visibility secrets.
  repository: my-bot

secrets:
  TELEGRAM_BOT_TOKEN:
    value: ""
    description: Bot API token from @BotFather

  DATABASE_URL:
    value: ""
    description: PostgreSQL connection string

  DEPLOY_SSH_KEY:
    value: ""
    description: Deploy key shared across projects
    prefix: false

  AI_API_KEY:
    value: ""
    description: Optional AI provider key; leave blank to skip

advanced:
  update_existing: true
  # Set to false to allow blank values for optional secrets.
  validate_values: true
  dry_run: false
"#;

/// Write a starter manifest, refusing to overwrite an existing file.
pub fn execute(path: &Path) -> Result<i32> {
    if path.exists() {
        return Err(Error::Other(format!(
            "refusing to overwrite existing {}",
            path.display()
        )));
    }

    std::fs::write(path, STARTER_MANIFEST)?;

    output::success(&format!("wrote {}", path.display()));
    output::hint(&format!(
        "fill in values, then preview with {}",
        output::cmd(&format!("orgseal plan {}", path.display()))
    ));

    Ok(0)
}
