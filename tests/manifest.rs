//! Manifest loader tests over file fixtures.

mod support;
use support::Test;

use orgseal::core::manifest::{self, Visibility};
use orgseal::error::{Error, ManifestError};

const VALID: &str = r#"
github:
  organization: acme
  token: ghp_example
project:
  name: WEATHER_BOT
  repository: weather-bot
secrets:
  TELEGRAM_BOT_TOKEN:
    value: "123456:ABC"
    description: Bot API token
  DEPLOY_SSH_KEY:
    value: key material
    prefix: false
    visibility: all
advanced:
  dry_run: true
"#;

#[test]
fn test_load_from_file() {
    let t = Test::new();
    let path = t.write_manifest("secrets.yaml", VALID);

    let manifest = manifest::load(&path).unwrap();

    assert_eq!(manifest.github.organization, "acme");
    assert_eq!(manifest.project.repository.as_deref(), Some("weather-bot"));
    assert_eq!(manifest.secrets.len(), 2);
    assert!(manifest.advanced.dry_run);

    let (_, deploy) = &manifest.secrets[1];
    assert_eq!(deploy.visibility, Visibility::All);
    assert!(!deploy.prefix);
}

#[test]
fn test_load_missing_file() {
    let t = Test::new();
    let path = t.dir.path().join("nope.yaml");

    let err = manifest::load(&path).unwrap_err();
    assert!(matches!(
        err,
        Error::Manifest(ManifestError::NotFound(_))
    ));
}

#[test]
fn test_load_malformed_yaml() {
    let t = Test::new();
    let path = t.write_manifest("secrets.yaml", "github: [unclosed");

    let err = manifest::load(&path).unwrap_err();
    assert!(matches!(err, Error::Manifest(ManifestError::Parse(_))));
}

#[test]
fn test_token_env_fallback() {
    // Covers both sides of the fallback in one test: env mutation is
    // process-global, so the unset and set cases cannot be separate
    // parallel tests.
    std::env::remove_var("GITHUB_TOKEN");

    let without_token = r#"
github:
  organization: acme
project: {name: APP}
secrets:
  KEY: {value: v}
"#;

    let err = manifest::parse(without_token).unwrap_err();
    assert!(err.to_string().contains("GITHUB_TOKEN"));

    std::env::set_var("GITHUB_TOKEN", "ghp_from_env");
    let manifest = manifest::parse(without_token).unwrap();
    std::env::remove_var("GITHUB_TOKEN");

    assert_eq!(manifest.github.token, "ghp_from_env");
}

#[test]
fn test_explicit_token_wins_over_env() {
    let manifest = manifest::parse(
        r#"
github: {organization: acme, token: ghp_explicit}
project: {name: APP}
secrets:
  KEY: {value: v}
"#,
    )
    .unwrap();

    assert_eq!(manifest.github.token, "ghp_explicit");
}

#[test]
fn test_all_violations_reported_in_one_pass() {
    let t = Test::new();
    let path = t.write_manifest(
        "secrets.yaml",
        r#"
github:
  organization: acme
  token: t
project:
  name: lower_case
secrets:
  1BAD_NAME: {value: v}
  EMPTY_ONE: {value: ""}
  BAD_VIS: {value: v, visibility: everyone}
"#,
    );

    match manifest::load(&path) {
        Err(Error::Manifest(ManifestError::Invalid { violations })) => {
            assert_eq!(violations.len(), 4, "violations: {:?}", violations);
        }
        other => panic!("expected aggregated violations, got {:?}", other),
    }
}
