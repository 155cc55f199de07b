//! Remote secret store client.
//!
//! Wraps the GitHub Actions organization-secrets API: public-key fetch,
//! secret listing, create-or-update writes, repository access grants, and
//! deletion. All requests are synchronous with a bounded timeout. Transient
//! failures (5xx, 429, transport errors) are retried a small fixed number
//! of times with doubling backoff; authorization and validation failures
//! are never retried.

use std::cell::OnceCell;
use std::collections::BTreeSet;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::core::constants;
use crate::core::manifest::Visibility;
use crate::error::{ApiError, Error, Result};

/// Public key under which the store expects sealed values.
///
/// Stable for the lifetime of the scope, so it is fetched once per run.
#[derive(Debug, Clone, Deserialize)]
pub struct StorePublicKey {
    pub key_id: String,
    pub key: String,
}

/// Metadata for one remote secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteSecret {
    pub name: String,
    pub visibility: String,
}

/// Seam between the orchestrator and the remote store.
///
/// The production implementation is [`GithubClient`]; tests substitute a
/// recording fake. Every operation is idempotent or safely repeatable:
/// `upsert_secret` has replace semantics, and retry policy for transient
/// failures lives below this trait.
pub trait SecretStore {
    /// Fetch the scope's sealing key. Cached per run.
    fn fetch_public_key(&self) -> Result<StorePublicKey>;

    /// Names of every secret currently in the scope.
    fn list_secret_names(&self) -> Result<BTreeSet<String>>;

    /// Create or replace a secret with an already-sealed value.
    fn upsert_secret(
        &self,
        name: &str,
        encrypted_value: &str,
        key_id: &str,
        visibility: Visibility,
    ) -> Result<()>;

    /// Grant a repository access to a `selected`-visibility secret.
    fn set_repository_access(&self, name: &str, repository_id: u64) -> Result<()>;

    /// Numeric id of a repository, or `None` if it does not exist.
    fn repository_id(&self, repository: &str) -> Result<Option<u64>>;
}

/// Retry behavior for transient remote failures.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: constants::RETRY_ATTEMPTS,
            base_delay: constants::RETRY_BASE_DELAY,
        }
    }
}

/// Blocking client for the GitHub organization secrets API.
pub struct GithubClient {
    http: Client,
    base_url: String,
    organization: String,
    token: String,
    retry: RetryPolicy,
    public_key: OnceCell<StorePublicKey>,
}

impl GithubClient {
    /// Create a client against the public API.
    pub fn new(organization: &str, token: &str) -> Result<Self> {
        Self::with_base_url(organization, token, constants::API_BASE)
    }

    /// Create a client against an explicit base URL.
    pub fn with_base_url(organization: &str, token: &str, base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(constants::REQUEST_TIMEOUT)
            .user_agent(concat!("orgseal/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            organization: organization.to_string(),
            token: token.to_string(),
            retry: RetryPolicy::default(),
            public_key: OnceCell::new(),
        })
    }

    /// Override the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Check the token and organization before doing any work.
    ///
    /// Returns the authenticated login.
    pub fn verify_access(&self) -> Result<String> {
        #[derive(Deserialize)]
        struct User {
            login: String,
        }

        let user: User = self.get_json("/user", "authenticated user")?;
        debug!(login = %user.login, "token accepted");

        let org_path = format!("/orgs/{}", self.organization);
        let what = format!("organization '{}'", self.organization);
        self.request(Method::GET, &org_path, None)
            .map_err(|e| label_not_found(e, &what))?;

        Ok(user.login)
    }

    /// Every secret in the organization, with visibility metadata.
    pub fn list_secrets(&self) -> Result<Vec<RemoteSecret>> {
        #[derive(Deserialize)]
        struct Page {
            secrets: Vec<RemoteSecret>,
        }

        let what = format!("organization '{}'", self.organization);
        let mut all = Vec::new();
        let mut page = 1usize;

        loop {
            let path = format!(
                "/orgs/{}/actions/secrets?per_page={}&page={}",
                self.organization,
                constants::PAGE_SIZE,
                page
            );
            let response = self
                .request(Method::GET, &path, None)
                .map_err(|e| label_not_found(e, &what))?;
            let body: Page = response.json().map_err(ApiError::Transport)?;

            let fetched = body.secrets.len();
            all.extend(body.secrets);
            if fetched < constants::PAGE_SIZE {
                break;
            }
            page += 1;
        }

        debug!(count = all.len(), "listed remote secrets");
        Ok(all)
    }

    /// Delete one organization secret.
    pub fn delete_secret(&self, name: &str) -> Result<()> {
        let path = format!("/orgs/{}/actions/secrets/{}", self.organization, name);
        let what = format!("secret '{}'", name);
        self.request(Method::DELETE, &path, None)
            .map_err(|e| label_not_found(e, &what))?;
        Ok(())
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str, what: &str) -> Result<T> {
        let response = self
            .request(Method::GET, path, None)
            .map_err(|e| label_not_found(e, what))?;
        response.json().map_err(|e| ApiError::Transport(e).into())
    }

    /// Issue one API request, retrying transient failures.
    fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        let mut attempt = 0;

        loop {
            attempt += 1;

            let mut request = self
                .http
                .request(method.clone(), &url)
                .header(AUTHORIZATION, format!("Bearer {}", self.token))
                .header(ACCEPT, constants::API_ACCEPT)
                .header("X-GitHub-Api-Version", constants::API_VERSION);
            if let Some(ref body) = body {
                request = request.json(body);
            }

            match request.send() {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    if is_transient(status) && attempt < self.retry.attempts {
                        let delay = self.retry.base_delay * 2u32.pow(attempt - 1);
                        warn!(%status, attempt, path, "transient API failure, retrying");
                        std::thread::sleep(delay);
                        continue;
                    }

                    return Err(self.classify(status, response, path).into());
                }
                Err(e) => {
                    if attempt < self.retry.attempts {
                        let delay = self.retry.base_delay * 2u32.pow(attempt - 1);
                        warn!(error = %e, attempt, path, "request failed, retrying");
                        std::thread::sleep(delay);
                        continue;
                    }
                    return Err(ApiError::Transport(e).into());
                }
            }
        }
    }

    fn classify(&self, status: StatusCode, response: Response, path: &str) -> ApiError {
        let message = api_message(response);
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Auth {
                status: status.as_u16(),
                message,
            },
            StatusCode::NOT_FOUND => ApiError::NotFound {
                what: path.to_string(),
            },
            StatusCode::UNPROCESSABLE_ENTITY => ApiError::Validation { message },
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited {
                attempts: self.retry.attempts,
            },
            _ => ApiError::Status {
                status: status.as_u16(),
                message,
            },
        }
    }
}

impl SecretStore for GithubClient {
    fn fetch_public_key(&self) -> Result<StorePublicKey> {
        if let Some(key) = self.public_key.get() {
            return Ok(key.clone());
        }

        let path = format!("/orgs/{}/actions/secrets/public-key", self.organization);
        let what = format!("organization '{}'", self.organization);
        let key: StorePublicKey = self.get_json(&path, &what)?;

        debug!(key_id = %key.key_id, "fetched store public key");
        let _ = self.public_key.set(key.clone());
        Ok(key)
    }

    fn list_secret_names(&self) -> Result<BTreeSet<String>> {
        Ok(self.list_secrets()?.into_iter().map(|s| s.name).collect())
    }

    fn upsert_secret(
        &self,
        name: &str,
        encrypted_value: &str,
        key_id: &str,
        visibility: Visibility,
    ) -> Result<()> {
        let path = format!("/orgs/{}/actions/secrets/{}", self.organization, name);
        let what = format!("organization '{}'", self.organization);
        let payload = json!({
            "encrypted_value": encrypted_value,
            "key_id": key_id,
            "visibility": visibility.as_str(),
        });

        self.request(Method::PUT, &path, Some(payload))
            .map_err(|e| label_not_found(e, &what))?;
        debug!(name, %visibility, "secret written");
        Ok(())
    }

    fn set_repository_access(&self, name: &str, repository_id: u64) -> Result<()> {
        let path = format!(
            "/orgs/{}/actions/secrets/{}/repositories",
            self.organization, name
        );
        let what = format!("secret '{}'", name);
        let payload = json!({ "selected_repository_ids": [repository_id] });

        self.request(Method::PUT, &path, Some(payload))
            .map_err(|e| label_not_found(e, &what))?;
        debug!(name, repository_id, "repository access granted");
        Ok(())
    }

    fn repository_id(&self, repository: &str) -> Result<Option<u64>> {
        #[derive(Deserialize)]
        struct Repo {
            id: u64,
        }

        let path = format!("/repos/{}/{}", self.organization, repository);
        match self.get_json::<Repo>(&path, repository) {
            Ok(repo) => Ok(Some(repo.id)),
            Err(Error::Api(ApiError::NotFound { .. })) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

fn is_transient(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

/// Best-effort human message from an error response body.
fn api_message(response: Response) -> String {
    #[derive(Deserialize)]
    struct ApiMessage {
        message: String,
    }

    let text = response.text().unwrap_or_default();
    match serde_json::from_str::<ApiMessage>(&text) {
        Ok(body) => body.message,
        Err(_) if text.is_empty() => "no response body".to_string(),
        Err(_) => {
            let mut text = text;
            text.truncate(200);
            text
        }
    }
}

fn label_not_found(err: Error, what: &str) -> Error {
    match err {
        Error::Api(ApiError::NotFound { .. }) => ApiError::NotFound {
            what: what.to_string(),
        }
        .into(),
        other => other,
    }
}
