//! Package registry access.
//!
//! The catalog only ever needs "GET this URL and decode JSON", so the
//! registry is reached through the one-method [`RegistryClient`] trait.
//! [`HttpRegistryClient`] is the reqwest-backed implementation.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::CatalogError;

/// User-Agent sent to the registry.
const USER_AGENT: &str = concat!("pluginhub/", env!("CARGO_PKG_VERSION"));

/// URL listing the package names of one composer type.
pub fn package_list_url(base_url: &str, category: &str) -> String {
    format!(
        "{base_url}/packages/list.json?type={}",
        urlencoding::encode(category)
    )
}

/// URL of a package's full version history.
pub fn package_url(base_url: &str, package: &str) -> String {
    format!("{base_url}/p/{package}.json")
}

// ── RegistryClient trait ─────────────────────────────────────────────

/// Fetch a JSON document from the registry.
///
/// Implementations must keep object key order as sent by the registry;
/// version histories are ordered maps.
#[async_trait]
pub trait RegistryClient: Send + Sync + 'static {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, CatalogError>;
}

// ── HTTP implementation ──────────────────────────────────────────────

/// Registry client over HTTP.
pub struct HttpRegistryClient {
    http: reqwest::Client,
}

impl HttpRegistryClient {
    /// Create a client with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl RegistryClient for HttpRegistryClient {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, CatalogError> {
        debug!(url = url, "fetching registry document");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
