//! The HJRS catalog API client.

use crate::config::ClientConfig;
use crate::error::{HjrsError, Result};
use reqwest::Client;

/// Async client for the HEC Journal Recognition System catalog API.
///
/// Requests share a cookie store, so a session cookie set by the backend is
/// sent back on every later call.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> hjrs_client::error::Result<()> {
/// use hjrs_client::{CatalogClient, LookupKind};
///
/// let client = CatalogClient::from_env()?;
/// let journals = client.lookup(LookupKind::Issn, "1234-5678").await?;
/// for journal in &journals {
///     println!("{}", journal.title().unwrap_or("-"));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CatalogClient {
    pub(crate) http: Client,
    pub(crate) base_url: String,
    pub(crate) user_agent: String,
}

impl CatalogClient {
    /// Create a client against the production backend.
    pub fn new() -> Result<Self> {
        Self::from_config(ClientConfig::default())
    }

    /// Create a client from `HJRS_API_URL` / `HJRS_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            user_agent: config.user_agent,
        })
    }

    /// Override the base URL (useful for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request against the catalog API.
    pub(crate) async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, ?params, "GET");

        let response = self
            .http
            .get(&url)
            .header("Content-Type", "application/json")
            .header("User-Agent", &self.user_agent)
            .query(params)
            .send()
            .await?;

        handle_response(response).await
    }

    /// Make a POST request with a JSON body.
    pub(crate) async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "POST");

        let response = self
            .http
            .post(&url)
            .header("User-Agent", &self.user_agent)
            .json(body)
            .send()
            .await?;

        handle_response(response).await
    }
}

/// Handle the HTTP response, mapping status codes to errors.
async fn handle_response(response: reqwest::Response) -> Result<String> {
    let status = response.status().as_u16();

    match status {
        200..=299 => Ok(response.text().await?),
        401 | 403 => Err(HjrsError::Unauthorized { status }),
        404 => Err(HjrsError::NotFound(response.url().path().to_string())),
        _ => {
            let body = response.text().await.unwrap_or_default();
            Err(HjrsError::Api {
                status,
                message: body,
            })
        }
    }
}
