//! HTTP client implementation

use std::time::Duration;

use reqwest::header::{self, HeaderMap};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

use crate::errors::ActionError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Authenticated JSON client for one upstream API
pub struct HttpClient {
    client: Client,
    base_url: String,
    service: &'static str,
}

impl HttpClient {
    /// Create a new HTTP client. `service` names the API in error messages.
    pub fn new(base_url: &str, service: &'static str) -> Result<Self, ActionError> {
        Self::with_headers(base_url, service, HeaderMap::new())
    }

    /// Create a new HTTP client sending `headers` on every request
    pub fn with_headers(
        base_url: &str,
        service: &'static str,
        headers: HeaderMap,
    ) -> Result<Self, ActionError> {
        Url::parse(base_url).map_err(|e| {
            ActionError::ConfigError(format!("Invalid {} API URL '{}': {}", service, base_url, e))
        })?;

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("vercel-await/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            service,
        })
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        token: &SecretString,
    ) -> Result<T, ActionError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", token.expose_secret()),
            )
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("HTTP GET {} failed: {} - {}", url, status, body);
            return Err(ActionError::UpstreamFetch {
                service: self.service,
                status: status.as_u16(),
            });
        }

        let body = response.json().await?;
        Ok(body)
    }
}
