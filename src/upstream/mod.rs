pub mod normalize;

use crate::config::UpstreamConfig;
use crate::error::{PortfolioError, Result};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Authenticated HTTP access to the 1inch REST surface (and, via
/// [`get_json_url`](Self::get_json_url), other bearer-token APIs). Owns the
/// timeout and auth-header policy; one instance is shared across all
/// services for the process lifetime.
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Self {
        // Per-call timeouts only; the aggregate budget is enforced upstack.
        let client = reqwest::Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// Fails fast, before any network call, when the credential is absent.
    fn bearer(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or(PortfolioError::MissingCredential("1inch"))
    }

    pub async fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
        timeout: Duration,
    ) -> Result<Value> {
        let bearer = self.bearer()?.to_string();
        let url = format!("{}{}", self.base_url, path);
        self.get_json_url(&url, &bearer, query, timeout).await
    }

    pub async fn post_json(&self, path: &str, body: &Value, timeout: Duration) -> Result<Value> {
        let bearer = self.bearer()?;
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(bearer)
            .header("Accept", "application/json")
            .json(body)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_transport(e, timeout))?;

        Self::decode(response, timeout).await
    }

    /// Absolute-URL variant used for non-1inch upstreams (Twitter). The
    /// caller supplies its own bearer token.
    pub async fn get_json_url(
        &self,
        url: &str,
        bearer: &str,
        query: &[(&str, String)],
        timeout: Duration,
    ) -> Result<Value> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(bearer)
            .header("Accept", "application/json")
            .query(query)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_transport(e, timeout))?;

        Self::decode(response, timeout).await
    }

    async fn decode(response: reqwest::Response, timeout: Duration) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PortfolioError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| classify_transport(e, timeout))
    }
}

fn classify_transport(err: reqwest::Error, timeout: Duration) -> PortfolioError {
    if err.is_timeout() {
        PortfolioError::Timeout(timeout)
    } else {
        PortfolioError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_credential_fails_before_any_network_call() {
        // Unroutable base URL: a network attempt would surface as a
        // Network/Timeout error, not MissingCredential.
        let client = UpstreamClient::new(&UpstreamConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            api_key: None,
        });

        let err = client
            .get_json("/gas-price/v1.5/1", &[], Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, PortfolioError::MissingCredential("1inch")));
    }
}
