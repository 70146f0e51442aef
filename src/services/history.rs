use crate::error::{PortfolioError, Result};
use crate::types::TransactionHistoryResponse;
use crate::upstream::{normalize, UpstreamClient};
use crate::validation::{validate_chain_id, validate_wallet_address};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_HISTORY_LIMIT: u32 = 20;
pub const MAX_HISTORY_LIMIT: u32 = 100;

/// Transaction history for one wallet on one chain, paginated.
pub struct HistoryService {
    upstream: Arc<UpstreamClient>,
    timeout: Duration,
}

impl HistoryService {
    pub fn new(upstream: Arc<UpstreamClient>, timeout: Duration) -> Self {
        Self { upstream, timeout }
    }

    pub async fn fetch(
        &self,
        wallet_address: &str,
        chain_id: u64,
        limit: u32,
        page: u32,
    ) -> Result<TransactionHistoryResponse> {
        validate_wallet_address(wallet_address)?;
        validate_chain_id(chain_id)?;
        if limit == 0 || limit > MAX_HISTORY_LIMIT {
            return Err(PortfolioError::Validation(format!(
                "limit must be between 1 and {}",
                MAX_HISTORY_LIMIT
            )));
        }
        if page == 0 {
            return Err(PortfolioError::Validation(
                "page must be at least 1".to_string(),
            ));
        }

        let raw = self
            .upstream
            .get_json(
                &format!("/history/v2.0/history/{}/events", wallet_address),
                &[
                    ("chainId", chain_id.to_string()),
                    ("limit", limit.to_string()),
                    ("page", page.to_string()),
                ],
                self.timeout,
            )
            .await?;

        Ok(normalize::normalize_history(
            wallet_address,
            chain_id,
            limit,
            page,
            &raw,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UpstreamConfig;

    const WALLET: &str = "0x1111111254eeb25477b68fb85ed929f73a960582";

    fn service() -> HistoryService {
        let upstream = Arc::new(UpstreamClient::new(&UpstreamConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            api_key: None,
        }));
        HistoryService::new(upstream, Duration::from_secs(1))
    }

    #[tokio::test]
    async fn test_limit_bounds() {
        assert!(matches!(
            service().fetch(WALLET, 1, 0, 1).await.unwrap_err(),
            PortfolioError::Validation(_)
        ));
        assert!(matches!(
            service().fetch(WALLET, 1, 101, 1).await.unwrap_err(),
            PortfolioError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn test_page_must_be_positive() {
        assert!(matches!(
            service().fetch(WALLET, 1, 20, 0).await.unwrap_err(),
            PortfolioError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn test_valid_params_reach_credential_check() {
        assert!(matches!(
            service().fetch(WALLET, 1, 20, 1).await.unwrap_err(),
            PortfolioError::MissingCredential("1inch")
        ));
    }
}
