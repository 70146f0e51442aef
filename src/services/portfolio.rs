use crate::error::Result;
use crate::types::PortfolioResponse;
use crate::upstream::{normalize, UpstreamClient};
use crate::validation::{validate_chain_id, validate_wallet_address};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Seam between the single-chain fetch and the multi-chain aggregator,
/// so fan-out behavior is testable without a live upstream.
#[async_trait]
pub trait PortfolioFetcher: Send + Sync {
    async fn fetch(&self, wallet_address: &str, chain_id: u64) -> Result<PortfolioResponse>;
}

/// Fetches and normalizes holdings + valuation for one wallet on one chain.
pub struct SingleChainPortfolioService {
    upstream: Arc<UpstreamClient>,
    timeout: Duration,
}

impl SingleChainPortfolioService {
    pub fn new(upstream: Arc<UpstreamClient>, timeout: Duration) -> Self {
        Self { upstream, timeout }
    }
}

#[async_trait]
impl PortfolioFetcher for SingleChainPortfolioService {
    async fn fetch(&self, wallet_address: &str, chain_id: u64) -> Result<PortfolioResponse> {
        // Both checks precede any network activity.
        validate_wallet_address(wallet_address)?;
        validate_chain_id(chain_id)?;

        let raw = self
            .upstream
            .get_json(
                "/portfolio/portfolio/v4/overview/erc20/details",
                &[
                    ("addresses", wallet_address.to_string()),
                    ("chain_id", chain_id.to_string()),
                ],
                self.timeout,
            )
            .await?;

        let portfolio = normalize::normalize_portfolio(wallet_address, chain_id, &raw);
        debug!(
            chain_id,
            tokens = portfolio.tokens.len(),
            total_value = portfolio.total_value,
            "portfolio normalized"
        );
        Ok(portfolio)
    }
}
