use crate::config::ChainConfig;
use crate::error::{PortfolioError, Result};
use crate::services::portfolio::PortfolioFetcher;
use crate::types::{AllChainsPortfolioResponse, ChainPortfolioResult};
use crate::validation::validate_wallet_address;
use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Fans one portfolio fetch out per configured chain. A per-chain failure
/// (network, upstream status, timeout) never fails the aggregate: the
/// response always carries exactly one slot per input chain, tagged success
/// or failure. Configuration faults are the exception — a missing
/// credential would fail every chain identically, so it fails the whole
/// request instead (HTTP 500). All fetches share a single wall-clock
/// budget; fetches still unresolved when it expires are abandoned and
/// their slots tagged with the timeout reason.
pub struct MultiChainPortfolioAggregator {
    fetcher: Arc<dyn PortfolioFetcher>,
    budget: Duration,
}

impl MultiChainPortfolioAggregator {
    pub fn new(fetcher: Arc<dyn PortfolioFetcher>, budget: Duration) -> Self {
        Self { fetcher, budget }
    }

    pub async fn fetch_all(
        &self,
        wallet_address: &str,
        chains: &[ChainConfig],
    ) -> Result<AllChainsPortfolioResponse> {
        // Validate once up front; a bad address fails the whole request
        // instead of producing N identical validation slots.
        validate_wallet_address(wallet_address)?;

        let fetches = chains.iter().map(|chain| {
            let fetcher = Arc::clone(&self.fetcher);
            let wallet = wallet_address.to_string();
            let budget = self.budget;
            async move {
                match tokio::time::timeout(budget, fetcher.fetch(&wallet, chain.id)).await {
                    Ok(Ok(portfolio)) => Ok(ChainPortfolioResult::ok(chain, portfolio)),
                    // A configuration fault is not a per-chain condition.
                    Ok(Err(err @ PortfolioError::MissingCredential(_))) => Err(err),
                    Ok(Err(err)) => {
                        warn!(chain_id = chain.id, %err, "chain fetch failed");
                        Ok(ChainPortfolioResult::failed(chain, &err))
                    }
                    // Budget expired: the in-flight fetch is dropped here.
                    Err(_) => Ok(ChainPortfolioResult::failed(
                        chain,
                        &PortfolioError::Timeout(budget),
                    )),
                }
            }
        });

        let slots = join_all(fetches)
            .await
            .into_iter()
            .collect::<Result<Vec<ChainPortfolioResult>>>()?;

        let total_value = slots
            .iter()
            .filter_map(|slot| slot.data.as_ref())
            .map(|p| p.total_value)
            .sum();
        let failed_chains: Vec<u64> = slots
            .iter()
            .filter(|slot| !slot.success)
            .map(|slot| slot.chain_id)
            .collect();

        info!(
            chains = slots.len(),
            failed = failed_chains.len(),
            total_value,
            "multi-chain portfolio aggregated"
        );

        Ok(AllChainsPortfolioResponse {
            chains: slots,
            total_value,
            wallet_address: wallet_address.to_string(),
            failed_chains,
        })
    }
}
