pub mod handlers;
pub mod routes;

pub use routes::create_router;

use crate::cache::TokenInfoCache;
use crate::config::{ChainConfig, Config};
use crate::services::{
    HistoryService, MarketService, MultiChainPortfolioAggregator, OneInchOrderSdk, OrderSdk,
    SingleChainPortfolioService, TweetVerifier,
};
use crate::upstream::UpstreamClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiState {
    pub chains: Arc<Vec<ChainConfig>>,
    pub portfolio: Arc<SingleChainPortfolioService>,
    pub aggregator: Arc<MultiChainPortfolioAggregator>,
    pub market: Arc<MarketService>,
    pub history: Arc<HistoryService>,
    pub orders: Arc<dyn OrderSdk>,
    pub tweets: Arc<TweetVerifier>,
}

impl ApiState {
    pub fn new(config: &Config) -> Self {
        let upstream = Arc::new(UpstreamClient::new(&config.upstream));
        // The one piece of shared mutable state in the core.
        let cache = Arc::new(TokenInfoCache::new());

        let portfolio = Arc::new(SingleChainPortfolioService::new(
            Arc::clone(&upstream),
            config.timeouts.portfolio,
        ));
        let aggregator = Arc::new(MultiChainPortfolioAggregator::new(
            Arc::clone(&portfolio) as Arc<dyn crate::services::PortfolioFetcher>,
            config.timeouts.aggregate,
        ));

        Self {
            chains: Arc::new(config.chains.clone()),
            portfolio,
            aggregator,
            market: Arc::new(MarketService::new(
                Arc::clone(&upstream),
                cache,
                config.timeouts.default,
            )),
            history: Arc::new(HistoryService::new(
                Arc::clone(&upstream),
                config.timeouts.portfolio,
            )),
            orders: Arc::new(OneInchOrderSdk::new(
                Arc::clone(&upstream),
                config.timeouts.default,
            )),
            tweets: Arc::new(TweetVerifier::new(
                upstream,
                config.social.twitter_bearer_token.clone(),
                config.timeouts.default,
            )),
        }
    }
}
