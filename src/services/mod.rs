pub mod aggregator;
pub mod api_service;
pub mod history;
pub mod market;
pub mod orders;
pub mod portfolio;
pub mod social;

pub use aggregator::MultiChainPortfolioAggregator;
pub use api_service::ApiService;
pub use history::HistoryService;
pub use market::MarketService;
pub use orders::{OneInchOrderSdk, OrderSdk};
pub use portfolio::{PortfolioFetcher, SingleChainPortfolioService};
pub use social::{TweetVerification, TweetVerifier};
