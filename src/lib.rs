pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod services;
pub mod types;
pub mod upstream;
pub mod validation;

pub use config::Config;
pub use error::PortfolioError;
pub use types::*;
