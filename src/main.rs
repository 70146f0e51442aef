use anyhow::Result;
use portfolio_gateway::config::Config;
use portfolio_gateway::services::ApiService;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded successfully");

    // Create and start API service
    let api_service = ApiService::new(config);
    api_service.start().await?;

    Ok(())
}
