use crate::api::{create_router, ApiState};
use crate::config::Config;
use anyhow::Result;
use tracing::info;

pub struct ApiService {
    config: Config,
    state: ApiState,
}

impl ApiService {
    pub fn new(config: Config) -> Self {
        let state = ApiState::new(&config);
        Self { config, state }
    }

    pub async fn start(&self) -> Result<()> {
        info!("🚀 Starting portfolio gateway...");

        let app = create_router(self.state.clone());
        let listener = tokio::net::TcpListener::bind(format!(
            "{}:{}",
            self.config.server.host, self.config.server.port
        ))
        .await?;

        info!(
            "API server listening on {}:{} ({} chains configured)",
            self.config.server.host,
            self.config.server.port,
            self.config.chains.len()
        );
        axum::serve(listener, app).await?;

        Ok(())
    }
}
