use crate::error::Result;
use crate::upstream::UpstreamClient;
use crate::validation::validate_chain_id;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Opaque order-submission capability. Order construction, hashing and
/// signing happen on the client; this side only forwards the signed order.
#[async_trait]
pub trait OrderSdk: Send + Sync {
    async fn submit_order(&self, order: &Value, signature: &str, chain_id: u64) -> Result<Value>;
}

/// Forwards signed limit orders to the upstream orderbook.
pub struct OneInchOrderSdk {
    upstream: Arc<UpstreamClient>,
    timeout: Duration,
}

impl OneInchOrderSdk {
    pub fn new(upstream: Arc<UpstreamClient>, timeout: Duration) -> Self {
        Self { upstream, timeout }
    }
}

#[async_trait]
impl OrderSdk for OneInchOrderSdk {
    async fn submit_order(&self, order: &Value, signature: &str, chain_id: u64) -> Result<Value> {
        validate_chain_id(chain_id)?;

        let body = json!({
            "order": order,
            "signature": signature,
        });

        let result = self
            .upstream
            .post_json(&format!("/orderbook/v4.0/{}", chain_id), &body, self.timeout)
            .await?;

        info!(chain_id, "limit order submitted");
        Ok(result)
    }
}
