use crate::api::ApiState;
use crate::error::PortfolioError;
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct SubmitOrderRequest {
    pub order: Option<Value>,
    pub signature: Option<String>,
    #[serde(rename = "chainId")]
    pub chain_id: Option<u64>,
}

/// POST /api/limit-orders/submit
///
/// The order arrives already built and signed on the client; a failure from
/// the submission capability surfaces its message verbatim as a 500.
pub async fn submit_limit_order(
    State(state): State<ApiState>,
    Json(body): Json<SubmitOrderRequest>,
) -> (StatusCode, String) {
    let Some(order) = body.order else {
        return (
            StatusCode::BAD_REQUEST,
            json!({ "error": "order is required" }).to_string(),
        );
    };
    let Some(signature) = body.signature else {
        return (
            StatusCode::BAD_REQUEST,
            json!({ "error": "signature is required" }).to_string(),
        );
    };
    let chain_id = body.chain_id.unwrap_or(1);

    match state.orders.submit_order(&order, &signature, chain_id).await {
        Ok(result) => (
            StatusCode::OK,
            json!({ "success": true, "result": result }).to_string(),
        ),
        Err(e @ PortfolioError::Validation(_)) => (
            StatusCode::BAD_REQUEST,
            json!({ "error": e.to_string() }).to_string(),
        ),
        Err(e) => {
            tracing::error!("Limit order submission failed: {}", e);
            let message = match &e {
                // Surface the upstream rejection body when there is one.
                PortfolioError::UpstreamStatus { body, .. } if !body.is_empty() => body.clone(),
                other => other.to_string(),
            };
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": message }).to_string(),
            )
        }
    }
}
