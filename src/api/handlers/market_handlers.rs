use crate::api::ApiState;
use crate::error::PortfolioError;
use crate::services::market::DEFAULT_CHART_PERIOD;
use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct TokenInfoQuery {
    pub address: Option<String>,
    #[serde(rename = "chainId")]
    pub chain_id: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct GasPriceQuery {
    #[serde(rename = "chainId")]
    pub chain_id: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct PriceChartQuery {
    #[serde(rename = "fromToken")]
    pub from_token: Option<String>,
    #[serde(rename = "toToken")]
    pub to_token: Option<String>,
    pub period: Option<String>,
    #[serde(rename = "chainId")]
    pub chain_id: Option<u64>,
}

/// GET /api/token-info?address=&chainId=
///
/// Soft-failure endpoint: an upstream error still answers HTTP 200 with
/// `{token: null, error}`. Only caller mistakes (400) and the missing
/// credential (500) are hard statuses.
pub async fn get_token_info(
    Query(params): Query<TokenInfoQuery>,
    State(state): State<ApiState>,
) -> (StatusCode, String) {
    let Some(address) = params.address else {
        return (
            StatusCode::BAD_REQUEST,
            json!({ "error": "address parameter is required" }).to_string(),
        );
    };
    let chain_id = params.chain_id.unwrap_or(1);

    match state.market.token_info(chain_id, &address).await {
        Ok(token) => (StatusCode::OK, json!({ "token": token }).to_string()),
        Err(e @ PortfolioError::Validation(_)) => (
            StatusCode::BAD_REQUEST,
            json!({ "token": null, "error": e.to_string() }).to_string(),
        ),
        Err(e @ PortfolioError::MissingCredential(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": e.to_string() }).to_string(),
        ),
        Err(e) => {
            tracing::warn!("Token info lookup failed for {}: {}", address, e);
            (
                StatusCode::OK,
                json!({ "token": null, "error": e.to_string() }).to_string(),
            )
        }
    }
}

/// GET /api/gas-price?chainId=
///
/// Hard-failure endpoint (unlike token-info): an upstream error is an
/// HTTP 500 carrying `{error, details}`. The response body on success is
/// the bare tiers object, not the success envelope.
pub async fn get_gas_price(
    Query(params): Query<GasPriceQuery>,
    State(state): State<ApiState>,
) -> (StatusCode, String) {
    let chain_id = params.chain_id.unwrap_or(1);

    match state.market.gas_price(chain_id).await {
        Ok(tiers) => (StatusCode::OK, serde_json::to_string(&tiers).unwrap()),
        Err(e @ PortfolioError::Validation(_)) => (
            StatusCode::BAD_REQUEST,
            json!({ "error": e.to_string() }).to_string(),
        ),
        Err(e @ PortfolioError::MissingCredential(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": e.to_string() }).to_string(),
        ),
        Err(e) => {
            tracing::error!("Failed to fetch gas price for chain {}: {}", chain_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Failed to fetch gas price", "details": e.to_string() })
                    .to_string(),
            )
        }
    }
}

/// GET /api/charts/price?fromToken=&toToken=&period=&chainId=
///
/// Unknown symbols and periods are 400s before any upstream call; an
/// upstream failure degrades to HTTP 200 with an empty series.
pub async fn get_price_chart(
    Query(params): Query<PriceChartQuery>,
    State(state): State<ApiState>,
) -> (StatusCode, String) {
    let (Some(from_token), Some(to_token)) = (params.from_token, params.to_token) else {
        return (
            StatusCode::BAD_REQUEST,
            json!({ "error": "fromToken and toToken parameters are required" }).to_string(),
        );
    };
    let period = params.period.unwrap_or_else(|| DEFAULT_CHART_PERIOD.to_string());
    let chain_id = params.chain_id.unwrap_or(1);

    match state
        .market
        .price_chart(&from_token, &to_token, &period, chain_id)
        .await
    {
        Ok(prices) => (StatusCode::OK, json!({ "prices": prices }).to_string()),
        Err(e @ PortfolioError::Validation(_)) => (
            StatusCode::BAD_REQUEST,
            json!({ "error": e.to_string() }).to_string(),
        ),
        Err(e @ PortfolioError::MissingCredential(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": e.to_string() }).to_string(),
        ),
        Err(e) => {
            tracing::warn!(
                "Price chart fetch failed for {}/{}: {}",
                from_token,
                to_token,
                e
            );
            (StatusCode::OK, json!({ "prices": [] }).to_string())
        }
    }
}
