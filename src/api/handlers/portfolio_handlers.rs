use super::ApiResponse;
use crate::api::ApiState;
use crate::services::history::DEFAULT_HISTORY_LIMIT;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PortfolioQuery {
    #[serde(rename = "chainId")]
    pub chain_id: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(rename = "chainId")]
    pub chain_id: Option<u64>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

/// GET /api/portfolio/:address?chainId=
pub async fn get_portfolio(
    Path(address): Path<String>,
    Query(params): Query<PortfolioQuery>,
    State(state): State<ApiState>,
) -> (StatusCode, String) {
    use crate::services::PortfolioFetcher;

    let chain_id = params.chain_id.unwrap_or(1);
    match state.portfolio.fetch(&address, chain_id).await {
        Ok(data) => ApiResponse::success(data),
        Err(e) => {
            tracing::error!("Failed to fetch portfolio for {}: {}", address, e);
            ApiResponse::<()>::failure(&e)
        }
    }
}

/// GET /api/portfolio/all/:address — fans out over every configured chain;
/// per-chain failures are reported inside the (successful) aggregate.
pub async fn get_all_portfolios(
    Path(address): Path<String>,
    State(state): State<ApiState>,
) -> (StatusCode, String) {
    match state.aggregator.fetch_all(&address, &state.chains).await {
        Ok(data) => ApiResponse::success(data),
        Err(e) => {
            tracing::error!("Failed to aggregate portfolios for {}: {}", address, e);
            ApiResponse::<()>::failure(&e)
        }
    }
}

/// GET /api/history/:address?chainId=&limit=&page=
pub async fn get_history(
    Path(address): Path<String>,
    Query(params): Query<HistoryQuery>,
    State(state): State<ApiState>,
) -> (StatusCode, String) {
    let chain_id = params.chain_id.unwrap_or(1);
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let page = params.page.unwrap_or(1);

    match state.history.fetch(&address, chain_id, limit, page).await {
        Ok(data) => ApiResponse::success(data),
        Err(e) => {
            tracing::error!("Failed to fetch history for {}: {}", address, e);
            ApiResponse::<()>::failure(&e)
        }
    }
}
