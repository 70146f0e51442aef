use super::{handlers, ApiState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        // Portfolio routes
        .route("/api/portfolio/all/:address", get(handlers::get_all_portfolios))
        .route("/api/portfolio/:address", get(handlers::get_portfolio))
        .route("/api/history/:address", get(handlers::get_history))
        // Market data routes
        .route("/api/token-info", get(handlers::get_token_info))
        .route("/api/gas-price", get(handlers::get_gas_price))
        .route("/api/charts/price", get(handlers::get_price_chart))
        // Order routes
        .route("/api/limit-orders/submit", post(handlers::submit_limit_order))
        // Mission verification
        .route("/api/verify-tweet", post(handlers::verify_tweet))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
