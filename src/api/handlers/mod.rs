pub mod market_handlers;
pub mod order_handlers;
pub mod portfolio_handlers;
pub mod social_handlers;

pub use market_handlers::*;
pub use order_handlers::*;
pub use portfolio_handlers::*;
pub use social_handlers::*;

use crate::error::PortfolioError;
use axum::http::StatusCode;
use serde::Serialize;

/// Uniform `{success, data}` / `{success:false, error, errorType}`
/// envelope used by the portfolio and history endpoints. The market
/// endpoints deliberately do not use it (see their per-endpoint contracts).
#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(rename = "errorType", skip_serializing_if = "Option::is_none")]
    error_type: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> (StatusCode, String) {
        let response = Self {
            success: true,
            data: Some(data),
            error: None,
            error_type: None,
        };
        (StatusCode::OK, serde_json::to_string(&response).unwrap())
    }

    fn failure(err: &PortfolioError) -> (StatusCode, String) {
        let response = Self {
            success: false,
            data: None,
            error: Some(err.to_string()),
            error_type: Some(err.error_type().to_string()),
        };
        (err.status_code(), serde_json::to_string(&response).unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shapes() {
        let (status, body) = ApiResponse::success(serde_json::json!({"x": 1}));
        assert_eq!(status, StatusCode::OK);
        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["success"], true);
        assert_eq!(parsed["data"]["x"], 1);
        assert!(parsed.get("error").is_none());

        let (status, body) =
            ApiResponse::<()>::failure(&PortfolioError::Validation("bad address".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["success"], false);
        assert_eq!(parsed["error"], "bad address");
        assert_eq!(parsed["errorType"], "VALIDATION_ERROR");
    }
}
