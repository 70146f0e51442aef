use crate::api::ApiState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct VerifyTweetRequest {
    #[serde(rename = "tweetText")]
    pub tweet_text: Option<String>,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    #[serde(rename = "tweetId")]
    pub tweet_id: Option<String>,
}

/// POST /api/verify-tweet
///
/// Always 200 with `{verified: bool}` except for configuration/transport
/// faults, which are hard 500s.
pub async fn verify_tweet(
    State(state): State<ApiState>,
    Json(body): Json<VerifyTweetRequest>,
) -> (StatusCode, String) {
    let (Some(tweet_text), Some(user_id)) = (body.tweet_text, body.user_id) else {
        return (
            StatusCode::BAD_REQUEST,
            json!({ "error": "tweetText and userId are required" }).to_string(),
        );
    };

    match state
        .tweets
        .verify(&tweet_text, &user_id, body.tweet_id.as_deref())
        .await
    {
        Ok(verification) => (
            StatusCode::OK,
            json!({ "verified": verification.verified, "reason": verification.reason })
                .to_string(),
        ),
        Err(e) => {
            tracing::error!("Tweet verification failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": e.to_string() }).to_string(),
            )
        }
    }
}
