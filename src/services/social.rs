use crate::error::{PortfolioError, Result};
use crate::upstream::UpstreamClient;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const TWITTER_API_BASE: &str = "https://api.twitter.com";

#[derive(Debug, Clone)]
pub struct TweetVerification {
    pub verified: bool,
    pub reason: Option<String>,
}

impl TweetVerification {
    fn no(reason: &str) -> Self {
        Self {
            verified: false,
            reason: Some(reason.to_string()),
        }
    }

    fn yes() -> Self {
        Self {
            verified: true,
            reason: None,
        }
    }
}

/// Verifies tweet authorship and content for mission completion. Content
/// or authorship mismatches are soft `verified:false` outcomes; only
/// credential and transport faults are hard errors.
pub struct TweetVerifier {
    upstream: Arc<UpstreamClient>,
    bearer_token: Option<String>,
    timeout: Duration,
}

impl TweetVerifier {
    pub fn new(upstream: Arc<UpstreamClient>, bearer_token: Option<String>, timeout: Duration) -> Self {
        Self {
            upstream,
            bearer_token,
            timeout,
        }
    }

    fn bearer(&self) -> Result<&str> {
        self.bearer_token
            .as_deref()
            .ok_or(PortfolioError::MissingCredential("twitter"))
    }

    pub async fn verify(
        &self,
        tweet_text: &str,
        user_id: &str,
        tweet_id: Option<&str>,
    ) -> Result<TweetVerification> {
        let bearer = self.bearer()?.to_string();

        let lookup = match tweet_id {
            Some(id) => self.lookup_by_id(&bearer, id).await,
            None => self.lookup_recent(&bearer, user_id).await,
        };

        let tweets = match lookup {
            Ok(tweets) => tweets,
            // A rejected lookup (deleted tweet, protected account, bad id)
            // is a failed verification, not a server error.
            Err(PortfolioError::UpstreamStatus { status, .. }) => {
                debug!(status, "tweet lookup rejected by upstream");
                return Ok(TweetVerification::no("tweet lookup failed"));
            }
            Err(err) => return Err(err),
        };

        for (author_id, text) in &tweets {
            if author_id != user_id {
                continue;
            }
            if contains_normalized(text, tweet_text) {
                return Ok(TweetVerification::yes());
            }
        }

        if tweets.iter().any(|(author, _)| author == user_id) {
            Ok(TweetVerification::no("tweet text does not match"))
        } else {
            Ok(TweetVerification::no("tweet not authored by user"))
        }
    }

    async fn lookup_by_id(&self, bearer: &str, tweet_id: &str) -> Result<Vec<(String, String)>> {
        let raw = self
            .upstream
            .get_json_url(
                &format!("{}/2/tweets/{}", TWITTER_API_BASE, tweet_id),
                bearer,
                &[("tweet.fields", "author_id,text".to_string())],
                self.timeout,
            )
            .await?;

        Ok(extract_tweets(raw.get("data")))
    }

    async fn lookup_recent(&self, bearer: &str, user_id: &str) -> Result<Vec<(String, String)>> {
        let raw = self
            .upstream
            .get_json_url(
                &format!("{}/2/users/{}/tweets", TWITTER_API_BASE, user_id),
                bearer,
                &[
                    ("max_results", "10".to_string()),
                    ("tweet.fields", "author_id,text".to_string()),
                ],
                self.timeout,
            )
            .await?;

        Ok(extract_tweets(raw.get("data")))
    }
}

/// The by-id endpoint returns one object, the timeline endpoint an array.
fn extract_tweets(data: Option<&Value>) -> Vec<(String, String)> {
    let tweet_fields = |tweet: &Value| {
        let author = tweet.get("author_id")?.as_str()?.to_string();
        let text = tweet.get("text")?.as_str()?.to_string();
        Some((author, text))
    };

    match data {
        Some(Value::Array(tweets)) => tweets.iter().filter_map(tweet_fields).collect(),
        Some(tweet @ Value::Object(_)) => tweet_fields(tweet).into_iter().collect(),
        _ => vec![],
    }
}

/// Case-insensitive containment after whitespace collapsing, so retweet
/// formatting and line breaks don't fail an otherwise-matching tweet.
fn contains_normalized(haystack: &str, needle: &str) -> bool {
    let normalize = |s: &str| s.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    let needle = normalize(needle);
    needle.is_empty() || normalize(haystack).contains(&needle)
}
