use serde::{Deserialize, Serialize};

use crate::config::ChainConfig;
use crate::error::PortfolioError;

/// One token holding, fully normalized. `value` is computed once at
/// normalization time (`balance / 10^decimals * price`) and never
/// recomputed downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    pub symbol: String,
    pub name: String,
    pub address: String,
    pub decimals: u32,
    #[serde(rename = "logoURI", skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,
    pub tags: Vec<String>,
    /// Stringified integer in base units.
    pub balance: String,
    /// Quote-currency price per whole token.
    pub price: f64,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_24h: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioResponse {
    pub tokens: Vec<TokenBalance>,
    /// Always the sum of `tokens[i].value`.
    pub total_value: f64,
    pub chain_id: u64,
    /// Stored as provided by the caller (case preserved).
    pub wallet_address: String,
}

/// One fan-out slot. The aggregated result always carries exactly one slot
/// per configured chain, tagged success or failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainPortfolioResult {
    pub chain_id: u64,
    pub chain_name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<PortfolioResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}

impl ChainPortfolioResult {
    pub fn ok(chain: &ChainConfig, data: PortfolioResponse) -> Self {
        Self {
            chain_id: chain.id,
            chain_name: chain.name.clone(),
            success: true,
            data: Some(data),
            error: None,
            error_type: None,
        }
    }

    pub fn failed(chain: &ChainConfig, err: &PortfolioError) -> Self {
        Self {
            chain_id: chain.id,
            chain_name: chain.name.clone(),
            success: false,
            data: None,
            error: Some(err.to_string()),
            error_type: Some(err.error_type().to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllChainsPortfolioResponse {
    pub chains: Vec<ChainPortfolioResult>,
    /// Sum over the successful chains only.
    pub total_value: f64,
    pub wallet_address: String,
    pub failed_chains: Vec<u64>,
}
