use serde::{Deserialize, Serialize};

/// Token metadata as cached and served. Missing upstream fields degrade to
/// documented defaults at normalization time, so this type has no optional
/// symbol/name/decimals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub symbol: String,
    pub name: String,
    pub address: String,
    pub decimals: u32,
    #[serde(rename = "logoURI", skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,
    pub tags: Vec<String>,
}

/// All amounts are integer wei.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasTier {
    pub price: u128,
    pub max_fee_per_gas: u128,
    pub max_priority_fee_per_gas: u128,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasPricesByTier {
    pub slow: GasTier,
    pub standard: GasTier,
    pub fast: GasTier,
    pub instant: GasTier,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasPriceTiers {
    pub chain_id: u64,
    /// Milliseconds since epoch, stamped at normalization time.
    pub timestamp: i64,
    pub gas_prices: GasPricesByTier,
    pub base_fee: u128,
    pub priority_fee: u128,
}

/// One chart point. Upstream carries seconds; this is always milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: i64,
    pub price: f64,
}
