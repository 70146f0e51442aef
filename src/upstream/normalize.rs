//! Pure mappers from raw upstream JSON to the service's stable types.
//!
//! Every function here is total: missing or malformed optional fields
//! degrade to documented defaults instead of failing, so upstream schema
//! drift never cascades into route-level failures. Only a structurally
//! absent payload (non-JSON body) is an error, and that is caught earlier
//! by the client.

use crate::types::{
    GasPriceTiers, GasPricesByTier, GasTier, PortfolioResponse, PricePoint, TokenBalance,
    TokenInfo, TransactionEvent, TransactionHistoryResponse,
};
use serde_json::Value;

const DEFAULT_SYMBOL: &str = "UNKNOWN";
const DEFAULT_NAME: &str = "Unknown Token";
const DEFAULT_DECIMALS: u32 = 18;

/// Wei amounts arrive as decimal strings; anything unparseable is 0.
fn parse_wei(value: Option<&Value>) -> u128 {
    match value {
        Some(Value::String(s)) => s.parse().unwrap_or(0),
        Some(Value::Number(n)) => n.as_u64().map(u128::from).unwrap_or(0),
        _ => 0,
    }
}

fn parse_f64(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::String(s)) => s.parse().ok(),
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    }
}

fn string_field(obj: &Value, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn tags_field(obj: &Value) -> Vec<String> {
    obj.get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn gas_tier(raw: &Value, key: &str) -> GasTier {
    let tier = raw.get(key).cloned().unwrap_or(Value::Null);
    let max_fee_per_gas = parse_wei(tier.get("maxFeePerGas"));
    let max_priority_fee_per_gas = parse_wei(tier.get("maxPriorityFeePerGas"));
    GasTier {
        price: max_fee_per_gas,
        max_fee_per_gas,
        max_priority_fee_per_gas,
    }
}

/// Upstream tiers are named low/medium/high/instant; ours slow/standard/
/// fast/instant. Tier ordering is expected from upstream and not enforced.
pub fn normalize_gas_price(chain_id: u64, raw: &Value) -> GasPriceTiers {
    let standard = gas_tier(raw, "medium");
    let priority_fee = standard.max_priority_fee_per_gas;

    GasPriceTiers {
        chain_id,
        timestamp: chrono::Utc::now().timestamp_millis(),
        gas_prices: GasPricesByTier {
            slow: gas_tier(raw, "low"),
            standard,
            fast: gas_tier(raw, "high"),
            instant: gas_tier(raw, "instant"),
        },
        base_fee: parse_wei(raw.get("baseFee")),
        priority_fee,
    }
}

pub fn normalize_token_info(address: &str, raw: &Value) -> TokenInfo {
    TokenInfo {
        symbol: string_field(raw, "symbol").unwrap_or_else(|| DEFAULT_SYMBOL.to_string()),
        name: string_field(raw, "name").unwrap_or_else(|| DEFAULT_NAME.to_string()),
        address: address.to_string(),
        decimals: raw
            .get("decimals")
            .and_then(Value::as_u64)
            .map(|d| d as u32)
            .unwrap_or(DEFAULT_DECIMALS),
        logo_uri: string_field(raw, "logoURI"),
        tags: tags_field(raw),
    }
}

/// Upstream points carry seconds and stringified values; output is
/// milliseconds and floats, in upstream order. An absent `data` field is an
/// empty chart, not a failure; points without a usable time or value are
/// skipped.
pub fn normalize_price_chart(raw: &Value) -> Vec<PricePoint> {
    raw.get("data")
        .and_then(Value::as_array)
        .map(|points| {
            points
                .iter()
                .filter_map(|point| {
                    let secs = point.get("time").and_then(Value::as_i64)?;
                    let price = parse_f64(point.get("value"))?;
                    Some(PricePoint {
                        timestamp: secs * 1000,
                        price,
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

fn normalize_token_row(row: &Value) -> TokenBalance {
    let decimals = row
        .get("decimals")
        .and_then(Value::as_u64)
        .map(|d| d as u32)
        .unwrap_or(DEFAULT_DECIMALS);

    // Base-units amount; some payloads name this field `balance`.
    let balance = match row.get("amount").or_else(|| row.get("balance")) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "0".to_string(),
    };

    let price = parse_f64(row.get("price_to_usd"))
        .or_else(|| parse_f64(row.get("price")))
        .unwrap_or(0.0);

    // Computed exactly once; downstream consumers never recompute it.
    let whole_tokens = balance.parse::<f64>().unwrap_or(0.0) / 10f64.powi(decimals as i32);
    let value = whole_tokens * price;

    TokenBalance {
        symbol: string_field(row, "symbol").unwrap_or_else(|| DEFAULT_SYMBOL.to_string()),
        name: string_field(row, "name").unwrap_or_else(|| DEFAULT_NAME.to_string()),
        address: string_field(row, "contract_address")
            .or_else(|| string_field(row, "address"))
            .unwrap_or_default(),
        decimals,
        logo_uri: string_field(row, "logoURI").or_else(|| string_field(row, "logo_uri")),
        tags: tags_field(row),
        balance,
        price,
        value,
        change_24h: parse_f64(row.get("change_24h")),
        icon: None,
        color: None,
    }
}

pub fn normalize_portfolio(wallet_address: &str, chain_id: u64, raw: &Value) -> PortfolioResponse {
    let tokens: Vec<TokenBalance> = raw
        .get("result")
        .and_then(Value::as_array)
        .map(|rows| rows.iter().map(normalize_token_row).collect())
        .unwrap_or_default();

    let total_value = tokens.iter().map(|t| t.value).sum();

    PortfolioResponse {
        tokens,
        total_value,
        chain_id,
        wallet_address: wallet_address.to_string(),
    }
}

pub fn normalize_history(
    wallet_address: &str,
    chain_id: u64,
    limit: u32,
    page: u32,
    raw: &Value,
) -> TransactionHistoryResponse {
    let items = raw
        .get("items")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| {
                    let details = item.get("details").cloned().unwrap_or(Value::Null);
                    TransactionEvent {
                        tx_hash: string_field(&details, "txHash")
                            .or_else(|| string_field(item, "txHash"))
                            .unwrap_or_default(),
                        event_type: string_field(&details, "type")
                            .or_else(|| string_field(item, "type"))
                            .unwrap_or_else(|| "unknown".to_string()),
                        timestamp: item
                            .get("timeMs")
                            .and_then(Value::as_i64)
                            .or_else(|| {
                                details
                                    .get("blockTimeSec")
                                    .and_then(Value::as_i64)
                                    .map(|s| s * 1000)
                            })
                            .unwrap_or(0),
                        direction: string_field(item, "direction"),
                        status: string_field(&details, "status"),
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    TransactionHistoryResponse {
        items,
        chain_id,
        wallet_address: wallet_address.to_string(),
        limit,
        page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_gas_tiers_parse_decimal_strings() {
        let raw = json!({
            "low": { "maxFeePerGas": "1000000000", "maxPriorityFeePerGas": "100000000" },
            "medium": { "maxFeePerGas": "2000000000", "maxPriorityFeePerGas": "200000000" },
            "high": { "maxFeePerGas": "3000000000", "maxPriorityFeePerGas": "300000000" },
            "instant": { "maxFeePerGas": "4000000000", "maxPriorityFeePerGas": "400000000" }
        });

        let tiers = normalize_gas_price(1, &raw);
        assert_eq!(tiers.gas_prices.slow.max_fee_per_gas, 1_000_000_000);
        assert_eq!(tiers.gas_prices.standard.max_fee_per_gas, 2_000_000_000);
        assert_eq!(tiers.gas_prices.fast.max_fee_per_gas, 3_000_000_000);
        assert_eq!(tiers.gas_prices.instant.max_fee_per_gas, 4_000_000_000);
        // absent baseFee defaults to 0
        assert_eq!(tiers.base_fee, 0);
        assert_eq!(tiers.priority_fee, 200_000_000);
        assert_eq!(tiers.chain_id, 1);
    }

    #[test]
    fn test_gas_tiers_never_fail_on_garbage() {
        let tiers = normalize_gas_price(137, &json!({ "low": { "maxFeePerGas": "not-a-number" } }));
        assert_eq!(tiers.gas_prices.slow.max_fee_per_gas, 0);
        assert_eq!(tiers.gas_prices.instant.max_fee_per_gas, 0);
    }

    #[test]
    fn test_token_info_defaults() {
        let info = normalize_token_info("0xabc", &json!({}));
        assert_eq!(info.symbol, "UNKNOWN");
        assert_eq!(info.name, "Unknown Token");
        assert_eq!(info.decimals, 18);
        assert!(info.tags.is_empty());
        assert!(info.logo_uri.is_none());

        let info = normalize_token_info(
            "0xabc",
            &json!({ "symbol": "USDC", "name": "USD Coin", "decimals": 6, "tags": ["stablecoin"] }),
        );
        assert_eq!(info.symbol, "USDC");
        assert_eq!(info.decimals, 6);
        assert_eq!(info.tags, vec!["stablecoin"]);
    }

    #[test]
    fn test_chart_seconds_become_milliseconds() {
        let raw = json!({ "data": [{ "time": 1700000000, "value": "1234.5" }] });
        let points = normalize_price_chart(&raw);
        assert_eq!(
            points,
            vec![PricePoint { timestamp: 1_700_000_000_000, price: 1234.5 }]
        );
    }

    #[test]
    fn test_chart_absent_data_is_empty_not_an_error() {
        assert!(normalize_price_chart(&json!({})).is_empty());
        assert!(normalize_price_chart(&json!({ "data": null })).is_empty());
    }

    #[test]
    fn test_chart_skips_unparseable_points() {
        let raw = json!({ "data": [
            { "time": 1700000000, "value": "1.5" },
            { "time": "bogus", "value": "2.5" },
            { "time": 1700000060, "value": "oops" },
            { "time": 1700000120, "value": 3.5 }
        ]});
        let points = normalize_price_chart(&raw);
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].price, 3.5);
    }

    #[test]
    fn test_portfolio_total_is_sum_of_token_values() {
        let raw = json!({ "result": [
            {
                "contract_address": "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
                "symbol": "WETH",
                "name": "Wrapped Ether",
                "decimals": 18,
                "amount": "2000000000000000000",
                "price_to_usd": 3000.0
            },
            {
                "contract_address": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
                "symbol": "USDC",
                "name": "USD Coin",
                "decimals": 6,
                "amount": "500000000",
                "price_to_usd": 1.0
            }
        ]});

        let portfolio = normalize_portfolio("0x1111111254eeb25477b68fb85ed929f73a960582", 1, &raw);
        assert_eq!(portfolio.tokens.len(), 2);
        assert_eq!(portfolio.tokens[0].value, 6000.0);
        assert_eq!(portfolio.tokens[1].value, 500.0);
        assert_eq!(
            portfolio.total_value,
            portfolio.tokens.iter().map(|t| t.value).sum::<f64>()
        );
        assert_eq!(portfolio.total_value, 6500.0);
    }

    #[test]
    fn test_token_row_reads_amount_field() {
        let raw = json!({ "result": [{
            "contract_address": "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
            "symbol": "WETH",
            "decimals": 18,
            "amount": "2000000000000000000",
            "price_to_usd": 3000.0
        }]});

        let portfolio = normalize_portfolio("0x1111111254eeb25477b68fb85ed929f73a960582", 1, &raw);
        assert_eq!(portfolio.tokens[0].balance, "2000000000000000000");
        assert_eq!(portfolio.tokens[0].value, 6000.0);
        assert_eq!(portfolio.total_value, 6000.0);
    }

    #[test]
    fn test_token_row_falls_back_to_balance_field() {
        let raw = json!({ "result": [{
            "contract_address": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
            "symbol": "USDC",
            "decimals": 6,
            "balance": "500000000",
            "price_to_usd": 1.0
        }]});

        let portfolio = normalize_portfolio("0x1111111254eeb25477b68fb85ed929f73a960582", 1, &raw);
        assert_eq!(portfolio.tokens[0].balance, "500000000");
        assert_eq!(portfolio.tokens[0].value, 500.0);
    }

    #[test]
    fn test_portfolio_row_defaults() {
        let raw = json!({ "result": [{}] });
        let portfolio = normalize_portfolio("0x1111111254eeb25477b68fb85ed929f73a960582", 1, &raw);
        let token = &portfolio.tokens[0];
        assert_eq!(token.symbol, "UNKNOWN");
        assert_eq!(token.name, "Unknown Token");
        assert_eq!(token.decimals, 18);
        assert_eq!(token.balance, "0");
        assert_eq!(token.value, 0.0);
        assert_eq!(portfolio.total_value, 0.0);
    }

    #[test]
    fn test_history_items() {
        let raw = json!({ "items": [
            {
                "timeMs": 1700000000123i64,
                "direction": "out",
                "details": { "txHash": "0xdead", "type": "Swap", "status": "completed" }
            },
            {}
        ]});

        let history =
            normalize_history("0x1111111254eeb25477b68fb85ed929f73a960582", 1, 20, 1, &raw);
        assert_eq!(history.items.len(), 2);
        assert_eq!(history.items[0].tx_hash, "0xdead");
        assert_eq!(history.items[0].event_type, "Swap");
        assert_eq!(history.items[0].timestamp, 1_700_000_000_123);
        assert_eq!(history.items[1].event_type, "unknown");
        assert_eq!(history.limit, 20);
    }
}
