use crate::types::TokenInfo;
use std::collections::HashMap;
use std::sync::RwLock;

/// Process-wide memoization of token metadata, keyed by
/// `chainId:address(lowercased)` so case variants of the same on-chain
/// entity collide. Constructed once at startup and passed by reference;
/// never a global.
///
/// Intentionally unbounded: entries are immutable facts about tokens and
/// the key universe is the configured chains times the tokens clients
/// actually ask about. Append-only, last-writer-wins on a racing insert.
pub struct TokenInfoCache {
    entries: RwLock<HashMap<String, TokenInfo>>,
}

fn cache_key(chain_id: u64, address: &str) -> String {
    format!("{}:{}", chain_id, address.to_lowercase())
}

impl TokenInfoCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, chain_id: u64, address: &str) -> Option<TokenInfo> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&cache_key(chain_id, address))
            .cloned()
    }

    pub fn insert(&self, chain_id: u64, address: &str, info: TokenInfo) {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(cache_key(chain_id, address), info);
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TokenInfoCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(symbol: &str) -> TokenInfo {
        TokenInfo {
            symbol: symbol.to_string(),
            name: "USD Coin".to_string(),
            address: "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48".to_string(),
            decimals: 6,
            logo_uri: None,
            tags: vec![],
        }
    }

    #[test]
    fn test_key_is_case_insensitive() {
        let cache = TokenInfoCache::new();
        cache.insert(1, "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48", sample("USDC"));

        let hit = cache.get(1, "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
        assert_eq!(hit.map(|t| t.symbol), Some("USDC".to_string()));
        assert_eq!(cache.len(), 1);

        // same address, different case: same entry, not a second one
        cache.insert(1, "0xA0B86991C6218B36C1D19D4A2E9EB0CE3606EB48", sample("USDC"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_chain_id_separates_entries() {
        let cache = TokenInfoCache::new();
        cache.insert(1, "0xabc", sample("USDC"));
        assert!(cache.get(137, "0xabc").is_none());
        cache.insert(137, "0xabc", sample("USDC.e"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_last_writer_wins() {
        let cache = TokenInfoCache::new();
        cache.insert(1, "0xabc", sample("OLD"));
        cache.insert(1, "0xABC", sample("NEW"));
        assert_eq!(cache.get(1, "0xabc").map(|t| t.symbol), Some("NEW".to_string()));
    }

    #[test]
    fn test_miss_is_none() {
        let cache = TokenInfoCache::new();
        assert!(cache.get(1, "0xabc").is_none());
        assert!(cache.is_empty());
    }
}
