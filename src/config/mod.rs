use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub social: SocialConfig,
    pub chains: Vec<ChainConfig>,
    pub timeouts: TimeoutConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    /// Absence is not a load failure: it surfaces per request as a
    /// MissingCredential fault (HTTP 500), before any network call.
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SocialConfig {
    pub twitter_bearer_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    pub default: Duration,
    pub portfolio: Duration,
    /// Wall-clock budget for the whole multi-chain fan-out.
    pub aggregate: Duration,
}

/// Chains the multi-chain portfolio aggregator fans out over, in response
/// order. Filterable via the CHAIN_IDS env var.
const SUPPORTED_CHAINS: [(u64, &str); 6] = [
    (1, "Ethereum"),
    (10, "Optimism"),
    (56, "BNB Chain"),
    (137, "Polygon"),
    (8453, "Base"),
    (42161, "Arbitrum"),
];

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let _ = dotenv::dotenv().ok();

        let api_key = std::env::var("ONEINCH_API_KEY").ok();
        if api_key.is_none() {
            Self::print_config_help();
            tracing::warn!("ONEINCH_API_KEY is not set; upstream calls will fail with a credential fault");
        }

        let chains = Self::load_configured_chains()?;
        if chains.is_empty() {
            Self::print_config_help();
            return Err(anyhow::anyhow!("CHAIN_IDS selected no supported chain"));
        }

        Ok(Config {
            server: ServerConfig {
                host: env_var_or_default("SERVER_HOST", "0.0.0.0".to_string())?,
                port: env_var_or_default("SERVER_PORT", 3000)?,
            },
            upstream: UpstreamConfig {
                base_url: env_var_or_default(
                    "ONEINCH_API_BASE",
                    "https://api.1inch.dev".to_string(),
                )?,
                api_key,
            },
            social: SocialConfig {
                twitter_bearer_token: std::env::var("TWITTER_BEARER_TOKEN").ok(),
            },
            chains,
            timeouts: TimeoutConfig {
                default: Duration::from_secs(env_var_or_default("DEFAULT_TIMEOUT_SECS", 10)?),
                portfolio: Duration::from_secs(env_var_or_default("PORTFOLIO_TIMEOUT_SECS", 15)?),
                aggregate: Duration::from_secs(env_var_or_default("AGGREGATE_TIMEOUT_SECS", 30)?),
            },
        })
    }

    fn load_configured_chains() -> anyhow::Result<Vec<ChainConfig>> {
        let selected: Option<Vec<u64>> = match std::env::var("CHAIN_IDS") {
            Ok(raw) => Some(
                raw.split(',')
                    .map(|part| {
                        part.trim()
                            .parse()
                            .map_err(|e| anyhow::anyhow!("Invalid CHAIN_IDS entry '{}': {}", part, e))
                    })
                    .collect::<anyhow::Result<Vec<u64>>>()?,
            ),
            Err(_) => None,
        };

        let chains = SUPPORTED_CHAINS
            .iter()
            .filter(|(id, _)| selected.as_ref().map_or(true, |ids| ids.contains(id)))
            .map(|(id, name)| ChainConfig {
                id: *id,
                name: name.to_string(),
            })
            .collect();

        Ok(chains)
    }

    fn print_config_help() {
        println!("\n🔧 Configuration guide");
        println!("{}", "=".repeat(50));
        println!("Set the following environment variables:\n");

        println!("[required for upstream calls]");
        println!("ONEINCH_API_KEY=<1inch developer portal key>\n");

        println!("[optional]");
        println!("ONEINCH_API_BASE=https://api.1inch.dev");
        println!("TWITTER_BEARER_TOKEN=<for /api/verify-tweet>");
        println!("SERVER_HOST=0.0.0.0");
        println!("SERVER_PORT=3000");
        println!("CHAIN_IDS=1,10,56,137,8453,42161");
        println!("DEFAULT_TIMEOUT_SECS=10");
        println!("PORTFOLIO_TIMEOUT_SECS=15");
        println!("AGGREGATE_TIMEOUT_SECS=30\n");

        println!("{}", "=".repeat(50));
    }
}

fn env_var_or_default<T: std::str::FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_chain_table_starts_with_mainnet() {
        let chains = Config::load_configured_chains().unwrap();
        assert!(!chains.is_empty());
        assert_eq!(chains[0].id, 1);
        assert_eq!(chains[0].name, "Ethereum");
    }
}
