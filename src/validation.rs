use crate::error::{PortfolioError, Result};

/// Wallet addresses are `0x` followed by exactly 40 hex digits.
pub fn validate_wallet_address(address: &str) -> Result<()> {
    let valid = address.len() == 42
        && address.starts_with("0x")
        && address.as_bytes()[2..].iter().all(u8::is_ascii_hexdigit);

    if valid {
        Ok(())
    } else {
        Err(PortfolioError::Validation(format!(
            "Invalid wallet address format: {}",
            address
        )))
    }
}

pub fn validate_chain_id(chain_id: u64) -> Result<()> {
    if chain_id == 0 {
        return Err(PortfolioError::Validation(
            "chainId must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_wallet_address() {
        assert!(validate_wallet_address("0x1111111254eeb25477b68fb85ed929f73a960582").is_ok());
        // case must not matter
        assert!(validate_wallet_address("0x1111111254EEB25477B68FB85ED929F73A960582").is_ok());
    }

    #[test]
    fn test_invalid_wallet_address() {
        // wrong length
        assert!(validate_wallet_address("0x1234").is_err());
        // missing prefix
        assert!(validate_wallet_address("1111111254eeb25477b68fb85ed929f73a96058200").is_err());
        // non-hex characters
        assert!(validate_wallet_address("0xZZZZ111254eeb25477b68fb85ed929f73a960582").is_err());
        assert!(validate_wallet_address("").is_err());
    }

    #[test]
    fn test_chain_id() {
        assert!(validate_chain_id(1).is_ok());
        assert!(validate_chain_id(42161).is_ok());
        assert!(validate_chain_id(0).is_err());
    }
}
