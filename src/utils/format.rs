use alloy::primitives::Address;
use anyhow::{Context, Result, bail};
use std::str::FromStr;

/// Checks the Ethereum address format and returns its lowercase form
pub fn validate_eth_address(address: &str) -> Result<String> {
    // length check
    if address.len() != 42 {
        bail!("Invalid address length: expected 42, got {}", address.len());
    }

    // prefix check
    if !address.starts_with("0x") {
        bail!("Invalid address prefix: expected '0x'");
    }

    // hex body
    Address::from_str(address).with_context(|| format!("Address contains non-hex characters: {address}"))?;

    Ok(address.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_valid_address() {
        let addr = validate_eth_address("0xB449701A5EBB1D660CB1D206A94F151F5A544A81").unwrap();
        assert_eq!(addr, "0xb449701a5ebb1d660cb1d206a94f151f5a544a81");
    }

    #[test]
    fn rejects_wrong_length() {
        let err = validate_eth_address("0xb449701a").unwrap_err();
        assert!(err.to_string().contains("expected 42"));
    }

    #[test]
    fn rejects_missing_prefix() {
        let err = validate_eth_address("00b449701a5ebb1d660cb1d206a94f151f5a544a81").unwrap_err();
        assert!(err.to_string().contains("prefix"));
    }

    #[test]
    fn rejects_non_hex() {
        assert!(validate_eth_address("0xz449701a5ebb1d660cb1d206a94f151f5a544a81").is_err());
    }
}
