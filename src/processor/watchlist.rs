use std::collections::HashSet;

use anyhow::{Context, Result};

use crate::utils::format::validate_eth_address;

/// The allowlist of contract addresses a stream is filtered against.
///
/// Entries are stored lowercase. Lookups are exact: the probed address is
/// not case-folded, so a log address only matches when the upstream source
/// already emits it in lowercase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchedAddresses {
    addresses: HashSet<String>,
}

impl WatchedAddresses {
    pub fn new<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            addresses: addresses
                .into_iter()
                .map(|addr| addr.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Parses a comma separated list, validating every entry.
    pub fn parse_list(raw: &str) -> Result<Self> {
        let addresses = raw
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                validate_eth_address(entry).with_context(|| format!("invalid watched address `{entry}`"))
            })
            .collect::<Result<HashSet<_>>>()?;
        Ok(Self { addresses })
    }

    pub fn contains(&self, address: &str) -> bool {
        self.addresses.contains(address)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_to_lowercase() {
        let watched = WatchedAddresses::new(["0xC70DF87E1D98F6A531C8E324C9BCEC6FC82B5E8D"]);
        assert!(watched.contains("0xc70df87e1d98f6a531c8e324c9bcec6fc82b5e8d"));
    }

    #[test]
    fn lookup_is_case_sensitive_on_probe() {
        let watched = WatchedAddresses::new(["0xc70df87e1d98f6a531c8e324c9bcec6fc82b5e8d"]);
        assert!(!watched.contains("0xC70DF87E1D98F6A531C8E324C9BCEC6FC82B5E8D"));
    }

    #[test]
    fn no_prefix_matching() {
        let watched = WatchedAddresses::new(["0xc70df87e1d98f6a531c8e324c9bcec6fc82b5e8d"]);
        assert!(!watched.contains("0xc70df87e1d98f6a531c8e324c9bcec6fc82b5e8"));
        assert!(!watched.contains(""));
    }

    #[test]
    fn parse_list_skips_blanks_and_dedups() {
        let watched = WatchedAddresses::parse_list(
            " 0xb449701a5ebb1d660cb1d206a94f151f5a544a81 ,,0xB449701A5EBB1D660CB1D206A94F151F5A544A81,",
        )
        .unwrap();
        assert_eq!(watched.len(), 1);
        assert!(watched.contains("0xb449701a5ebb1d660cb1d206a94f151f5a544a81"));
    }

    #[test]
    fn parse_list_names_bad_entry() {
        let err = WatchedAddresses::parse_list("0xb449701a5ebb1d660cb1d206a94f151f5a544a81,0xdead").unwrap_err();
        assert!(format!("{err:#}").contains("0xdead"));
    }
}
