use anyhow::{Context, Result, bail};
use std::env;
use std::net::SocketAddr;

use crate::processor::WatchedAddresses;

/// Addresses watched when `WATCHED_ADDRESSES` is not set.
pub const DEFAULT_WATCHED_ADDRESSES: [&str; 3] = [
    "0xc70df87e1d98f6a531c8e324c9bcec6fc82b5e8d",
    "0xb449701a5ebb1d660cb1d206a94f151f5a544a81",
    "0x5beb759f7769193a8e401bb2d7cad22bacb930d5",
];

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Webhook body limit when `MAX_BODY_BYTES` is not set (64 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert_path: String,
    pub key_path: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub watched_addresses: WatchedAddresses,
    pub bind_addr: SocketAddr,
    pub tls: Option<TlsPaths>, // plain HTTP when unset
    pub max_body_bytes: Option<usize>, // None disables the limit
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Only the watch list, for paths that never serve.
    pub fn watched_from_env() -> Result<WatchedAddresses> {
        dotenvy::dotenv().ok();
        watched_from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let watched_addresses = watched_from_lookup(&lookup)?;

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be a socket address like 0.0.0.0:8080")?;

        let tls = match (lookup("TLS_CERT_PATH"), lookup("TLS_KEY_PATH")) {
            (Some(cert_path), Some(key_path)) => Some(TlsPaths { cert_path, key_path }),
            (None, None) => None,
            _ => bail!("TLS_CERT_PATH and TLS_KEY_PATH must be set together"),
        };

        // 0 turns the limit off
        let max_body_bytes = match lookup("MAX_BODY_BYTES") {
            Some(raw) => match raw
                .trim()
                .parse::<usize>()
                .context("MAX_BODY_BYTES must be a byte count")?
            {
                0 => None,
                limit => Some(limit),
            },
            None => Some(DEFAULT_MAX_BODY_BYTES),
        };

        Ok(Config {
            watched_addresses,
            bind_addr,
            tls,
            max_body_bytes,
        })
    }
}

fn watched_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<WatchedAddresses> {
    match lookup("WATCHED_ADDRESSES") {
        Some(raw) => {
            let parsed = WatchedAddresses::parse_list(&raw).context("WATCHED_ADDRESSES is invalid")?;
            if parsed.is_empty() {
                bail!("WATCHED_ADDRESSES must list at least one address");
            }
            Ok(parsed)
        }
        None => Ok(WatchedAddresses::new(DEFAULT_WATCHED_ADDRESSES)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.watched_addresses.len(), 3);
        assert!(cfg.watched_addresses.contains("0xb449701a5ebb1d660cb1d206a94f151f5a544a81"));
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert!(cfg.tls.is_none());
        assert_eq!(cfg.max_body_bytes, Some(DEFAULT_MAX_BODY_BYTES));
    }

    #[test]
    fn body_limit_override_and_disable() {
        let cfg = Config::from_lookup(lookup(&[("MAX_BODY_BYTES", "1048576")])).unwrap();
        assert_eq!(cfg.max_body_bytes, Some(1_048_576));

        let cfg = Config::from_lookup(lookup(&[("MAX_BODY_BYTES", "0")])).unwrap();
        assert_eq!(cfg.max_body_bytes, None);

        assert!(Config::from_lookup(lookup(&[("MAX_BODY_BYTES", "lots")])).is_err());
    }

    #[test]
    fn watch_list_ignores_server_settings() {
        let watched = watched_from_lookup(lookup(&[
            ("BIND_ADDR", "not-an-addr"),
            ("TLS_CERT_PATH", "./cert.pem"),
        ]))
        .unwrap();
        assert_eq!(watched.len(), 3);
    }

    #[test]
    fn watched_addresses_override() {
        let cfg = Config::from_lookup(lookup(&[(
            "WATCHED_ADDRESSES",
            "0x5BEB759F7769193A8E401BB2D7CAD22BACB930D5",
        )]))
        .unwrap();
        assert_eq!(cfg.watched_addresses.len(), 1);
        assert!(cfg.watched_addresses.contains("0x5beb759f7769193a8e401bb2d7cad22bacb930d5"));
    }

    #[test]
    fn empty_watch_list_is_rejected() {
        assert!(Config::from_lookup(lookup(&[("WATCHED_ADDRESSES", " , ")])).is_err());
    }

    #[test]
    fn half_configured_tls_is_rejected() {
        let err = Config::from_lookup(lookup(&[("TLS_CERT_PATH", "./cert.pem")])).unwrap_err();
        assert!(err.to_string().contains("TLS_KEY_PATH"));
    }

    #[test]
    fn bad_bind_addr_is_rejected() {
        assert!(Config::from_lookup(lookup(&[("BIND_ADDR", "localhost")])).is_err());
    }
}
