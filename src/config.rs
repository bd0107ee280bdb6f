//! Environment-driven configuration.
//!
//! `.env` is loaded exactly once, from the working directory with a
//! fallback to the project root, before any variable is read.

use std::sync::Once;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::warn;

static INIT: Once = Once::new();

/// Load .env exactly once. Safe to call many times.
pub fn init_env() {
    INIT.call_once(|| {
        if dotenv::dotenv().is_ok() {
            return;
        }
        let candidate = format!("{}/.env", env!("CARGO_MANIFEST_DIR"));
        let _ = dotenv::from_filename(candidate);
    });
}

fn env_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_req(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("missing env var {key}"))
}

fn env_i64(key: &str, default: i64) -> i64 {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, default, "unparsable env var; using default");
            default
        }),
        Err(_) => default,
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, default, "unparsable env var; using default");
            default
        }),
        Err(_) => default,
    }
}

/// How the ID space is walked. One mode per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Batch-discover real IDs into the known-ID index, then walk the index.
    Discovery,
    /// Unbounded one-at-a-time walk from a fixed starting offset.
    Scan,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub retries: u32,
}

#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub mode: SyncMode,
    pub scan_start_id: i64,
    pub discovery_start_id: i64,
    pub discovery_id_count: i64,
    pub discovery_batch_size: i64,
    /// Fixed delay between candidates, applied on success and failure alike.
    pub item_delay: Duration,
    pub pass_interval: Duration,
}

#[derive(Debug, Clone)]
pub struct KeepaliveConfig {
    /// The service's own externally reachable URL.
    pub url: String,
    pub period: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub client: ClientConfig,
    pub sync: SyncConfig,
    pub keepalive: Option<KeepaliveConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        init_env();

        let mode = match env_str("SYNC_MODE", "discovery")
            .to_ascii_lowercase()
            .as_str()
        {
            "discovery" => SyncMode::Discovery,
            "scan" => SyncMode::Scan,
            other => bail!("SYNC_MODE must be 'discovery' or 'scan', got '{other}'"),
        };

        let keepalive = std::env::var("KEEPALIVE_URL")
            .ok()
            .filter(|u| !u.trim().is_empty())
            .map(|url| KeepaliveConfig {
                url,
                period: Duration::from_secs(env_u64("KEEPALIVE_INTERVAL_SECS", 600)),
            });

        Ok(Self {
            database_url: env_req("DATABASE_URL")?,
            api_host: env_str("API_HOST", "0.0.0.0"),
            api_port: env_str("API_PORT", "3000")
                .parse()
                .context("invalid API_PORT")?,
            client: ClientConfig {
                base_url: env_str("CATALOG_BASE_URL", "https://www.carrefouregypt.com"),
                timeout_secs: env_u64("HTTP_TIMEOUT_SECS", 15),
                retries: env_u64("FETCH_RETRIES", 3) as u32,
            },
            sync: SyncConfig {
                mode,
                scan_start_id: env_i64("SCAN_START_ID", 500_168),
                discovery_start_id: env_i64("DISCOVERY_START_ID", 1),
                discovery_id_count: env_i64("DISCOVERY_ID_COUNT", 1_000_000),
                discovery_batch_size: env_i64("DISCOVERY_BATCH_SIZE", 1_000),
                item_delay: Duration::from_millis(env_u64("ITEM_DELAY_MS", 400)),
                pass_interval: Duration::from_secs(env_u64("PASS_INTERVAL_SECS", 86_400)),
            },
            keepalive,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Keys are unique per test so parallel test threads cannot race on
    // shared process env.
    #[test]
    fn unparsable_i64_env_falls_back_to_the_default() {
        std::env::set_var("CARFURE_TEST_BAD_I64", "abc");
        assert_eq!(env_i64("CARFURE_TEST_BAD_I64", 42), 42);
    }

    #[test]
    fn parsable_numeric_env_wins_over_the_default() {
        std::env::set_var("CARFURE_TEST_GOOD_I64", "-7");
        assert_eq!(env_i64("CARFURE_TEST_GOOD_I64", 42), -7);
        std::env::set_var("CARFURE_TEST_GOOD_U64", "250");
        assert_eq!(env_u64("CARFURE_TEST_GOOD_U64", 400), 250);
    }

    #[test]
    fn unparsable_u64_env_falls_back_to_the_default() {
        std::env::set_var("CARFURE_TEST_BAD_U64", "-1");
        assert_eq!(env_u64("CARFURE_TEST_BAD_U64", 400), 400);
    }

    #[test]
    fn unset_numeric_env_uses_the_default() {
        assert_eq!(env_i64("CARFURE_TEST_UNSET_I64", 500_168), 500_168);
    }
}
