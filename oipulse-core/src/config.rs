//! Configuration — rule thresholds and fetch settings, loadable from TOML.
//!
//! Every numeric literal the rules depend on lives here so tests can tune
//! them and a deployment can override them without touching rule code.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Thresholds for the signal derivation rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Per-strike OI delta (contracts) that counts as a writer build-up.
    pub oi_shift_threshold: i64,
    /// OI-change floor for the surging side of a breakout.
    pub breakout_oi_surge: i64,
    /// OI-change ceiling for the flat side of a breakout.
    pub breakout_oi_flat: i64,
    /// PCR above which the bullish primary rule may fire.
    pub pcr_bullish: f64,
    /// PCR below which the bearish primary rule may fire.
    pub pcr_bearish: f64,
    /// Inclusive PCR band in which breakout overrides are considered.
    pub breakout_pcr_low: f64,
    pub breakout_pcr_high: f64,
    /// Distance between adjacent strikes for the index.
    pub strike_step: u32,
    /// Upper bound for the confidence score.
    pub confidence_cap: u8,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            oi_shift_threshold: 10_000,
            breakout_oi_surge: 10_000,
            breakout_oi_flat: 2_000,
            pcr_bullish: 1.3,
            pcr_bearish: 0.7,
            breakout_pcr_low: 0.7,
            breakout_pcr_high: 1.1,
            strike_step: 50,
            confidence_cap: 5,
        }
    }
}

/// Settings for the live chain fetcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Index symbol on the NSE option-chain endpoint.
    pub symbol: String,
    /// Strikes kept on each side of ATM (2 → a five-strike window).
    pub window: u32,
    /// Attempts after the first failure before giving up on a cycle.
    pub max_retries: u32,
    /// Fixed delay between attempts, in seconds.
    pub retry_delay_secs: u64,
    /// Per-request timeout, in seconds.
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            symbol: "NIFTY".into(),
            window: 2,
            max_retries: 3,
            retry_delay_secs: 2,
            timeout_secs: 30,
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub signal: SignalConfig,
    pub fetch: FetchConfig,
    /// Refresh interval for the dashboard and watch loop, in minutes.
    pub refresh_interval_mins: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            signal: SignalConfig::default(),
            fetch: FetchConfig::default(),
            refresh_interval_mins: 5,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(toml::from_str(&text)?)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_strategy_constants() {
        let cfg = SignalConfig::default();
        assert_eq!(cfg.oi_shift_threshold, 10_000);
        assert_eq!(cfg.breakout_oi_surge, 10_000);
        assert_eq!(cfg.breakout_oi_flat, 2_000);
        assert!((cfg.pcr_bullish - 1.3).abs() < 1e-12);
        assert!((cfg.pcr_bearish - 0.7).abs() < 1e-12);
        assert!((cfg.breakout_pcr_low - 0.7).abs() < 1e-12);
        assert!((cfg.breakout_pcr_high - 1.1).abs() < 1e-12);
        assert_eq!(cfg.strike_step, 50);
        assert_eq!(cfg.confidence_cap, 5);
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let cfg: Config = toml::from_str(
            r#"
            refresh_interval_mins = 3

            [signal]
            oi_shift_threshold = 5000

            [fetch]
            symbol = "BANKNIFTY"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.refresh_interval_mins, 3);
        assert_eq!(cfg.signal.oi_shift_threshold, 5_000);
        assert_eq!(cfg.signal.strike_step, 50);
        assert_eq!(cfg.fetch.symbol, "BANKNIFTY");
        assert_eq!(cfg.fetch.max_retries, 3);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Config::load(Path::new("/nonexistent/oipulse.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn load_reads_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oipulse.toml");
        std::fs::write(&path, "[signal]\nstrike_step = 100\n").unwrap();
        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.signal.strike_step, 100);
        assert_eq!(cfg.refresh_interval_mins, 5);
    }

    #[test]
    fn default_refresh_interval_is_five_minutes() {
        assert_eq!(Config::default().refresh_interval_mins, 5);
    }
}
