//! NSE option-chain provider.
//!
//! Fetches the index option chain from NSE's public JSON endpoint. The
//! endpoint sits behind cookie/user-agent checks, so every attempt warms up
//! with a GET to the homepage before hitting the API; the cookie store
//! carries the session over. NSE serves HTML fallbacks when it dislikes a
//! request, which surfaces here as a parse failure, not a panic.

use std::time::Duration;

use serde::Deserialize;

use super::provider::{ChainError, ChainProvider};
use crate::config::FetchConfig;
use crate::domain::{ChainSnapshot, StrikeRow};

const NSE_HOME: &str = "https://www.nseindia.com";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// NSE option-chain response, trimmed to the fields the engine needs.
#[derive(Debug, Deserialize)]
struct OptionChainResponse {
    records: Records,
}

#[derive(Debug, Deserialize)]
struct Records {
    #[serde(rename = "expiryDates")]
    expiry_dates: Vec<String>,
    data: Vec<ChainEntry>,
    #[serde(rename = "underlyingValue")]
    underlying_value: f64,
}

#[derive(Debug, Deserialize)]
struct ChainEntry {
    #[serde(rename = "strikePrice")]
    strike_price: u32,
    #[serde(rename = "expiryDate")]
    expiry_date: String,
    #[serde(rename = "CE")]
    ce: Option<Leg>,
    #[serde(rename = "PE")]
    pe: Option<Leg>,
}

/// One leg (CE or PE) of a chain entry. Absent numeric fields read as zero,
/// matching how illiquid strikes come back from the endpoint.
#[derive(Debug, Default, Deserialize)]
struct Leg {
    #[serde(rename = "openInterest", default)]
    open_interest: u64,
    #[serde(rename = "changeinOpenInterest", default)]
    change_in_open_interest: i64,
    #[serde(rename = "impliedVolatility", default)]
    implied_volatility: f64,
}

/// Live NSE provider with bounded fixed-delay retries.
pub struct NseProvider {
    client: reqwest::blocking::Client,
    fetch_cfg: FetchConfig,
    strike_step: u32,
}

impl NseProvider {
    pub fn new(fetch_cfg: FetchConfig, strike_step: u32) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(fetch_cfg.timeout_secs))
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            fetch_cfg,
            strike_step,
        }
    }

    fn chain_url(&self) -> String {
        format!(
            "{NSE_HOME}/api/option-chain-indices?symbol={}",
            self.fetch_cfg.symbol
        )
    }

    /// One full attempt: warm-up, API call, parse, window selection.
    fn fetch_once(&self) -> Result<ChainSnapshot, ChainError> {
        // Warm-up GET collects the session cookies the API requires.
        self.client
            .get(NSE_HOME)
            .send()
            .map_err(|e| classify_request_error(&e))?;

        let resp = self
            .client
            .get(self.chain_url())
            .header("Referer", NSE_HOME)
            .send()
            .map_err(|e| classify_request_error(&e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ChainError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = resp
            .text()
            .map_err(|e| ChainError::NetworkUnreachable(e.to_string()))?;
        let parsed: OptionChainResponse = serde_json::from_str(&body).map_err(|e| {
            ChainError::ResponseFormatChanged(format!(
                "response is not the expected JSON (blocked or HTML fallback?): {e}"
            ))
        })?;

        snapshot_from_response(parsed, self.fetch_cfg.window, self.strike_step)
    }
}

impl ChainProvider for NseProvider {
    fn name(&self) -> &str {
        "nse"
    }

    fn fetch(&self) -> Result<ChainSnapshot, ChainError> {
        let mut last_error = None;

        for attempt in 0..=self.fetch_cfg.max_retries {
            if attempt > 0 {
                // Fixed delay between attempts.
                std::thread::sleep(Duration::from_secs(self.fetch_cfg.retry_delay_secs));
            }

            match self.fetch_once() {
                Ok(snapshot) => return Ok(snapshot),
                Err(e) => last_error = Some(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ChainError::Other("max retries exceeded".into())))
    }
}

fn classify_request_error(e: &reqwest::Error) -> ChainError {
    if e.is_connect() || e.is_timeout() {
        ChainError::NetworkUnreachable(e.to_string())
    } else {
        ChainError::Other(e.to_string())
    }
}

/// Reduce the full chain response to the ATM ± `window` snapshot for the
/// nearest expiry. Duplicate strike entries collapse to the row with the
/// highest OI inside `ChainSnapshot::new`.
fn snapshot_from_response(
    resp: OptionChainResponse,
    window: u32,
    strike_step: u32,
) -> Result<ChainSnapshot, ChainError> {
    let nearest_expiry = resp
        .records
        .expiry_dates
        .first()
        .ok_or_else(|| ChainError::ResponseFormatChanged("no expiry dates".into()))?
        .clone();

    let spot = resp.records.underlying_value;
    let step = f64::from(strike_step);
    let atm = ((spot / step).round() * step) as u32;
    let low = atm.saturating_sub(window * strike_step);
    let high = atm + window * strike_step;

    let mut rows = Vec::new();
    for entry in resp.records.data {
        if entry.expiry_date != nearest_expiry {
            continue;
        }
        if entry.strike_price < low || entry.strike_price > high {
            continue;
        }
        let ce = entry.ce.unwrap_or_default();
        let pe = entry.pe.unwrap_or_default();
        rows.push(StrikeRow {
            strike: entry.strike_price,
            ce_oi: ce.open_interest,
            ce_oi_change: ce.change_in_open_interest,
            ce_iv: ce.implied_volatility,
            pe_oi: pe.open_interest,
            pe_oi_change: pe.change_in_open_interest,
            pe_iv: pe.implied_volatility,
        });
    }

    if rows.is_empty() {
        return Err(ChainError::EmptyChain);
    }

    Ok(ChainSnapshot::new(spot, rows))
}
