//! Signal and exit-report types — the engine's outputs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Call or put leg of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionSide {
    Ce,
    Pe,
}

impl fmt::Display for OptionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionSide::Ce => write!(f, "CE"),
            OptionSide::Pe => write!(f, "PE"),
        }
    }
}

/// The directional trade signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    BuyCe,
    BuyPe,
    WeakBuyCe,
    WeakBuyPe,
    Avoid,
}

impl Signal {
    pub fn label(self) -> &'static str {
        match self {
            Signal::BuyCe => "BUY CE",
            Signal::BuyPe => "BUY PE",
            Signal::WeakBuyCe => "WEAK BUY CE",
            Signal::WeakBuyPe => "WEAK BUY PE",
            Signal::Avoid => "AVOID",
        }
    }

    /// Strong directional signals are the only ones with an exit policy.
    pub fn is_strong_buy(self) -> bool {
        matches!(self, Signal::BuyCe | Signal::BuyPe)
    }

    /// The leg this signal buys, if directional.
    pub fn instrument_side(self) -> Option<OptionSide> {
        match self {
            Signal::BuyCe | Signal::WeakBuyCe => Some(OptionSide::Ce),
            Signal::BuyPe | Signal::WeakBuyPe => Some(OptionSide::Pe),
            Signal::Avoid => None,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One cycle's signal decision, with the evidence that produced it.
///
/// `reasons` preserves rule-evaluation order for explainability.
/// `confidence` stays `None` until a rule assigns one: the breakout
/// override sets 3, the weak-buy downgrade sets 2, and the shift boost
/// treats an unassigned value as a base of 3. Displays should read it
/// through [`SignalResult::confidence_level`], which reports 0 when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalResult {
    pub signal: Signal,
    pub instrument: Option<OptionSide>,
    pub suggested_strike: Option<u32>,
    /// Put-call ratio rounded to 2 decimals. Rules compare the unrounded
    /// value; this field exists for display and logging.
    pub pcr: f64,
    pub confidence: Option<u8>,
    pub reasons: Vec<String>,
    pub spot: f64,
}

impl SignalResult {
    /// Confidence on the 0–5 scale, 0 when no rule assigned one.
    pub fn confidence_level(&self) -> u8 {
        self.confidence.unwrap_or(0)
    }
}

/// Exit-trigger diagnostics for the active signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitReport {
    pub exit_flag: bool,
    pub reasons: Vec<String>,
}

impl ExitReport {
    /// `exit_flag` is true iff any reason fired.
    pub fn from_reasons(reasons: Vec<String>) -> Self {
        Self {
            exit_flag: !reasons.is_empty(),
            reasons,
        }
    }

    pub fn none() -> Self {
        Self::from_reasons(Vec::new())
    }
}
