//! Sentiment analysis — maps one chain snapshot plus the cycle's shift
//! report to a directional signal with explainable reasons.
//!
//! Rule evaluation is a fixed total order, first match wins:
//! 1. PCR and ATM selection (inputs to everything below)
//! 2. Bullish primary rule, else bearish primary rule, else AVOID
//! 3. Bullish breakout override, then bearish, only while still AVOID
//! 4. Shift-based confidence adjustment, always last
//!
//! The breakout overrides *replace* the reasons list with a self-contained
//! narrative rather than appending to it. That is intentional: the override
//! path tells a different story than the PCR rules and keeps its own
//! explanation.

use crate::config::SignalConfig;
use crate::domain::{ChainSnapshot, OptionSide, ShiftReport, Signal, SignalResult, StrikeRow};

use super::EngineError;

/// Derive the cycle's signal from the snapshot and shift report.
///
/// Returns [`EngineError::EmptySnapshot`] when there are no rows; every
/// later step needs the ATM row. Partial windows (fewer than five strikes)
/// are analyzed over whatever rows exist.
pub fn analyze(
    snapshot: &ChainSnapshot,
    shift: &ShiftReport,
    cfg: &SignalConfig,
) -> Result<SignalResult, EngineError> {
    if snapshot.is_empty() {
        return Err(EngineError::EmptySnapshot);
    }

    // PCR over the whole window. Zero call OI is a degenerate market state,
    // not an error; it maps to a PCR of 0.
    let total_ce = snapshot.total_ce_oi() as f64;
    let total_pe = snapshot.total_pe_oi() as f64;
    let pcr = if total_ce == 0.0 { 0.0 } else { total_pe / total_ce };

    let atm = snapshot
        .atm_strike()
        .expect("non-empty snapshot has an ATM strike");
    let atm_row = snapshot
        .row_at(atm)
        .expect("ATM strike was taken from this snapshot");

    let mut signal = Signal::Avoid;
    let mut instrument = None;
    let mut confidence: Option<u8> = None;
    let mut reasons: Vec<String> = Vec::new();

    // Primary directional rules, evaluated against the ATM row.
    if pcr > cfg.pcr_bullish && atm_row.pe_oi_change > 0 && atm_row.ce_oi_change < 0 {
        signal = Signal::BuyCe;
        instrument = Some(OptionSide::Ce);
        reasons.push(format!("High PCR (>{})", cfg.pcr_bullish));
        reasons.push("Put writers active (PE OI rising)".into());
        reasons.push("Call writers unwinding (CE OI falling)".into());
        if atm_row.pe_iv < atm_row.ce_iv {
            reasons.push("PE IV dropping (bullish momentum)".into());
        }
    } else if pcr < cfg.pcr_bearish && atm_row.ce_oi_change > 0 && atm_row.pe_oi_change < 0 {
        signal = Signal::BuyPe;
        instrument = Some(OptionSide::Pe);
        reasons.push(format!("Low PCR (<{})", cfg.pcr_bearish));
        reasons.push("Call writers active (CE OI rising)".into());
        reasons.push("Put writers unwinding (PE OI falling)".into());
        if atm_row.ce_iv < atm_row.pe_iv {
            reasons.push("CE IV dropping (bearish momentum)".into());
        }
    } else {
        reasons.push("No clear directional bias or OI delta conflict".into());
    }

    // Bullish breakout override: neutral PCR, put OI surging at ATM or one
    // strike up, call OI flat, spot already through the ATM strike.
    if signal == Signal::Avoid {
        let nearby = nearby_rows(snapshot, atm, Some(atm + cfg.strike_step));
        let pe_jump = max_change(&nearby, |r| r.pe_oi_change) > cfg.breakout_oi_surge;
        let ce_flat = max_change(&nearby, |r| r.ce_oi_change) < cfg.breakout_oi_flat;
        if pcr >= cfg.breakout_pcr_low
            && pcr <= cfg.breakout_pcr_high
            && pe_jump
            && ce_flat
            && snapshot.spot > f64::from(atm)
        {
            signal = Signal::BuyCe;
            instrument = Some(OptionSide::Ce);
            confidence = Some(3);
            reasons = vec![
                "Spot breakout above ATM".into(),
                "PE OI surged at ATM or nearby".into(),
                "CE OI flat or unwinding".into(),
                "PCR neutral but biased".into(),
                "Breakout override triggered (CE)".into(),
            ];
        }
    }

    // Bearish breakout override, mirror image one strike down.
    if signal == Signal::Avoid {
        let nearby = nearby_rows(snapshot, atm, atm.checked_sub(cfg.strike_step));
        let ce_jump = max_change(&nearby, |r| r.ce_oi_change) > cfg.breakout_oi_surge;
        let pe_flat = max_change(&nearby, |r| r.pe_oi_change) < cfg.breakout_oi_flat;
        if pcr >= cfg.breakout_pcr_low
            && pcr <= cfg.breakout_pcr_high
            && ce_jump
            && pe_flat
            && snapshot.spot < f64::from(atm)
        {
            signal = Signal::BuyPe;
            instrument = Some(OptionSide::Pe);
            confidence = Some(3);
            reasons = vec![
                "Spot breakdown below ATM".into(),
                "CE OI surged at ATM or nearby".into(),
                "PE OI flat or unwinding".into(),
                "PCR neutral but biased".into(),
                "Breakout override triggered (PE)".into(),
            ];
        }
    }

    // Shift-based confidence adjustment, applied last regardless of which
    // rule fired. A boost on an unassigned confidence starts from base 3.
    let pe_building = shift.mentions_building(OptionSide::Pe);
    let ce_building = shift.mentions_building(OptionSide::Ce);
    if pe_building && signal == Signal::BuyCe {
        let base = confidence.unwrap_or(3);
        confidence = Some((base + 1).min(cfg.confidence_cap));
        reasons.push("OI shift confirms bullish bias (PE writers migrating up)".into());
    } else if ce_building && signal == Signal::BuyPe {
        let base = confidence.unwrap_or(3);
        confidence = Some((base + 1).min(cfg.confidence_cap));
        reasons.push("OI shift confirms bearish bias (CE writers migrating down)".into());
    } else if signal == Signal::Avoid && (pe_building || ce_building) {
        // PE build-up takes priority when both sides moved.
        signal = if pe_building {
            Signal::WeakBuyCe
        } else {
            Signal::WeakBuyPe
        };
        confidence = Some(2);
        reasons.push("No strong PCR, but OI shift suggests directional bias".into());
    }

    Ok(SignalResult {
        signal,
        instrument,
        suggested_strike: Some(atm),
        pcr: round2(pcr),
        confidence,
        reasons,
        spot: snapshot.spot,
    })
}

/// Rows at the ATM strike and one neighbor; strikes absent from the
/// snapshot are simply not considered.
fn nearby_rows<'a>(
    snapshot: &'a ChainSnapshot,
    atm: u32,
    neighbor: Option<u32>,
) -> Vec<&'a StrikeRow> {
    [Some(atm), neighbor]
        .into_iter()
        .flatten()
        .filter_map(|s| snapshot.row_at(s))
        .collect()
}

/// Max of an OI-change column over the nearby rows. The set always holds at
/// least the ATM row for a non-empty snapshot.
fn max_change(rows: &[&StrikeRow], field: impl Fn(&StrikeRow) -> i64) -> i64 {
    rows.iter()
        .map(|r| field(r))
        .max()
        .expect("nearby rows always include the ATM row")
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
