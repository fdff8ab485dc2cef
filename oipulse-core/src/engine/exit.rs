//! Exit-condition checks for an active directional signal.

use crate::domain::{ChainSnapshot, ExitReport, Signal};

/// Inspect the ATM row for conditions that invalidate the active signal.
///
/// All matching reasons are reported independently; `exit_flag` is set iff
/// any fired. Signals other than `BUY CE`/`BUY PE` have no exit policy and
/// always get an empty report. (Whether `WEAK BUY` signals should have one
/// is an open product question — deliberately not invented here.)
///
/// # Panics
///
/// Panics if `atm_strike` is absent from the snapshot. The analyzer derives
/// the strike from the same snapshot, so a miss is a wiring bug in the
/// caller, not a market condition.
pub fn check_exit(snapshot: &ChainSnapshot, signal: Signal, atm_strike: u32) -> ExitReport {
    let row = snapshot.row_at(atm_strike).unwrap_or_else(|| {
        panic!("exit check called with strike {atm_strike} absent from the snapshot")
    });

    let mut reasons: Vec<String> = Vec::new();
    match signal {
        Signal::BuyCe => {
            if row.ce_oi_change > 0 {
                reasons.push("CE writers returning at strike".into());
            }
            if row.pe_oi_change < 0 {
                reasons.push("PE writers backing out (support weakening)".into());
            }
            if row.pe_iv > row.ce_iv {
                reasons.push("IV flipping toward PE (bearish instability)".into());
            }
        }
        Signal::BuyPe => {
            if row.pe_oi_change > 0 {
                reasons.push("PE writers returning at strike".into());
            }
            if row.ce_oi_change < 0 {
                reasons.push("CE writers backing out (resistance weakening)".into());
            }
            if row.ce_iv > row.pe_iv {
                reasons.push("IV flipping toward CE (bullish instability)".into());
            }
        }
        Signal::WeakBuyCe | Signal::WeakBuyPe | Signal::Avoid => {}
    }

    ExitReport::from_reasons(reasons)
}
