//! Neon-on-dark theme tokens for the OIPulse dashboard.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, highlights, countdown)
//! - **Positive**: Neon green (bullish signals, PE build-ups)
//! - **Negative**: Hot pink (bearish signals, CE build-ups)
//! - **Warning**: Neon orange (weak signals, journal trouble)
//! - **Neutral**: Cool purple (AVOID, secondary info)
//! - **Muted**: Steel blue (hints, disabled text)

use ratatui::style::{Color, Modifier, Style};

use oipulse_core::domain::{OptionSide, Signal};

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT_SECONDARY: Color = Color::Rgb(170, 170, 170);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn secondary() -> Style {
    Style::default().fg(TEXT_SECONDARY)
}

/// Border style for a panel block; the active panel glows cyan.
pub fn panel_border(active: bool) -> Style {
    if active {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_SECONDARY)
    }
}

/// Style for a signal label: green for CE longs, pink for PE longs,
/// purple for AVOID. Weak signals lose the bold.
pub fn signal_style(signal: Signal) -> Style {
    let base = match signal.instrument_side() {
        Some(OptionSide::Ce) => positive(),
        Some(OptionSide::Pe) => negative(),
        None => neutral(),
    };
    if signal.is_strong_buy() {
        base.add_modifier(Modifier::BOLD)
    } else {
        base
    }
}

/// PCR readout color against the configured decision thresholds.
pub fn pcr_style(pcr: f64, bullish_above: f64, bearish_below: f64) -> Style {
    if pcr > bullish_above {
        positive()
    } else if pcr < bearish_below {
        negative()
    } else {
        neutral()
    }
}

/// Confidence readout: 4-5 green, 3 cyan, 2 purple, below that muted.
pub fn confidence_style(confidence: u8) -> Style {
    match confidence {
        4..=u8::MAX => positive(),
        3 => accent(),
        2 => neutral(),
        _ => muted(),
    }
}

/// OI-change color: rising OI green, falling pink, flat secondary.
pub fn oi_change_style(change: i64) -> Style {
    match change {
        c if c > 0 => positive(),
        c if c < 0 => negative(),
        _ => secondary(),
    }
}
