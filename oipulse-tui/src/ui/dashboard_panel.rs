//! Panel 1 — Dashboard: latest signal, reasons, exit monitor, OI shift
//! tracker, and the raw strike table.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use oipulse_runner::CycleReport;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(report) = &app.latest else {
        let para = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No data yet — waiting for the first refresh. Press [r] to fetch now.",
                theme::muted(),
            )),
        ]);
        f.render_widget(para, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_signal_summary(f, chunks[0], app, report);
    render_chain_table(f, chunks[1], app, report);
}

fn render_signal_summary(f: &mut Frame, area: Rect, app: &AppState, report: &CycleReport) {
    let signal = &report.signal;
    let cfg = &app.cfg.signal;
    let mut lines: Vec<Line> = Vec::new();

    // Metrics row
    lines.push(Line::from(vec![
        Span::styled("Spot ", theme::muted()),
        Span::styled(format!("{:.2}", signal.spot), theme::secondary()),
        Span::raw("   "),
        Span::styled("PCR ", theme::muted()),
        Span::styled(
            format!("{:.2}", signal.pcr),
            theme::pcr_style(signal.pcr, cfg.pcr_bullish, cfg.pcr_bearish),
        ),
        Span::raw("   "),
        Span::styled("ATM ", theme::muted()),
        Span::styled(
            signal
                .suggested_strike
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".into()),
            theme::secondary(),
        ),
        Span::raw("   "),
        Span::styled(format!("{}", report.fetched_at.format("%H:%M:%S")), theme::muted()),
    ]));
    lines.push(Line::from(""));

    // Verdict
    lines.push(Line::from(vec![
        Span::styled(signal.signal.label(), theme::signal_style(signal.signal)),
        Span::raw("  "),
        Span::styled(
            format!("confidence {}/5", signal.confidence_level()),
            theme::confidence_style(signal.confidence_level()),
        ),
    ]));
    lines.push(Line::from(""));

    // Entry reasons, in rule-evaluation order
    lines.push(Line::from(Span::styled("Why", theme::accent_bold())));
    for reason in &signal.reasons {
        lines.push(Line::from(vec![
            Span::styled("  • ", theme::muted()),
            Span::styled(reason.as_str(), theme::secondary()),
        ]));
    }
    lines.push(Line::from(""));

    // Exit monitor — only strong buys carry exit conditions
    lines.push(Line::from(Span::styled("Exit monitor", theme::accent_bold())));
    if signal.signal.is_strong_buy() {
        if report.exit.exit_flag {
            lines.push(Line::from(Span::styled(
                "  EXIT conditions met:",
                theme::negative().add_modifier(Modifier::BOLD),
            )));
            for reason in &report.exit.reasons {
                lines.push(Line::from(vec![
                    Span::styled("  ✗ ", theme::negative()),
                    Span::styled(reason.as_str(), theme::secondary()),
                ]));
            }
        } else {
            lines.push(Line::from(Span::styled(
                "  Holding — no exit triggers at the ATM strike.",
                theme::positive(),
            )));
        }
    } else {
        lines.push(Line::from(Span::styled(
            "  No active position to monitor.",
            theme::muted(),
        )));
    }
    lines.push(Line::from(""));

    // OI shift tracker
    lines.push(Line::from(Span::styled("OI shift", theme::accent_bold())));
    for shift_line in report.shift.lines() {
        let style = if shift_line.contains("PE writers") {
            theme::positive()
        } else if shift_line.contains("CE writers") {
            theme::negative()
        } else {
            theme::muted()
        };
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(shift_line, style),
        ]));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn render_chain_table(f: &mut Frame, area: Rect, app: &AppState, report: &CycleReport) {
    let atm = report.signal.suggested_strike;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        format!(
            "{:>7} {:>9} {:>8} {:>6} | {:>9} {:>8} {:>6}",
            "Strike", "CE OI", "ΔCE", "CE IV", "PE OI", "ΔPE", "PE IV"
        ),
        theme::accent_bold(),
    )));

    // Rows around the visible height; the ATM row is always kept in view
    // because the snapshot is already a window around it.
    let visible = area.height.saturating_sub(1) as usize;
    for row in report.snapshot.rows.iter().take(visible.max(1)) {
        let is_atm = Some(row.strike) == atm;
        let strike_style = if is_atm {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else {
            theme::secondary()
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{:>7}", row.strike), strike_style),
            Span::styled(format!(" {:>9}", row.ce_oi), theme::secondary()),
            Span::styled(format!(" {:>8}", row.ce_oi_change), theme::oi_change_style(row.ce_oi_change)),
            Span::styled(format!(" {:>6.1}", row.ce_iv), theme::muted()),
            Span::raw(" |"),
            Span::styled(format!(" {:>9}", row.pe_oi), theme::secondary()),
            Span::styled(format!(" {:>8}", row.pe_oi_change), theme::oi_change_style(row.pe_oi_change)),
            Span::styled(format!(" {:>6.1}", row.pe_iv), theme::muted()),
        ]));
    }

    // Per-leg totals drive the PCR, so show them under the table.
    let (ce_total, pe_total) = (report.snapshot.total_ce_oi(), report.snapshot.total_pe_oi());
    lines.push(Line::from(vec![
        Span::styled(format!("{:>7}", "Σ"), theme::muted()),
        Span::styled(format!(" {:>9}", ce_total), theme::secondary()),
        Span::raw(format!("{:>16}", "")),
        Span::raw(" |"),
        Span::styled(format!(" {:>9}", pe_total), theme::secondary()),
    ]));

    f.render_widget(Paragraph::new(lines), area);
}
