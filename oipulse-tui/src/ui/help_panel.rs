//! Panel 3 — Help: key bindings, signal legend, recent errors.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled("Keys", theme::accent_bold())));
    for (key, desc) in [
        ("q", "quit"),
        ("r", "refresh now (also runs on the interval boundary)"),
        ("1/2/3", "jump to Dashboard / History / Help"),
        ("Tab / Shift-Tab", "next / previous panel"),
        ("j/k, g/G", "move in the history table"),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<16}"), theme::accent()),
            Span::styled(desc, theme::secondary()),
        ]));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Signals", theme::accent_bold())));
    for (label, desc) in [
        ("BUY CE", "bullish: high PCR with PE writing and CE unwinding"),
        ("BUY PE", "bearish: low PCR with CE writing and PE unwinding"),
        ("WEAK BUY", "no PCR edge, but an OI shift suggests a direction"),
        ("AVOID", "no clear directional bias"),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!("  {label:<16}"), theme::secondary()),
            Span::styled(desc, theme::muted()),
        ]));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Data source", theme::accent_bold())));
    lines.push(Line::from(Span::styled(
        format!(
            "  Provider: {}. Set OIPULSE_FIXTURE=<path.json> to replay a saved chain offline.",
            app.provider_name
        ),
        theme::muted(),
    )));
    lines.push(Line::from(Span::styled(
        "  Signals are appended to signals/signals_YYYYMMDD.csv, one file per day.",
        theme::muted(),
    )));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Recent errors", theme::accent_bold())));
    if app.error_history.is_empty() {
        lines.push(Line::from(Span::styled("  none", theme::muted())));
    } else {
        for record in app.error_history.iter().take(8) {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {} ", record.timestamp.format("%H:%M:%S")),
                    theme::muted(),
                ),
                Span::styled(format!("[{:>4}] ", record.category.label()), theme::warning()),
                Span::styled(record.message.as_str(), theme::secondary()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), area);
}
