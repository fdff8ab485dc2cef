//! Panel 2 — History: this session's signals, newest first.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(
            format!("{} signals this session", app.history.len()),
            theme::accent(),
        ),
        Span::styled("  [j/k]scroll [g/G]jump", theme::muted()),
    ]));
    lines.push(Line::from(""));

    if app.history.is_empty() {
        lines.push(Line::from(Span::styled(
            "No signals logged yet. Every refresh appends one row here and to the CSV journal.",
            theme::muted(),
        )));
        f.render_widget(Paragraph::new(lines), area);
        return;
    }

    lines.push(Line::from(Span::styled(
        format!(
            "{:>8} {:>12} {:>7} {:>6} {:>5} {:>10}  {}",
            "Time", "Signal", "Strike", "PCR", "Conf", "Spot", "Reasons"
        ),
        theme::accent_bold(),
    )));

    // Keep the cursor row visible within the panel height.
    let visible = area.height.saturating_sub(3) as usize;
    let start = app.history_cursor.saturating_sub(visible.saturating_sub(1));
    let end = (start + visible.max(1)).min(app.history.len());

    for i in start..end {
        let entry = &app.history[i];
        let is_cursor = i == app.history_cursor;
        let style = if is_cursor {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else {
            theme::secondary()
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{:>8}", entry.time.format("%H:%M:%S")), style),
            Span::styled(format!(" {:>12}", entry.signal), style),
            Span::styled(
                format!(
                    " {:>7}",
                    entry
                        .strike
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "-".into())
                ),
                style,
            ),
            Span::styled(format!(" {:>6.2}", entry.pcr), style),
            Span::styled(format!(" {:>5}", entry.confidence), style),
            Span::styled(format!(" {:>10.2}", entry.spot), style),
            Span::styled(format!("  {}", truncate(&entry.reasons, 60)), theme::muted()),
        ]));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max - 1).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_short_strings_untouched() {
        assert_eq!(truncate("abc", 10), "abc");
    }

    #[test]
    fn truncate_long_strings_get_ellipsis() {
        assert_eq!(truncate("abcdefgh", 5), "abcd…");
    }
}
