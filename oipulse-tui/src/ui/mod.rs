//! Top-level UI layout — header, active panel, status bar.

pub mod dashboard_panel;
pub mod help_panel;
pub mod history_panel;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use oipulse_runner::schedule;

use crate::app::{AppState, Panel};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: 1-line header + main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(f, chunks[0], app);
    draw_panel(f, chunks[1], app);
    status_bar::render(f, chunks[2], app);
}

/// Title, provider, and the refresh countdown.
fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let now = chrono::Local::now().naive_local();
    let remaining = schedule::seconds_until(app.next_refresh, now);

    let countdown = if app.refresh_in_flight {
        Span::styled(" refreshing… ", theme::warning())
    } else {
        Span::styled(
            format!(" next refresh {:02}:{:02} ", remaining / 60, remaining % 60),
            theme::accent(),
        )
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" OIPulse — {} option chain ", app.cfg.fetch.symbol),
            theme::accent_bold(),
        ),
        Span::styled(format!("[{}]", app.provider_name), theme::muted()),
        Span::raw(" | "),
        countdown,
        Span::styled(
            format!("(every {}m)", app.cfg.refresh_interval_mins),
            theme::muted(),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Draw the active panel with its border.
fn draw_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let panel = app.active_panel;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [{}] ", panel.label(), panel.index() + 1))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match panel {
        Panel::Dashboard => dashboard_panel::render(f, inner, app),
        Panel::History => history_panel::render(f, inner, app),
        Panel::Help => help_panel::render(f, inner, app),
    }
}
