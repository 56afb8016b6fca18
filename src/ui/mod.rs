//! Terminal UI components
//!
//! Built with ratatui. Rendering is a pure function of [`App`]; nothing here
//! mutates state or starts I/O.

pub mod browser;
pub mod detail;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, AppState, Tab};

/// Draw the whole screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let theme = &app.theme;
    frame.render_widget(Block::default().style(theme.base()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tabs
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_tabs(frame, chunks[0], app);

    match (app.state, app.detail.as_ref()) {
        (AppState::Detail, Some(view)) => detail::render(frame, chunks[1], view, theme),
        _ => browser::render(frame, chunks[1], app),
    }

    render_status_bar(frame, chunks[2], app);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .style(app.theme.dimmed())
        .highlight_style(app.theme.chip_selected())
        .divider("│");
    frame.render_widget(tabs, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let login = match app.settings.login_state() {
        Some(session) => Span::styled(format!(" {} ", session), theme.accent()),
        None => Span::styled(" Not logged in ", theme.dimmed()),
    };

    let mut spans = vec![
        login,
        Span::styled(format!(" theme:{} ", theme.mode()), theme.dimmed()),
        Span::raw("│"),
    ];

    match app.error {
        Some(ref error) => spans.push(Span::styled(format!(" {} ", error), theme.error())),
        None => {
            let help = match app.state {
                AppState::Browse => " tab:switch  ←→:filter  ↑↓:move  ↵:details  r:retry  t:theme  q:quit ",
                AppState::Detail => " esc:back  r:retry  t:theme  q:quit ",
            };
            spans.push(Span::styled(help, theme.dimmed()));
        }
    }

    let status = Paragraph::new(Line::from(spans)).style(theme.status_bar());
    frame.render_widget(status, area);
}
