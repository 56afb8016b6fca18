//! List browser: filter chips, paged list and load-state footer

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::{App, Tab};
use crate::models::{FilterKind, FilterOption, Movie, Person, TvShow};
use crate::paging::{LoadState, LoadStates, Pager};
use crate::ui::Theme;

/// One list row
trait Row {
    fn line<'a>(&'a self, theme: &Theme, selected: bool) -> Line<'a>;
}

fn marker(theme: &Theme, selected: bool) -> Span<'static> {
    if selected {
        Span::styled("▸ ", theme.accent())
    } else {
        Span::styled("  ", theme.dimmed())
    }
}

fn title_style(theme: &Theme, selected: bool) -> ratatui::style::Style {
    if selected {
        theme.highlighted()
    } else {
        theme.text()
    }
}

impl Row for Movie {
    fn line<'a>(&'a self, theme: &Theme, selected: bool) -> Line<'a> {
        let year = self.year().map(|y| format!(" ({})", y)).unwrap_or_default();
        Line::from(vec![
            marker(theme, selected),
            Span::styled(self.title.as_str(), title_style(theme, selected)),
            Span::styled(year, theme.year()),
            Span::raw(" "),
            Span::styled(format!("★ {:.1}", self.vote_average), theme.rating(self.vote_average)),
        ])
    }
}

impl Row for TvShow {
    fn line<'a>(&'a self, theme: &Theme, selected: bool) -> Line<'a> {
        let year = self.year().map(|y| format!(" ({})", y)).unwrap_or_default();
        Line::from(vec![
            marker(theme, selected),
            Span::styled(self.name.as_str(), title_style(theme, selected)),
            Span::styled(year, theme.year()),
            Span::raw(" "),
            Span::styled(format!("★ {:.1}", self.vote_average), theme.rating(self.vote_average)),
        ])
    }
}

impl Row for Person {
    fn line<'a>(&'a self, theme: &Theme, selected: bool) -> Line<'a> {
        let mut spans = vec![
            marker(theme, selected),
            Span::styled(self.name.as_str(), title_style(theme, selected)),
        ];
        if let Some(ref dept) = self.known_for_department {
            spans.push(Span::styled(format!(" [{}]", dept), theme.year()));
        }
        if !self.known_for.is_empty() {
            spans.push(Span::styled(
                format!("  {}", self.known_for.join(", ")),
                theme.dimmed(),
            ));
        }
        Line::from(spans)
    }
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Filter chips
            Constraint::Min(1),    // List
            Constraint::Length(1), // Load state
        ])
        .split(area);

    let theme = &app.theme;
    let selected = app.list().selected;
    match app.tab {
        Tab::Movies => {
            render_chips(frame, chunks[0], &app.movies.filter_state().snapshot(), theme);
            render_list(frame, chunks[1], app.movies.pager(), selected, "Movies", theme);
            render_footer(frame, chunks[2], app.movies.pager(), theme);
        }
        Tab::TvShows => {
            render_chips(frame, chunks[0], &app.tv_shows.filter_state().snapshot(), theme);
            render_list(frame, chunks[1], app.tv_shows.pager(), selected, "TV Shows", theme);
            render_footer(frame, chunks[2], app.tv_shows.pager(), theme);
        }
        Tab::People => {
            let chip = Paragraph::new(Span::styled(" Popular ", theme.chip_selected()));
            frame.render_widget(chip, chunks[0]);
            render_list(frame, chunks[1], app.people.pager(), selected, "People", theme);
            render_footer(frame, chunks[2], app.people.pager(), theme);
        }
    }
}

fn render_chips<K: FilterKind>(
    frame: &mut Frame,
    area: Rect,
    options: &[FilterOption<K>],
    theme: &Theme,
) {
    let mut spans = Vec::with_capacity(options.len() * 2);
    for option in options {
        let style = if option.selected {
            theme.chip_selected()
        } else {
            theme.chip()
        };
        spans.push(Span::styled(format!(" {} ", option.kind.label()), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_list<T: Row>(
    frame: &mut Frame,
    area: Rect,
    pager: &Pager<T>,
    selected: usize,
    title: &str,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border())
        .title(Span::styled(format!(" {} ({}) ", title, pager.len()), theme.title()));

    let states = pager.load_states();
    if pager.is_empty() {
        let message = match states.refresh {
            LoadState::Loading => Span::styled("⟳ Loading...", theme.loading()),
            LoadState::Error(ref e) => Span::styled(format!("✗ {}  (r to retry)", e), theme.error()),
            LoadState::NotLoading { .. } if pager.end_reached() => {
                Span::styled("Nothing here", theme.dimmed())
            }
            LoadState::NotLoading { .. } => Span::styled("", theme.dimmed()),
        };
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Paragraph::new(message).alignment(Alignment::Center), inner);
        return;
    }

    let items: Vec<ListItem> = pager
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| ListItem::new(item.line(theme, i == selected)))
        .collect();

    let mut state = ListState::default().with_selected(Some(selected));
    let list = List::new(items).block(block);
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_footer<T>(frame: &mut Frame, area: Rect, pager: &Pager<T>, theme: &Theme) {
    frame.render_widget(Paragraph::new(footer_line(pager.load_states(), pager.end_reached(), theme)), area);
}

fn footer_line(states: &LoadStates, end_reached: bool, theme: &Theme) -> Line<'static> {
    match states.append {
        LoadState::Loading => Line::from(Span::styled(" ⟳ Loading more...", theme.loading())),
        LoadState::Error(ref e) => Line::from(Span::styled(
            format!(" ✗ {} (r to retry)", e),
            theme.error(),
        )),
        LoadState::NotLoading { .. } if end_reached && !states.refresh.is_loading() => {
            Line::from(Span::styled(" End of list", theme.dimmed()))
        }
        LoadState::NotLoading { .. } => Line::from(""),
    }
}
