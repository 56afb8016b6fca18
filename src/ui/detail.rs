//! Detail pane for movies, TV shows and people

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::DetailView;
use crate::images::{image_url, Poster, Profile};
use crate::models::{Credits, Genre, Video};
use crate::screens::{DetailUiState, MovieDetails, PersonDetails, TvShowDetails};
use crate::ui::Theme;

/// Cast members shown per title
const CAST_SHOWN: usize = 8;

pub fn render(frame: &mut Frame, area: Rect, view: &DetailView, theme: &Theme) {
    let (title, lines) = match view {
        DetailView::Movie { state, .. } => content(state, theme, movie_lines),
        DetailView::TvShow { state, .. } => content(state, theme, tv_show_lines),
        DetailView::Person { state, .. } => content(state, theme, person_lines),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_focused())
        .title(Span::styled(format!(" {} ", title), theme.title()));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn content<'a, T>(
    state: &'a DetailUiState<T>,
    theme: &Theme,
    lines: fn(&'a T, &Theme) -> (String, Vec<Line<'a>>),
) -> (String, Vec<Line<'a>>) {
    match state {
        DetailUiState::Loading => (
            "Loading".to_string(),
            vec![Line::from(""), Line::from(Span::styled("⟳ Loading...", theme.loading())).alignment(Alignment::Center)],
        ),
        DetailUiState::Error(msg) => (
            "Error".to_string(),
            vec![
                Line::from(""),
                Line::from(Span::styled(msg.as_str(), theme.error())).alignment(Alignment::Center),
                Line::from(Span::styled("r to retry, esc to go back", theme.dimmed()))
                    .alignment(Alignment::Center),
            ],
        ),
        DetailUiState::Success(data) => lines(data, theme),
    }
}

fn field<'a>(label: &'a str, value: String, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<10}", label), theme.dimmed()),
        Span::styled(value, theme.text()),
    ])
}

fn genres(genres: &[Genre]) -> String {
    genres
        .iter()
        .map(|g| g.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn overview<'a>(text: &'a str, theme: &Theme) -> Vec<Line<'a>> {
    if text.is_empty() {
        return Vec::new();
    }
    vec![Line::from(""), Line::from(Span::styled(text, theme.text()))]
}

fn credit_lines<'a>(credits: &'a Credits, theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    let directors: Vec<&str> = credits.directors().map(|c| c.name.as_str()).collect();
    if !directors.is_empty() {
        lines.push(field("Director", directors.join(", "), theme));
    }
    if !credits.cast.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Cast", theme.accent())));
        for member in credits.cast.iter().take(CAST_SHOWN) {
            lines.push(Line::from(vec![
                Span::styled(format!("  {}", member.name), theme.text()),
                Span::styled(format!("  {}", member.character), theme.dimmed()),
            ]));
        }
    }
    lines
}

fn trailer_line<'a>(videos: &[Video], theme: &Theme) -> Option<Line<'a>> {
    videos
        .iter()
        .filter(|v| v.is_trailer())
        .find_map(Video::youtube_url)
        .map(|url| field("Trailer", url, theme))
}

fn movie_lines<'a>(details: &'a MovieDetails, theme: &Theme) -> (String, Vec<Line<'a>>) {
    let movie = &details.movie;
    let mut lines = vec![Line::from(Span::styled(movie.to_string(), theme.title()))];
    if let Some(ref tagline) = movie.tagline {
        lines.push(Line::from(Span::styled(tagline.as_str(), theme.year())));
    }
    lines.push(Line::from(""));
    lines.push(field("Genres", genres(&movie.genres), theme));
    if let Some(ref status) = movie.status {
        lines.push(field("Status", status.clone(), theme));
    }
    if let Some(url) = image_url(movie.poster_path.as_deref(), Poster::W500) {
        lines.push(field("Poster", url, theme));
    }
    lines.extend(trailer_line(&details.videos, theme));
    lines.extend(overview(&movie.overview, theme));
    lines.extend(credit_lines(&details.credits, theme));

    if !details.similar.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Similar", theme.accent())));
        for similar in details.similar.iter().take(5) {
            lines.push(Line::from(Span::styled(format!("  {}", similar), theme.dimmed())));
        }
    }
    (movie.title.clone(), lines)
}

fn tv_show_lines<'a>(details: &'a TvShowDetails, theme: &Theme) -> (String, Vec<Line<'a>>) {
    let show = &details.show;
    let mut lines = vec![Line::from(Span::styled(show.to_string(), theme.title()))];
    if let Some(ref tagline) = show.tagline {
        lines.push(Line::from(Span::styled(tagline.as_str(), theme.year())));
    }
    lines.push(Line::from(""));
    lines.push(field("Genres", genres(&show.genres), theme));
    if !show.networks.is_empty() {
        lines.push(field("Networks", show.networks.join(", "), theme));
    }
    lines.push(field("Episodes", show.number_of_episodes.to_string(), theme));
    if let Some(url) = image_url(show.poster_path.as_deref(), Poster::W500) {
        lines.push(field("Poster", url, theme));
    }
    lines.extend(trailer_line(&details.videos, theme));
    lines.extend(overview(&show.overview, theme));

    if !show.seasons.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Seasons", theme.accent())));
        for season in &show.seasons {
            lines.push(Line::from(Span::styled(format!("  {}", season), theme.text())));
        }
    }
    lines.extend(credit_lines(&details.credits, theme));
    (show.name.clone(), lines)
}

fn person_lines<'a>(details: &'a PersonDetails, theme: &Theme) -> (String, Vec<Line<'a>>) {
    let person = &details.person;
    let mut lines = Vec::new();
    if let Some(ref dept) = person.known_for_department {
        lines.push(field("Known for", dept.clone(), theme));
    }
    if let Some(ref birthday) = person.birthday {
        let born = match person.place_of_birth {
            Some(ref place) => format!("{} in {}", birthday, place),
            None => birthday.clone(),
        };
        lines.push(field("Born", born, theme));
    }
    if let Some(ref deathday) = person.deathday {
        lines.push(field("Died", deathday.clone(), theme));
    }
    if let Some(url) = image_url(person.profile_path.as_deref(), Profile::H632) {
        lines.push(field("Photo", url, theme));
    }
    lines.extend(overview(&person.biography, theme));

    if !details.credits.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Credits", theme.accent())));
        for credit in details.credits.iter().take(15) {
            let role = credit
                .character
                .as_deref()
                .filter(|c| !c.is_empty())
                .map(|c| format!(" as {}", c))
                .unwrap_or_default();
            lines.push(Line::from(vec![
                Span::styled(format!("  {}", credit.title), theme.text()),
                Span::styled(format!(" [{}]{}", credit.media_type, role), theme.dimmed()),
            ]));
        }
    }
    (person.name.clone(), lines)
}
