//! Home hero banner
//!
//! Featured item with its links, the search bar hint and the movie/series
//! selector.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::hero::{HeroSelector, HeroView};
use crate::models::ContentKind;
use crate::ui::Theme;

pub const SEARCH_HINT: &str = "Search movies and TV shows… (press Ctrl+K)";

/// Text of the fallback notice
pub fn fallback_notice(view: &HeroView) -> Option<String> {
    view.fallback_reason
        .as_ref()
        .map(|reason| format!("Using fallback data (reason: {})", reason))
}

/// Render the banner, search hint and kind selector into `area`
pub fn render_hero(frame: &mut Frame, area: Rect, hero: &HeroSelector) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),    // Banner
            Constraint::Length(3), // Search hint
            Constraint::Length(1), // Kind selector
        ])
        .split(area);

    render_banner(frame, chunks[0], hero);
    render_search_hint(frame, chunks[1]);
    render_kind_selector(frame, chunks[2], hero.kind());
}

fn render_banner(frame: &mut Frame, area: Rect, hero: &HeroSelector) {
    let view = hero.view();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(format!(" {} ", view.badge), Theme::hero_badge()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(view.title.clone(), Theme::hero_title())),
        Line::from(""),
    ];
    if !view.blurb.is_empty() {
        lines.push(Line::from(Span::styled(view.blurb.clone(), Theme::text())));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(vec![
        Span::styled("[p] ", Theme::keybind()),
        Span::styled("▶ Play", Theme::accent()),
        Span::raw("   "),
        Span::styled("[i] ", Theme::keybind()),
        Span::styled("ⓘ More info", Theme::secondary()),
    ]));

    let backdrop = if view.backdrop_url.is_empty() {
        "no backdrop".to_string()
    } else {
        view.backdrop_url.clone()
    };
    lines.push(Line::from(Span::styled(format!("◩ {}", backdrop), Theme::dimmed())));

    if hero.is_loading() {
        lines.push(Line::from(Span::styled("Loading trending…", Theme::loading())));
    }
    if let Some(notice) = fallback_notice(&view) {
        lines.push(Line::from(Span::styled(notice, Theme::warning())));
    }

    let banner = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(banner, inner);
}

fn render_search_hint(frame: &mut Frame, area: Rect) {
    let hint = Paragraph::new(Line::from(vec![
        Span::styled("⌕ ", Theme::accent()),
        Span::styled(SEARCH_HINT, Theme::dimmed()),
    ]))
    .style(Theme::input())
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(hint, area);
}

fn render_kind_selector(frame: &mut Frame, area: Rect, active: ContentKind) {
    let option = |kind: ContentKind, key: &'static str, label: &'static str| {
        let style = if kind == active {
            Theme::highlighted()
        } else {
            Theme::dimmed()
        };
        vec![
            Span::styled(key, Theme::keybind()),
            Span::styled(format!(" {} ", label), style),
        ]
    };

    let mut spans = option(ContentKind::Movie, "[m]", "Movies");
    spans.push(Span::raw("  "));
    spans.extend(option(ContentKind::Series, "[t]", "TV Shows"));

    frame.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), area);
}
