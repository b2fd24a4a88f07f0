//! Page shell: lays out chrome around the current route's page
//!
//! Every decision about which bars to draw comes from [`Chrome`]; this module
//! only turns it into rectangles.

use chrono::Datelike;
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::{ContentKind, ImageSize, SearchableItem};
use crate::overlay::OverlayMode;
use crate::routes::{Chrome, RouteKind, TopBar, Viewport, BOTTOM_BAR_HEIGHT};
use crate::ui::{hero, nav, search, Theme};

/// Below this height the footer is dropped to leave room for content
pub const FOOTER_MIN_HEIGHT: u16 = 28;

const TOP_BAR_HEIGHT: u16 = 2;

pub const PLAYER_NOTICE: &str = "Playback is not available";

/// Main render function, stamped with the current year
pub fn render_ui(frame: &mut Frame, app: &App) {
    render_ui_at(frame, app, chrono::Local::now().year());
}

/// Render with an explicit footer year
pub fn render_ui_at(frame: &mut Frame, app: &App, year: i32) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Style::default().bg(Theme::BACKGROUND)), area);

    let chrome = app.chrome(Viewport::from_width(area.width));
    let top = if chrome.top_bar == TopBar::Hidden { 0 } else { TOP_BAR_HEIGHT };
    let footer = if chrome.footer && area.height >= FOOTER_MIN_HEIGHT {
        nav::FOOTER_HEIGHT
    } else {
        0
    };
    let reserve = chrome.bottom_reserve(app.safe_area_bottom);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(top),
            Constraint::Min(1),
            Constraint::Length(footer),
            Constraint::Length(reserve),
        ])
        .split(area);

    if top > 0 {
        nav::render_top_bar(frame, chunks[0], &chrome, &app.location);
    }
    render_page(frame, chunks[1], app, &chrome);
    if footer > 0 {
        nav::render_footer(frame, chunks[2], year);
    }
    if chrome.bottom_bar {
        let bar = Rect {
            height: BOTTOM_BAR_HEIGHT.min(chunks[3].height),
            ..chunks[3]
        };
        nav::render_bottom_bar(frame, bar, &app.location);
    }

    if app.search.is_open() {
        let overlay_area = match app.search.mode() {
            OverlayMode::Page => chunks[1],
            OverlayMode::Modal => area,
        };
        search::render_search_overlay(frame, overlay_area, &app.search);
    }
}

fn render_page(frame: &mut Frame, area: Rect, app: &App, chrome: &Chrome) {
    match chrome.route {
        RouteKind::Primary if app.is_home() => hero::render_hero(frame, area, &app.hero),
        RouteKind::Primary => render_section(frame, area, &app.location.path),
        // The overlay fills the page
        RouteKind::Search => {}
        RouteKind::Detail => render_detail(frame, area, app),
        RouteKind::Player => render_player(frame, area, app),
        RouteKind::Other => render_message(
            frame,
            area,
            " NOT FOUND ",
            vec![Line::from(Span::styled(
                format!("Nothing lives at {}", app.location.path),
                Theme::dimmed(),
            ))],
        ),
    }
}

fn render_message(frame: &mut Frame, area: Rect, title: &str, body: Vec<Line<'static>>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(title.to_string(), Theme::title()));
    let para = Paragraph::new(body)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(para, area);
}

fn render_section(frame: &mut Frame, area: Rect, path: &str) {
    let (title, text) = match path {
        "/discover" => (" DISCOVER ", "Browse trending movies and TV shows."),
        "/library" => (" LIBRARY ", "Your saved titles will appear here."),
        _ => (
            " ABOUT ",
            "POP STREAM brings you the latest trending, popular, and upcoming movies and TV shows.",
        ),
    };
    render_message(
        frame,
        area,
        title,
        vec![
            Line::from(""),
            Line::from(Span::styled(text, Theme::text())),
        ],
    );
}

fn render_detail(frame: &mut Frame, area: Rect, app: &App) {
    let Some(item) = app.current_item() else {
        render_message(
            frame,
            area,
            " DETAILS ",
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("Details for {}", app.location.path),
                    Theme::dimmed(),
                )),
            ],
        );
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_focused())
        .title(Span::styled(format!(" {} ", item.kind), Theme::title()));
    frame.render_widget(Paragraph::new(detail_lines(item)).wrap(Wrap { trim: true }).block(block), area);
}

/// Body of a detail page
pub fn detail_lines(item: &SearchableItem) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(item.title.clone(), Theme::hero_title()),
            Span::raw("  "),
            Span::styled(format!("[{}]", item.kind.badge()), Theme::badge(item.kind)),
        ]),
        Line::from(Span::styled(item.date_or_placeholder().to_string(), Theme::date())),
        Line::from(""),
    ];
    if let Some(overview) = item.overview.as_deref() {
        lines.push(Line::from(Span::styled(overview.to_string(), Theme::text())));
        lines.push(Line::from(""));
    }
    let poster = item.poster_url(ImageSize::W500);
    if !poster.is_empty() {
        lines.push(Line::from(Span::styled(format!("◩ {}", poster), Theme::dimmed())));
    }
    lines.push(Line::from(vec![
        Span::styled("[Esc] ", Theme::keybind()),
        Span::styled("back", Theme::keybind_desc()),
    ]));
    lines
}

fn render_player(frame: &mut Frame, area: Rect, app: &App) {
    let title = app
        .current_item()
        .map(|item| item.title.clone())
        .or_else(|| {
            app.location.media_target().map(|(kind, id)| match kind {
                ContentKind::Movie => format!("Movie {}", id),
                ContentKind::Series => format!("Series {}", id),
            })
        })
        .unwrap_or_default();

    render_message(
        frame,
        area,
        " PLAYER ",
        vec![
            Line::from(""),
            Line::from(Span::styled(title, Theme::hero_title())),
            Line::from(""),
            Line::from(Span::styled(PLAYER_NOTICE, Theme::warning())),
            Line::from(Span::styled("Press Esc to go back", Theme::dimmed())),
        ],
    );
}
