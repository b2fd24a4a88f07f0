//! Navigation chrome: top bar, bottom bar and footer

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::routes::{Chrome, Location, TopBar, NAV_ITEMS};
use crate::ui::Theme;

pub const BRAND: &str = "POP STREAM";

/// Rows the footer needs
pub const FOOTER_HEIGHT: u16 = 3;

fn nav_spans(location: &Location, with_keys: bool) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for item in NAV_ITEMS.iter() {
        if with_keys {
            spans.push(Span::styled(format!("{} ", item.key), Theme::keybind()));
        }
        let style = if location.path == item.href {
            Theme::nav_active()
        } else {
            Theme::nav_inactive()
        };
        spans.push(Span::styled(item.label, style));
        spans.push(Span::raw("   "));
    }
    spans
}

fn brand() -> Vec<Span<'static>> {
    vec![
        Span::styled("POP", Theme::title()),
        Span::styled(" STREAM", Theme::secondary().add_modifier(Modifier::BOLD)),
    ]
}

/// Top bar: brand plus links, or a back button; nothing on player pages
pub fn render_top_bar(frame: &mut Frame, area: Rect, chrome: &Chrome, location: &Location) {
    let mut spans = Vec::new();
    match &chrome.top_bar {
        TopBar::Hidden => return,
        TopBar::Nav => {
            spans.extend(brand());
            if chrome.nav_links {
                spans.push(Span::raw("    "));
                spans.extend(nav_spans(location, false));
            }
        }
        TopBar::Back(target) => {
            spans.push(Span::styled("← Back", Theme::accent()));
            spans.push(Span::styled(format!("  (Esc → {})", target), Theme::dimmed()));
        }
    }

    let bar = Paragraph::new(Line::from(spans)).style(Theme::status_bar()).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );
    frame.render_widget(bar, area);
}

/// Bottom bar with number-key shortcuts
pub fn render_bottom_bar(frame: &mut Frame, area: Rect, location: &Location) {
    let bar = Paragraph::new(Line::from(nav_spans(location, true)))
        .alignment(Alignment::Center)
        .style(Theme::status_bar())
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Plain)
                .border_style(Theme::border()),
        );
    frame.render_widget(bar, area);
}

/// Footer copy line for `year`
pub fn copyright(year: i32) -> String {
    format!("© {} {}. All rights reserved.", year, BRAND)
}

/// Footer: quick links and copyright
pub fn render_footer(frame: &mut Frame, area: Rect, year: i32) {
    let lines = vec![
        Line::from(vec![
            Span::styled("Quick Links  ", Theme::title()),
            Span::styled("Discover Movies · Discover TV Shows · Library · About Us", Theme::dimmed()),
        ]),
        Line::from(Span::styled(copyright(year), Theme::dimmed())),
    ];
    let footer = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );
    frame.render_widget(footer, area);
}
