//! Search overlay component
//!
//! Query input, fetch status line, and the result list. Opens as a centered
//! popup from the home route or fills the page on `/search`.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph},
};

use crate::fetch::FetchOutcome;
use crate::models::SearchableItem;
use crate::overlay::{OverlayMode, SearchOverlay};
use crate::ui::Theme;

pub const IDLE_HINT: &str = "Start typing to search movies and TV shows…";
pub const LOADING_TEXT: &str = "Searching…";
pub const EMPTY_TEXT: &str = "No results.";
pub const CLOSE_TIP: &str = "Tip: press Esc to close";

/// Rows per result: headline plus two overview lines
const ROW_HEIGHT: usize = 3;

/// Status message for every outcome except a non-empty list
pub fn status_text(outcome: &FetchOutcome) -> Option<(String, Style)> {
    match outcome {
        FetchOutcome::Idle => Some((IDLE_HINT.to_string(), Theme::dimmed())),
        FetchOutcome::Loading => Some((LOADING_TEXT.to_string(), Theme::loading())),
        FetchOutcome::Success(items) if items.is_empty() => {
            Some((EMPTY_TEXT.to_string(), Theme::dimmed()))
        }
        FetchOutcome::Success(_) => None,
        FetchOutcome::Failure(msg) => Some((
            format!("Couldn't search right now: {}", msg),
            Theme::error(),
        )),
    }
}

/// Word-wrap `text` to `width` columns, keeping at most `max_lines` lines.
///
/// The last kept line ends in `…` when text was cut.
pub fn clamp_lines(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut cut = false;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();
        let needed = if current.is_empty() { word_len } else { current_len + 1 + word_len };

        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if lines.len() == max_lines {
            cut = true;
            break;
        }
        // Words longer than a line are hard-split
        let mut rest: Vec<char> = word.chars().collect();
        while rest.len() > width {
            lines.push(rest.drain(..width).collect());
            if lines.len() == max_lines {
                cut = true;
                break;
            }
        }
        if cut {
            break;
        }
        current = rest.into_iter().collect();
    }

    if !cut && !current.is_empty() {
        if lines.len() < max_lines {
            lines.push(current);
        } else {
            cut = true;
        }
    }

    if cut {
        if let Some(last) = lines.last_mut() {
            let keep = width.saturating_sub(1);
            let trimmed: String = last.chars().take(keep).collect();
            *last = format!("{}…", trimmed.trim_end());
        }
    }
    lines
}

/// Render the overlay over `area`
pub fn render_search_overlay(frame: &mut Frame, area: Rect, overlay: &SearchOverlay) {
    if !overlay.is_open() {
        return;
    }

    let popup = match overlay.mode() {
        OverlayMode::Page => area,
        OverlayMode::Modal => centered(area, 84, 26),
    };
    frame.render_widget(Clear, popup);

    let title = match overlay.outcome() {
        FetchOutcome::Success(items) if !items.is_empty() => {
            format!(" SEARCH ({}/{}) ", overlay.list.selected + 1, items.len())
        }
        _ => " SEARCH ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_focused())
        .title(Span::styled(title, Theme::title()))
        .style(Style::default().bg(Theme::BACKGROUND));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input
            Constraint::Min(1),    // Status or results
            Constraint::Length(1), // Tip
        ])
        .split(inner);

    render_input(frame, chunks[0], overlay);

    match status_text(overlay.outcome()) {
        Some((text, style)) => {
            let status = Paragraph::new(vec![Line::from(""), Line::from(Span::styled(text, style))])
                .alignment(Alignment::Center);
            frame.render_widget(status, chunks[1]);
        }
        None => render_results(frame, chunks[1], overlay),
    }

    let tip = Paragraph::new(Span::styled(CLOSE_TIP, Theme::keybind_desc()))
        .alignment(Alignment::Right);
    frame.render_widget(tip, chunks[2]);
}

fn render_input(frame: &mut Frame, area: Rect, overlay: &SearchOverlay) {
    let input = overlay.input();
    let line = if input.is_empty() {
        Line::from(vec![
            Span::styled("⌕ ", Theme::accent()),
            Span::styled(" ", Theme::input_cursor()),
            Span::styled("Search movies and TV shows…", Theme::dimmed()),
        ])
    } else {
        let before: String = input.chars().take(overlay.cursor()).collect();
        let mut after = input.chars().skip(overlay.cursor());
        let at = after.next().map(String::from).unwrap_or_else(|| " ".to_string());
        let rest: String = after.collect();
        Line::from(vec![
            Span::styled("⌕ ", Theme::accent()),
            Span::styled(before, Theme::input()),
            Span::styled(at, Theme::input_cursor()),
            Span::styled(rest, Theme::input()),
        ])
    };

    let border = if overlay.is_input_focused() {
        Theme::border_focused()
    } else {
        Theme::border()
    };
    let field = Paragraph::new(line).style(Theme::input()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border),
    );
    frame.render_widget(field, area);
}

fn render_results(frame: &mut Frame, area: Rect, overlay: &SearchOverlay) {
    let results = overlay.results();
    let visible = (area.height as usize / ROW_HEIGHT).max(1);
    let selected = overlay.list.selected;
    let start = selected.saturating_sub(visible - 1);
    let width = area.width as usize;

    let items: Vec<ListItem> = results
        .iter()
        .enumerate()
        .skip(start)
        .take(visible)
        .map(|(i, item)| result_row(item, i == selected, width))
        .collect();

    frame.render_widget(List::new(items), area);
}

/// One result: marker, title, badge, date, then the clamped overview
fn result_row(item: &SearchableItem, selected: bool, width: usize) -> ListItem<'static> {
    let (marker, marker_style) = if item.thumbnail_url().is_empty() {
        ("▢ ", Theme::placeholder())
    } else {
        ("▣ ", Theme::thumbnail())
    };
    let pointer = if selected { "▸ " } else { "  " };

    let mut lines = vec![Line::from(vec![
        Span::styled(pointer, if selected { Theme::selected() } else { Theme::dimmed() }),
        Span::styled(marker, marker_style),
        Span::styled(
            item.title.clone(),
            if selected { Theme::list_item_selected() } else { Theme::list_item() },
        ),
        Span::raw(" "),
        Span::styled(format!("[{}]", item.kind.badge()), Theme::badge(item.kind)),
        Span::raw(" "),
        Span::styled(item.date_or_placeholder().to_string(), Theme::date()),
    ])];

    if let Some(overview) = item.overview.as_deref() {
        for text in clamp_lines(overview, width.saturating_sub(6), 2) {
            lines.push(Line::from(vec![
                Span::raw("      "),
                Span::styled(text, Theme::dimmed()),
            ]));
        }
    }
    while lines.len() < ROW_HEIGHT {
        lines.push(Line::from(""));
    }

    ListItem::new(lines)
}

/// Rect of at most `width` x `height` centered in `area`
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
