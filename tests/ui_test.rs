//! UI rendering tests for popstream
//!
//! Renders whole screens into a TestBackend and inspects the buffer text.
//!
//! ## Test Cases
//! - Wide vs compact chrome (top links, bottom bar, footer)
//! - Safe-area rows stay clear under the bottom bar
//! - Search overlay states (idle, failure, empty, results)
//! - Hero fallback notice
//! - Player, detail and unknown routes

use std::time::{Duration, Instant};

use ratatui::{backend::TestBackend, Terminal};
use popstream::app::App;
use popstream::fetch::{FetchRequest, FetchResponse};
use popstream::hero::FixedIndex;
use popstream::models::{ContentKind, SearchableItem};
use popstream::ui::{render_ui_at, search, shell};

const DELAY: Duration = Duration::from_millis(350);
const YEAR: i32 = 2026;

fn new_app() -> App {
    App::with_random(DELAY, Box::new(FixedIndex(0)))
}

/// Render `app` and return the screen as one string per row
fn render(app: &App, width: u16, height: u16) -> Vec<String> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| render_ui_at(frame, app, YEAR)).unwrap();

    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect()
}

fn screen_contains(rows: &[String], needle: &str) -> bool {
    rows.iter().any(|row| row.contains(needle))
}

/// Commit `query` in the open overlay and answer it with `result`
fn answer_search(app: &mut App, query: &str, result: Result<Vec<SearchableItem>, String>) {
    let t0 = Instant::now();
    app.search.set_query(query, t0);
    app.tick(t0 + DELAY);

    let requests = app.take_requests();
    let ticket = requests
        .iter()
        .find_map(|r| match r {
            FetchRequest::Search { ticket, .. } => Some(*ticket),
            _ => None,
        })
        .expect("search request");
    assert!(app.apply(FetchResponse::Search { ticket, result }));
}

fn movie(id: u64, title: &str, overview: &str) -> SearchableItem {
    SearchableItem {
        id,
        kind: ContentKind::Movie,
        title: title.into(),
        overview: Some(overview.into()),
        poster_path: None,
        backdrop_path: None,
        date_label: Some("2022-03-01".into()),
    }
}

// =============================================================================
// CHROME TESTS
// =============================================================================

#[test]
fn test_wide_home_has_top_links_and_footer() {
    let app = new_app();
    let rows = render(&app, 120, 40);

    assert!(rows[0].contains("POP STREAM"));
    assert!(rows[0].contains("Discover"));
    assert!(rows[0].contains("Library"));
    assert!(screen_contains(&rows, "© 2026 POP STREAM. All rights reserved."));
    // No bottom bar on wide screens
    assert!(!screen_contains(&rows, "1 Home"));
}

#[test]
fn test_compact_home_has_bottom_bar() {
    let app = new_app();
    let rows = render(&app, 80, 30);

    assert!(rows[0].contains("POP STREAM"));
    assert!(!rows[0].contains("Discover"), "top links hidden when compact");
    assert!(screen_contains(&rows, "1 Home"));
    assert!(screen_contains(&rows, "5 About"));
}

#[test]
fn test_short_terminal_drops_footer() {
    let app = new_app();
    let rows = render(&app, 120, shell::FOOTER_MIN_HEIGHT - 1);
    assert!(!screen_contains(&rows, "All rights reserved"));

    let rows = render(&app, 120, shell::FOOTER_MIN_HEIGHT);
    assert!(screen_contains(&rows, "All rights reserved"));
}

#[test]
fn test_safe_area_rows_stay_clear() {
    let mut app = new_app();
    app.safe_area_bottom = 2;
    let rows = render(&app, 80, 24);

    // Bar border at 19, labels at 20, reserve below
    assert!(rows[20].contains("1 Home"));
    assert!(rows[22].trim().is_empty());
    assert!(rows[23].trim().is_empty());
}

#[test]
fn test_player_route_hides_top_bar() {
    let mut app = new_app();
    app.navigate("/movie/27205/player");
    let rows = render(&app, 120, 40);

    assert!(!rows[0].contains("POP STREAM"));
    assert!(!rows[0].contains("Back"));
    assert!(screen_contains(&rows, shell::PLAYER_NOTICE));
}

#[test]
fn test_detail_route_shows_back_button() {
    let mut app = new_app();
    app.navigate("/tv/1396");
    let rows = render(&app, 80, 30);

    assert!(rows[0].contains("← Back"));
    assert!(rows[0].contains("/?content=tv"));
    assert!(screen_contains(&rows, "Details for /tv/1396"));
    assert!(!screen_contains(&rows, "1 Home"), "no bottom bar on detail pages");
}

#[test]
fn test_unknown_route() {
    let mut app = new_app();
    app.navigate("/nowhere");
    let rows = render(&app, 120, 40);
    assert!(screen_contains(&rows, "Nothing lives at /nowhere"));
}

// =============================================================================
// HERO TESTS
// =============================================================================

#[test]
fn test_hero_shows_sample_while_loading() {
    let app = new_app();
    let rows = render(&app, 120, 40);

    assert!(screen_contains(&rows, "Inception"));
    assert!(screen_contains(&rows, "Loading trending…"));
    assert!(screen_contains(&rows, "Ctrl+K"));
}

#[test]
fn test_hero_fallback_notice() {
    let mut app = new_app();
    for request in app.take_requests() {
        if let FetchRequest::Trending { ticket, kind } = request {
            app.apply(FetchResponse::Trending {
                ticket,
                kind,
                result: Err("HTTP 503".into()),
            });
        }
    }
    let rows = render(&app, 120, 40);

    assert!(screen_contains(&rows, "Inception"));
    assert!(screen_contains(&rows, "Using fallback data (reason: HTTP 503)"));
    assert!(!screen_contains(&rows, "Loading trending…"));
}

// =============================================================================
// SEARCH OVERLAY TESTS
// =============================================================================

#[test]
fn test_modal_overlay_idle() {
    let mut app = new_app();
    assert!(app.open_search());
    let rows = render(&app, 120, 40);

    assert!(screen_contains(&rows, search::IDLE_HINT));
    assert!(screen_contains(&rows, search::CLOSE_TIP));
}

#[test]
fn test_search_failure_message() {
    let mut app = new_app();
    app.navigate("/search");
    answer_search(&mut app, "dune", Err("HTTP 500".into()));
    let rows = render(&app, 120, 40);

    assert!(screen_contains(&rows, "Couldn't search right now: HTTP 500"));
    // The search page has no footer
    assert!(!screen_contains(&rows, "All rights reserved"));
}

#[test]
fn test_search_empty_results() {
    let mut app = new_app();
    app.open_search();
    answer_search(&mut app, "zzzz", Ok(vec![]));
    let rows = render(&app, 120, 40);

    assert!(screen_contains(&rows, search::EMPTY_TEXT));
}

#[test]
fn test_search_results_rows() {
    let mut app = new_app();
    app.open_search();
    answer_search(
        &mut app,
        "batman",
        Ok(vec![
            movie(414906, "The Batman", "Batman ventures into Gotham"),
            movie(268, "Batman", "The Dark Knight of Gotham City"),
        ]),
    );
    let rows = render(&app, 120, 40);

    assert!(screen_contains(&rows, "The Batman"));
    assert!(screen_contains(&rows, "[MOVIE]"));
    assert!(screen_contains(&rows, "2022-03-01"));
    assert!(screen_contains(&rows, "Batman ventures into Gotham"));
    assert!(screen_contains(&rows, "(1/2)"));
}
