//! Quick-search overlay state
//!
//! Text input, debounced query, and the fetch outcome driven by the committed
//! query. Rendering lives in `ui::search`; this module never does I/O.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::app::ListState;
use crate::debounce::Debouncer;
use crate::fetch::{FetchOutcome, FetchRequest, Generations, RequestTicket};
use crate::models::{SearchKind, SearchableItem};

/// How the overlay was opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayMode {
    /// Popup over the home route (Ctrl+K)
    #[default]
    Modal,
    /// Full page on the `/search` route
    Page,
}

/// Search overlay state machine
#[derive(Debug, Clone)]
pub struct SearchOverlay {
    open: bool,
    mode: OverlayMode,
    /// Text as typed
    input: String,
    /// Cursor position in characters
    cursor: usize,
    input_focused: bool,
    debounce: Debouncer,
    kind: SearchKind,
    outcome: FetchOutcome,
    generations: Generations,
    pub list: ListState,
}

impl Default for SearchOverlay {
    fn default() -> Self {
        Self::new(crate::debounce::DEFAULT_DEBOUNCE)
    }
}

impl SearchOverlay {
    pub fn new(delay: Duration) -> Self {
        Self {
            open: false,
            mode: OverlayMode::Modal,
            input: String::new(),
            cursor: 0,
            input_focused: false,
            debounce: Debouncer::new(delay),
            kind: SearchKind::Multi,
            outcome: FetchOutcome::Idle,
            generations: Generations::new(),
            list: ListState::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn mode(&self) -> OverlayMode {
        self.mode
    }

    pub fn is_input_focused(&self) -> bool {
        self.input_focused
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn committed(&self) -> &str {
        self.debounce.committed()
    }

    pub fn kind(&self) -> SearchKind {
        self.kind
    }

    pub fn outcome(&self) -> &FetchOutcome {
        &self.outcome
    }

    pub fn results(&self) -> &[SearchableItem] {
        self.outcome.items()
    }

    pub fn selected(&self) -> Option<&SearchableItem> {
        self.results().get(self.list.selected)
    }

    // -------------------------------------------------------------------------
    // Open / Close
    // -------------------------------------------------------------------------

    /// Show the overlay and focus its input
    pub fn open(&mut self, mode: OverlayMode) {
        self.open = true;
        self.mode = mode;
        self.input_focused = true;
    }

    /// Hide the overlay and drop everything it held.
    ///
    /// The in-flight request, if any, is superseded so its completion is
    /// discarded when it arrives.
    pub fn close(&mut self) {
        self.open = false;
        self.input_focused = false;
        self.input.clear();
        self.cursor = 0;
        self.debounce.reset();
        self.outcome = FetchOutcome::Idle;
        self.list = ListState::default();
        self.generations.invalidate();
    }

    // -------------------------------------------------------------------------
    // Text Editing
    // -------------------------------------------------------------------------

    fn byte_index(&self, char_pos: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    fn char_len(&self) -> usize {
        self.input.chars().count()
    }

    fn edited(&mut self, now: Instant) {
        self.debounce.set_raw(self.input.clone(), now);
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char, now: Instant) {
        let at = self.byte_index(self.cursor);
        self.input.insert(at, c);
        self.cursor += 1;
        self.edited(now);
    }

    /// Delete character before cursor
    pub fn backspace(&mut self, now: Instant) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.input.remove(at);
            self.edited(now);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self, now: Instant) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.input.remove(at);
            self.edited(now);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Replace the whole query
    pub fn set_query(&mut self, text: &str, now: Instant) {
        self.input = text.to_string();
        self.cursor = self.char_len();
        self.edited(now);
    }

    /// Empty the query (Ctrl+U)
    pub fn clear_query(&mut self, now: Instant) {
        self.input.clear();
        self.cursor = 0;
        self.edited(now);
        self.input_focused = true;
    }

    // -------------------------------------------------------------------------
    // Fetch Lifecycle
    // -------------------------------------------------------------------------

    /// Advance the debouncer; returns a request when a new query commits.
    ///
    /// A committed query that trims to nothing supersedes any in-flight
    /// request and returns to `Idle` without asking for a fetch.
    pub fn tick(&mut self, now: Instant) -> Option<FetchRequest> {
        if !self.open {
            return None;
        }
        let committed = self.debounce.poll(now)?.trim().to_string();

        self.list = ListState::default();
        if committed.is_empty() {
            self.generations.invalidate();
            self.outcome = FetchOutcome::Idle;
            return None;
        }

        let ticket = self.generations.begin();
        self.outcome = FetchOutcome::Loading;
        debug!(query = %committed, generation = ticket.generation(), "search committed");
        Some(FetchRequest::Search {
            ticket,
            query: committed,
            kind: self.kind,
        })
    }

    /// Apply a search completion; returns whether visible state changed
    pub fn apply(&mut self, ticket: RequestTicket, result: Result<Vec<SearchableItem>, String>) -> bool {
        if !self.open || !self.generations.is_current(ticket) {
            debug!(generation = ticket.generation(), "discarding superseded search result");
            return false;
        }

        self.outcome = match result {
            Ok(items) => {
                self.list = ListState::new(items.len());
                FetchOutcome::Success(items)
            }
            Err(msg) => {
                self.list = ListState::default();
                FetchOutcome::Failure(msg)
            }
        };
        true
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    pub fn select_up(&mut self) {
        self.list.up();
    }

    pub fn select_down(&mut self) {
        self.list.down();
    }

    pub fn select_first(&mut self) {
        self.list.first();
    }

    pub fn select_last(&mut self) {
        self.list.last();
    }

    /// Take the highlighted result and close the overlay
    pub fn activate(&mut self) -> Option<SearchableItem> {
        let item = self.selected().cloned()?;
        self.close();
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentKind;

    const DELAY: Duration = Duration::from_millis(350);

    fn item(id: u64, title: &str) -> SearchableItem {
        SearchableItem {
            id,
            kind: ContentKind::Movie,
            title: title.into(),
            overview: None,
            poster_path: None,
            backdrop_path: None,
            date_label: None,
        }
    }

    fn typed(text: &str, start: Instant) -> SearchOverlay {
        let mut overlay = SearchOverlay::new(DELAY);
        overlay.open(OverlayMode::Modal);
        for c in text.chars() {
            overlay.insert(c, start);
        }
        overlay
    }

    #[test]
    fn test_open_focuses_input() {
        let mut overlay = SearchOverlay::new(DELAY);
        assert!(!overlay.is_open());
        overlay.open(OverlayMode::Page);
        assert!(overlay.is_open());
        assert!(overlay.is_input_focused());
        assert_eq!(overlay.mode(), OverlayMode::Page);
    }

    #[test]
    fn test_editing_is_char_aware() {
        let now = Instant::now();
        let mut overlay = typed("amélie", now);
        overlay.cursor_left();
        overlay.backspace(now);
        assert_eq!(overlay.input(), "améle");
        overlay.cursor_home();
        overlay.delete(now);
        assert_eq!(overlay.input(), "méle");
        overlay.cursor_end();
        assert_eq!(overlay.cursor(), 4);
    }

    #[test]
    fn test_commit_issues_search_request() {
        let start = Instant::now();
        let mut overlay = typed("dune", start);

        assert!(overlay.tick(start + Duration::from_millis(100)).is_none());
        let req = overlay.tick(start + DELAY).expect("request after delay");
        match req {
            FetchRequest::Search { query, kind, .. } => {
                assert_eq!(query, "dune");
                assert_eq!(kind, SearchKind::Multi);
            }
            other => panic!("unexpected request {:?}", other),
        }
        assert!(overlay.outcome().is_loading());
    }

    #[test]
    fn test_whitespace_query_is_idle() {
        let start = Instant::now();
        let mut overlay = typed("   ", start);
        assert!(overlay.tick(start + DELAY).is_none());
        assert!(overlay.outcome().is_idle());
    }

    #[test]
    fn test_apply_success_and_failure() {
        let start = Instant::now();
        let mut overlay = typed("heat", start);
        let Some(FetchRequest::Search { ticket, .. }) = overlay.tick(start + DELAY) else {
            panic!("expected search request");
        };

        assert!(overlay.apply(ticket, Ok(vec![item(1, "Heat"), item(2, "Heat 2")])));
        assert_eq!(overlay.results().len(), 2);
        overlay.select_down();
        assert_eq!(overlay.selected().map(|i| i.id), Some(2));
        overlay.select_first();
        assert_eq!(overlay.selected().map(|i| i.id), Some(1));
        overlay.select_last();
        assert_eq!(overlay.selected().map(|i| i.id), Some(2));

        overlay.set_query("heatwave", start + DELAY);
        let Some(FetchRequest::Search { ticket, .. }) = overlay.tick(start + DELAY * 2) else {
            panic!("expected search request");
        };
        assert!(overlay.apply(ticket, Err("HTTP 500".into())));
        assert_eq!(overlay.outcome().error(), Some("HTTP 500"));
        assert!(overlay.results().is_empty());
        assert!(overlay.selected().is_none());
    }

    #[test]
    fn test_closed_overlay_ignores_results() {
        let start = Instant::now();
        let mut overlay = typed("alien", start);
        let Some(FetchRequest::Search { ticket, .. }) = overlay.tick(start + DELAY) else {
            panic!("expected search request");
        };
        overlay.close();
        assert!(!overlay.apply(ticket, Ok(vec![item(1, "Alien")])));
        assert!(overlay.outcome().is_idle());
    }

    #[test]
    fn test_activate_returns_item_and_closes() {
        let start = Instant::now();
        let mut overlay = typed("up", start);
        let Some(FetchRequest::Search { ticket, .. }) = overlay.tick(start + DELAY) else {
            panic!("expected search request");
        };
        overlay.apply(ticket, Ok(vec![item(14160, "Up")]));

        let picked = overlay.activate().expect("selected item");
        assert_eq!(picked.id, 14160);
        assert!(!overlay.is_open());
        assert_eq!(overlay.input(), "");
    }

    #[test]
    fn test_activate_without_results_keeps_overlay() {
        let mut overlay = SearchOverlay::new(DELAY);
        overlay.open(OverlayMode::Modal);
        assert!(overlay.activate().is_none());
        assert!(overlay.is_open());
    }

    #[test]
    fn test_clear_query_returns_to_idle() {
        let start = Instant::now();
        let mut overlay = typed("jaws", start);
        let Some(FetchRequest::Search { ticket, .. }) = overlay.tick(start + DELAY) else {
            panic!("expected search request");
        };
        overlay.apply(ticket, Ok(vec![item(578, "Jaws")]));

        overlay.clear_query(start + DELAY);
        assert!(overlay.tick(start + DELAY * 2).is_none());
        assert!(overlay.outcome().is_idle());
        assert_eq!(overlay.committed(), "");
    }
}
