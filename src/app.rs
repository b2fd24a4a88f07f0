//! App state and core application logic
//!
//! Owns the location history, the hero selector and the search overlay;
//! translates key events and fetch completions into state transitions and
//! queues fetch requests for the runtime.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

use crate::fetch::{FetchRequest, FetchResponse};
use crate::hero::{HeroSelector, RandomSource, ThreadRandom};
use crate::models::{ContentKind, SearchableItem};
use crate::overlay::{OverlayMode, SearchOverlay};
use crate::routes::{self, Chrome, Location, RouteKind, TopBar, Viewport};

// =============================================================================
// Selection State
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    /// Move selection up
    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move selection down
    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    /// Jump to first item
    pub fn first(&mut self) {
        self.selected = 0;
    }

    /// Jump to last item
    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Current location
    pub location: Location,
    /// Navigation history stack
    pub history: Vec<Location>,
    /// Whether the app is running
    pub running: bool,
    pub hero: HeroSelector,
    pub search: SearchOverlay,
    /// Last item opened from the hero or the overlay
    pub selected: Option<SearchableItem>,
    /// Extra rows reserved under the bottom bar
    pub safe_area_bottom: u16,
    pending: Vec<FetchRequest>,
}

impl App {
    /// Create an app on the home route with the thread RNG
    pub fn new(debounce: Duration) -> Self {
        Self::with_random(debounce, Box::new(ThreadRandom))
    }

    /// Create an app with an explicit hero random source
    pub fn with_random(debounce: Duration, random: Box<dyn RandomSource>) -> Self {
        let location = Location::parse("/");
        let kind = location.content_kind();
        let mut app = Self {
            location,
            history: Vec::new(),
            running: true,
            hero: HeroSelector::new(kind, random),
            search: SearchOverlay::new(debounce),
            selected: None,
            safe_area_bottom: 0,
            pending: Vec::new(),
        };
        let request = app.hero.request(kind);
        app.pending.push(request);
        app
    }

    /// Start somewhere other than `/` (history stays empty)
    pub fn start_at(&mut self, target: impl Into<Location>) {
        self.location = target.into();
        self.enter();
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Navigate to a new location, pushing current to history
    pub fn navigate(&mut self, target: impl Into<Location>) {
        let target = target.into();
        if target == self.location {
            return;
        }
        info!(from = %self.location, to = %target, "navigate");
        self.leave();
        let previous = std::mem::replace(&mut self.location, target);
        self.history.push(previous);
        self.enter();
    }

    /// Swap the current location without touching history
    pub fn replace(&mut self, target: impl Into<Location>) {
        let target = target.into();
        debug!(from = %self.location, to = %target, "replace location");
        if target.path != self.location.path {
            self.leave();
        }
        self.location = target;
        self.enter();
    }

    /// Pop history; returns false when there is nowhere to go
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                info!(from = %self.location, to = %previous, "back");
                self.leave();
                self.location = previous;
                self.enter();
                true
            }
            None => false,
        }
    }

    /// Follow the top bar's back button when shown, otherwise pop history
    pub fn go_back(&mut self) -> bool {
        match Chrome::for_location(&self.location, Viewport::Wide).top_bar {
            TopBar::Back(target) => {
                self.navigate(target.as_str());
                true
            }
            _ => self.back(),
        }
    }

    fn leave(&mut self) {
        if self.search.is_open() {
            self.search.close();
        }
    }

    fn enter(&mut self) {
        match self.location.route() {
            RouteKind::Search => self.search.open(OverlayMode::Page),
            RouteKind::Primary if self.is_home() => {
                let kind = self.location.content_kind();
                if kind != self.hero.kind() {
                    let request = self.hero.request(kind);
                    self.pending.push(request);
                }
            }
            _ => {}
        }
    }

    pub fn is_home(&self) -> bool {
        self.location.path == "/"
    }

    /// Switch the home route between movies and series
    pub fn set_content_kind(&mut self, kind: ContentKind) {
        if !self.is_home() || self.location.content_kind() == kind {
            return;
        }
        let next = self.location.with_param("content", kind.as_param());
        self.replace(next);
    }

    /// Open the quick-search popup (home route only)
    pub fn open_search(&mut self) -> bool {
        if !self.is_home() {
            return false;
        }
        self.search.open(OverlayMode::Modal);
        true
    }

    fn close_search(&mut self) {
        let mode = self.search.mode();
        self.search.close();
        if mode == OverlayMode::Page && !self.back() {
            self.navigate("/");
        }
    }

    /// Remember `item` and open its detail page
    pub fn select_result(&mut self, item: SearchableItem) {
        let target = item.detail_path();
        self.selected = Some(item);
        self.navigate(target.as_str());
    }

    fn open_featured(&mut self, play: bool) {
        let view = self.hero.view();
        self.selected = Some(self.hero.featured().clone());
        let target = if play { view.play_href } else { view.info_href };
        self.navigate(target.as_str());
    }

    /// Selected item when it belongs to the current detail/player path
    pub fn current_item(&self) -> Option<&SearchableItem> {
        let (kind, id) = self.location.media_target()?;
        self.selected
            .as_ref()
            .filter(|item| item.kind == kind && item.id == id)
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn chrome(&self, viewport: Viewport) -> Chrome {
        Chrome::for_location(&self.location, viewport)
    }

    // -------------------------------------------------------------------------
    // Fetch Plumbing
    // -------------------------------------------------------------------------

    /// Advance timers; may queue a search request
    pub fn tick(&mut self, now: Instant) {
        if let Some(request) = self.search.tick(now) {
            self.pending.push(request);
        }
    }

    /// Hand queued requests to the runtime
    pub fn take_requests(&mut self) -> Vec<FetchRequest> {
        std::mem::take(&mut self.pending)
    }

    /// Apply a completion; returns whether anything visible changed
    pub fn apply(&mut self, response: FetchResponse) -> bool {
        match response {
            FetchResponse::Search { ticket, result } => self.search.apply(ticket, result),
            FetchResponse::Trending {
                ticket,
                kind,
                result,
            } => self.hero.apply(ticket, kind, result),
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.handle_key_at(key, Instant::now())
    }

    /// Same as [`App::handle_key`] with an explicit clock
    pub fn handle_key_at(&mut self, key: KeyEvent, now: Instant) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        if self.search.is_open() {
            self.handle_overlay_key(key, now)
        } else {
            self.handle_normal_key(key)
        }
    }

    fn handle_overlay_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.close_search();
                true
            }
            KeyCode::Enter => {
                if let Some(item) = self.search.activate() {
                    self.select_result(item);
                }
                true
            }
            KeyCode::Up => {
                self.search.select_up();
                true
            }
            KeyCode::Down => {
                self.search.select_down();
                true
            }
            KeyCode::PageUp => {
                self.search.select_first();
                true
            }
            KeyCode::PageDown => {
                self.search.select_last();
                true
            }
            KeyCode::Char('u') if ctrl => {
                self.search.clear_query(now);
                true
            }
            KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => false,
            KeyCode::Char(c) => {
                self.search.insert(c, now);
                true
            }
            KeyCode::Backspace => {
                self.search.backspace(now);
                true
            }
            KeyCode::Delete => {
                self.search.delete(now);
                true
            }
            KeyCode::Left => {
                self.search.cursor_left();
                true
            }
            KeyCode::Right => {
                self.search.cursor_right();
                true
            }
            KeyCode::Home => {
                self.search.cursor_home();
                true
            }
            KeyCode::End => {
                self.search.cursor_end();
                true
            }
            _ => false,
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        let command = key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER);

        match key.code {
            KeyCode::Char('k') | KeyCode::Char('K') if command => return self.open_search(),
            KeyCode::Char('q') => {
                self.quit();
                return true;
            }
            KeyCode::Esc | KeyCode::Backspace => return self.go_back(),
            KeyCode::Char(c) if self.location.route().is_primary() => {
                if let Some(item) = routes::nav_item_for_key(c) {
                    self.navigate(item.href);
                    return true;
                }
            }
            _ => {}
        }

        if self.is_home() {
            self.handle_home_key(key)
        } else {
            false
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('m') => {
                self.set_content_kind(ContentKind::Movie);
                true
            }
            KeyCode::Char('t') => {
                self.set_content_kind(ContentKind::Series);
                true
            }
            KeyCode::Char('p') => {
                self.open_featured(true);
                true
            }
            KeyCode::Char('i') | KeyCode::Enter => {
                self.open_featured(false);
                true
            }
            KeyCode::Char('/') => {
                self.navigate("/search");
                true
            }
            _ => false,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
