//! In-app locations and route-conditioned chrome
//!
//! [`classify`] is the only place paths are matched; the navigation shell
//! derives everything it draws from its result.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::models::ContentKind;

// =============================================================================
// Navigation Items
// =============================================================================

/// One entry of the top/bottom navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
    /// Number key that jumps here
    pub key: char,
}

/// Navigation allow-list, in display order
pub const NAV_ITEMS: [NavItem; 5] = [
    NavItem { label: "Home", href: "/", key: '1' },
    NavItem { label: "Discover", href: "/discover", key: '2' },
    NavItem { label: "Search", href: "/search", key: '3' },
    NavItem { label: "Library", href: "/library", key: '4' },
    NavItem { label: "About", href: "/about", key: '5' },
];

/// Nav item bound to a number key
pub fn nav_item_for_key(key: char) -> Option<&'static NavItem> {
    NAV_ITEMS.iter().find(|item| item.key == key)
}

// =============================================================================
// Classification
// =============================================================================

/// What kind of page a path is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    Primary,
    Detail,
    Player,
    Search,
    Other,
}

impl RouteKind {
    /// Search is listed in the navigation and gets primary chrome
    pub fn is_primary(&self) -> bool {
        matches!(self, RouteKind::Primary | RouteKind::Search)
    }
}

fn detail_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^/(movie|tv)/\d+(/|$)").ok())
        .as_ref()
}

/// Classify a path (query string excluded)
pub fn classify(path: &str) -> RouteKind {
    if path.contains("/player") {
        RouteKind::Player
    } else if path == "/search" {
        RouteKind::Search
    } else if NAV_ITEMS.iter().any(|item| item.href == path) {
        RouteKind::Primary
    } else if detail_pattern().is_some_and(|re| re.is_match(path)) {
        RouteKind::Detail
    } else {
        RouteKind::Other
    }
}

// =============================================================================
// Location
// =============================================================================

/// Path plus query parameters, e.g. `/?content=tv`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub path: String,
    pub query: BTreeMap<String, String>,
}

impl Location {
    /// Parse `path[?k=v&...]`; a missing or relative path becomes rooted
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let (raw_path, raw_query) = match input.split_once('?') {
            Some((p, q)) => (p, q),
            None => (input, ""),
        };

        let mut path = raw_path.trim_end_matches('/').to_string();
        if !path.starts_with('/') {
            path.insert(0, '/');
        }

        let query = raw_query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                (decode(k), decode(v))
            })
            .collect();

        Self { path, query }
    }

    pub fn route(&self) -> RouteKind {
        classify(&self.path)
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Same location with one parameter replaced
    pub fn with_param(&self, key: &str, value: &str) -> Self {
        let mut next = self.clone();
        next.query.insert(key.to_string(), value.to_string());
        next
    }

    /// Content kind from `?content=`, defaulting to movies
    pub fn content_kind(&self) -> ContentKind {
        self.query_param("content")
            .and_then(ContentKind::from_param)
            .unwrap_or_default()
    }

    /// `(kind, id)` of a detail or player path
    pub fn media_target(&self) -> Option<(ContentKind, u64)> {
        let mut segments = self.path.trim_start_matches('/').split('/');
        let kind = ContentKind::from_param(segments.next()?)?;
        let id = segments.next()?.parse().ok()?;
        Some((kind, id))
    }
}

fn decode(s: &str) -> String {
    let s = s.replace('+', " ");
    urlencoding::decode(&s)
        .map(|c| c.into_owned())
        .unwrap_or_else(|_| s.clone())
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        for (i, (k, v)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, urlencoding::encode(k), urlencoding::encode(v))?;
        }
        Ok(())
    }
}

impl From<&str> for Location {
    fn from(s: &str) -> Self {
        Location::parse(s)
    }
}

// =============================================================================
// Chrome
// =============================================================================

/// Rows taken by the bottom navigation bar
pub const BOTTOM_BAR_HEIGHT: u16 = 3;

/// Terminals narrower than this get the compact layout
pub const WIDE_MIN_COLUMNS: u16 = 100;

/// Layout class of the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    Compact,
    Wide,
}

impl Viewport {
    pub fn from_width(columns: u16) -> Self {
        if columns < WIDE_MIN_COLUMNS {
            Viewport::Compact
        } else {
            Viewport::Wide
        }
    }
}

/// Top bar variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "target", rename_all = "lowercase")]
pub enum TopBar {
    Hidden,
    Nav,
    /// Back button with its target location
    Back(String),
}

/// Which navigation pieces to draw for a location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chrome {
    pub route: RouteKind,
    pub top_bar: TopBar,
    /// Inline nav links in the top bar
    pub nav_links: bool,
    pub bottom_bar: bool,
    pub footer: bool,
}

impl Chrome {
    pub fn for_location(location: &Location, viewport: Viewport) -> Self {
        let route = location.route();
        let primary = route.is_primary();

        let top_bar = match route {
            RouteKind::Player => TopBar::Hidden,
            _ if primary => TopBar::Nav,
            _ => TopBar::Back(back_target(&location.path).to_string()),
        };

        Self {
            route,
            nav_links: top_bar == TopBar::Nav && viewport == Viewport::Wide,
            top_bar,
            bottom_bar: primary && viewport == Viewport::Compact,
            footer: route != RouteKind::Search,
        }
    }

    /// Rows kept clear at the bottom for the bar plus the safe-area inset
    pub fn bottom_reserve(&self, safe_area: u16) -> u16 {
        if self.bottom_bar {
            BOTTOM_BAR_HEIGHT + safe_area
        } else {
            0
        }
    }
}

/// Series pages go back to the series home
pub fn back_target(path: &str) -> &'static str {
    if path.contains("/tv/") {
        "/?content=tv"
    } else {
        "/"
    }
}
