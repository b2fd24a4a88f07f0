//! Hero banner selection
//!
//! Picks one featured item from the trending pool of the active content kind,
//! falling back to a fixed sample when the pool is empty or failed to load.
//! The pick is made when the pool or the kind changes, never per frame.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::api::samples;
use crate::fetch::{FetchRequest, Generations, RequestTicket};
use crate::models::{ContentKind, ImageSize, SearchableItem};

/// Only the head of the trending pool is eligible
pub const HERO_POOL_LIMIT: usize = 12;

/// Character cap for the hero blurb
pub const OVERVIEW_LIMIT: usize = 220;

/// Source of the featured index, injectable for tests
pub trait RandomSource: Send {
    /// Uniform index in `0..len`; `len` is never zero
    fn pick(&mut self, len: usize) -> usize;
}

/// Thread-local RNG, used in the terminal
#[derive(Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Reproducible picks from a seed
#[derive(Debug)]
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn pick(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// Always the same index, clamped to the pool
#[derive(Debug, Clone, Copy)]
pub struct FixedIndex(pub usize);

impl RandomSource for FixedIndex {
    fn pick(&mut self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}

/// Shorten `text` to at most `n` characters, ending in `…` when cut.
///
/// Trailing whitespace before the ellipsis is trimmed. Text that already fits
/// is returned unchanged.
pub fn truncate(text: &str, n: usize) -> String {
    if text.chars().count() <= n {
        return text.to_string();
    }
    if n == 0 {
        return String::new();
    }
    let head: String = text.chars().take(n - 1).collect();
    format!("{}…", head.trim_end())
}

/// Everything the banner shows, derived from the featured item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroView {
    pub id: u64,
    pub kind: ContentKind,
    pub badge: &'static str,
    pub title: String,
    pub blurb: String,
    pub backdrop_url: String,
    pub poster_url: String,
    pub play_href: String,
    pub info_href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

/// Trending pool and featured pick for the home banner
pub struct HeroSelector {
    kind: ContentKind,
    pool: Vec<SearchableItem>,
    featured: Option<usize>,
    fallback: SearchableItem,
    error: Option<String>,
    loading: bool,
    generations: Generations,
    random: Box<dyn RandomSource>,
}

impl std::fmt::Debug for HeroSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeroSelector")
            .field("kind", &self.kind)
            .field("pool", &self.pool.len())
            .field("featured", &self.featured)
            .field("error", &self.error)
            .field("loading", &self.loading)
            .finish()
    }
}

impl HeroSelector {
    pub fn new(kind: ContentKind, random: Box<dyn RandomSource>) -> Self {
        Self {
            kind,
            pool: Vec::new(),
            featured: None,
            fallback: samples::sample_item(kind),
            error: None,
            loading: false,
            generations: Generations::new(),
            random,
        }
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn pool(&self) -> &[SearchableItem] {
        &self.pool
    }

    /// Start loading the trending pool for `kind`, superseding any earlier load.
    ///
    /// Switching kinds drops the old pool so the previous kind's pick is never
    /// shown under the new kind's links.
    pub fn request(&mut self, kind: ContentKind) -> FetchRequest {
        if kind != self.kind {
            self.kind = kind;
            self.fallback = samples::sample_item(kind);
            self.pool.clear();
            self.featured = None;
        }
        self.error = None;
        self.loading = true;
        let ticket = self.generations.begin();
        debug!(kind = kind.as_param(), generation = ticket.generation(), "hero fetch");
        FetchRequest::Trending { ticket, kind }
    }

    /// Apply a trending completion; stale tickets are ignored.
    ///
    /// Returns whether the state changed.
    pub fn apply(
        &mut self,
        ticket: RequestTicket,
        kind: ContentKind,
        result: Result<Vec<SearchableItem>, String>,
    ) -> bool {
        if !self.generations.is_current(ticket) || kind != self.kind {
            debug!(generation = ticket.generation(), "discarding stale trending result");
            return false;
        }

        self.loading = false;
        match result {
            Ok(items) => {
                self.pool = items;
                self.error = None;
            }
            Err(msg) => {
                info!(reason = %msg, "hero using fallback data");
                self.pool.clear();
                self.error = Some(msg);
            }
        }
        self.reselect();
        true
    }

    /// Replace the pool directly (CLI path, no ticket involved)
    pub fn set_pool(&mut self, kind: ContentKind, result: Result<Vec<SearchableItem>, String>) {
        let ticket = self.request(kind);
        if let FetchRequest::Trending { ticket, kind } = ticket {
            self.apply(ticket, kind, result);
        }
    }

    fn reselect(&mut self) {
        self.featured = if self.pool.is_empty() {
            None
        } else {
            let eligible = self.pool.len().min(HERO_POOL_LIMIT);
            Some(self.random.pick(eligible).min(eligible - 1))
        };
    }

    /// The featured item, or the kind's sample
    pub fn featured(&self) -> &SearchableItem {
        self.featured
            .and_then(|i| self.pool.get(i))
            .unwrap_or(&self.fallback)
    }

    pub fn view(&self) -> HeroView {
        let item = self.featured();
        let title = if item.title.trim().is_empty() {
            "Featured".to_string()
        } else {
            item.title.clone()
        };

        HeroView {
            id: item.id,
            kind: self.kind,
            badge: match self.kind {
                ContentKind::Movie => "Featured Film",
                ContentKind::Series => "Featured Series",
            },
            title,
            blurb: truncate(item.overview.as_deref().unwrap_or(""), OVERVIEW_LIMIT),
            backdrop_url: item.backdrop_url(ImageSize::Original),
            poster_url: item.poster_url(ImageSize::W780),
            play_href: item.player_path(),
            info_href: item.detail_path(),
            fallback_reason: self.error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(n: u64) -> Vec<SearchableItem> {
        (1..=n)
            .map(|id| SearchableItem {
                id,
                kind: ContentKind::Movie,
                title: format!("Movie {}", id),
                overview: Some("x".repeat(300)),
                poster_path: Some(format!("/p{}.jpg", id)),
                backdrop_path: Some(format!("/b{}.jpg", id)),
                date_label: None,
            })
            .collect()
    }

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("", 0), "");
    }

    #[test]
    fn test_truncate_long_text() {
        let out = truncate("abcdefghij", 5);
        assert_eq!(out, "abcd…");
        assert_eq!(out.chars().count(), 5);
    }

    #[test]
    fn test_truncate_trims_before_ellipsis() {
        let out = truncate("one two   three", 8);
        assert_eq!(out, "one two…");
        assert!(!out.trim_end_matches('…').ends_with(' '));
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let out = truncate("ééééé", 3);
        assert_eq!(out, "éé…");
        assert_eq!(truncate("ééé", 3), "ééé");
    }

    #[test]
    fn test_truncate_property() {
        let texts = [
            "A thief who steals corporate secrets",
            "   leading spaces and trailing     ",
            "word word word word word word word word",
            "x",
        ];
        for text in texts {
            for n in 1..45 {
                let out = truncate(text, n);
                if text.chars().count() <= n {
                    assert_eq!(out, text);
                } else {
                    assert!(out.chars().count() <= n, "{:?} at {}", out, n);
                    assert!(out.ends_with('…'));
                    let head = out.trim_end_matches('…');
                    assert_eq!(head, head.trim_end());
                }
            }
        }
    }

    #[test]
    fn test_initial_featured_is_sample() {
        let hero = HeroSelector::new(ContentKind::Series, Box::new(FixedIndex(0)));
        assert_eq!(hero.featured().title, "Breaking Bad");
        assert!(hero.error().is_none());
    }

    #[test]
    fn test_pick_limited_to_first_twelve() {
        let mut hero = HeroSelector::new(ContentKind::Movie, Box::new(FixedIndex(50)));
        hero.set_pool(ContentKind::Movie, Ok(pool(30)));
        assert_eq!(hero.featured().id, 12);
    }

    #[test]
    fn test_seeded_pick_stays_in_range() {
        let mut hero = HeroSelector::new(ContentKind::Movie, Box::new(SeededRandom::new(7)));
        for _ in 0..20 {
            hero.set_pool(ContentKind::Movie, Ok(pool(20)));
            assert!(hero.featured().id >= 1 && hero.featured().id <= 12);
        }
    }

    #[test]
    fn test_failure_falls_back_to_sample_with_reason() {
        let mut hero = HeroSelector::new(ContentKind::Movie, Box::new(FixedIndex(0)));
        let req = hero.request(ContentKind::Movie);
        let FetchRequest::Trending { ticket, kind } = req else {
            panic!("expected trending request");
        };
        assert!(hero.is_loading());

        assert!(hero.apply(ticket, kind, Err("HTTP 503".into())));
        assert!(!hero.is_loading());
        assert_eq!(hero.featured().title, "Inception");
        assert_eq!(hero.error(), Some("HTTP 503"));
        assert_eq!(hero.view().fallback_reason.as_deref(), Some("HTTP 503"));
    }

    #[test]
    fn test_empty_pool_uses_sample_without_error() {
        let mut hero = HeroSelector::new(ContentKind::Series, Box::new(FixedIndex(0)));
        hero.set_pool(ContentKind::Series, Ok(vec![]));
        assert_eq!(hero.featured().id, 1396);
        assert!(hero.error().is_none());
    }

    #[test]
    fn test_stale_result_is_ignored() {
        let mut hero = HeroSelector::new(ContentKind::Movie, Box::new(FixedIndex(0)));
        let FetchRequest::Trending { ticket: old, .. } = hero.request(ContentKind::Movie) else {
            panic!("expected trending request");
        };
        let FetchRequest::Trending { ticket: new, .. } = hero.request(ContentKind::Series) else {
            panic!("expected trending request");
        };

        assert!(!hero.apply(old, ContentKind::Movie, Ok(pool(3))));
        assert_eq!(hero.featured().title, "Breaking Bad");
        assert!(hero.is_loading());

        assert!(hero.apply(new, ContentKind::Series, Ok(vec![])));
        assert!(!hero.is_loading());
    }

    #[test]
    fn test_pick_stable_across_views() {
        let mut hero = HeroSelector::new(ContentKind::Movie, Box::new(SeededRandom::new(99)));
        hero.set_pool(ContentKind::Movie, Ok(pool(12)));
        let first = hero.view();
        for _ in 0..10 {
            assert_eq!(hero.view(), first);
        }
    }

    #[test]
    fn test_view_fields() {
        let mut hero = HeroSelector::new(ContentKind::Series, Box::new(FixedIndex(0)));
        hero.set_pool(ContentKind::Series, Err("offline".into()));
        let view = hero.view();

        assert_eq!(view.badge, "Featured Series");
        assert_eq!(view.play_href, "/tv/1396/1/1/player");
        assert_eq!(view.info_href, "/tv/1396");
        assert_eq!(
            view.backdrop_url,
            "https://image.tmdb.org/t/p/original/tsRy63Mu5cu8etL1X7ZLyf7UP1M.jpg"
        );
        assert_eq!(
            view.poster_url,
            "https://image.tmdb.org/t/p/w780/ggFHVNu6YYI5L9pCfOacjizRGt.jpg"
        );
    }

    #[test]
    fn test_blank_title_reads_featured() {
        let mut items = pool(1);
        items[0].title = String::new();
        let mut hero = HeroSelector::new(ContentKind::Movie, Box::new(FixedIndex(0)));
        hero.set_pool(ContentKind::Movie, Ok(items));
        let view = hero.view();
        assert_eq!(view.title, "Featured");
        assert_eq!(view.blurb.chars().count(), OVERVIEW_LIMIT);
        assert!(view.blurb.ends_with('…'));
    }
}
