//! Data structures and types for popstream
//!
//! Shared models used across the application:
//! - **Content**: movie/series discriminators and search scopes
//! - **Items**: the normalized TMDB entry shown by the hero and the search overlay
//! - **Images**: TMDB image host URL templating

use serde::{Deserialize, Serialize};
use std::fmt;

/// Base URL of the TMDB image host
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

// =============================================================================
// Content Kinds
// =============================================================================

/// Movie or series discriminator.
///
/// Serialized (and persisted in the `content` query parameter) as `movie` / `tv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContentKind {
    #[default]
    #[serde(rename = "movie")]
    Movie,
    #[serde(rename = "tv")]
    Series,
}

impl ContentKind {
    /// URL/API form of the kind
    pub fn as_param(&self) -> &'static str {
        match self {
            ContentKind::Movie => "movie",
            ContentKind::Series => "tv",
        }
    }

    /// Parse the URL/API form, rejecting anything else
    pub fn from_param(s: &str) -> Option<Self> {
        match s {
            "movie" => Some(ContentKind::Movie),
            "tv" => Some(ContentKind::Series),
            _ => None,
        }
    }

    /// The other kind
    pub fn toggle(self) -> Self {
        match self {
            ContentKind::Movie => ContentKind::Series,
            ContentKind::Series => ContentKind::Movie,
        }
    }

    /// Short uppercase badge shown next to titles
    pub fn badge(&self) -> &'static str {
        match self {
            ContentKind::Movie => "MOVIE",
            ContentKind::Series => "TV",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Movie => write!(f, "Movie"),
            ContentKind::Series => write!(f, "TV Show"),
        }
    }
}

/// Which TMDB search endpoint to hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Movie,
    #[serde(rename = "tv")]
    Series,
    #[default]
    Multi,
}

impl SearchKind {
    /// Path segment under `/search/`
    pub fn endpoint(&self) -> &'static str {
        match self {
            SearchKind::Movie => "movie",
            SearchKind::Series => "tv",
            SearchKind::Multi => "multi",
        }
    }

    /// Kind implied by a single-kind endpoint (its results carry no `media_type`)
    pub fn fixed_kind(&self) -> Option<ContentKind> {
        match self {
            SearchKind::Movie => Some(ContentKind::Movie),
            SearchKind::Series => Some(ContentKind::Series),
            SearchKind::Multi => None,
        }
    }

    /// Whether an item of `kind` belongs in this search scope
    pub fn accepts(&self, kind: ContentKind) -> bool {
        self.fixed_kind().map_or(true, |k| k == kind)
    }
}

impl From<ContentKind> for SearchKind {
    fn from(kind: ContentKind) -> Self {
        match kind {
            ContentKind::Movie => SearchKind::Movie,
            ContentKind::Series => SearchKind::Series,
        }
    }
}

// =============================================================================
// Images
// =============================================================================

/// TMDB image size tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    W154,
    W342,
    W500,
    W780,
    Original,
}

impl ImageSize {
    pub fn token(&self) -> &'static str {
        match self {
            ImageSize::W154 => "w154",
            ImageSize::W342 => "w342",
            ImageSize::W500 => "w500",
            ImageSize::W780 => "w780",
            ImageSize::Original => "original",
        }
    }
}

/// Build an image URL, or an empty string when there is no path
pub fn image_url(path: Option<&str>, size: ImageSize) -> String {
    match path {
        Some(p) if !p.is_empty() => format!("{}/{}{}", IMAGE_BASE_URL, size.token(), p),
        _ => String::new(),
    }
}

// =============================================================================
// Searchable Item
// =============================================================================

/// A movie or series as shown by the hero banner and search results.
///
/// Normalized from TMDB's heterogeneous shapes (`title`/`release_date` for
/// movies, `name`/`first_air_date` for series). Empty strings become `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchableItem {
    pub id: u64,
    pub kind: ContentKind,
    pub title: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub date_label: Option<String>,
}

impl SearchableItem {
    /// Detail route for this item
    pub fn detail_path(&self) -> String {
        format!("/{}/{}", self.kind.as_param(), self.id)
    }

    /// Player route; series start at season 1 episode 1
    pub fn player_path(&self) -> String {
        match self.kind {
            ContentKind::Movie => format!("/movie/{}/player", self.id),
            ContentKind::Series => format!("/tv/{}/1/1/player", self.id),
        }
    }

    pub fn poster_url(&self, size: ImageSize) -> String {
        image_url(self.poster_path.as_deref(), size)
    }

    pub fn backdrop_url(&self, size: ImageSize) -> String {
        image_url(self.backdrop_path.as_deref(), size)
    }

    /// Poster, falling back to backdrop, falling back to empty
    pub fn thumbnail_url(&self) -> String {
        let poster = self.poster_url(ImageSize::W342);
        if poster.is_empty() {
            self.backdrop_url(ImageSize::W342)
        } else {
            poster
        }
    }

    /// Date label or an em-dash placeholder
    pub fn date_or_placeholder(&self) -> &str {
        self.date_label.as_deref().unwrap_or("—")
    }
}

impl fmt::Display for SearchableItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) [{}]",
            self.title,
            self.date_or_placeholder(),
            self.kind
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(kind: ContentKind) -> SearchableItem {
        SearchableItem {
            id: 42,
            kind,
            title: "Test".into(),
            overview: None,
            poster_path: None,
            backdrop_path: Some("/back.jpg".into()),
            date_label: None,
        }
    }

    #[test]
    fn test_content_kind_params() {
        assert_eq!(ContentKind::Movie.as_param(), "movie");
        assert_eq!(ContentKind::Series.as_param(), "tv");
        assert_eq!(ContentKind::from_param("tv"), Some(ContentKind::Series));
        assert_eq!(ContentKind::from_param("series"), None);
        assert_eq!(ContentKind::Movie.toggle(), ContentKind::Series);
    }

    #[test]
    fn test_content_kind_serde() {
        let json = serde_json::to_string(&ContentKind::Series).unwrap();
        assert_eq!(json, "\"tv\"");
        let kind: ContentKind = serde_json::from_str("\"movie\"").unwrap();
        assert_eq!(kind, ContentKind::Movie);
    }

    #[test]
    fn test_search_kind_scope() {
        assert!(SearchKind::Multi.accepts(ContentKind::Series));
        assert!(SearchKind::Movie.accepts(ContentKind::Movie));
        assert!(!SearchKind::Movie.accepts(ContentKind::Series));
        assert_eq!(SearchKind::Series.endpoint(), "tv");
    }

    #[test]
    fn test_image_url() {
        assert_eq!(
            image_url(Some("/abc.jpg"), ImageSize::W342),
            "https://image.tmdb.org/t/p/w342/abc.jpg"
        );
        assert_eq!(
            image_url(Some("/abc.jpg"), ImageSize::Original),
            "https://image.tmdb.org/t/p/original/abc.jpg"
        );
        assert_eq!(image_url(None, ImageSize::W780), "");
        assert_eq!(image_url(Some(""), ImageSize::W780), "");
    }

    #[test]
    fn test_item_paths() {
        assert_eq!(item(ContentKind::Movie).detail_path(), "/movie/42");
        assert_eq!(item(ContentKind::Movie).player_path(), "/movie/42/player");
        assert_eq!(item(ContentKind::Series).detail_path(), "/tv/42");
        assert_eq!(item(ContentKind::Series).player_path(), "/tv/42/1/1/player");
    }

    #[test]
    fn test_thumbnail_falls_back_to_backdrop() {
        let mut it = item(ContentKind::Movie);
        assert_eq!(it.thumbnail_url(), "https://image.tmdb.org/t/p/w342/back.jpg");

        it.poster_path = Some("/poster.jpg".into());
        assert_eq!(it.thumbnail_url(), "https://image.tmdb.org/t/p/w342/poster.jpg");

        it.poster_path = None;
        it.backdrop_path = None;
        assert_eq!(it.thumbnail_url(), "");
    }

    #[test]
    fn test_date_placeholder() {
        let mut it = item(ContentKind::Movie);
        assert_eq!(it.date_or_placeholder(), "—");
        it.date_label = Some("2010-07-15".into());
        assert_eq!(it.date_or_placeholder(), "2010-07-15");
    }
}
