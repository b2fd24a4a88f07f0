//! Static sample catalog
//!
//! Served in place of TMDB when no credential is configured, and used by the
//! hero banner whenever the trending pool is empty or failed to load.

use crate::models::{ContentKind, SearchKind, SearchableItem};

/// Featured fallback for a content kind
pub fn sample_item(kind: ContentKind) -> SearchableItem {
    match kind {
        ContentKind::Movie => SearchableItem {
            id: 27205,
            kind: ContentKind::Movie,
            title: "Inception".to_string(),
            overview: Some(
                "A thief who steals corporate secrets through dream-sharing technology is given a chance at redemption."
                    .to_string(),
            ),
            poster_path: Some("/qmDpIHrmpJINaRKAfWQfftjCdyi.jpg".to_string()),
            backdrop_path: Some("/s3TBrRGB1iav7gFOCNx3H31MoES.jpg".to_string()),
            date_label: Some("2010-07-15".to_string()),
        },
        ContentKind::Series => SearchableItem {
            id: 1396,
            kind: ContentKind::Series,
            title: "Breaking Bad".to_string(),
            overview: Some(
                "A chemistry teacher diagnosed with cancer starts producing methamphetamine with a former student."
                    .to_string(),
            ),
            poster_path: Some("/ggFHVNu6YYI5L9pCfOacjizRGt.jpg".to_string()),
            backdrop_path: Some("/tsRy63Mu5cu8etL1X7ZLyf7UP1M.jpg".to_string()),
            date_label: Some("2008-01-20".to_string()),
        },
    }
}

/// Offline search over the sample catalog (case-insensitive title match)
pub fn search_samples(term: &str, kind: SearchKind) -> Vec<SearchableItem> {
    let needle = term.to_lowercase();
    [ContentKind::Movie, ContentKind::Series]
        .into_iter()
        .filter(|k| kind.accepts(*k))
        .map(sample_item)
        .filter(|item| item.title.to_lowercase().contains(&needle))
        .collect()
}
