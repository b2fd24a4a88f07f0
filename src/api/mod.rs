//! API clients for external services
//!
//! - TMDB: movie/TV search and trending pools
//! - Samples: offline catalog used when TMDB is unavailable

pub mod samples;
pub mod tmdb;

pub use tmdb::{Credential, TmdbClient, TmdbError, SEARCH_RESULT_LIMIT};
