//! popstream - neon TUI for discovering movies and TV shows
//!
//! A hero banner featuring today's trending titles, a debounced quick-search
//! overlay, and route-aware navigation chrome, all backed by TMDB.
//!
//! # Modules
//!
//! - `models` - Content kinds, searchable items, image URLs
//! - `api` - TMDB client and the offline sample catalog
//! - `debounce` - Raw to committed query debouncing
//! - `fetch` - Fetch requests, completions, request generations
//! - `hero` - Featured item selection
//! - `overlay` - Search overlay state machine
//! - `routes` - Locations, route classification, navigation chrome
//! - `app` - Application state and key handling
//! - `ui` - TUI components
//! - `cli` / `commands` / `config` - Scriptable surface and settings

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod debounce;
pub mod fetch;
pub mod hero;
pub mod models;
pub mod overlay;
pub mod routes;
pub mod ui;

// Re-export commonly used types
pub use models::{ContentKind, ImageSize, SearchKind, SearchableItem};

pub use api::{Credential, TmdbClient, TmdbError};
pub use app::App;
pub use config::Config;
pub use fetch::{FetchOutcome, FetchRequest, FetchResponse};
