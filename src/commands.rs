//! CLI Command Handlers
//!
//! Each handler takes CLI args, a TMDB client and Output, returns ExitCode.

use serde::Serialize;
use tracing::info;

use crate::api::TmdbClient;
use crate::cli::{ExitCode, FeaturedCmd, Output, RouteCmd, SearchCmd, TrendingCmd};
use crate::config::Config;
use crate::hero::{HeroSelector, RandomSource, SeededRandom, ThreadRandom};
use crate::models::{ContentKind, SearchKind, SearchableItem};
use crate::routes::{Chrome, Location, Viewport};

/// Build the TMDB client described by `config`
pub fn client_from(config: &Config) -> TmdbClient {
    TmdbClient::new(config.credential())
        .with_language(&config.language)
        .with_include_adult(config.include_adult)
}

fn print_items(items: &[SearchableItem], output: &Output) -> ExitCode {
    if output.json {
        if let Err(e) = output.print(items) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    } else {
        for item in items {
            output.line(format!("{:>8}  {}", item.id, item));
        }
    }
    ExitCode::Success
}

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, client: &TmdbClient, output: &Output) -> ExitCode {
    if cmd.query.trim().is_empty() {
        return output.error("Search query must not be empty", ExitCode::InvalidArgs);
    }
    if !client.has_credential() {
        output.info("No TMDB credential configured; searching sample data");
    }
    output.info(format!("Searching for: {}", cmd.query));

    let kind = SearchKind::from(cmd.kind);
    match client.search(&cmd.query, kind).await {
        Ok(mut results) => {
            results.truncate(cmd.limit);
            info!(query = %cmd.query, count = results.len(), "search finished");
            if results.is_empty() {
                return output.error("No results.", ExitCode::NoResults);
            }
            print_items(&results, output)
        }
        Err(e) => output.error(format!("Search failed: {}", e), ExitCode::NetworkError),
    }
}

// =============================================================================
// Trending Command
// =============================================================================

pub async fn trending_cmd(cmd: TrendingCmd, client: &TmdbClient, output: &Output) -> ExitCode {
    let kind = ContentKind::from(cmd.kind);
    output.info(format!("Fetching trending ({})...", kind));

    match client.trending(kind).await {
        Ok(mut results) => {
            results.truncate(cmd.limit);
            if results.is_empty() {
                return output.error("No results.", ExitCode::NoResults);
            }
            print_items(&results, output)
        }
        Err(e) => output.error(
            format!("Trending fetch failed: {}", e),
            ExitCode::NetworkError,
        ),
    }
}

// =============================================================================
// Featured Command
// =============================================================================

pub async fn featured_cmd(cmd: FeaturedCmd, client: &TmdbClient, output: &Output) -> ExitCode {
    let kind = ContentKind::from(cmd.kind);
    let random: Box<dyn RandomSource> = match cmd.seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    };

    let mut hero = HeroSelector::new(kind, random);
    let result = client.trending(kind).await.map_err(|e| e.to_string());
    hero.set_pool(kind, result);
    let view = hero.view();

    if let Some(reason) = &view.fallback_reason {
        output.info(format!("Using fallback data (reason: {})", reason));
    }

    if output.json {
        if let Err(e) = output.print(&view) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    } else {
        output.line(format!("{}  {}", view.badge, view.title));
        if !view.blurb.is_empty() {
            output.line(&view.blurb);
        }
        output.line(format!("play: {}", view.play_href));
        output.line(format!("info: {}", view.info_href));
        if !view.backdrop_url.is_empty() {
            output.line(format!("backdrop: {}", view.backdrop_url));
        }
    }
    ExitCode::Success
}

// =============================================================================
// Route Command
// =============================================================================

/// Route classification printed by `route`
#[derive(Debug, Serialize)]
pub struct RouteReport {
    pub location: String,
    pub viewport: Viewport,
    pub chrome: Chrome,
    /// Rows kept clear at the bottom of the screen
    pub bottom_reserve: u16,
}

pub fn route_report(path: &str, width: u16, safe_area: u16) -> RouteReport {
    let location = Location::parse(path);
    let viewport = Viewport::from_width(width);
    let chrome = Chrome::for_location(&location, viewport);
    RouteReport {
        location: location.to_string(),
        viewport,
        bottom_reserve: chrome.bottom_reserve(safe_area),
        chrome,
    }
}

pub fn route_cmd(cmd: RouteCmd, config: &Config, output: &Output) -> ExitCode {
    if cmd.path.trim().is_empty() {
        return output.error("Path must not be empty", ExitCode::InvalidArgs);
    }
    let report = route_report(&cmd.path, cmd.width, config.safe_area_bottom);

    if output.json {
        if let Err(e) = output.print(&report) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    } else {
        output.line(format!("{} → {:?} ({:?})", report.location, report.chrome.route, report.viewport));
        output.line(format!("top bar:    {:?}", report.chrome.top_bar));
        output.line(format!("nav links:  {}", report.chrome.nav_links));
        output.line(format!("bottom bar: {}", report.chrome.bottom_bar));
        output.line(format!("footer:     {}", report.chrome.footer));
    }
    ExitCode::Success
}
