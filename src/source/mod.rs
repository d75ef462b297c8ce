//! Page source abstraction layer.
//!
//! This module defines the [`DataSource`] trait, the [`Item`] / [`Page`]
//! records and the [`FetchError`] taxonomy. Concrete sources live in
//! sub-modules (currently only [`http`]).
//!
//! ## For contributors — adding a new source
//!
//! 1. Create a new file in this directory (e.g. `fixture.rs`).
//! 2. Define a struct and implement [`DataSource`] for it.
//! 3. Add `mod fixture;` below and re-export your struct in the `pub use` block.
//! 4. Construct an instance in `main.rs` instead of the HTTP source.
//!
//! The feed controller, windowing and UI are all source-agnostic.

mod http;
mod item;

#[cfg(test)]
pub(crate) mod testing;

pub use http::HttpSource;
pub use item::{Item, Page};

use thiserror::Error;

/// Everything that can go wrong while fetching one page.
///
/// The feed collapses all variants into a single "fetch failed" condition;
/// the variants exist so the display message says what actually happened.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS or body-read failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("server responded with {0}")]
    Status(reqwest::StatusCode),

    /// The body was not a JSON array of items.
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The fetch worker went away without reporting a result.
    #[error("fetch task ended without a result")]
    Abandoned,
}

/// Trait that every page source must implement.
///
/// [`fetch_page`](DataSource::fetch_page) is called on tokio's blocking pool,
/// so implementations may block on I/O and must be [`Send`] + [`Sync`].
pub trait DataSource: Send + Sync {
    /// Human-readable label used in logs and the UI title.
    fn name(&self) -> &str;

    /// Fetch page `page` (1-based) holding at most `limit` items.
    ///
    /// Implementations return the raw batch; the continuation decision is
    /// made by [`Page::from_batch`].
    fn fetch_page(&self, page: u32, limit: usize) -> Result<Vec<Item>, FetchError>;
}
