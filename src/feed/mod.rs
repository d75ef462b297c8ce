//! Paginated fetch controller.
//!
//! A [`FeedController`] is the state of one mounted feed: the pages loaded so
//! far, the flattened item list, the single in-flight fetch and the terminal
//! error, if any. It is created fresh per mount and only ever grows; pages are
//! appended in fetch order and never removed, reordered or re-fetched.

mod slot;

use std::sync::Arc;

use crate::source::{DataSource, Item, Page};

use slot::{Completed, FetchSlot};

/// Page numbering starts here.
pub const FIRST_PAGE: u32 = 1;

/// Items requested per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedConfig {
    /// Items requested per page; also the "full page" size that implies more.
    pub page_size: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Overall feed status, derived from the controller's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    /// Nothing loaded yet; the first page is pending.
    Pending,
    /// At least one page loaded and no fetch in flight.
    Loaded,
    /// At least one page loaded and the next one is in flight.
    FetchingMore,
    /// A fetch failed. Terminal for this mount.
    Errored,
}

/// A failed fetch, reduced to what the UI shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedError {
    pub page: u32,
    pub message: String,
}

/// Metadata of one loaded page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub number: u32,
    pub len: usize,
}

/// What [`FeedController::poll`] applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    PageLoaded {
        page: u32,
        count: usize,
        has_more: bool,
    },
    Failed(FeedError),
}

pub struct FeedController {
    source: Arc<dyn DataSource>,
    config: FeedConfig,
    pages: Vec<PageInfo>,
    /// Append-only concatenation of every loaded page's items.
    items: Vec<Item>,
    /// Page to request next; `None` once the stream has ended.
    next_page: Option<u32>,
    slot: FetchSlot,
    error: Option<FeedError>,
}

impl FeedController {
    pub fn new(source: Arc<dyn DataSource>, config: FeedConfig) -> Self {
        Self {
            source,
            config,
            pages: Vec::new(),
            items: Vec::new(),
            next_page: Some(FIRST_PAGE),
            slot: FetchSlot::new(),
            error: None,
        }
    }

    /// All items loaded so far, in fetch order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Loaded pages, in fetch order.
    pub fn pages(&self) -> &[PageInfo] {
        &self.pages
    }

    /// Whether another page may exist.
    pub fn has_next_page(&self) -> bool {
        self.next_page.is_some()
    }

    /// Whether a page fetch is in flight.
    pub fn is_fetching_next_page(&self) -> bool {
        self.slot.is_busy()
    }

    /// The page currently being fetched, if any.
    pub fn loading_page(&self) -> Option<u32> {
        self.slot.in_flight_page()
    }

    pub fn error(&self) -> Option<&FeedError> {
        self.error.as_ref()
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn status(&self) -> FeedStatus {
        if self.error.is_some() {
            FeedStatus::Errored
        } else if self.pages.is_empty() {
            FeedStatus::Pending
        } else if self.slot.is_busy() {
            FeedStatus::FetchingMore
        } else {
            FeedStatus::Loaded
        }
    }

    /// Start fetching the page after the last loaded one.
    ///
    /// No-op returning `false` when a fetch is already in flight, the stream
    /// has ended, or the feed has errored.
    pub fn request_next_page(&mut self) -> bool {
        if self.error.is_some() || self.slot.is_busy() {
            return false;
        }
        let Some(page) = self.next_page else {
            return false;
        };

        tracing::debug!(page, page_size = self.config.page_size, "requesting page");
        self.slot
            .start(Arc::clone(&self.source), page, self.config.page_size)
    }

    /// Apply the in-flight fetch if it has finished. Never blocks.
    pub fn poll(&mut self) -> Option<FeedEvent> {
        let done = self.slot.try_take()?;
        Some(self.apply(done))
    }

    /// Wait for the in-flight fetch, if any, and apply it.
    pub async fn settle(&mut self) -> Option<FeedEvent> {
        let done = self.slot.wait().await?;
        Some(self.apply(done))
    }

    fn apply(&mut self, done: Completed) -> FeedEvent {
        match done.result {
            Ok(items) => {
                let page = Page::from_batch(done.page, items, self.config.page_size);
                let count = page.items.len();
                tracing::info!(
                    page = page.number,
                    count,
                    has_more = page.next.is_some(),
                    "page loaded"
                );

                self.pages.push(PageInfo {
                    number: page.number,
                    len: count,
                });
                self.next_page = page.next;
                self.items.extend(page.items);

                FeedEvent::PageLoaded {
                    page: done.page,
                    count,
                    has_more: self.next_page.is_some(),
                }
            }
            Err(e) => {
                tracing::warn!(page = done.page, error = %e, "page fetch failed");
                let error = FeedError {
                    page: done.page,
                    message: e.to_string(),
                };
                self.error = Some(error.clone());
                FeedEvent::Failed(error)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
