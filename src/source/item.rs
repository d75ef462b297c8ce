//! The records shared between page sources and the feed.
//!
//! `Item` is a single post as the remote API returns it. `Page` wraps one
//! fetched batch together with the continuation decision for the batch that
//! follows it.

use serde::Deserialize;

/// A single post. Immutable once fetched.
///
/// Unknown JSON fields (such as `userId`) are ignored when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Item {
    /// Identifier assigned by the remote service.
    pub id: u64,
    /// One-line headline.
    pub title: String,
    /// Longer body text; may contain newlines.
    pub body: String,
}

/// One fetched batch of items plus stream-continuation information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number this batch was requested as.
    pub number: u32,
    /// Items in the order the source returned them.
    pub items: Vec<Item>,
    /// The page to request next, or `None` at end-of-stream.
    pub next: Option<u32>,
}

impl Page {
    /// Wrap a fetched batch, deciding whether another page may follow.
    ///
    /// Only an exactly full batch (`items.len() == page_size`) implies a next
    /// page. A short or empty batch ends the stream. The source gives no
    /// authoritative cursor, so a final page that happens to be full costs one
    /// extra, empty fetch.
    pub fn from_batch(number: u32, items: Vec<Item>, page_size: usize) -> Self {
        let next = (items.len() == page_size).then(|| number + 1);
        Self {
            number,
            items,
            next,
        }
    }
}
