//! Single-slot in-flight fetch.
//!
//! A [`FetchSlot`] holds at most one pending page fetch. The fetch itself runs
//! on tokio's blocking pool and reports back over a oneshot channel; the slot
//! keeps the receiving end until the result is taken on the UI thread.
//!
//! There is no cancellation. Dropping the slot drops the receiver, so a
//! worker that finishes afterwards finds nobody listening and its result is
//! discarded.

use std::sync::Arc;

use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::source::{DataSource, FetchError, Item};

/// A finished fetch, ready to be applied to feed state.
#[derive(Debug)]
pub struct Completed {
    pub page: u32,
    pub result: Result<Vec<Item>, FetchError>,
}

struct Pending {
    page: u32,
    rx: oneshot::Receiver<Result<Vec<Item>, FetchError>>,
}

#[derive(Default)]
pub struct FetchSlot {
    pending: Option<Pending>,
}

impl FetchSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a fetch is in flight.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// The page currently being fetched, if any.
    pub fn in_flight_page(&self) -> Option<u32> {
        self.pending.as_ref().map(|p| p.page)
    }

    /// Start fetching `page` unless a fetch is already in flight.
    ///
    /// Returns `false` (and starts nothing) when the slot is occupied.
    /// Must be called from within a tokio runtime context.
    pub fn start(&mut self, source: Arc<dyn DataSource>, page: u32, limit: usize) -> bool {
        if self.is_busy() {
            return false;
        }

        let (tx, rx) = oneshot::channel();
        tokio::task::spawn_blocking(move || {
            let result = source.fetch_page(page, limit);
            // The receiver is gone once the feed has been unmounted.
            if tx.send(result).is_err() {
                tracing::debug!(page, "discarding page fetched for an unmounted feed");
            }
        });

        self.pending = Some(Pending { page, rx });
        true
    }

    /// Take the finished fetch without blocking, freeing the slot.
    ///
    /// Returns `None` while the fetch is still running or when the slot is
    /// empty.
    pub fn try_take(&mut self) -> Option<Completed> {
        let pending = self.pending.as_mut()?;
        let result = match pending.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Closed) => Err(FetchError::Abandoned),
        };
        let page = pending.page;
        self.pending = None;
        Some(Completed { page, result })
    }

    /// Wait for the in-flight fetch to finish and take it.
    pub async fn wait(&mut self) -> Option<Completed> {
        let pending = self.pending.take()?;
        let result = pending.rx.await.unwrap_or(Err(FetchError::Abandoned));
        Some(Completed {
            page: pending.page,
            result,
        })
    }
}
