//! In-memory page sources for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{DataSource, FetchError, Item};

pub fn make_item(id: u64) -> Item {
    Item {
        id,
        title: format!("Post {id}"),
        body: format!("Body of post {id}"),
    }
}

/// `count` items with consecutive ids starting at `first_id`.
pub fn make_items(first_id: u64, count: usize) -> Vec<Item> {
    (first_id..first_id + count as u64).map(make_item).collect()
}

/// Replays a fixed script of responses, one per fetch, and records every
/// request it receives. Fetches past the end of the script return an empty
/// page.
pub struct ScriptedSource {
    script: Mutex<VecDeque<Result<Vec<Item>, FetchError>>>,
    requests: Mutex<Vec<(u32, usize)>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(script: Vec<Result<Vec<Item>, FetchError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// A source serving `total` items in pages of `page_size`.
    pub fn with_total(total: usize, page_size: usize) -> Self {
        let mut script = Vec::new();
        let mut next_id = 1;
        let mut remaining = total;
        while remaining > 0 {
            let n = remaining.min(page_size);
            script.push(Ok(make_items(next_id, n)));
            next_id += n as u64;
            remaining -= n;
        }
        Self::new(script)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `(page, limit)` pairs in the order they were requested.
    pub fn requests(&self) -> Vec<(u32, usize)> {
        self.requests.lock().unwrap().clone()
    }
}

impl DataSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    fn fetch_page(&self, page: u32, limit: usize) -> Result<Vec<Item>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push((page, limit));
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
