use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

use crate::feed::{FeedConfig, FeedController, FeedEvent};
use crate::source::DataSource;
use crate::window::WindowConfig;

/// Seconds a notice stays in the status bar.
pub const NOTICE_TTL_SECS: i64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A transient status-bar notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
    pub raised_at: DateTime<Utc>,
}

impl Notice {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.raised_at >= TimeDelta::seconds(NOTICE_TTL_SECS)
    }
}

pub struct App {
    /// State of the mounted feed. Replaced wholesale on reload.
    pub feed: FeedController,
    source: Arc<dyn DataSource>,
    feed_config: FeedConfig,
    /// Row geometry; `viewport_height` tracks the list area.
    pub window: WindowConfig,
    /// Top of the viewport, in lines from the top of the list.
    pub scroll_offset: u64,
    /// Whether the user has requested to quit.
    pub quit: bool,
    /// Last feed status message.
    pub status: String,
    pub notice: Option<Notice>,
    /// Rows built during the last frame.
    pub rendered_rows: usize,
    /// Frame counter driving the spinner.
    pub ticks: u64,
}

impl App {
    /// Create the app and mount the feed, requesting its first page.
    pub fn new(
        source: Arc<dyn DataSource>,
        feed_config: FeedConfig,
        window: WindowConfig,
    ) -> Self {
        let mut app = Self {
            feed: FeedController::new(Arc::clone(&source), feed_config),
            source,
            feed_config,
            window,
            scroll_offset: 0,
            quit: false,
            status: "Starting…".into(),
            notice: None,
            rendered_rows: 0,
            ticks: 0,
        };
        app.mount();
        app
    }

    /// Discard the feed state and start over from the first page.
    ///
    /// A fetch still in flight for the old feed finishes in the background
    /// and is ignored.
    pub fn reload(&mut self) {
        self.feed = FeedController::new(Arc::clone(&self.source), self.feed_config);
        self.scroll_offset = 0;
        self.notice = None;
        self.mount();
    }

    fn mount(&mut self) {
        tracing::info!(source = self.feed.source_name(), "mounting feed");
        self.feed.request_next_page();
        self.status = "Loading posts…".into();
    }

    /// Per-frame housekeeping: apply a finished fetch and expire notices.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        self.ticks = self.ticks.wrapping_add(1);

        if let Some(event) = self.feed.poll() {
            self.on_feed_event(event, now);
        }

        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
    }

    pub fn on_feed_event(&mut self, event: FeedEvent, now: DateTime<Utc>) {
        match event {
            FeedEvent::PageLoaded {
                page,
                count,
                has_more,
            } => {
                self.status = if has_more {
                    format!("Loaded page {page} ({count} posts)")
                } else {
                    format!("Loaded page {page} ({count} posts), end of feed")
                };
                if !has_more && !self.feed.items().is_empty() {
                    self.notify(NoticeLevel::Info, "Reached the end of the feed", now);
                }
                self.clamp_scroll();
            }
            FeedEvent::Failed(error) => {
                self.status = format!("Error on page {}: {}", error.page, error.message);
                self.notify(NoticeLevel::Error, "Failed to load posts", now);
            }
        }
    }

    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>, now: DateTime<Utc>) {
        self.notice = Some(Notice {
            message: message.into(),
            level,
            raised_at: now,
        });
    }

    // -- geometry ------------------------------------------------------------

    /// Record the list area's height, keeping the offset in range.
    pub fn set_viewport_height(&mut self, height: u32) {
        if self.window.viewport_height != height {
            self.window.viewport_height = height;
            self.clamp_scroll();
        }
    }

    fn item_count(&self) -> usize {
        self.feed.items().len()
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.window.clamp_offset(self.scroll_offset, self.item_count());
    }

    // -- scrolling -----------------------------------------------------------

    /// Move the viewport by `delta` lines and handle the scroll event.
    pub fn scroll_by(&mut self, delta: i64) {
        let target = if delta.is_negative() {
            self.scroll_offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll_offset.saturating_add(delta.unsigned_abs())
        };
        self.scroll_to(target);
    }

    /// Jump to `offset` (clamped) and handle the scroll event.
    pub fn scroll_to(&mut self, offset: u64) {
        self.scroll_offset = self.window.clamp_offset(offset, self.item_count());
        self.on_scroll();
    }

    pub fn scroll_rows(&mut self, rows: i64) {
        self.scroll_by(rows * i64::from(self.window.stride()));
    }

    pub fn scroll_pages(&mut self, pages: i64) {
        self.scroll_by(pages * i64::from(self.window.viewport_height.max(1)));
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_to(0);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_to(u64::MAX);
    }

    /// Request the next page when the viewport nears the end of the list.
    ///
    /// Runs for every scroll event, including ones clamped to the current
    /// offset, so a list shorter than the viewport can still load more.
    fn on_scroll(&mut self) {
        if self.window.near_end(self.scroll_offset, self.item_count())
            && self.feed.has_next_page()
            && !self.feed.is_fetching_next_page()
        {
            tracing::debug!(offset = self.scroll_offset, "near end of list, loading more");
            self.feed.request_next_page();
        }
    }
}
