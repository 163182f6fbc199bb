//! Scroll-position preservation for infinite-scroll chat history.
//!
//! Older messages are prepended above the viewport. Without correction the
//! browser keeps `scroll_top` fixed, so the content the reader was looking at
//! jumps down by the height of the new page. The anchor captured before the
//! fetch restores the offset from the bottom of the content instead.
//!
//! ## Flow
//!
//! 1. `begin_load_older` when the reader nears the top: captures the anchor.
//! 2. `finish_load_older` with the fetched page.
//! 3. `restore_scroll` on the next layout pass: returns the corrected offset.

use tracing::{debug, warn};

use crate::config::ChatScrollConfig;
use crate::messages::{ChatMessage, Cursor, MessageList};

/// Viewport geometry of the scroll container, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_top: f64, scroll_height: f64, client_height: f64) -> Self {
        Self {
            scroll_top,
            scroll_height,
            client_height,
        }
    }

    /// Pixels between the bottom of the viewport and the end of the content.
    pub fn distance_from_bottom(&self) -> f64 {
        (self.scroll_height - self.scroll_top - self.client_height).max(0.0)
    }

    /// `scroll_top` that shows the end of the content.
    pub fn bottom_offset(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }
}

/// Scroll state captured before content is prepended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnchor {
    scroll_top: f64,
    scroll_height: f64,
}

impl ScrollAnchor {
    pub fn capture(metrics: &ScrollMetrics) -> Self {
        Self {
            scroll_top: metrics.scroll_top,
            scroll_height: metrics.scroll_height,
        }
    }

    /// `scroll_top` that keeps the anchored content in place once the
    /// content has grown to `new_scroll_height`.
    pub fn restore(&self, new_scroll_height: f64) -> f64 {
        (new_scroll_height - self.scroll_height + self.scroll_top).max(0.0)
    }
}

/// Request for the next page of older history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest {
    /// `None` when nothing is loaded yet: fetch the latest page.
    pub before: Option<Cursor>,
    pub limit: usize,
}

/// What the view should do after a live message arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDecision {
    /// The reader was at the bottom: scroll to the new end of the content.
    StickToBottom,
    /// The reader is reading history: leave the viewport alone.
    Stay,
    /// Already present; nothing changed.
    Ignored,
}

/// A room's message list with pagination and scroll anchoring.
#[derive(Debug, Clone)]
pub struct MessageFeed {
    config: ChatScrollConfig,
    list: MessageList,
    has_more: bool,
    loading: bool,
    pending_anchor: Option<ScrollAnchor>,
    unread: usize,
}

impl Default for MessageFeed {
    fn default() -> Self {
        Self::new(ChatScrollConfig::default())
    }
}

impl MessageFeed {
    pub fn new(config: ChatScrollConfig) -> Self {
        Self {
            config,
            list: MessageList::new(),
            has_more: true,
            loading: false,
            pending_anchor: None,
            unread: 0,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.list.messages()
    }

    pub fn list(&self) -> &MessageList {
        &self.list
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Live messages received while the reader was scrolled up.
    pub fn unread(&self) -> usize {
        self.unread
    }

    pub fn mark_read(&mut self) {
        self.unread = 0;
    }

    /// Start loading older history if the reader is near the top.
    ///
    /// Returns `None` when no load should start: not near the top, nothing
    /// more to load, or a load already in flight.
    pub fn begin_load_older(&mut self, metrics: &ScrollMetrics) -> Option<LoadRequest> {
        if self.loading || !self.has_more {
            return None;
        }
        if metrics.scroll_top > self.config.load_older_threshold_px {
            return None;
        }

        self.loading = true;
        self.pending_anchor = Some(ScrollAnchor::capture(metrics));

        let request = LoadRequest {
            before: self.list.oldest(),
            limit: self.config.page_size,
        };
        debug!(
            before_id = ?request.before.map(|c| c.before_id),
            limit = request.limit,
            "loading older messages"
        );
        Some(request)
    }

    /// Merge a fetched page. Returns how many messages were new.
    ///
    /// The anchor stays pending until [`MessageFeed::restore_scroll`]. A page
    /// with no load in flight (late after [`MessageFeed::fail_load_older`]) is
    /// dropped: there is no anchor to keep the viewport steady.
    pub fn finish_load_older(&mut self, page: Vec<ChatMessage>, has_more: bool) -> usize {
        if !self.loading {
            warn!(messages = page.len(), "dropping older page with no load in flight");
            return 0;
        }

        let added = self.list.prepend_older(page);
        self.loading = false;
        self.has_more = has_more;
        debug!(added, has_more, total = self.list.len(), "merged older messages");
        added
    }

    /// The load failed. Drops the anchor; the next scroll event may retry.
    pub fn fail_load_older(&mut self) {
        self.loading = false;
        self.pending_anchor = None;
    }

    /// Corrected `scroll_top` after a page was prepended, consumed once.
    pub fn restore_scroll(&mut self, metrics: &ScrollMetrics) -> Option<f64> {
        if self.loading {
            return None;
        }
        self.pending_anchor
            .take()
            .map(|anchor| anchor.restore(metrics.scroll_height))
    }

    /// Add a live message. `metrics` is the viewport before it renders.
    pub fn receive_live(&mut self, message: ChatMessage, metrics: &ScrollMetrics) -> ScrollDecision {
        if !self.list.push_live(message) {
            return ScrollDecision::Ignored;
        }

        if metrics.distance_from_bottom() <= self.config.stick_to_bottom_threshold_px {
            ScrollDecision::StickToBottom
        } else {
            self.unread += 1;
            ScrollDecision::Stay
        }
    }
}
