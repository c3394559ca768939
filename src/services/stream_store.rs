use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::errors::FetchError;
use crate::models::{ChatRecord, MetricPoint, MetricsData, PriceBook, Symbol, TradeRecord};
use crate::services::comparator::{deep_equal_serialized, numbers_equal};
use crate::services::digit_diff::format_price;
use crate::services::price_history::PriceHistory;

/// The four independently polled sources of dashboard data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Metrics,
    Pricing,
    Chats,
    Trades,
}

impl Stream {
    pub fn name(&self) -> &'static str {
        match self {
            Stream::Metrics => "metrics",
            Stream::Pricing => "pricing",
            Stream::Chats => "chats",
            Stream::Trades => "trades",
        }
    }
}

/// Per-stream bookkeeping alongside the snapshot. `loading` starts true
/// and is cleared when the first attempt resolves, either way; a failure
/// never clears previously accepted data.
#[derive(Debug, Clone)]
pub struct StreamStatus {
    pub loading: bool,
    pub last_error: Option<String>,
    pub last_update: Option<DateTime<Utc>>,
}

impl Default for StreamStatus {
    fn default() -> Self {
        Self {
            loading: true,
            last_error: None,
            last_update: None,
        }
    }
}

/// At most this many chats are exposed for display; the fetched list is
/// kept whole.
pub const CHAT_DISPLAY_LIMIT: usize = 10;

/// The currently accepted metrics view.
#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    pub points: Vec<MetricPoint>,
    pub total_count: i64,
}

#[derive(Default)]
struct Snapshots {
    metrics: Vec<MetricPoint>,
    total_count: i64,
    pricing: Option<PriceBook>,
    chats: Vec<ChatRecord>,
    trades: Vec<TradeRecord>,
    metrics_status: StreamStatus,
    pricing_status: StreamStatus,
    chats_status: StreamStatus,
    trades_status: StreamStatus,
}

impl Snapshots {
    fn status_mut(&mut self, stream: Stream) -> &mut StreamStatus {
        match stream {
            Stream::Metrics => &mut self.metrics_status,
            Stream::Pricing => &mut self.pricing_status,
            Stream::Chats => &mut self.chats_status,
            Stream::Trades => &mut self.trades_status,
        }
    }

    fn status(&self, stream: Stream) -> &StreamStatus {
        match stream {
            Stream::Metrics => &self.metrics_status,
            Stream::Pricing => &self.pricing_status,
            Stream::Chats => &self.chats_status,
            Stream::Trades => &self.trades_status,
        }
    }
}

/// Owns every stream's accepted snapshot and the pricing history buffers.
///
/// All mutation funnels through the `begin_fetch`/`apply_*` cycle; each
/// stream's apply runs to completion under the write lock, so mutations
/// from different streams never interleave mid-apply. Rendering reads
/// through the accessors. After [`shutdown`](Self::shutdown), late results
/// from fetches still in flight are discarded.
pub struct StreamStore {
    inner: RwLock<Snapshots>,
    history: PriceHistory,
    active: AtomicBool,
}

impl Default for StreamStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Snapshots::default()),
            history: PriceHistory::new(),
            active: AtomicBool::new(true),
        }
    }

    /// Marks the start of a poll attempt: the previous error is cleared and
    /// the stream reads as loading until the attempt resolves.
    pub fn begin_fetch(&self, stream: Stream) {
        if !self.is_active() {
            return;
        }
        let mut inner = self.inner.write();
        let status = inner.status_mut(stream);
        status.loading = true;
        status.last_error = None;
    }

    fn fail(&self, stream: Stream, err: &FetchError) {
        warn!("❌ {} fetch failed: {}", stream.name(), err);
        let mut inner = self.inner.write();
        let status = inner.status_mut(stream);
        status.last_error = Some(err.to_string());
        status.loading = false;
    }

    fn soft_no_op(&self, stream: Stream) {
        debug!("{}: backend reported no update", stream.name());
        self.inner.write().status_mut(stream).loading = false;
    }

    fn dropped_after_shutdown(&self, stream: Stream) -> bool {
        if self.is_active() {
            return false;
        }
        debug!("{}: store shut down, result dropped", stream.name());
        true
    }

    /// Metrics apply-cycle: the snapshot is committed only when the point
    /// sequence or total count actually differ, but `last_update` always
    /// advances on success; liveness is worth signaling even when the
    /// account curve is flat. Returns whether the attempt succeeded.
    pub fn apply_metrics(&self, result: Result<Option<MetricsData>, FetchError>) -> bool {
        if self.dropped_after_shutdown(Stream::Metrics) {
            return false;
        }
        match result {
            Err(err) => {
                self.fail(Stream::Metrics, &err);
                false
            }
            Ok(None) => {
                self.soft_no_op(Stream::Metrics);
                true
            }
            Ok(Some(data)) => {
                let mut inner = self.inner.write();
                let changed = data.total_count != inner.total_count
                    || !deep_equal_serialized(&data.metrics, &inner.metrics);
                if changed {
                    info!(
                        "📈 metrics committed: {} points, {} total",
                        data.metrics.len(),
                        data.total_count
                    );
                    inner.metrics = data.metrics;
                    inner.total_count = data.total_count;
                }
                inner.metrics_status.last_update = Some(Utc::now());
                inner.metrics_status.loading = false;
                true
            }
        }
    }

    /// Pricing apply-cycle. If any symbol moved past the comparator
    /// tolerance, every symbol is offered to the history buffers, and the
    /// full book (including unmoved symbols) is committed only when at
    /// least one buffer recorded. A book with no real movement commits
    /// nothing and leaves `last_update` alone, so a flat market cannot
    /// churn the animation engine.
    pub fn apply_pricing(&self, result: Result<Option<PriceBook>, FetchError>) -> bool {
        if self.dropped_after_shutdown(Stream::Pricing) {
            return false;
        }
        match result {
            Err(err) => {
                self.fail(Stream::Pricing, &err);
                false
            }
            Ok(None) => {
                self.soft_no_op(Stream::Pricing);
                true
            }
            Ok(Some(book)) => {
                let mut inner = self.inner.write();
                let any_changed = Symbol::ALL.iter().any(|&symbol| {
                    let previous = inner
                        .pricing
                        .as_ref()
                        .map(|b| b.price_of(symbol))
                        .unwrap_or(0.0);
                    !numbers_equal(book.price_of(symbol), previous)
                });

                if any_changed {
                    let mut recorded = false;
                    for &symbol in Symbol::ALL.iter() {
                        let price = book.price_of(symbol);
                        if self.history.record_if_changed(symbol, price) {
                            let previous = self.history.previous_of(symbol, price);
                            info!(
                                "💱 {} {} -> {}",
                                symbol.code(),
                                format_price(symbol, previous),
                                format_price(symbol, price)
                            );
                            recorded = true;
                        }
                    }
                    if recorded {
                        inner.pricing = Some(book);
                        inner.pricing_status.last_update = Some(Utc::now());
                    }
                }
                inner.pricing_status.loading = false;
                true
            }
        }
    }

    /// Chat apply-cycle: the list is replaced wholesale, not diffed
    /// field-by-field.
    pub fn apply_chats(&self, result: Result<Option<Vec<ChatRecord>>, FetchError>) -> bool {
        if self.dropped_after_shutdown(Stream::Chats) {
            return false;
        }
        match result {
            Err(err) => {
                self.fail(Stream::Chats, &err);
                false
            }
            Ok(None) => {
                self.soft_no_op(Stream::Chats);
                true
            }
            Ok(Some(chats)) => {
                debug!("💬 {} chats fetched", chats.len());
                let mut inner = self.inner.write();
                inner.chats = chats;
                inner.chats_status.last_update = Some(Utc::now());
                inner.chats_status.loading = false;
                true
            }
        }
    }

    /// Trade apply-cycle: replaced wholesale, like chats.
    pub fn apply_trades(&self, result: Result<Option<Vec<TradeRecord>>, FetchError>) -> bool {
        if self.dropped_after_shutdown(Stream::Trades) {
            return false;
        }
        match result {
            Err(err) => {
                self.fail(Stream::Trades, &err);
                false
            }
            Ok(None) => {
                self.soft_no_op(Stream::Trades);
                true
            }
            Ok(Some(trades)) => {
                debug!("📜 {} completed trades fetched", trades.len());
                let mut inner = self.inner.write();
                inner.trades = trades;
                inner.trades_status.last_update = Some(Utc::now());
                inner.trades_status.loading = false;
                true
            }
        }
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        let inner = self.inner.read();
        MetricsSnapshot {
            points: inner.metrics.clone(),
            total_count: inner.total_count,
        }
    }

    pub fn pricing(&self) -> Option<PriceBook> {
        self.inner.read().pricing.clone()
    }

    /// The full fetched chat list, newest first as delivered.
    pub fn chats(&self) -> Vec<ChatRecord> {
        self.inner.read().chats.clone()
    }

    /// The chats a renderer should show, capped at [`CHAT_DISPLAY_LIMIT`].
    pub fn recent_chats(&self) -> Vec<ChatRecord> {
        let inner = self.inner.read();
        inner.chats.iter().take(CHAT_DISPLAY_LIMIT).cloned().collect()
    }

    pub fn completed_trades(&self) -> Vec<TradeRecord> {
        self.inner.read().trades.clone()
    }

    pub fn status(&self, stream: Stream) -> StreamStatus {
        self.inner.read().status(stream).clone()
    }

    /// Seed for the "previous" side of a price animation; `fallback` is
    /// returned for a symbol with no recorded history.
    pub fn previous_price(&self, symbol: Symbol, fallback: f64) -> f64 {
        self.history.previous_of(symbol, fallback)
    }

    /// Recorded price history for a symbol, oldest first.
    pub fn price_history(&self, symbol: Symbol) -> Vec<f64> {
        self.history.of(symbol)
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    /// After shutdown every pending or late apply becomes a no-op; fetches
    /// already in flight are left to resolve into the void.
    pub fn shutdown(&self) {
        self.active.store(false, Ordering::Relaxed);
    }
}
