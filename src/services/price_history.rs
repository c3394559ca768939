use std::collections::VecDeque;

use dashmap::DashMap;

use crate::models::Symbol;
use crate::services::comparator::numbers_equal;

/// Price points kept per symbol for seeding diff animations.
pub const HISTORY_CAPACITY: usize = 5;

/// Per-symbol FIFO of recently accepted prices.
///
/// A buffer is created lazily on the first recorded change and lives for
/// the lifetime of the store; a quiet symbol keeps its last known history
/// indefinitely (no time-based expiry).
#[derive(Default)]
pub struct PriceHistory {
    buffers: DashMap<Symbol, VecDeque<f64>>,
}

impl PriceHistory {
    pub fn new() -> Self {
        Self {
            buffers: DashMap::new(),
        }
    }

    /// Appends `price` iff it differs from the buffer's last element by
    /// more than the comparator tolerance, evicting the oldest entry once
    /// past capacity. Returns whether anything was recorded.
    pub fn record_if_changed(&self, symbol: Symbol, price: f64) -> bool {
        let mut buffer = self.buffers.entry(symbol).or_default();
        if let Some(&last) = buffer.back() {
            if numbers_equal(last, price) {
                return false;
            }
        }
        buffer.push_back(price);
        if buffer.len() > HISTORY_CAPACITY {
            buffer.pop_front();
        }
        true
    }

    /// The value that seeds the "previous" side of an animated transition:
    /// the second-to-last entry, the only entry when history has length 1,
    /// or `fallback` (typically the current price) when the symbol has no
    /// history yet.
    pub fn previous_of(&self, symbol: Symbol, fallback: f64) -> f64 {
        match self.buffers.get(&symbol) {
            Some(buffer) if buffer.len() >= 2 => buffer[buffer.len() - 2],
            Some(buffer) if buffer.len() == 1 => buffer[0],
            _ => fallback,
        }
    }

    /// Recorded history for a symbol, oldest first.
    pub fn of(&self, symbol: Symbol) -> Vec<f64> {
        self.buffers
            .get(&symbol)
            .map(|buffer| buffer.iter().copied().collect())
            .unwrap_or_default()
    }
}
