pub mod comparator;
pub mod digit_diff;
pub mod poll_scheduler;
pub mod price_history;
pub mod stream_store;
pub mod view;
