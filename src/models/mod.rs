mod chat;
mod metrics;
mod pricing;
mod trade;

pub use chat::ChatRecord;
pub use metrics::{MetricPoint, MetricsData};
pub use pricing::{PriceBook, Quote, Symbol};
pub use trade::TradeRecord;
