use async_trait::async_trait;

use crate::errors::FetchError;
use crate::models::{ChatRecord, MetricsData, PriceBook, TradeRecord};

/// Boundary to the dashboard backend, one method per polled stream.
///
/// `Ok(None)` means the backend answered but reported `success: false` or
/// omitted the `data` payload: a soft "no update" for the caller, not an
/// error. `Err` is reserved for transport failures.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn fetch_metrics(&self) -> Result<Option<MetricsData>, FetchError>;

    async fn fetch_pricing(&self) -> Result<Option<PriceBook>, FetchError>;

    async fn fetch_chats(&self) -> Result<Option<Vec<ChatRecord>>, FetchError>;

    async fn fetch_completed_trades(&self) -> Result<Option<Vec<TradeRecord>>, FetchError>;
}
