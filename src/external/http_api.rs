use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::config::DashboardConfig;
use crate::errors::FetchError;
use crate::external::dashboard_api::DashboardApi;
use crate::models::{ChatRecord, MetricsData, PriceBook, TradeRecord};

/// [`DashboardApi`] over HTTP: one GET per stream under the configured
/// base URL. Timeouts and connection reuse are reqwest's defaults.
pub struct HttpDashboardApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpDashboardApi {
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self, FetchError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| FetchError::Parse(format!("invalid base URL: {}", e)))?;
        Ok(Self::new(base_url))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))
    }
}

/// Response envelope shared by every endpoint. The list endpoints also
/// report pagination bookkeeping (`total`, `skip`, `limit`); the engine
/// deserializes it faithfully and otherwise ignores it.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
    #[serde(default)]
    #[allow(dead_code)]
    total: Option<i64>,
}

/// `data` payload of the pricing endpoint wraps the book one level deeper.
#[derive(Debug, Deserialize)]
struct PricingPayload {
    pricing: Option<PriceBook>,
}

fn accepted<T>(envelope: Envelope<T>) -> Option<T> {
    if envelope.success {
        envelope.data
    } else {
        None
    }
}

#[async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn fetch_metrics(&self) -> Result<Option<MetricsData>, FetchError> {
        let envelope: Envelope<MetricsData> = self.get_json("api/metrics").await?;
        Ok(accepted(envelope))
    }

    async fn fetch_pricing(&self) -> Result<Option<PriceBook>, FetchError> {
        let envelope: Envelope<PricingPayload> = self.get_json("api/pricing/simple").await?;
        Ok(accepted(envelope).and_then(|payload| payload.pricing))
    }

    async fn fetch_chats(&self) -> Result<Option<Vec<ChatRecord>>, FetchError> {
        let envelope: Envelope<Vec<ChatRecord>> = self.get_json("api/trading/chats").await?;
        Ok(accepted(envelope))
    }

    async fn fetch_completed_trades(&self) -> Result<Option<Vec<TradeRecord>>, FetchError> {
        let envelope: Envelope<Vec<TradeRecord>> =
            self.get_json("api/trading/completed-trades").await?;
        Ok(accepted(envelope))
    }
}
