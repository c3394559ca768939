use serde::{Deserialize, Serialize};

/// One completed trade from `/api/trading/completed-trades`, joined with
/// its originating decision. Numeric fields are present only when the
/// decision specified them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub operation: String,
    #[serde(default)]
    pub leverage: Option<f64>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(rename = "pricing", default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub stop_loss: Option<f64>,
    #[serde(default)]
    pub take_profit: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub chat_id: String,
    #[serde(default)]
    pub chat_model: Option<String>,
    #[serde(default)]
    pub chat_created_at: Option<String>,
}
