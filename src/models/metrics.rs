use serde::{Deserialize, Serialize};

/// One account-performance observation from the metrics stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricPoint {
    #[serde(rename = "totalCashValue", default)]
    pub total_cash_value: f64,
    #[serde(rename = "currentTotalReturn", default)]
    pub current_total_return: f64,
    // Opaque upstream timestamp; the backend copies it out of stored JSON
    // and may leave it empty.
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
}

/// `data` payload of `/api/metrics`. The point sequence is chronological
/// and is never reordered client-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsData {
    #[serde(default)]
    pub metrics: Vec<MetricPoint>,
    #[serde(rename = "totalCount", default)]
    pub total_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
