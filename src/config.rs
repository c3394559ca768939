use std::time::Duration;

/// Endpoint and poll-cadence configuration, read from the environment with
/// the dashboard's defaults. Metrics and pricing poll continuously; the
/// chat and trade histories are slow-moving and view-gated, so they run on
/// a much longer cadence.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub base_url: String,
    pub metrics_interval: Duration,
    pub pricing_interval: Duration,
    pub chats_interval: Duration,
    pub trades_interval: Duration,
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("DASHBOARD_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            metrics_interval: interval_from_env("METRICS_POLL_MS", 20_000),
            pricing_interval: interval_from_env("PRICING_POLL_MS", 5_000),
            chats_interval: interval_from_env("CHATS_POLL_MS", 180_000),
            trades_interval: interval_from_env("TRADES_POLL_MS", 180_000),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("DASHBOARD_BASE_URL must not be empty".to_string());
        }
        let intervals = [
            ("METRICS_POLL_MS", self.metrics_interval),
            ("PRICING_POLL_MS", self.pricing_interval),
            ("CHATS_POLL_MS", self.chats_interval),
            ("TRADES_POLL_MS", self.trades_interval),
        ];
        for (name, interval) in intervals {
            if interval.is_zero() {
                return Err(format!("{} must be a positive number of milliseconds", name));
            }
        }
        Ok(())
    }
}

fn interval_from_env(var: &str, default_ms: u64) -> Duration {
    let ms = std::env::var(var)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default_ms);
    Duration::from_millis(ms)
}
