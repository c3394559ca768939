use std::sync::Arc;

use tradedash_client::app;
use tradedash_client::config::DashboardConfig;
use tradedash_client::external::HttpDashboardApi;
use tradedash_client::logging::{init_logging, LoggingConfig};
use tradedash_client::services::stream_store::StreamStore;
use tradedash_client::services::view::{DashboardView, ViewSelector};
use tradedash_client::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_logging(LoggingConfig::from_env())?;

    let config = DashboardConfig::from_env();
    config.validate().map_err(anyhow::Error::msg)?;

    let api = HttpDashboardApi::from_config(&config)
        .map_err(|e| anyhow::anyhow!("bad dashboard config: {}", e))?;

    let state = AppState {
        api: Arc::new(api),
        store: Arc::new(StreamStore::new()),
        views: Arc::new(ViewSelector::new(DashboardView::ModelChat)),
    };

    let mut scheduler = app::start_polling(&state, &config);
    tracing::info!("🚀 tradedash client polling {} (ctrl-c to stop)", config.base_url);

    tokio::signal::ctrl_c().await?;

    scheduler.shutdown();
    state.store.shutdown();
    tracing::info!("✅ shut down cleanly");

    Ok(())
}
