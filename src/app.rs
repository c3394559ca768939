use tracing::info;

use crate::config::DashboardConfig;
use crate::services::poll_scheduler::PollScheduler;
use crate::services::stream_store::Stream;
use crate::services::view::DashboardView;
use crate::state::AppState;

/// Registers the four stream polls on a fresh scheduler. Metrics and
/// pricing poll unconditionally; chat and trade history only while their
/// view is selected, with a reactivation wake-up so a view opened before
/// any successful fetch is served immediately.
pub fn start_polling(state: &AppState, config: &DashboardConfig) -> PollScheduler {
    let mut scheduler = PollScheduler::new();

    {
        let api = state.api.clone();
        let store = state.store.clone();
        scheduler.spawn_stream(
            "metrics",
            config.metrics_interval,
            || true,
            None,
            move || {
                let api = api.clone();
                let store = store.clone();
                async move {
                    store.begin_fetch(Stream::Metrics);
                    store.apply_metrics(api.fetch_metrics().await)
                }
            },
        );
    }

    {
        let api = state.api.clone();
        let store = state.store.clone();
        scheduler.spawn_stream(
            "pricing",
            config.pricing_interval,
            || true,
            None,
            move || {
                let api = api.clone();
                let store = store.clone();
                async move {
                    store.begin_fetch(Stream::Pricing);
                    store.apply_pricing(api.fetch_pricing().await)
                }
            },
        );
    }

    {
        let api = state.api.clone();
        let store = state.store.clone();
        let gate = state.views.clone();
        scheduler.spawn_stream(
            "chats",
            config.chats_interval,
            move || gate.is_active(DashboardView::ModelChat),
            Some(state.views.watch()),
            move || {
                let api = api.clone();
                let store = store.clone();
                async move {
                    store.begin_fetch(Stream::Chats);
                    store.apply_chats(api.fetch_chats().await)
                }
            },
        );
    }

    {
        let api = state.api.clone();
        let store = state.store.clone();
        let gate = state.views.clone();
        scheduler.spawn_stream(
            "trades",
            config.trades_interval,
            move || gate.is_active(DashboardView::CompletedTrades),
            Some(state.views.watch()),
            move || {
                let api = api.clone();
                let store = store.clone();
                async move {
                    store.begin_fetch(Stream::Trades);
                    store.apply_trades(api.fetch_completed_trades().await)
                }
            },
        );
    }

    info!(
        "🚀 polling started: metrics {:?}, pricing {:?}, chats {:?}, trades {:?}",
        config.metrics_interval,
        config.pricing_interval,
        config.chats_interval,
        config.trades_interval
    );

    scheduler
}
