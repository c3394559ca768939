//! End-to-end fetch/apply scenarios for the stream-sync engine, driven
//! through a scripted in-memory `DashboardApi` wired exactly the way the
//! binary wires the real HTTP client.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use tradedash_client::app;
use tradedash_client::config::DashboardConfig;
use tradedash_client::errors::FetchError;
use tradedash_client::external::DashboardApi;
use tradedash_client::models::{
    ChatRecord, MetricPoint, MetricsData, PriceBook, Quote, Symbol, TradeRecord,
};
use tradedash_client::services::digit_diff::{diff_prices, DigitClass};
use tradedash_client::services::stream_store::{Stream, StreamStore};
use tradedash_client::services::view::{DashboardView, ViewSelector};
use tradedash_client::state::AppState;

// ---------------------------------------------------------------------------
// Scripted API
// ---------------------------------------------------------------------------

/// Serves canned payloads and counts calls per stream. `fail_chats` flips
/// the chat endpoint into an HTTP 500.
#[derive(Default)]
struct ScriptedApi {
    metrics_calls: AtomicUsize,
    pricing_calls: AtomicUsize,
    chats_calls: AtomicUsize,
    trades_calls: AtomicUsize,
    fail_chats: AtomicBool,
}

fn sample_book(eth_price: f64) -> PriceBook {
    let mut book = PriceBook::default();
    book.set(Symbol::Btc, Quote::new(50_000.0));
    book.set(Symbol::Eth, Quote::new(eth_price));
    book.set(Symbol::Sol, Quote::new(150.0));
    book.set(Symbol::Bnb, Quote::new(600.0));
    book.set(Symbol::Doge, Quote::new(0.3142));
    book
}

fn sample_chat(id: &str) -> ChatRecord {
    ChatRecord {
        id: id.to_string(),
        model: "Deepseek".to_string(),
        decision: serde_json::json!({"operation": "buy", "symbol": "ETH"}),
        reasoning: "momentum building".to_string(),
        prompt: "decide on current market".to_string(),
        created_at: Some("2025-01-01T00:00:00".to_string()),
        updated_at: None,
    }
}

fn sample_trade(id: &str) -> TradeRecord {
    TradeRecord {
        id: id.to_string(),
        symbol: "ETH".to_string(),
        operation: "LONG".to_string(),
        leverage: Some(3.0),
        amount: Some(0.5),
        price: Some(3000.0),
        stop_loss: None,
        take_profit: Some(3200.0),
        created_at: Some("2025-01-01T00:00:00".to_string()),
        chat_id: "c1".to_string(),
        chat_model: Some("Deepseek".to_string()),
        chat_created_at: None,
    }
}

#[async_trait]
impl DashboardApi for ScriptedApi {
    async fn fetch_metrics(&self) -> Result<Option<MetricsData>, FetchError> {
        self.metrics_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(MetricsData {
            metrics: vec![MetricPoint {
                total_cash_value: 10_000.0,
                current_total_return: 1.5,
                created_at: "2025-01-01T00:00:00".to_string(),
            }],
            total_count: 1,
            model: Some("Deepseek".to_string()),
            name: None,
        }))
    }

    async fn fetch_pricing(&self) -> Result<Option<PriceBook>, FetchError> {
        // Price moves a little on every poll so each fetch commits.
        let calls = self.pricing_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(sample_book(3000.0 + calls as f64)))
    }

    async fn fetch_chats(&self) -> Result<Option<Vec<ChatRecord>>, FetchError> {
        self.chats_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_chats.load(Ordering::SeqCst) {
            return Err(FetchError::Status(500));
        }
        Ok(Some(vec![sample_chat("c1"), sample_chat("c2")]))
    }

    async fn fetch_completed_trades(&self) -> Result<Option<Vec<TradeRecord>>, FetchError> {
        self.trades_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(vec![sample_trade("t1")]))
    }
}

fn fast_config() -> DashboardConfig {
    let mut config = DashboardConfig::from_env();
    config.metrics_interval = Duration::from_millis(25);
    config.pricing_interval = Duration::from_millis(25);
    config.chats_interval = Duration::from_millis(40);
    config.trades_interval = Duration::from_millis(40);
    config
}

fn wired_state(api: Arc<ScriptedApi>, initial_view: DashboardView) -> AppState {
    AppState {
        api: api as Arc<dyn DashboardApi>,
        store: Arc::new(StreamStore::new()),
        views: Arc::new(ViewSelector::new(initial_view)),
    }
}

// ---------------------------------------------------------------------------
// Full-wiring scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ungated_streams_poll_from_startup() {
    let api = Arc::new(ScriptedApi::default());
    let state = wired_state(api.clone(), DashboardView::Readme);
    let mut scheduler = app::start_polling(&state, &fast_config());

    sleep(Duration::from_millis(120)).await;
    scheduler.shutdown();

    assert!(api.metrics_calls.load(Ordering::SeqCst) >= 2);
    assert!(api.pricing_calls.load(Ordering::SeqCst) >= 2);

    let metrics = state.store.metrics();
    assert_eq!(metrics.total_count, 1);
    assert_eq!(metrics.points[0].total_cash_value, 10_000.0);
    assert!(state.store.pricing().is_some());
    assert!(state.store.status(Stream::Metrics).last_update.is_some());
}

#[tokio::test]
async fn gated_streams_only_poll_while_their_view_is_active() {
    let api = Arc::new(ScriptedApi::default());
    let state = wired_state(api.clone(), DashboardView::ModelChat);
    let mut scheduler = app::start_polling(&state, &fast_config());

    sleep(Duration::from_millis(100)).await;

    // Chat view is active, trades view is not.
    assert!(api.chats_calls.load(Ordering::SeqCst) >= 1);
    assert_eq!(api.trades_calls.load(Ordering::SeqCst), 0);
    assert_eq!(state.store.chats().len(), 2);
    assert!(state.store.completed_trades().is_empty());

    // Switching to the trades view fetches immediately (never succeeded).
    state.views.select(DashboardView::CompletedTrades);
    sleep(Duration::from_millis(60)).await;
    assert!(api.trades_calls.load(Ordering::SeqCst) >= 1);
    assert_eq!(state.store.completed_trades().len(), 1);

    scheduler.shutdown();
}

#[tokio::test]
async fn chat_failure_keeps_displayed_list_and_surfaces_error() {
    let api = Arc::new(ScriptedApi::default());
    let state = wired_state(api.clone(), DashboardView::ModelChat);
    let mut scheduler = app::start_polling(&state, &fast_config());

    sleep(Duration::from_millis(60)).await;
    assert_eq!(state.store.chats().len(), 2);

    api.fail_chats.store(true, Ordering::SeqCst);
    sleep(Duration::from_millis(80)).await;
    scheduler.shutdown();

    let status = state.store.status(Stream::Chats);
    assert_eq!(
        status.last_error.as_deref(),
        Some("HTTP error! status: 500")
    );
    // The previously accepted list stays visible through the outage.
    assert_eq!(state.store.chats().len(), 2);
    assert!(!status.loading);
}

#[tokio::test]
async fn pricing_commits_seed_animation_history() {
    let api = Arc::new(ScriptedApi::default());
    let state = wired_state(api.clone(), DashboardView::Readme);
    let mut scheduler = app::start_polling(&state, &fast_config());

    sleep(Duration::from_millis(120)).await;
    scheduler.shutdown();

    // ETH moved every poll; BTC never did after the first.
    let eth_history = state.store.price_history(Symbol::Eth);
    assert!(eth_history.len() >= 2);
    assert_eq!(state.store.price_history(Symbol::Btc), vec![50_000.0]);

    // The previous-of seed differs from the committed price; a renderer
    // feeds both into the digit diff engine for animation classes.
    let book = state.store.pricing().expect("book committed");
    let current = book.price_of(Symbol::Eth);
    let previous = state.store.previous_price(Symbol::Eth, current);
    assert!(previous < current);

    let cells = diff_prices(Symbol::Eth, previous, current);
    assert!(cells.iter().any(|c| c.class == DigitClass::ChangedUp));
    assert!(!cells.iter().any(|c| c.class == DigitClass::ChangedDown));
}

#[tokio::test]
async fn shutdown_stops_polls_and_drops_late_results() {
    let api = Arc::new(ScriptedApi::default());
    let state = wired_state(api.clone(), DashboardView::Readme);
    let mut scheduler = app::start_polling(&state, &fast_config());

    sleep(Duration::from_millis(60)).await;
    scheduler.shutdown();
    state.store.shutdown();

    // Give any already-spawned fetch a moment to settle before sampling.
    sleep(Duration::from_millis(20)).await;
    let calls_after = api.pricing_calls.load(Ordering::SeqCst);
    sleep(Duration::from_millis(80)).await;
    assert_eq!(api.pricing_calls.load(Ordering::SeqCst), calls_after);

    // A straggler response delivered after teardown changes nothing.
    let before = state.store.pricing().expect("book committed");
    state.store.apply_pricing(Ok(Some(sample_book(9_999.0))));
    let after = state.store.pricing().expect("book still present");
    assert_eq!(
        before.price_of(Symbol::Eth),
        after.price_of(Symbol::Eth)
    );
}
