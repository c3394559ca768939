use tokio::sync::watch;
use tracing::debug;

/// The dashboard's selectable views. The chat and trade streams only poll
/// while their view is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardView {
    ModelChat,
    Positions,
    CompletedTrades,
    Readme,
}

/// Tracks the active view, decoupled from any rendering lifecycle.
///
/// Pollers consume this two ways: as a plain activation predicate checked
/// on every tick, and as a watch channel that wakes a gated poller the
/// moment its view is switched to.
pub struct ViewSelector {
    tx: watch::Sender<DashboardView>,
}

impl ViewSelector {
    pub fn new(initial: DashboardView) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    pub fn select(&self, view: DashboardView) {
        debug!("active view -> {:?}", view);
        self.tx.send_replace(view);
    }

    pub fn current(&self) -> DashboardView {
        *self.tx.borrow()
    }

    pub fn is_active(&self, view: DashboardView) -> bool {
        self.current() == view
    }

    /// Receiver that fires on every view switch.
    pub fn watch(&self) -> watch::Receiver<DashboardView> {
        self.tx.subscribe()
    }
}

impl Default for ViewSelector {
    fn default() -> Self {
        Self::new(DashboardView::ModelChat)
    }
}
