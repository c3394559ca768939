use std::sync::Arc;

use crate::external::DashboardApi;
use crate::services::stream_store::StreamStore;
use crate::services::view::ViewSelector;

/// Everything the polling layer needs, bundled for wiring.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn DashboardApi>,
    pub store: Arc<StreamStore>,
    pub views: Arc<ViewSelector>,
}
