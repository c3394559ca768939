mod dashboard_api;
mod http_api;

pub use dashboard_api::DashboardApi;
pub use http_api::HttpDashboardApi;
