use chat_room::{ChatCoordinator, ShutdownCoordinator};

use metrics_exporter_prometheus::PrometheusHandle;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub coordinator: ChatCoordinator,
    pub shutdown: ShutdownCoordinator,
    /// None when no Prometheus recorder was installed (tests)
    pub metrics: Option<PrometheusHandle>,
}
