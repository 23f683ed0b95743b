use std::sync::Arc;

use crate::models::ServiceSpec;
use crate::services::ServiceMonitor;

pub struct AppStateInner {
    pub services: Vec<ServiceSpec>,
    pub monitor: ServiceMonitor,
}

/// Read-only: every request takes its own snapshot
pub type AppState = Arc<AppStateInner>;

pub fn new_state(services: Vec<ServiceSpec>, monitor: ServiceMonitor) -> AppState {
    Arc::new(AppStateInner { services, monitor })
}
