//! Shared state for all dashboard routes.

use crate::schema::ResolvedDashboard;
use crate::service::ResourceClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub client: ResourceClient,
    pub dashboard: Arc<ResolvedDashboard>,
}

impl AppState {
    pub fn new(client: ResourceClient, dashboard: ResolvedDashboard) -> Self {
        Self {
            client,
            dashboard: Arc::new(dashboard),
        }
    }
}
