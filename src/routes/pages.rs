//! Dashboard page routes built from the resolved schema.
//! Paths are parameterized so handlers resolve the page by segment; unknown
//! segments answer 404 without touching the backing API.

use crate::handlers::pages::{create, delete_row, index, show, update};
use crate::routes::common_routes;
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

const MAX_FORM_BYTES: usize = 256 * 1024;

pub fn page_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/:page_segment", get(show).post(create))
        .route("/:page_segment/:id", post(update))
        .route("/:page_segment/:id/delete", post(delete_row))
        .with_state(state)
}

/// The full dashboard: pages plus common routes, request tracing, and a
/// body cap for form posts.
pub fn dashboard_router(state: AppState) -> Router {
    common_routes(state.clone())
        .merge(page_routes(state))
        .layer(RequestBodyLimitLayer::new(MAX_FORM_BYTES))
        .layer(TraceLayer::new_for_http())
}
