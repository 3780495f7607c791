//! Routers: dashboard pages plus health/version endpoints.

pub mod common;
pub mod pages;

pub use common::common_routes;
pub use pages::{dashboard_router, page_routes};
