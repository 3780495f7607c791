//! Backoffice SDK: schema-driven CRUD dashboard over a REST back office.

pub mod error;
pub mod handlers;
pub mod options;
pub mod resource;
pub mod response;
pub mod routes;
pub mod schema;
pub mod service;
pub mod state;
pub mod text;
pub mod view;

pub use error::{ApiError, AppError, SchemaError};
pub use options::{load_choices, ChoiceLists};
pub use resource::{Resource, ResourceState};
pub use response::{parse_list_response, Row};
pub use routes::{common_routes, dashboard_router, page_routes};
pub use schema::{
    load_from_str, load_from_value, resolve, Choice, DashboardConfig, FieldKind, FormEntry,
    ResolvedDashboard, ResolvedPage,
};
pub use service::{FormValidator, ResourceClient};
pub use state::AppState;
pub use view::{FormState, ModalState, ViewState};
