//! ResourceClient: generic CRUD against the backing REST API.

mod crud;
mod validation;
pub use crud::{id_segment, ResourceClient};
pub use validation::FormValidator;
