//! Generic CRUD view: searchable table plus a schema-driven modal form.
//!
//! Everything here is pure rendering and view-local state; network effects
//! stay in [`crate::resource`] and the handlers.

pub mod form;
pub mod page;
pub mod table;

pub use form::FormState;
pub use page::render_page;
pub use table::{cell_text, filter_rows, render_table, row_matches};

use crate::response::Row;
use crate::schema::ResolvedPage;
use serde_json::Value;

/// The modal's state machine: closed, creating, or editing one row. The
/// form is seeded on open and dropped on close; it never survives across
/// modal sessions.
#[derive(Clone, Debug)]
pub enum ModalState {
    Closed,
    Create(FormState),
    Edit { id: Value, form: FormState },
}

impl ModalState {
    /// Open for a new row, seeded from the schema's default values.
    pub fn open_create(page: &ResolvedPage) -> Self {
        ModalState::Create(FormState::seeded_with_defaults(&page.entries))
    }

    /// Open for an existing row, seeded from its current field values.
    pub fn open_edit(page: &ResolvedPage, row: &Row) -> Self {
        ModalState::Edit {
            id: row.get("id").cloned().unwrap_or(Value::Null),
            form: FormState::seeded_from_row(&page.entries, row),
        }
    }

    pub fn close(&mut self) {
        *self = ModalState::Closed;
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, ModalState::Closed)
    }

    pub fn form(&self) -> Option<&FormState> {
        match self {
            ModalState::Closed => None,
            ModalState::Create(form) | ModalState::Edit { form, .. } => Some(form),
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut FormState> {
        match self {
            ModalState::Closed => None,
            ModalState::Create(form) | ModalState::Edit { form, .. } => Some(form),
        }
    }

    /// Consume the modal into its submit intent: `(edit id, form values)`.
    /// `None` for create, `Some(id)` for edit. A closed modal yields nothing.
    pub fn submit(self) -> Option<(Option<Value>, Row)> {
        match self {
            ModalState::Closed => None,
            ModalState::Create(form) => Some((None, form.into_values())),
            ModalState::Edit { id, form } => Some((Some(id), form.into_values())),
        }
    }
}

/// View-local state: the live search term plus the modal. The search term is
/// independent of the modal and never touches the resource's cached rows.
#[derive(Clone, Debug)]
pub struct ViewState {
    pub search: String,
    pub modal: ModalState,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            modal: ModalState::Closed,
        }
    }
}

impl ViewState {
    pub fn visible_rows<'a>(&self, rows: &'a [Row]) -> Vec<&'a Row> {
        filter_rows(rows, &self.search)
    }
}
