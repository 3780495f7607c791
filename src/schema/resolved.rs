//! Resolved page model: schema validated and flattened for runtime use.

use crate::response::Row;
use crate::schema::{FormEntry, OptionSource, ValidationRule};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Custom cell projection: `(value, row) -> display string`. The row is
/// passed alongside the projected value so a renderer can combine fields.
pub type CellRenderer = Arc<dyn Fn(&Value, &Row) -> String + Send + Sync>;

#[derive(Clone)]
pub struct ResolvedColumn {
    pub key: String,
    pub label: String,
    pub render: Option<CellRenderer>,
}

impl fmt::Debug for ResolvedColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedColumn")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("render", &self.render.is_some())
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedPage {
    pub path_segment: String,
    pub title: String,
    /// Endpoint path on the backing API (no leading slash).
    pub endpoint: String,
    pub columns: Vec<ResolvedColumn>,
    pub entries: Vec<FormEntry>,
    pub operations: Vec<String>,
    /// Per-field rules derived from the form schema plus explicit overrides.
    pub validation: HashMap<String, ValidationRule>,
    /// Select fields whose choices load from a remote endpoint.
    pub option_sources: Vec<(String, OptionSource)>,
}

impl ResolvedPage {
    pub fn allows(&self, operation: &str) -> bool {
        self.operations.iter().any(|o| o == operation)
    }

    /// Whether the form schema has at least one input (sections alone do not
    /// make a page editable).
    pub fn has_form(&self) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e, FormEntry::Input(_)))
    }

    pub fn can_create(&self) -> bool {
        self.allows("create") && self.has_form()
    }

    pub fn can_edit(&self) -> bool {
        self.allows("update") && self.has_form()
    }

    pub fn can_delete(&self) -> bool {
        self.allows("delete")
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedDashboard {
    pub pages: Vec<ResolvedPage>,
    pub page_by_path: HashMap<String, ResolvedPage>,
}

impl ResolvedDashboard {
    pub fn page_by_path(&self, path: &str) -> Option<&ResolvedPage> {
        self.page_by_path.get(path)
    }

    /// Attach a custom cell renderer to one column. Renderers are code, not
    /// config, so they hook in after resolution.
    pub fn with_renderer<F>(mut self, page: &str, column: &str, render: F) -> Self
    where
        F: Fn(&Value, &Row) -> String + Send + Sync + 'static,
    {
        let render: CellRenderer = Arc::new(render);
        for p in self.pages.iter_mut() {
            if p.path_segment == page {
                for c in p.columns.iter_mut() {
                    if c.key == column {
                        c.render = Some(render.clone());
                    }
                }
            }
        }
        if let Some(p) = self.page_by_path.get_mut(page) {
            for c in p.columns.iter_mut() {
                if c.key == column {
                    c.render = Some(render.clone());
                }
            }
        }
        self
    }
}
