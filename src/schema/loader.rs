//! Load dashboard config from JSON and resolve it for runtime use.

use crate::error::SchemaError;
use crate::schema::resolved::{ResolvedColumn, ResolvedDashboard, ResolvedPage};
use crate::schema::types::*;
use crate::schema::validate;
use crate::text::humanize;
use serde_json::Value;
use std::collections::HashMap;

/// Build the resolved dashboard from raw config (validates first).
pub fn resolve(config: &DashboardConfig) -> Result<ResolvedDashboard, SchemaError> {
    validate(config)?;

    let mut pages = Vec::with_capacity(config.pages.len());
    let mut page_by_path = HashMap::new();

    for page in &config.pages {
        let columns: Vec<ResolvedColumn> = page
            .columns
            .iter()
            .map(|c| ResolvedColumn {
                key: c.key.clone(),
                label: c.label.clone().unwrap_or_else(|| humanize(&c.key)),
                render: None,
            })
            .collect();

        let mut validation = page.validation.clone();
        let mut option_sources = Vec::new();
        for entry in &page.form {
            let field = match entry {
                FormEntry::Section { .. } => continue,
                FormEntry::Input(field) => field,
            };
            let rule = validation.entry(field.name.clone()).or_default();
            if field.required {
                rule.required = Some(true);
            }
            if rule.format.is_none() {
                rule.format = implied_format(&field.kind).map(str::to_string);
            }
            if let FieldKind::Select { choices, source } = &field.kind {
                if rule.allowed.is_none() && source.is_none() && !choices.is_empty() {
                    rule.allowed =
                        Some(choices.iter().map(|c| Value::String(c.value.clone())).collect());
                }
                if let Some(source) = source {
                    option_sources.push((field.name.clone(), source.clone()));
                }
            }
        }

        let resolved = ResolvedPage {
            path_segment: page.path_segment.clone(),
            title: page
                .title
                .clone()
                .unwrap_or_else(|| humanize(&page.path_segment)),
            endpoint: page
                .endpoint
                .clone()
                .unwrap_or_else(|| page.path_segment.clone()),
            columns,
            entries: page.form.clone(),
            operations: page.operations.clone(),
            validation,
            option_sources,
        };
        page_by_path.insert(page.path_segment.clone(), resolved.clone());
        pages.push(resolved);
    }

    Ok(ResolvedDashboard { pages, page_by_path })
}

/// Validation format implied by an input kind, when the rule does not name
/// one explicitly.
fn implied_format(kind: &FieldKind) -> Option<&'static str> {
    match kind {
        FieldKind::Email => Some("email"),
        FieldKind::Url => Some("url"),
        FieldKind::Date => Some("date"),
        FieldKind::Time => Some("time"),
        FieldKind::Text
        | FieldKind::Number
        | FieldKind::Password
        | FieldKind::Textarea
        | FieldKind::Select { .. } => None,
    }
}

/// Parse config from a JSON string.
pub fn load_from_str(json: &str) -> Result<DashboardConfig, SchemaError> {
    serde_json::from_str(json).map_err(|e| SchemaError::Load(e.to_string()))
}

/// Parse config from an already-decoded JSON value.
pub fn load_from_value(value: Value) -> Result<DashboardConfig, SchemaError> {
    serde_json::from_value(value).map_err(|e| SchemaError::Load(e.to_string()))
}
