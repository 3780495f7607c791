//! Schema validation: unique segments and fields, usable selects.

use crate::error::SchemaError;
use crate::schema::{DashboardConfig, FieldKind, FormEntry};
use std::collections::HashSet;

pub fn validate(config: &DashboardConfig) -> Result<(), SchemaError> {
    let mut path_segments = HashSet::new();
    for page in &config.pages {
        if page.path_segment.trim().is_empty() {
            return Err(SchemaError::Validation("page path_segment is empty".into()));
        }
        if !path_segments.insert(page.path_segment.as_str()) {
            return Err(SchemaError::DuplicatePathSegment(page.path_segment.clone()));
        }
        if page.columns.is_empty() {
            return Err(SchemaError::EmptyColumns(page.path_segment.clone()));
        }

        let mut field_names = HashSet::new();
        for entry in &page.form {
            let field = match entry {
                FormEntry::Section { .. } => continue,
                FormEntry::Input(field) => field,
            };
            if field.name.trim().is_empty() {
                return Err(SchemaError::Validation(format!(
                    "page {} has a field with an empty name",
                    page.path_segment
                )));
            }
            if !field_names.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    page: page.path_segment.clone(),
                    field: field.name.clone(),
                });
            }
            if let FieldKind::Select { choices, source } = &field.kind {
                match source {
                    Some(source) if source.endpoint.trim().is_empty() => {
                        return Err(SchemaError::Validation(format!(
                            "select '{}' on page {} has a blank source endpoint",
                            field.name, page.path_segment
                        )));
                    }
                    Some(_) => {}
                    None if choices.is_empty() => {
                        return Err(SchemaError::MissingChoices {
                            page: page.path_segment.clone(),
                            field: field.name.clone(),
                        });
                    }
                    None => {}
                }
            }
        }
    }
    Ok(())
}
