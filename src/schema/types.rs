//! Raw page-schema types matching the dashboard config files.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One selectable option of a select field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Where a select field loads its choices from at render time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OptionSource {
    pub endpoint: String,
    #[serde(default = "default_value_key")]
    pub value_key: String,
    #[serde(default = "default_label_key")]
    pub label_key: String,
}

fn default_value_key() -> String {
    "id".into()
}

fn default_label_key() -> String {
    "name".into()
}

/// Grid width of a form input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldWidth {
    #[default]
    Full,
    Half,
    Third,
    Quarter,
    TwoThirds,
}

impl FieldWidth {
    pub fn css_class(&self) -> &'static str {
        match self {
            FieldWidth::Full => "col-full",
            FieldWidth::Half => "col-half",
            FieldWidth::Third => "col-third",
            FieldWidth::Quarter => "col-quarter",
            FieldWidth::TwoThirds => "col-two-thirds",
        }
    }
}

/// Input kind of a form field. Closed: the renderer and the value coercion
/// match on this exhaustively.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Number,
    Date,
    Time,
    Url,
    Password,
    Textarea,
    Select {
        #[serde(default)]
        choices: Vec<Choice>,
        #[serde(default)]
        source: Option<OptionSource>,
    },
}

/// One form input.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default, rename = "default")]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub width: FieldWidth,
    #[serde(default)]
    pub help: Option<String>,
}

/// One entry of a form schema: a group header or an input, never both.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormEntry {
    Section { section: String },
    Input(FieldConfig),
}

/// One table column: which row field it projects and under which heading.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub key: String,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ValidationRule {
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub max_length: Option<u32>,
    #[serde(default)]
    pub min_length: Option<u32>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub allowed: Option<Vec<Value>>,
    #[serde(default)]
    pub minimum: Option<f64>,
    #[serde(default)]
    pub maximum: Option<f64>,
}

/// One dashboard page: a list endpoint plus its table and form schema.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PageConfig {
    pub path_segment: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Endpoint path on the backing API; defaults to the path segment.
    #[serde(default)]
    pub endpoint: Option<String>,
    pub columns: Vec<ColumnConfig>,
    #[serde(default)]
    pub form: Vec<FormEntry>,
    #[serde(default = "default_operations")]
    pub operations: Vec<String>,
    /// Extra per-field rules on top of what the form schema implies.
    #[serde(default)]
    pub validation: HashMap<String, ValidationRule>,
}

fn default_operations() -> Vec<String> {
    vec!["create".into(), "update".into(), "delete".into()]
}

/// All pages of one dashboard.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub pages: Vec<PageConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_kind_tag_round_trip() {
        let field: FieldConfig = serde_json::from_value(json!({
            "name": "email",
            "type": "email",
            "required": true,
            "width": "half"
        }))
        .unwrap();
        assert!(matches!(field.kind, FieldKind::Email));
        assert!(field.required);
        assert_eq!(field.width, FieldWidth::Half);
    }

    #[test]
    fn select_carries_choices_and_source() {
        let field: FieldConfig = serde_json::from_value(json!({
            "name": "status",
            "type": "select",
            "choices": [{"value": "active", "label": "Active"}],
            "source": {"endpoint": "statuses"}
        }))
        .unwrap();
        match field.kind {
            FieldKind::Select { choices, source } => {
                assert_eq!(choices.len(), 1);
                let source = source.unwrap();
                assert_eq!(source.endpoint, "statuses");
                assert_eq!(source.value_key, "id");
                assert_eq!(source.label_key, "name");
            }
            other => panic!("expected select, got {:?}", other),
        }
    }

    #[test]
    fn form_entry_distinguishes_section_from_input() {
        let entries: Vec<FormEntry> = serde_json::from_value(json!([
            {"section": "Contact"},
            {"name": "phone", "type": "text"}
        ]))
        .unwrap();
        assert!(matches!(entries[0], FormEntry::Section { .. }));
        assert!(matches!(entries[1], FormEntry::Input(_)));
    }
}
