//! Modal form: live field values plus schema-driven rendering.

use crate::options::ChoiceLists;
use crate::response::Row;
use crate::schema::{Choice, FieldConfig, FieldKind, FormEntry, ResolvedPage};
use crate::service::id_segment;
use crate::text::{display_value, humanize};
use crate::view::ModalState;
use html_escape::{encode_double_quoted_attribute as attr, encode_text};
use serde_json::Value;

/// The editable copy of a row bound to the open modal. Seeded wholesale on
/// open; mutated one key at a time; discarded on close.
#[derive(Clone, Debug, Default)]
pub struct FormState {
    values: Row,
}

impl FormState {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adopt an already-collected value map (e.g. a submitted body being
    /// re-rendered after a failed mutation).
    pub fn from_values(values: Row) -> Self {
        Self { values }
    }

    /// Seed a create form from the schema's declared defaults.
    pub fn seeded_with_defaults(entries: &[FormEntry]) -> Self {
        let mut values = Row::new();
        for entry in entries {
            if let FormEntry::Input(field) = entry {
                if let Some(default) = &field.default_value {
                    values.insert(field.name.clone(), default.clone());
                }
            }
        }
        Self { values }
    }

    /// Seed an edit form from the selected row, taking the fields the form
    /// schema names.
    pub fn seeded_from_row(entries: &[FormEntry], row: &Row) -> Self {
        let mut values = Row::new();
        for entry in entries {
            if let FormEntry::Input(field) = entry {
                if let Some(v) = row.get(&field.name) {
                    values.insert(field.name.clone(), v.clone());
                }
            }
        }
        Self { values }
    }

    /// Replace the value of one field, leaving every other key untouched.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn values(&self) -> &Row {
        &self.values
    }

    pub fn into_values(self) -> Row {
        self.values
    }
}

/// Render the modal markup, or nothing when it is closed.
pub fn render_modal(
    page: &ResolvedPage,
    modal: &ModalState,
    choices: &ChoiceLists,
    error: Option<&str>,
) -> String {
    let (title, action, form) = match modal {
        ModalState::Closed => return String::new(),
        ModalState::Create(form) => (
            format!("Add {}", page.title),
            format!("/{}", page.path_segment),
            form,
        ),
        ModalState::Edit { id, form } => (
            format!("Edit {}", page.title),
            format!("/{}/{}", page.path_segment, id_segment(id)),
            form,
        ),
    };

    let mut html = String::new();
    html.push_str("<div class=\"modal-backdrop\"><div class=\"modal\">");
    html.push_str(&format!("<h2>{}</h2>", encode_text(&title)));
    if let Some(message) = error {
        html.push_str(&format!(
            "<p class=\"form-error\">{}</p>",
            encode_text(message)
        ));
    }
    html.push_str(&format!(
        "<form method=\"post\" action=\"{}\" class=\"modal-form\">",
        attr(&action)
    ));
    html.push_str("<div class=\"form-grid\">");
    for entry in &page.entries {
        match entry {
            FormEntry::Section { section } => {
                html.push_str(&format!(
                    "<h3 class=\"form-section col-full\">{}</h3>",
                    encode_text(section)
                ));
            }
            FormEntry::Input(field) => {
                html.push_str(&render_field(field, form, choices));
            }
        }
    }
    html.push_str("</div>");
    html.push_str(&format!(
        "<div class=\"modal-actions\"><a class=\"button\" href=\"/{}\">Cancel</a><button type=\"submit\">Save</button></div>",
        attr(&page.path_segment)
    ));
    html.push_str("</form></div></div>");
    html
}

fn render_field(field: &FieldConfig, form: &FormState, choices: &ChoiceLists) -> String {
    let label = field
        .label
        .clone()
        .unwrap_or_else(|| humanize(&field.name));
    let current = form.get(&field.name).map(display_value).unwrap_or_default();

    let mut html = format!("<div class=\"form-field {}\">", field.width.css_class());
    html.push_str(&format!(
        "<label for=\"field-{}\">{}{}</label>",
        attr(&field.name),
        encode_text(&label),
        if field.required {
            "<span class=\"required\">*</span>"
        } else {
            ""
        }
    ));
    html.push_str(&render_editor(field, &current, choices));
    if let Some(help) = &field.help {
        html.push_str(&format!("<p class=\"help\">{}</p>", encode_text(help)));
    }
    html.push_str("</div>");
    html
}

/// Pick the editor for a field. The match is exhaustive: adding a kind
/// forces a decision here.
fn render_editor(field: &FieldConfig, current: &str, choices: &ChoiceLists) -> String {
    let input_type = match &field.kind {
        FieldKind::Text => "text",
        FieldKind::Email => "email",
        FieldKind::Number => "number",
        FieldKind::Date => "date",
        FieldKind::Time => "time",
        FieldKind::Url => "url",
        FieldKind::Password => "password",
        FieldKind::Textarea => {
            return format!(
                "<textarea id=\"field-{name}\" name=\"{name}\"{required}{placeholder}>{value}</textarea>",
                name = attr(&field.name),
                required = required_attr(field),
                placeholder = placeholder_attr(field),
                value = encode_text(current),
            );
        }
        FieldKind::Select {
            choices: static_choices,
            ..
        } => {
            return render_select(field, current, static_choices, choices);
        }
    };
    format!(
        "<input type=\"{kind}\" id=\"field-{name}\" name=\"{name}\" value=\"{value}\"{required}{placeholder} />",
        kind = input_type,
        name = attr(&field.name),
        value = attr(current),
        required = required_attr(field),
        placeholder = placeholder_attr(field),
    )
}

fn render_select(
    field: &FieldConfig,
    current: &str,
    static_choices: &[Choice],
    loaded: &ChoiceLists,
) -> String {
    let mut html = format!(
        "<select id=\"field-{name}\" name=\"{name}\"{required}>",
        name = attr(&field.name),
        required = required_attr(field),
    );
    let blank_label = field.placeholder.as_deref().unwrap_or("");
    html.push_str(&format!(
        "<option value=\"\">{}</option>",
        encode_text(blank_label)
    ));
    let remote = loaded.get(&field.name).map(Vec::as_slice).unwrap_or(&[]);
    for choice in static_choices.iter().chain(remote) {
        html.push_str("<option");
        html.push_str(&format!(" value=\"{}\"", attr(&choice.value)));
        if choice.value == current {
            html.push_str(" selected");
        }
        html.push('>');
        html.push_str(&encode_text(&choice.label));
        html.push_str("</option>");
    }
    html.push_str("</select>");
    html
}

fn required_attr(field: &FieldConfig) -> &'static str {
    if field.required {
        " required"
    } else {
        ""
    }
}

fn placeholder_attr(field: &FieldConfig) -> String {
    match &field.placeholder {
        Some(p) => format!(" placeholder=\"{}\"", attr(p)),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{load_from_value, resolve};
    use serde_json::json;

    fn page() -> ResolvedPage {
        let config = load_from_value(json!({
            "pages": [{
                "path_segment": "departures",
                "columns": [{"key": "city"}],
                "form": [
                    {"section": "Schedule"},
                    {"name": "city", "type": "text", "required": true, "width": "half"},
                    {"name": "leaves_at", "type": "date", "width": "half"},
                    {"name": "notes", "type": "textarea", "help": "Internal only"},
                    {"name": "airline", "type": "select", "source": {"endpoint": "airlines"}}
                ]
            }]
        }))
        .unwrap();
        resolve(&config).unwrap().pages.remove(0)
    }

    #[test]
    fn renders_sections_widths_and_editors_in_order() {
        let page = page();
        let modal = ModalState::open_create(&page);
        let html = render_modal(&page, &modal, &ChoiceLists::new(), None);
        let section = html.find("form-section").unwrap();
        let city = html.find("field-city").unwrap();
        let notes = html.find("<textarea").unwrap();
        assert!(section < city && city < notes);
        assert!(html.contains("col-half"));
        assert!(html.contains("type=\"date\""));
        assert!(html.contains("Internal only"));
        assert!(html.contains("action=\"/departures\""));
    }

    #[test]
    fn edit_mode_prefills_and_targets_the_row() {
        let page = page();
        let row = crate::response::parse_list_response(json!([
            {"id": 5, "city": "Jakarta <CGK>", "leaves_at": "2026-03-14"}
        ]))
        .remove(0);
        let modal = ModalState::open_edit(&page, &row);
        let html = render_modal(&page, &modal, &ChoiceLists::new(), None);
        assert!(html.contains("action=\"/departures/5\""));
        assert!(html.contains("value=\"Jakarta &lt;CGK&gt;\""));
        assert!(html.contains("value=\"2026-03-14\""));
    }

    #[test]
    fn select_merges_loaded_choices_and_marks_selection() {
        let page = page();
        let mut modal = ModalState::open_create(&page);
        modal.form_mut().unwrap().set("airline", json!("GA"));
        let mut lists = ChoiceLists::new();
        lists.insert(
            "airline".into(),
            vec![Choice::new("GA", "Garuda"), Choice::new("SV", "Saudia")],
        );
        let html = render_modal(&page, &modal, &lists, None);
        assert!(html.contains("<option value=\"GA\" selected>Garuda</option>"));
        assert!(html.contains("<option value=\"SV\">Saudia</option>"));
    }

    #[test]
    fn closed_modal_renders_nothing() {
        let page = page();
        assert!(render_modal(&page, &ModalState::Closed, &ChoiceLists::new(), None).is_empty());
    }

    #[test]
    fn failed_submit_shows_the_message() {
        let page = page();
        let modal = ModalState::Create(FormState::from_values(
            crate::response::parse_list_response(json!([{"city": "Surabaya"}])).remove(0),
        ));
        let html = render_modal(&page, &modal, &ChoiceLists::new(), Some("city already exists"));
        assert!(html.contains("form-error"));
        assert!(html.contains("city already exists"));
        assert!(html.contains("value=\"Surabaya\""));
    }
}
