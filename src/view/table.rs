//! Table rendering: search filter, cell projection, placeholder states.

use crate::response::Row;
use crate::schema::{ResolvedColumn, ResolvedPage};
use crate::service::id_segment;
use crate::text::display_value;
use html_escape::{encode_double_quoted_attribute as attr, encode_text};
use serde_json::Value;

/// A row is visible when any of its values, stringified, contains the
/// search term case-insensitively. An empty term matches everything.
pub fn row_matches(row: &Row, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    row.values()
        .any(|v| display_value(v).to_lowercase().contains(&needle))
}

/// Filter a cached row list for display. Pure: the underlying list is
/// untouched.
pub fn filter_rows<'a>(rows: &'a [Row], term: &str) -> Vec<&'a Row> {
    rows.iter().filter(|row| row_matches(row, term)).collect()
}

/// Project one cell: custom renderer when configured, else the raw value
/// when truthy, else a placeholder dash.
pub fn cell_text(column: &ResolvedColumn, row: &Row) -> String {
    let value = row.get(&column.key).cloned().unwrap_or(Value::Null);
    if let Some(render) = &column.render {
        return render(&value, row);
    }
    if is_truthy(&value) {
        display_value(&value)
    } else {
        "-".into()
    }
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render the table for a page: headers in column order, filtered rows,
/// loading / no-data placeholders, and a display-only pagination footer.
/// Action buttons appear per the page's allowed operations.
pub fn render_table(page: &ResolvedPage, rows: &[Row], search: &str, loading: bool) -> String {
    let has_actions = page.can_edit() || page.can_delete();
    let column_count = page.columns.len() + usize::from(has_actions);

    let mut html = String::from("<table class=\"data-table\"><thead><tr>");
    for column in &page.columns {
        html.push_str(&format!("<th>{}</th>", encode_text(&column.label)));
    }
    if has_actions {
        html.push_str("<th class=\"actions\"></th>");
    }
    html.push_str("</tr></thead><tbody>");

    if loading && rows.is_empty() {
        html.push_str(&placeholder_row(column_count, "loading", "Loading..."));
    } else {
        let visible = filter_rows(rows, search);
        if visible.is_empty() {
            html.push_str(&placeholder_row(column_count, "empty", "No data"));
        } else {
            for row in visible {
                html.push_str("<tr>");
                for column in &page.columns {
                    html.push_str(&format!(
                        "<td>{}</td>",
                        encode_text(&cell_text(column, row))
                    ));
                }
                if has_actions {
                    html.push_str("<td class=\"actions\">");
                    html.push_str(&row_actions(page, row));
                    html.push_str("</td>");
                }
                html.push_str("</tr>");
            }
        }
    }
    html.push_str("</tbody></table>");
    // Display-only affordance; the resource layer always fetches the whole list.
    html.push_str(
        "<nav class=\"pagination\"><button disabled>Previous</button><button disabled>Next</button></nav>",
    );
    html
}

fn row_actions(page: &ResolvedPage, row: &Row) -> String {
    let Some(id) = row.get("id") else {
        return String::new();
    };
    let id = id_segment(id);
    let mut html = String::new();
    if page.can_edit() {
        html.push_str(&format!(
            "<a class=\"row-action\" href=\"/{}?modal=edit&amp;id={}\">Edit</a>",
            attr(&page.path_segment),
            attr(&id)
        ));
    }
    if page.can_delete() {
        html.push_str(&format!(
            "<form class=\"row-action\" method=\"post\" action=\"/{}/{}/delete\"><button type=\"submit\">Delete</button></form>",
            attr(&page.path_segment),
            attr(&id)
        ));
    }
    html
}

fn placeholder_row(column_count: usize, class: &str, text: &str) -> String {
    format!(
        "<tr class=\"placeholder {}\"><td colspan=\"{}\">{}</td></tr>",
        class, column_count, text
    )
}
