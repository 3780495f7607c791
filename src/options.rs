//! Fan-out loading of dropdown choice lists (master data).

use crate::schema::{Choice, OptionSource};
use crate::service::ResourceClient;
use crate::text::display_value;
use futures::future::join_all;
use std::collections::HashMap;

/// Loaded choice lists, keyed by field name.
pub type ChoiceLists = HashMap<String, Vec<Choice>>;

/// Fetch every option source concurrently and collect the results. One
/// failed source degrades to an empty list without aborting the others, so
/// a form never loses all its dropdowns to a single broken endpoint.
pub async fn load_choices(
    client: &ResourceClient,
    sources: &[(String, OptionSource)],
) -> ChoiceLists {
    let fetches = sources.iter().map(|(field, source)| async move {
        let choices = match client.list(&source.endpoint).await {
            Ok(rows) => rows_to_choices(&rows, source),
            Err(e) => {
                tracing::warn!(endpoint = %source.endpoint, error = %e, "choice list failed");
                Vec::new()
            }
        };
        (field.clone(), choices)
    });
    join_all(fetches).await.into_iter().collect()
}

fn rows_to_choices(rows: &[crate::response::Row], source: &OptionSource) -> Vec<Choice> {
    rows.iter()
        .filter_map(|row| {
            let value = display_value(row.get(&source.value_key)?);
            let label = row
                .get(&source.label_key)
                .map(display_value)
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| value.clone());
            Some(Choice { value, label })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(value: serde_json::Value) -> Vec<crate::response::Row> {
        crate::response::parse_list_response(value)
    }

    #[test]
    fn maps_rows_using_configured_keys() {
        let source: OptionSource =
            serde_json::from_value(json!({"endpoint": "agents", "label_key": "full_name"}))
                .unwrap();
        let choices = rows_to_choices(
            &rows(json!([
                {"id": 7, "full_name": "Agen A"},
                {"id": 9, "full_name": "Agen B"}
            ])),
            &source,
        );
        assert_eq!(choices, vec![Choice::new("7", "Agen A"), Choice::new("9", "Agen B")]);
    }

    #[test]
    fn falls_back_to_the_value_when_the_label_is_missing() {
        let source: OptionSource =
            serde_json::from_value(json!({"endpoint": "agents"})).unwrap();
        let choices = rows_to_choices(&rows(json!([{"id": "x1"}])), &source);
        assert_eq!(choices, vec![Choice::new("x1", "x1")]);
    }

    #[test]
    fn rows_without_the_value_key_are_skipped() {
        let source: OptionSource =
            serde_json::from_value(json!({"endpoint": "agents"})).unwrap();
        let choices = rows_to_choices(
            &rows(json!([{"name": "no id"}, {"id": 3, "name": "ok"}])),
            &source,
        );
        assert_eq!(choices, vec![Choice::new("3", "ok")]);
    }
}
