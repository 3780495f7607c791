//! Page handlers: render lists, translate form posts into mutations.
//!
//! A page GET mounts a fresh [`Resource`] (one initial fetch), renders, and
//! drops it; there is no cross-request cache. A failed mutation re-renders
//! the page with the modal still open and the submitted values intact;
//! success redirects back to the list.

use crate::error::AppError;
use crate::options::{load_choices, ChoiceLists};
use crate::resource::Resource;
use crate::response::Row;
use crate::schema::{FieldKind, FormEntry, ResolvedPage};
use crate::service::{id_segment, FormValidator};
use crate::state::AppState;
use crate::view::{render_page, FormState, ModalState, ViewState};
use axum::extract::{Form, Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Deserialize, Default)]
pub struct PageQuery {
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    modal: Option<String>,
    #[serde(default)]
    id: Option<String>,
}

fn resolve_page<'a>(state: &'a AppState, segment: &str) -> Result<&'a ResolvedPage, AppError> {
    state
        .dashboard
        .page_by_path(segment)
        .ok_or_else(|| AppError::NotFound(segment.to_string()))
}

/// Row ids arrive as path strings; integers go back to JSON numbers so the
/// upstream comparison matches what the list returned.
fn parse_id(id_str: &str) -> Value {
    match id_str.parse::<i64>() {
        Ok(n) => Value::Number(n.into()),
        Err(_) => Value::String(id_str.to_string()),
    }
}

/// Coerce an urlencoded form body into typed JSON values by field kind.
/// Empty inputs are omitted on create and sent as null on edit (an explicit
/// clear); the validator decides whether that is acceptable.
fn coerce_form_body(page: &ResolvedPage, raw: &HashMap<String, String>, editing: bool) -> Row {
    let mut body = Row::new();
    for entry in &page.entries {
        let field = match entry {
            FormEntry::Section { .. } => continue,
            FormEntry::Input(field) => field,
        };
        let Some(raw_value) = raw.get(&field.name) else {
            continue;
        };
        let trimmed = raw_value.trim();
        if trimmed.is_empty() {
            if editing {
                body.insert(field.name.clone(), Value::Null);
            }
            continue;
        }
        let value = match &field.kind {
            FieldKind::Number => trimmed
                .parse::<i64>()
                .map(Value::from)
                .or_else(|_| trimmed.parse::<f64>().map(Value::from))
                .unwrap_or_else(|_| Value::String(trimmed.to_string())),
            FieldKind::Text
            | FieldKind::Email
            | FieldKind::Date
            | FieldKind::Time
            | FieldKind::Url
            | FieldKind::Password
            | FieldKind::Textarea
            | FieldKind::Select { .. } => Value::String(raw_value.clone()),
        };
        body.insert(field.name.clone(), value);
    }
    body
}

async fn page_choices(state: &AppState, page: &ResolvedPage, modal_open: bool) -> ChoiceLists {
    if modal_open && !page.option_sources.is_empty() {
        load_choices(&state.client, &page.option_sources).await
    } else {
        ChoiceLists::new()
    }
}

pub async fn index(State(state): State<AppState>) -> Result<Response, AppError> {
    let first = state
        .dashboard
        .pages
        .first()
        .ok_or_else(|| AppError::NotFound("dashboard has no pages".into()))?;
    Ok(Redirect::to(&format!("/{}", first.path_segment)).into_response())
}

pub async fn show(
    State(state): State<AppState>,
    Path(page_segment): Path<String>,
    Query(params): Query<PageQuery>,
) -> Result<Response, AppError> {
    let page = resolve_page(&state, &page_segment)?.clone();
    let resource = Resource::attach(state.client.clone(), page.endpoint.clone()).await;

    let modal = match (params.modal.as_deref(), params.id.as_deref()) {
        (Some("new"), _) if page.can_create() => ModalState::open_create(&page),
        (Some("edit"), Some(raw_id)) if page.can_edit() => {
            let found = resource
                .state()
                .rows()
                .iter()
                .find(|row| row.get("id").map(|v| id_segment(v) == raw_id).unwrap_or(false));
            match found {
                Some(row) => ModalState::open_edit(&page, row),
                None => ModalState::Closed,
            }
        }
        _ => ModalState::Closed,
    };
    let view = ViewState {
        search: params.q.unwrap_or_default(),
        modal,
    };

    let choices = page_choices(&state, &page, view.modal.is_open()).await;
    Ok(Html(render_page(
        &state.dashboard,
        &page,
        resource.state(),
        &view,
        &choices,
        None,
    ))
    .into_response())
}

pub async fn create(
    State(state): State<AppState>,
    Path(page_segment): Path<String>,
    Form(raw): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let page = resolve_page(&state, &page_segment)?.clone();
    if !page.can_create() {
        return Err(AppError::BadRequest("create not allowed".into()));
    }
    let body = coerce_form_body(&page, &raw, false);

    if let Err(e) = FormValidator::validate(&body, &page.validation) {
        return reopen_with_error(&state, &page, ModalState::Create(FormState::from_values(body)), e).await;
    }

    let mut resource = Resource::attach(state.client.clone(), page.endpoint.clone()).await;
    match resource.create(&body).await {
        Ok(_) => Ok(Redirect::to(&format!("/{}", page.path_segment)).into_response()),
        Err(e) => {
            let modal = ModalState::Create(FormState::from_values(body));
            render_after_failed_mutation(&state, &page, resource, modal, e.user_message()).await
        }
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path((page_segment, id_str)): Path<(String, String)>,
    Form(raw): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let page = resolve_page(&state, &page_segment)?.clone();
    if !page.can_edit() {
        return Err(AppError::BadRequest("update not allowed".into()));
    }
    let id = parse_id(&id_str);
    let body = coerce_form_body(&page, &raw, true);

    if let Err(e) = FormValidator::validate(&body, &page.validation) {
        let modal = ModalState::Edit {
            id,
            form: FormState::from_values(body),
        };
        return reopen_with_error(&state, &page, modal, e).await;
    }

    let mut resource = Resource::attach(state.client.clone(), page.endpoint.clone()).await;
    match resource.update(&id, &body).await {
        Ok(_) => Ok(Redirect::to(&format!("/{}", page.path_segment)).into_response()),
        Err(e) => {
            let modal = ModalState::Edit {
                id,
                form: FormState::from_values(body),
            };
            render_after_failed_mutation(&state, &page, resource, modal, e.user_message()).await
        }
    }
}

pub async fn delete_row(
    State(state): State<AppState>,
    Path((page_segment, id_str)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let page = resolve_page(&state, &page_segment)?.clone();
    if !page.can_delete() {
        return Err(AppError::BadRequest("delete not allowed".into()));
    }
    let id = parse_id(&id_str);
    let mut resource = Resource::attach(state.client.clone(), page.endpoint.clone()).await;
    match resource.delete(&id).await {
        Ok(()) => Ok(Redirect::to(&format!("/{}", page.path_segment)).into_response()),
        // The stored message renders as the list banner.
        Err(_) => Ok(Html(render_page(
            &state.dashboard,
            &page,
            resource.state(),
            &ViewState::default(),
            &ChoiceLists::new(),
            None,
        ))
        .into_response()),
    }
}

/// Validation failed before anything was sent: re-render with the modal
/// open, the submitted values intact, and the message inline.
async fn reopen_with_error(
    state: &AppState,
    page: &ResolvedPage,
    modal: ModalState,
    error: AppError,
) -> Result<Response, AppError> {
    let resource = Resource::attach(state.client.clone(), page.endpoint.clone()).await;
    let view = ViewState {
        search: String::new(),
        modal,
    };
    let choices = page_choices(state, page, true).await;
    Ok(Html(render_page(
        &state.dashboard,
        page,
        resource.state(),
        &view,
        &choices,
        Some(&error.to_string()),
    ))
    .into_response())
}

/// The upstream rejected the mutation: keep the modal open with the user's
/// input and show the upstream message. The list is whatever the already
/// mounted resource last saw.
async fn render_after_failed_mutation(
    state: &AppState,
    page: &ResolvedPage,
    resource: Resource,
    modal: ModalState,
    message: String,
) -> Result<Response, AppError> {
    let view = ViewState {
        search: String::new(),
        modal,
    };
    let choices = page_choices(state, page, true).await;
    Ok(Html(render_page(
        &state.dashboard,
        page,
        resource.state(),
        &view,
        &choices,
        Some(&message),
    ))
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{load_from_value, resolve};
    use serde_json::json;

    fn page() -> ResolvedPage {
        let config = load_from_value(json!({
            "pages": [{
                "path_segment": "bookings",
                "columns": [{"key": "pax"}],
                "form": [
                    {"name": "pax", "type": "number"},
                    {"name": "note", "type": "text"},
                    {"name": "status", "type": "select", "choices": [
                        {"value": "draft", "label": "Draft"}
                    ]}
                ]
            }]
        }))
        .unwrap();
        resolve(&config).unwrap().pages.remove(0)
    }

    fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn numbers_coerce_and_unknown_keys_are_dropped() {
        let body = coerce_form_body(
            &page(),
            &raw(&[("pax", "12"), ("status", "draft"), ("bogus", "x")]),
            false,
        );
        assert_eq!(body.get("pax"), Some(&json!(12)));
        assert_eq!(body.get("status"), Some(&json!("draft")));
        assert!(!body.contains_key("bogus"));
    }

    #[test]
    fn empty_inputs_are_omitted_on_create_and_null_on_edit() {
        let body = coerce_form_body(&page(), &raw(&[("note", "  ")]), false);
        assert!(!body.contains_key("note"));
        let body = coerce_form_body(&page(), &raw(&[("note", "")]), true);
        assert_eq!(body.get("note"), Some(&Value::Null));
    }

    #[test]
    fn id_strings_keep_their_shape() {
        assert_eq!(parse_id("42"), json!(42));
        assert_eq!(parse_id("a1-b2"), json!("a1-b2"));
    }
}
