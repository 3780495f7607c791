//! Fan-out choice loading: concurrent fetches, isolated failures.

mod common;

use backoffice_sdk::schema::OptionSource;
use backoffice_sdk::{load_choices, Choice, ResourceClient};
use common::{seed, spawn_backend};
use serde_json::json;

fn source(endpoint: &str, label_key: &str) -> OptionSource {
    serde_json::from_value(json!({"endpoint": endpoint, "label_key": label_key})).unwrap()
}

#[tokio::test]
async fn collects_all_lists() {
    let (base, _mock) = spawn_backend(seed(&[
        ("agents", json!([{"id": 1, "name": "Agen A"}])),
        ("packages", json!([{"id": 7, "title": "Umrah Plus"}])),
    ]))
    .await;
    let client = ResourceClient::new(&base);

    let lists = load_choices(
        &client,
        &[
            ("agent_id".to_string(), source("agents", "name")),
            ("package_id".to_string(), source("packages", "title")),
        ],
    )
    .await;

    assert_eq!(lists["agent_id"], vec![Choice::new("1", "Agen A")]);
    assert_eq!(lists["package_id"], vec![Choice::new("7", "Umrah Plus")]);
}

#[tokio::test]
async fn one_failure_does_not_blank_the_others() {
    let (base, mock) = spawn_backend(seed(&[
        ("agents", json!([{"id": 1, "name": "Agen A"}])),
        ("rooms", json!([{"id": 2, "name": "Quad"}])),
    ]))
    .await;
    mock.fail_reads.lock().unwrap().insert("rooms".into());
    let client = ResourceClient::new(&base);

    let lists = load_choices(
        &client,
        &[
            ("agent_id".to_string(), source("agents", "name")),
            ("room_id".to_string(), source("rooms", "name")),
        ],
    )
    .await;

    // The failing source degrades to empty; the other still has choices.
    assert_eq!(lists["agent_id"], vec![Choice::new("1", "Agen A")]);
    assert_eq!(lists["room_id"], Vec::<Choice>::new());
}
