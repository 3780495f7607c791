//! Example consumer: a travel-agency back office built on backoffice-sdk.
//!
//! Run from repo root: `cargo run -p example-consumer`
//! Points at the REST API named by BACKEND_URL (default http://localhost:8080).

use backoffice_sdk::{dashboard_router, load_from_value, resolve, AppState, ResourceClient};
use serde_json::json;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("backoffice_sdk=info")),
        )
        .init();

    let backend_url =
        std::env::var("BACKEND_URL").unwrap_or_else(|_| "http://localhost:8080".into());

    let config = load_from_value(json!({
        "pages": [
            {
                "path_segment": "jamaah",
                "title": "Jamaah",
                "columns": [
                    {"key": "name"},
                    {"key": "passport_no", "label": "Passport"},
                    {"key": "city"},
                    {"key": "departure_date", "label": "Departure"}
                ],
                "form": [
                    {"section": "Identity"},
                    {"name": "name", "type": "text", "required": true, "width": "half"},
                    {"name": "passport_no", "type": "text", "width": "half",
                     "help": "As printed in the passport"},
                    {"name": "email", "type": "email", "width": "half"},
                    {"name": "city", "type": "text", "width": "half"},
                    {"section": "Trip"},
                    {"name": "departure_date", "type": "date", "width": "half"},
                    {"name": "package_id", "type": "select", "width": "half",
                     "source": {"endpoint": "packages", "label_key": "title"}}
                ]
            },
            {
                "path_segment": "bookings",
                "title": "Bookings",
                "columns": [
                    {"key": "booking_code", "label": "Code"},
                    {"key": "customer_name", "label": "Customer"},
                    {"key": "agent_name", "label": "Agent"},
                    {"key": "amount"},
                    {"key": "status"}
                ],
                "form": [
                    {"name": "booking_code", "type": "text", "required": true, "width": "half"},
                    {"name": "customer_name", "type": "text", "required": true, "width": "half"},
                    {"name": "agent_id", "type": "select", "width": "half",
                     "source": {"endpoint": "agents"}},
                    {"name": "amount", "type": "number", "width": "half"},
                    {"name": "status", "type": "select", "width": "half", "default": "draft",
                     "choices": [
                         {"value": "draft", "label": "Draft"},
                         {"value": "paid", "label": "Paid"},
                         {"value": "cancelled", "label": "Cancelled"}
                     ]},
                    {"name": "notes", "type": "textarea"}
                ]
            },
            {
                "path_segment": "agents",
                "title": "Agents",
                "columns": [
                    {"key": "name"},
                    {"key": "phone"},
                    {"key": "email"}
                ],
                "form": [
                    {"name": "name", "type": "text", "required": true},
                    {"name": "phone", "type": "text", "width": "half"},
                    {"name": "email", "type": "email", "width": "half"}
                ],
                "operations": ["create", "update"]
            }
        ]
    }))?;

    let dashboard = resolve(&config)?
        .with_renderer("bookings", "amount", |value, _row| {
            match value.as_f64() {
                Some(n) => format!("Rp {:.0}", n),
                None => "-".into(),
            }
        })
        .with_renderer("bookings", "agent_name", |value, row| {
            // Older rows only carry agent_id.
            match value.as_str() {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => row
                    .get("agent_id")
                    .map(|id| format!("#{}", id))
                    .unwrap_or_else(|| "-".into()),
            }
        });

    let state = AppState::new(ResourceClient::new(backend_url), dashboard);
    let app = dashboard_router(state);

    let listener = TcpListener::bind("127.0.0.1:3000").await?;
    let port = listener.local_addr()?.port();
    tracing::info!("Back office listening on http://127.0.0.1:{}", port);
    axum::serve(listener, app).await?;
    Ok(())
}
