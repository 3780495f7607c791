//! Generic CRUD execution against the backing REST API.

use crate::error::ApiError;
use crate::response::{parse_list_response, upstream_message, Row};
use serde_json::Value;

/// HTTP client for one backing API, shared by every page. Cheap to clone.
#[derive(Clone, Debug)]
pub struct ResourceClient {
    http: reqwest::Client,
    base_url: String,
}

impl ResourceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_matches('/'))
    }

    fn item_url(&self, endpoint: &str, id: &Value) -> String {
        format!("{}/{}", self.url(endpoint), id_segment(id))
    }

    /// Fetch the full list for an endpoint. The response may be a bare array
    /// or a `{data: [...]}` envelope; anything else yields an empty list.
    pub async fn list(&self, endpoint: &str) -> Result<Vec<Row>, ApiError> {
        let url = self.url(endpoint);
        tracing::debug!(url = %url, "GET list");
        let resp = self.http.get(&url).send().await?;
        let resp = check_status(resp).await?;
        let value = resp
            .json::<Value>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(parse_list_response(value))
    }

    /// Create one row. Returns the server response body (Null when empty).
    pub async fn create(&self, endpoint: &str, body: &Row) -> Result<Value, ApiError> {
        let url = self.url(endpoint);
        tracing::debug!(url = %url, "POST create");
        let resp = self.http.post(&url).json(body).send().await?;
        let resp = check_status(resp).await?;
        Ok(lenient_body(resp).await)
    }

    /// Update one row by id with a partial or whole body.
    pub async fn update(&self, endpoint: &str, id: &Value, body: &Row) -> Result<Value, ApiError> {
        let url = self.item_url(endpoint, id);
        tracing::debug!(url = %url, "PATCH update");
        let resp = self.http.patch(&url).json(body).send().await?;
        let resp = check_status(resp).await?;
        Ok(lenient_body(resp).await)
    }

    /// Reachability probe for readiness checks. Any HTTP answer counts;
    /// only a transport failure is "down".
    pub async fn ping(&self) -> bool {
        let url = format!("{}/", self.base_url);
        self.http.get(&url).send().await.is_ok()
    }

    /// Delete one row by id.
    pub async fn delete(&self, endpoint: &str, id: &Value) -> Result<(), ApiError> {
        let url = self.item_url(endpoint, id);
        tracing::debug!(url = %url, "DELETE");
        let resp = self.http.delete(&url).send().await?;
        check_status(resp).await?;
        Ok(())
    }
}

/// Render a row id into a URL path segment.
pub fn id_segment(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        message: upstream_message(status.as_u16(), &body),
    })
}

/// Mutation response bodies only signal success; an empty or non-JSON body
/// is not an error.
async fn lenient_body(resp: reqwest::Response) -> Value {
    let text = resp.text().await.unwrap_or_default();
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&text).unwrap_or(Value::Null)
}
