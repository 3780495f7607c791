//! Client-side lifecycle of one list resource: fetch, mutate, refetch.

use crate::error::ApiError;
use crate::response::Row;
use crate::service::ResourceClient;
use serde_json::Value;

/// Cached list, loading flag, and last error for one endpoint. Owned by
/// [`Resource`]; consumers only read it. `rows` is always a list, possibly
/// empty, so renderers can iterate without checking.
#[derive(Clone, Debug, Default)]
pub struct ResourceState {
    rows: Vec<Row>,
    loading: bool,
    error: Option<String>,
}

impl ResourceState {
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// One mounted list resource. Created per page view, discarded afterwards;
/// there is no cross-page cache.
#[derive(Debug)]
pub struct Resource {
    client: ResourceClient,
    endpoint: String,
    state: ResourceState,
}

impl Resource {
    /// Attach to an endpoint and run the initial fetch.
    pub async fn attach(client: ResourceClient, endpoint: impl Into<String>) -> Self {
        let mut resource = Self {
            client,
            endpoint: endpoint.into(),
            state: ResourceState::default(),
        };
        resource.refresh().await;
        resource
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn state(&self) -> &ResourceState {
        &self.state
    }

    /// Point at a different endpoint and re-run the initial fetch. No-op
    /// when the endpoint is unchanged.
    pub async fn set_endpoint(&mut self, endpoint: impl Into<String>) {
        let endpoint = endpoint.into();
        if endpoint == self.endpoint {
            return;
        }
        self.endpoint = endpoint;
        self.refresh().await;
    }

    /// Reload the list, replacing `rows` wholesale. Read failures never
    /// escape: the list degrades to empty and the message is kept on the
    /// state for the page to show.
    pub async fn refresh(&mut self) {
        self.state.loading = true;
        self.state.error = None;
        match self.client.list(&self.endpoint).await {
            Ok(rows) => {
                self.state.rows = rows;
            }
            Err(e) => {
                tracing::warn!(endpoint = %self.endpoint, error = %e, "list failed");
                self.state.rows = Vec::new();
                self.state.error = Some(e.user_message());
            }
        }
        self.state.loading = false;
    }

    /// Create a row, then reload so server-assigned fields (id, timestamps)
    /// are visible before control returns. The failure is stored and
    /// re-raised so the caller can keep the form open.
    pub async fn create(&mut self, item: &Row) -> Result<Value, ApiError> {
        match self.client.create(&self.endpoint, item).await {
            Ok(response) => {
                self.refresh().await;
                Ok(response)
            }
            Err(e) => {
                self.state.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Update a row by id; same reload-and-return contract as `create`.
    pub async fn update(&mut self, id: &Value, fields: &Row) -> Result<Value, ApiError> {
        match self.client.update(&self.endpoint, id, fields).await {
            Ok(response) => {
                self.refresh().await;
                Ok(response)
            }
            Err(e) => {
                self.state.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Delete a row by id, then reload.
    pub async fn delete(&mut self, id: &Value) -> Result<(), ApiError> {
        match self.client.delete(&self.endpoint, id).await {
            Ok(()) => {
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                self.state.error = Some(e.user_message());
                Err(e)
            }
        }
    }
}
