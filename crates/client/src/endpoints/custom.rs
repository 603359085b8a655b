//! Raw passthrough for paths this client does not model

use intune_domain::Result;
use serde_json::Value;

use crate::http::{GraphClient, GraphRequest};

/// Escape hatch: arbitrary verbs against arbitrary Graph paths, still
/// running through the authenticated executor (token attach + 401 recovery).
#[derive(Clone)]
pub struct CustomRequest {
    client: GraphClient,
}

impl CustomRequest {
    pub(crate) fn new(client: GraphClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, path: &str) -> Result<Value> {
        self.client.send(&GraphRequest::get(path)).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<Value> {
        self.client.send(&GraphRequest::post(path, body)).await
    }

    pub async fn patch(&self, path: &str, body: Value) -> Result<Value> {
        self.client.send(&GraphRequest::patch(path, body)).await
    }

    pub async fn put(&self, path: &str, body: Value) -> Result<Value> {
        self.client.send(&GraphRequest::put(path, body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.client.send(&GraphRequest::delete(path)).await
    }
}
