//! Generic collection plumbing shared by every resource family
//!
//! Each Graph resource family is the same five verbs against a different
//! base path, plus the odd action endpoint. Rather than one bespoke class
//! per family, proxies wrap a [`Collection`] pointed at their path and add
//! only what is genuinely specific to them.

use intune_domain::Result;
use serde_json::Value;

use crate::http::{GraphClient, GraphRequest};

/// CRUD + pagination over one collection path.
#[derive(Clone)]
pub(crate) struct Collection {
    client: GraphClient,
    base: String,
}

impl Collection {
    pub(crate) fn new(client: GraphClient, base: impl Into<String>) -> Self {
        Self { client, base: base.into() }
    }

    pub(crate) fn client(&self) -> &GraphClient {
        &self.client
    }

    pub(crate) fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.base, id)
    }

    /// A nested collection under one item, e.g. `{base}/{id}/assignments`.
    pub(crate) fn nested(&self, id: &str, name: &str) -> Self {
        Self { client: self.client.clone(), base: format!("{}/{}/{}", self.base, id, name) }
    }

    pub(crate) async fn list(&self) -> Result<Vec<Value>> {
        self.client.list_all(&self.base).await
    }

    pub(crate) async fn get(&self, id: &str) -> Result<Value> {
        self.client.send(&GraphRequest::get(self.item_path(id))).await
    }

    pub(crate) async fn create(&self, body: Value) -> Result<Value> {
        self.client.send(&GraphRequest::post(&self.base, body)).await
    }

    pub(crate) async fn update(&self, id: &str, body: Value) -> Result<Value> {
        self.client.send(&GraphRequest::patch(self.item_path(id), body)).await
    }

    pub(crate) async fn delete(&self, id: &str) -> Result<()> {
        self.client.send(&GraphRequest::delete(self.item_path(id))).await?;
        Ok(())
    }
}
