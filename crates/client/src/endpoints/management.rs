//! Security baseline templates and intents

use intune_domain::{IntuneError, Result};
use serde_json::{json, Value};

use super::collection::Collection;
use crate::http::{GraphClient, GraphRequest};

const INTENTS_BASE: &str = "/deviceManagement/intents";
const TEMPLATES_BASE: &str = "/deviceManagement/templates";

/// Proxy for device management intents (instantiated templates).
#[derive(Clone)]
pub struct Intents {
    collection: Collection,
}

impl Intents {
    pub(crate) fn new(client: GraphClient) -> Self {
        Self { collection: Collection::new(client, INTENTS_BASE) }
    }

    pub async fn list(&self) -> Result<Vec<Value>> {
        self.collection.list().await
    }

    pub async fn get(&self, intent_id: &str) -> Result<Value> {
        self.collection.get(intent_id).await
    }

    pub async fn create(&self, intent: Value) -> Result<Value> {
        self.collection.create(intent).await
    }

    pub async fn update(&self, intent_id: &str, intent: Value) -> Result<Value> {
        self.collection.update(intent_id, intent).await
    }

    pub async fn delete(&self, intent_id: &str) -> Result<()> {
        self.collection.delete(intent_id).await
    }
}

/// Proxy for device management templates.
#[derive(Clone)]
pub struct Templates {
    collection: Collection,
}

impl Templates {
    pub(crate) fn new(client: GraphClient) -> Self {
        Self { collection: Collection::new(client, TEMPLATES_BASE) }
    }

    pub async fn list(&self) -> Result<Vec<Value>> {
        self.collection.list().await
    }

    pub async fn get(&self, template_id: &str) -> Result<Value> {
        self.collection.get(template_id).await
    }

    pub async fn create(&self, template: Value) -> Result<Value> {
        self.collection.create(template).await
    }

    pub async fn update(&self, template_id: &str, template: Value) -> Result<Value> {
        self.collection.update(template_id, template).await
    }

    pub async fn delete(&self, template_id: &str) -> Result<()> {
        self.collection.delete(template_id).await
    }

    /// Instantiate a template as an intent with a settings delta.
    pub async fn create_instance(
        &self,
        template_id: &str,
        display_name: &str,
        description: &str,
        settings_delta: Vec<Value>,
        role_scope_tag_ids: Vec<String>,
    ) -> Result<Value> {
        if display_name.trim().is_empty() {
            return Err(IntuneError::InvalidInput(
                "template instance needs a display name".to_string(),
            ));
        }
        let path = format!("{}/createInstance", self.collection.item_path(template_id));
        self.collection
            .client()
            .send(&GraphRequest::post(
                path,
                json!({
                    "displayName": display_name,
                    "description": description,
                    "settingsDelta": settings_delta,
                    "roleScopeTagIds": role_scope_tag_ids,
                }),
            ))
            .await
    }
}
