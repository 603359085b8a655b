//! Directory objects: groups and users

use intune_domain::Result;
use serde_json::Value;

use super::collection::Collection;
use crate::http::GraphClient;

/// Proxy for Azure AD groups.
#[derive(Clone)]
pub struct Groups {
    collection: Collection,
}

impl Groups {
    pub(crate) fn new(client: GraphClient) -> Self {
        Self { collection: Collection::new(client, "/groups") }
    }

    pub async fn list(&self) -> Result<Vec<Value>> {
        self.collection.list().await
    }

    pub async fn get(&self, group_id: &str) -> Result<Value> {
        self.collection.get(group_id).await
    }

    pub async fn create(&self, group: Value) -> Result<Value> {
        self.collection.create(group).await
    }

    pub async fn update(&self, group_id: &str, group: Value) -> Result<Value> {
        self.collection.update(group_id, group).await
    }

    pub async fn delete(&self, group_id: &str) -> Result<()> {
        self.collection.delete(group_id).await
    }
}

/// Proxy for Azure AD users.
#[derive(Clone)]
pub struct Users {
    collection: Collection,
}

impl Users {
    pub(crate) fn new(client: GraphClient) -> Self {
        Self { collection: Collection::new(client, "/users") }
    }

    pub async fn list(&self) -> Result<Vec<Value>> {
        self.collection.list().await
    }

    pub async fn get(&self, user_id: &str) -> Result<Value> {
        self.collection.get(user_id).await
    }

    pub async fn create(&self, user: Value) -> Result<Value> {
        self.collection.create(user).await
    }

    pub async fn update(&self, user_id: &str, user: Value) -> Result<Value> {
        self.collection.update(user_id, user).await
    }

    pub async fn delete(&self, user_id: &str) -> Result<()> {
        self.collection.delete(user_id).await
    }

    /// Per-user application install intent and state records.
    pub async fn list_app_intent_and_states(&self, user_id: &str) -> Result<Vec<Value>> {
        self.collection.nested(user_id, "mobileAppIntentAndStates").list().await
    }
}
