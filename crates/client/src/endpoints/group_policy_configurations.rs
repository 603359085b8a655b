//! Administrative template (group policy) configurations

use intune_domain::Result;
use serde_json::{json, Value};

use super::collection::Collection;
use crate::http::GraphClient;

const BASE: &str = "/deviceManagement/groupPolicyConfigurations";

/// Proxy for administrative-template policy configurations and their
/// definition values.
#[derive(Clone)]
pub struct GroupPolicyConfigurations {
    collection: Collection,
}

impl GroupPolicyConfigurations {
    pub(crate) fn new(client: GraphClient) -> Self {
        Self { collection: Collection::new(client, BASE) }
    }

    pub async fn list(&self) -> Result<Vec<Value>> {
        self.collection.list().await
    }

    pub async fn get(&self, configuration_id: &str) -> Result<Value> {
        self.collection.get(configuration_id).await
    }

    pub async fn create(&self, configuration: Value) -> Result<Value> {
        self.collection.create(configuration).await
    }

    pub async fn update(&self, configuration_id: &str, configuration: Value) -> Result<Value> {
        self.collection.update(configuration_id, configuration).await
    }

    pub async fn delete(&self, configuration_id: &str) -> Result<()> {
        self.collection.delete(configuration_id).await
    }

    /// Create a configuration and seed it with definition values in one
    /// call sequence.
    pub async fn create_with_definition_values(
        &self,
        configuration: Value,
        definition_values: Vec<Value>,
    ) -> Result<Value> {
        let created = self.create(configuration).await?;
        let id = created["id"]
            .as_str()
            .ok_or_else(|| {
                intune_domain::IntuneError::Decode(
                    "created configuration has no id".to_string(),
                )
            })?
            .to_string();
        for definition_value in definition_values {
            self.create_definition_value(&id, definition_value).await?;
        }
        Ok(created)
    }

    /// Fetch a configuration together with its definition values.
    pub async fn get_with_definition_values(&self, configuration_id: &str) -> Result<Value> {
        let mut configuration = self.get(configuration_id).await?;
        let values = self.list_definition_values(configuration_id).await?;
        configuration["definitionValues"] = Value::Array(values);
        Ok(configuration)
    }

    // ------------------------------------------------------------------
    // Definition values
    // ------------------------------------------------------------------

    pub async fn list_definition_values(&self, configuration_id: &str) -> Result<Vec<Value>> {
        self.collection.nested(configuration_id, "definitionValues").list().await
    }

    pub async fn get_definition_value(
        &self,
        configuration_id: &str,
        definition_value_id: &str,
    ) -> Result<Value> {
        self.collection.nested(configuration_id, "definitionValues").get(definition_value_id).await
    }

    pub async fn create_definition_value(
        &self,
        configuration_id: &str,
        definition_value: Value,
    ) -> Result<Value> {
        self.collection.nested(configuration_id, "definitionValues").create(definition_value).await
    }

    pub async fn update_definition_value(
        &self,
        configuration_id: &str,
        definition_value_id: &str,
        definition_value: Value,
    ) -> Result<Value> {
        self.collection
            .nested(configuration_id, "definitionValues")
            .update(definition_value_id, definition_value)
            .await
    }

    pub async fn delete_definition_value(
        &self,
        configuration_id: &str,
        definition_value_id: &str,
    ) -> Result<()> {
        self.collection
            .nested(configuration_id, "definitionValues")
            .delete(definition_value_id)
            .await
    }

    // ------------------------------------------------------------------
    // Assignments
    // ------------------------------------------------------------------

    pub async fn create_assignment(&self, configuration_id: &str, group_id: &str) -> Result<Value> {
        self.collection
            .nested(configuration_id, "assignments")
            .create(json!({
                "target": {
                    "@odata.type": "#microsoft.graph.groupAssignmentTarget",
                    "groupId": group_id,
                }
            }))
            .await
    }

    pub async fn list_assignments(&self, configuration_id: &str) -> Result<Vec<Value>> {
        self.collection.nested(configuration_id, "assignments").list().await
    }

    pub async fn get_assignment(
        &self,
        configuration_id: &str,
        assignment_id: &str,
    ) -> Result<Value> {
        self.collection.nested(configuration_id, "assignments").get(assignment_id).await
    }

    pub async fn delete_assignment(
        &self,
        configuration_id: &str,
        assignment_id: &str,
    ) -> Result<()> {
        self.collection.nested(configuration_id, "assignments").delete(assignment_id).await
    }
}
