//! Device configuration profiles and their assignments

use intune_domain::{AssignmentOptions, IntuneError, Result};
use serde_json::{json, Value};

use super::collection::Collection;
use crate::http::{GraphClient, GraphRequest};

const BASE: &str = "/deviceManagement/deviceConfigurations";

const GROUP_ASSIGNMENT_TYPE: &str = "#microsoft.graph.deviceConfigurationGroupAssignment";

/// Proxy for classic device configuration profiles.
#[derive(Clone)]
pub struct DeviceConfigurations {
    collection: Collection,
}

impl DeviceConfigurations {
    pub(crate) fn new(client: GraphClient) -> Self {
        Self { collection: Collection::new(client, BASE) }
    }

    pub async fn list(&self) -> Result<Vec<Value>> {
        self.collection.list().await
    }

    pub async fn get(&self, configuration_id: &str) -> Result<Value> {
        self.collection.get(configuration_id).await
    }

    /// Create a configuration. The payload must carry its concrete
    /// `@odata.type`; the service rejects untyped payloads.
    pub async fn create(&self, configuration: Value) -> Result<Value> {
        self.collection.create(configuration).await
    }

    pub async fn update(&self, configuration_id: &str, configuration: Value) -> Result<Value> {
        self.collection.update(configuration_id, configuration).await
    }

    pub async fn delete(&self, configuration_id: &str) -> Result<()> {
        self.collection.delete(configuration_id).await
    }

    /// Replace all assignments on a configuration.
    ///
    /// Conflicting options (all-devices plus include groups) are rejected
    /// before any network call.
    pub async fn set_assignments(
        &self,
        configuration_id: &str,
        options: AssignmentOptions,
    ) -> Result<()> {
        let assignments = options.into_assignments()?;
        let body = serde_json::to_value(assignments)
            .map_err(|e| IntuneError::Decode(format!("failed to serialize assignments: {e}")))?;
        let path = format!("{}/assign", self.collection.item_path(configuration_id));
        self.collection
            .client()
            .send(&GraphRequest::post(path, json!({ "assignments": body })))
            .await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Group assignments (legacy per-group resource)
    // ------------------------------------------------------------------

    pub async fn create_group_assignment(
        &self,
        configuration_id: &str,
        group_id: &str,
    ) -> Result<Value> {
        self.collection
            .nested(configuration_id, "groupAssignments")
            .create(json!({
                "@odata.type": GROUP_ASSIGNMENT_TYPE,
                "targetGroupId": group_id,
            }))
            .await
    }

    pub async fn list_group_assignments(&self, configuration_id: &str) -> Result<Vec<Value>> {
        self.collection.nested(configuration_id, "groupAssignments").list().await
    }

    pub async fn get_group_assignment(
        &self,
        configuration_id: &str,
        assignment_id: &str,
    ) -> Result<Value> {
        self.collection.nested(configuration_id, "groupAssignments").get(assignment_id).await
    }

    pub async fn delete_group_assignment(
        &self,
        configuration_id: &str,
        assignment_id: &str,
    ) -> Result<()> {
        self.collection.nested(configuration_id, "groupAssignments").delete(assignment_id).await
    }
}
