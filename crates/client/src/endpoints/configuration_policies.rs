//! Settings-catalog configuration policies

use intune_domain::Result;
use serde_json::{json, Value};

use super::collection::Collection;
use crate::http::GraphClient;

const BASE: &str = "/deviceManagement/configurationPolicies";

/// Proxy for settings-catalog policies (`configurationPolicies`).
#[derive(Clone)]
pub struct ConfigurationPolicies {
    collection: Collection,
}

impl ConfigurationPolicies {
    pub(crate) fn new(client: GraphClient) -> Self {
        Self { collection: Collection::new(client, BASE) }
    }

    pub async fn list(&self) -> Result<Vec<Value>> {
        self.collection.list().await
    }

    pub async fn get(&self, policy_id: &str) -> Result<Value> {
        self.collection.get(policy_id).await
    }

    pub async fn create(&self, policy: Value) -> Result<Value> {
        self.collection.create(policy).await
    }

    pub async fn update(&self, policy_id: &str, policy: Value) -> Result<Value> {
        self.collection.update(policy_id, policy).await
    }

    pub async fn delete(&self, policy_id: &str) -> Result<()> {
        self.collection.delete(policy_id).await
    }

    /// Assign the policy to a single group, leaving other assignments as-is.
    pub async fn assign_to_group(&self, policy_id: &str, group_id: &str) -> Result<Value> {
        self.collection
            .nested(policy_id, "assignments")
            .create(json!({
                "target": {
                    "@odata.type": "#microsoft.graph.groupAssignmentTarget",
                    "groupId": group_id,
                }
            }))
            .await
    }

    pub async fn list_assignments(&self, policy_id: &str) -> Result<Vec<Value>> {
        self.collection.nested(policy_id, "assignments").list().await
    }

    pub async fn get_assignment(&self, policy_id: &str, assignment_id: &str) -> Result<Value> {
        self.collection.nested(policy_id, "assignments").get(assignment_id).await
    }

    pub async fn delete_assignment(&self, policy_id: &str, assignment_id: &str) -> Result<()> {
        self.collection.nested(policy_id, "assignments").delete(assignment_id).await
    }
}
