//! Script deployment: PowerShell, shell (macOS), and remediation scripts
//!
//! Three resource families with identical shapes, differing only in path and
//! the assignment actions the service offers for each.

use intune_domain::{IntuneError, Result};
use serde_json::{json, Value};

use super::collection::Collection;
use crate::http::{GraphClient, GraphRequest};

const MANAGEMENT_BASE: &str = "/deviceManagement/deviceManagementScripts";
const SHELL_BASE: &str = "/deviceManagement/deviceShellScripts";
const HEALTH_BASE: &str = "/deviceManagement/deviceHealthScripts";

macro_rules! script_family {
    ($name:ident, $base:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone)]
        pub struct $name {
            collection: Collection,
        }

        impl $name {
            pub(crate) fn new(client: GraphClient) -> Self {
                Self { collection: Collection::new(client, $base) }
            }

            pub async fn list(&self) -> Result<Vec<Value>> {
                self.collection.list().await
            }

            pub async fn get(&self, script_id: &str) -> Result<Value> {
                self.collection.get(script_id).await
            }

            pub async fn create(&self, script: Value) -> Result<Value> {
                self.collection.create(script).await
            }

            pub async fn update(&self, script_id: &str, script: Value) -> Result<Value> {
                self.collection.update(script_id, script).await
            }

            pub async fn delete(&self, script_id: &str) -> Result<()> {
                self.collection.delete(script_id).await
            }

            pub async fn list_assignments(&self, script_id: &str) -> Result<Vec<Value>> {
                self.collection.nested(script_id, "assignments").list().await
            }

            pub async fn get_assignment(
                &self,
                script_id: &str,
                assignment_id: &str,
            ) -> Result<Value> {
                self.collection.nested(script_id, "assignments").get(assignment_id).await
            }

            pub async fn create_assignment(
                &self,
                script_id: &str,
                assignment: Value,
            ) -> Result<Value> {
                self.collection.nested(script_id, "assignments").create(assignment).await
            }

            pub async fn delete_assignment(
                &self,
                script_id: &str,
                assignment_id: &str,
            ) -> Result<()> {
                self.collection.nested(script_id, "assignments").delete(assignment_id).await
            }
        }
    };
}

script_family!(
    DeviceManagementScripts,
    MANAGEMENT_BASE,
    "Proxy for Windows PowerShell deployment scripts."
);
script_family!(DeviceShellScripts, SHELL_BASE, "Proxy for macOS shell scripts.");
script_family!(
    DeviceHealthScripts,
    HEALTH_BASE,
    "Proxy for proactive remediation (health) scripts."
);

impl DeviceShellScripts {
    /// Replace the script's assignments wholesale via the `assign` action.
    pub async fn assign(&self, script_id: &str, assignments: Vec<Value>) -> Result<()> {
        if assignments.iter().any(|a| a.get("target").is_none()) {
            return Err(IntuneError::InvalidInput(
                "every shell script assignment needs a target".to_string(),
            ));
        }
        let path = format!("{}/assign", self.collection.item_path(script_id));
        self.collection
            .client()
            .send(&GraphRequest::post(path, json!({ "deviceManagementScriptAssignments": assignments })))
            .await?;
        Ok(())
    }

    /// Assign the script to one group.
    pub async fn assign_to_group(&self, script_id: &str, group_id: &str) -> Result<()> {
        self.assign(
            script_id,
            vec![json!({
                "target": {
                    "@odata.type": "#microsoft.graph.groupAssignmentTarget",
                    "groupId": group_id,
                }
            })],
        )
        .await
    }

    /// Assign the script to every device in the tenant.
    pub async fn assign_to_all_devices(&self, script_id: &str) -> Result<()> {
        self.assign(
            script_id,
            vec![json!({
                "target": {
                    "@odata.type": "#microsoft.graph.allDevicesAssignmentTarget",
                }
            })],
        )
        .await
    }
}
