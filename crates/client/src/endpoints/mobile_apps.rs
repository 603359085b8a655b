//! Mobile application management
//!
//! CRUD over `/deviceAppManagement/mobileApps`, relationship and assignment
//! management, the Win32 LOB content endpoints, and the two high-level
//! upload entry points that drive the full content pipeline.

use intune_domain::{
    Assignment, FileEncryptionInfo, IntuneError, MobileApp, MobileAppContentFile, Result,
    WIN32_LOB_APP_TYPE,
};
use serde_json::{json, Value};

use super::collection::Collection;
use crate::http::{GraphClient, GraphRequest};
use crate::upload::{ContentUploadPipeline, UploadOptions};

const BASE: &str = "/deviceAppManagement/mobileApps";

/// Proxy for the mobile application resource family.
#[derive(Clone)]
pub struct MobileApps {
    collection: Collection,
}

impl MobileApps {
    pub(crate) fn new(client: GraphClient) -> Self {
        Self { collection: Collection::new(client, BASE) }
    }

    fn client(&self) -> &GraphClient {
        self.collection.client()
    }

    pub(crate) fn transport(&self) -> &reqwest::Client {
        self.client().transport()
    }

    // ------------------------------------------------------------------
    // CRUD
    // ------------------------------------------------------------------

    /// List every application in the tenant, following pagination.
    pub async fn list(&self) -> Result<Vec<MobileApp>> {
        let items = self.collection.list().await?;
        items
            .into_iter()
            .map(|item| {
                serde_json::from_value(item)
                    .map_err(|e| IntuneError::Decode(format!("failed to decode app: {e}")))
            })
            .collect()
    }

    pub async fn get(&self, app_id: &str) -> Result<MobileApp> {
        self.client().send_as(&GraphRequest::get(self.collection.item_path(app_id))).await
    }

    pub async fn create(&self, app: &MobileApp) -> Result<MobileApp> {
        let body = serde_json::to_value(app)
            .map_err(|e| IntuneError::Decode(format!("failed to serialize app: {e}")))?;
        let created = self.collection.create(body).await?;
        serde_json::from_value(created)
            .map_err(|e| IntuneError::Decode(format!("failed to decode created app: {e}")))
    }

    pub async fn update(&self, app_id: &str, app: &MobileApp) -> Result<MobileApp> {
        let body = serde_json::to_value(app)
            .map_err(|e| IntuneError::Decode(format!("failed to serialize app: {e}")))?;
        let updated = self.collection.update(app_id, body).await?;
        serde_json::from_value(updated)
            .map_err(|e| IntuneError::Decode(format!("failed to decode updated app: {e}")))
    }

    pub async fn delete(&self, app_id: &str) -> Result<()> {
        self.collection.delete(app_id).await
    }

    // ------------------------------------------------------------------
    // Win32 LOB content endpoints (consumed by the upload pipeline)
    // ------------------------------------------------------------------

    fn content_versions_path(&self, app_id: &str) -> String {
        format!("{BASE}/{app_id}/microsoft.graph.win32LobApp/contentVersions")
    }

    fn content_file_path(&self, app_id: &str, version_id: &str, file_id: &str) -> String {
        format!("{}/{version_id}/files/{file_id}", self.content_versions_path(app_id))
    }

    /// Open a new (empty) content version under a Win32 LOB app.
    pub async fn create_content_version(&self, app_id: &str) -> Result<Value> {
        self.client()
            .send(&GraphRequest::post(self.content_versions_path(app_id), json!({})))
            .await
    }

    /// Register a content file's metadata under a content version.
    pub async fn register_content_file(
        &self,
        app_id: &str,
        version_id: &str,
        file: &MobileAppContentFile,
    ) -> Result<Value> {
        let body = serde_json::to_value(file)
            .map_err(|e| IntuneError::Decode(format!("failed to serialize file: {e}")))?;
        let path = format!("{}/{version_id}/files", self.content_versions_path(app_id));
        self.client().send(&GraphRequest::post(path, body)).await
    }

    /// Fetch a content file resource; carries `azureStorageUri` once the
    /// storage destination exists and `uploadState` throughout.
    pub async fn get_content_file(
        &self,
        app_id: &str,
        version_id: &str,
        file_id: &str,
    ) -> Result<Value> {
        self.client()
            .send(&GraphRequest::get(self.content_file_path(app_id, version_id, file_id)))
            .await
    }

    /// Commit an uploaded file with its encryption manifest.
    pub async fn commit_content_file(
        &self,
        app_id: &str,
        version_id: &str,
        file_id: &str,
        encryption: &FileEncryptionInfo,
    ) -> Result<()> {
        let encryption = serde_json::to_value(encryption)
            .map_err(|e| IntuneError::Decode(format!("failed to serialize encryption: {e}")))?;
        let path = format!("{}/commit", self.content_file_path(app_id, version_id, file_id));
        self.client()
            .send(&GraphRequest::post(path, json!({ "fileEncryptionInfo": encryption })))
            .await?;
        Ok(())
    }

    /// Mark a content version as the app's committed (active) one.
    pub async fn commit_app(&self, app_id: &str, version_id: &str) -> Result<()> {
        let body = json!({
            "@odata.type": WIN32_LOB_APP_TYPE,
            "committedContentVersion": version_id,
        });
        self.client()
            .send(&GraphRequest::patch(self.collection.item_path(app_id), body))
            .await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Upload pipeline entry points
    // ------------------------------------------------------------------

    /// Create a Win32 LOB application and upload its (pre-encrypted) content
    /// package, running every stage through the final app commit. Returns
    /// the application as created.
    pub async fn create_with_content(
        &self,
        app: &MobileApp,
        encryption: &FileEncryptionInfo,
        file: &MobileAppContentFile,
        payload: &[u8],
        options: UploadOptions,
    ) -> Result<MobileApp> {
        ContentUploadPipeline::new(self, options).create(app, encryption, file, payload).await
    }

    /// Upload a replacement content package for an existing application.
    /// Returns the final upload state reported by the service.
    pub async fn replace_content(
        &self,
        app_id: &str,
        encryption: &FileEncryptionInfo,
        file: &MobileAppContentFile,
        payload: &[u8],
        options: UploadOptions,
    ) -> Result<String> {
        ContentUploadPipeline::new(self, options).replace(app_id, encryption, file, payload).await
    }

    // ------------------------------------------------------------------
    // Relationships (dependencies / supersedence)
    // ------------------------------------------------------------------

    pub async fn list_relationships(&self, app_id: &str) -> Result<Vec<Value>> {
        self.collection.nested(app_id, "relationships").list().await
    }

    pub async fn get_relationship(&self, app_id: &str, relationship_id: &str) -> Result<Value> {
        self.collection.nested(app_id, "relationships").get(relationship_id).await
    }

    pub async fn update_relationship(
        &self,
        app_id: &str,
        relationship_id: &str,
        relationship: Value,
    ) -> Result<Value> {
        self.collection.nested(app_id, "relationships").update(relationship_id, relationship).await
    }

    pub async fn delete_relationship(&self, app_id: &str, relationship_id: &str) -> Result<()> {
        self.collection.nested(app_id, "relationships").delete(relationship_id).await
    }

    /// Add a relationship. The relationships POST endpoint is not functional
    /// service-side, so this goes through `updateRelationships` with the
    /// existing set plus the new entry, then reads the set back to return
    /// the created entry.
    pub async fn create_relationship(&self, app_id: &str, relationship: Value) -> Result<Value> {
        let target_id = relationship["targetId"].as_str().map(str::to_string);

        let mut relationships = self.list_relationships(app_id).await?;
        relationships.push(relationship);
        self.post_relationships(app_id, relationships).await?;

        let updated = self.list_relationships(app_id).await?;
        updated
            .into_iter()
            .find(|r| r["targetId"].as_str().map(str::to_string) == target_id)
            .ok_or_else(|| {
                IntuneError::Decode("created relationship missing from updated set".to_string())
            })
    }

    /// Drop every relationship on the app.
    pub async fn remove_all_relationships(&self, app_id: &str) -> Result<()> {
        self.post_relationships(app_id, Vec::new()).await
    }

    async fn post_relationships(&self, app_id: &str, relationships: Vec<Value>) -> Result<()> {
        let path = format!("{BASE}/{app_id}/updateRelationships");
        self.client()
            .send(&GraphRequest::post(path, json!({ "relationships": relationships })))
            .await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Assignments
    // ------------------------------------------------------------------

    pub async fn create_assignment(&self, app_id: &str, assignment: Value) -> Result<Value> {
        self.collection.nested(app_id, "assignments").create(assignment).await
    }

    pub async fn list_assignments(&self, app_id: &str) -> Result<Vec<Value>> {
        self.collection.nested(app_id, "assignments").list().await
    }

    pub async fn get_assignment(&self, app_id: &str, assignment_id: &str) -> Result<Value> {
        self.collection.nested(app_id, "assignments").get(assignment_id).await
    }

    pub async fn delete_assignment(&self, app_id: &str, assignment_id: &str) -> Result<()> {
        self.collection.nested(app_id, "assignments").delete(assignment_id).await
    }

    /// Replace the app's assignments wholesale via the `assign` action.
    pub async fn assign(&self, app_id: &str, assignments: Vec<Assignment>) -> Result<()> {
        let body = serde_json::to_value(assignments)
            .map_err(|e| IntuneError::Decode(format!("failed to serialize assignments: {e}")))?;
        let path = format!("{BASE}/{app_id}/assign");
        self.client()
            .send(&GraphRequest::post(path, json!({ "mobileAppAssignments": body })))
            .await?;
        Ok(())
    }
}
