//! The upload-and-commit state machine
//!
//! Stages run in strict order with no skipping and no re-entry:
//!
//! create app → create content version → register file → await storage URI →
//! upload bytes → commit file → await commit success → commit app
//!
//! A failure at any stage aborts the pipeline with the stage recorded in the
//! error; there is no compensation, so the caller must treat a failed upload
//! as leaving partially created resources behind.

use std::future::Future;
use std::time::Instant;

use intune_domain::{
    FileEncryptionInfo, IntuneError, MobileApp, MobileAppContentFile, Result, UploadStage,
};
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, info};

use super::{blob, select_block_size, UploadOptions};
use crate::endpoints::MobileApps;

/// The one upload state that ends the commit-status polling loop. Every
/// other state string keeps the loop going; the optional deadline is the only
/// way out of a version the service never finishes processing.
pub(crate) const COMMIT_SUCCESS_STATE: &str = "commitFileSuccess";

/// One upload invocation: borrows the application endpoint for the Graph
/// calls and owns the caller's options for its lifetime.
pub(crate) struct ContentUploadPipeline<'a> {
    apps: &'a MobileApps,
    options: UploadOptions,
}

impl<'a> ContentUploadPipeline<'a> {
    pub(crate) fn new(apps: &'a MobileApps, options: UploadOptions) -> Self {
        Self { apps, options }
    }

    /// Create the application, then run the content stages against it.
    /// Returns the application as created (the commit does not re-fetch it).
    pub(crate) async fn create(
        self,
        app: &MobileApp,
        encryption: &FileEncryptionInfo,
        file: &MobileAppContentFile,
        payload: &[u8],
    ) -> Result<MobileApp> {
        let created =
            self.apps.create(app).await.map_err(|e| e.at_stage(UploadStage::CreateApp))?;
        let app_id = created.id.clone().ok_or_else(|| {
            IntuneError::Decode("created application has no id".to_string())
                .at_stage(UploadStage::CreateApp)
        })?;
        info!(%app_id, "application created");

        self.upload_content(&app_id, encryption, file, payload).await?;
        Ok(created)
    }

    /// Run the content stages against an existing application id. Returns
    /// the final upload state reported by the service.
    pub(crate) async fn replace(
        self,
        app_id: &str,
        encryption: &FileEncryptionInfo,
        file: &MobileAppContentFile,
        payload: &[u8],
    ) -> Result<String> {
        self.upload_content(app_id, encryption, file, payload).await
    }

    async fn upload_content(
        &self,
        app_id: &str,
        encryption: &FileEncryptionInfo,
        file: &MobileAppContentFile,
        payload: &[u8],
    ) -> Result<String> {
        let deadline = self.options.deadline.map(|d| Instant::now() + d);

        let version = self
            .apps
            .create_content_version(app_id)
            .await
            .map_err(|e| e.at_stage(UploadStage::CreateContentVersion))?;
        let version_id = extract_id(&version).ok_or_else(|| {
            IntuneError::Decode("content version has no id".to_string())
                .at_stage(UploadStage::CreateContentVersion)
        })?;
        let version_id = version_id.as_str();

        let registered = self
            .apps
            .register_content_file(app_id, version_id, file)
            .await
            .map_err(|e| e.at_stage(UploadStage::RegisterFile))?;
        let file_id = extract_id(&registered).ok_or_else(|| {
            IntuneError::Decode("registered content file has no id".to_string())
                .at_stage(UploadStage::RegisterFile)
        })?;
        let file_id = file_id.as_str();
        debug!(version_id, file_id, "content file registered");

        // The storage destination materializes asynchronously on the service
        // side; keep asking until the URI shows up.
        let storage_uri = self
            .poll(UploadStage::AwaitStorageUri, deadline, || async move {
                let state = self.apps.get_content_file(app_id, version_id, file_id).await?;
                Ok(state["azureStorageUri"].as_str().map(str::to_string))
            })
            .await?;

        let block_size = select_block_size(file.size, self.options.block_size);
        blob::upload_blocks(
            self.apps.transport(),
            &storage_uri,
            payload,
            block_size,
            self.options.progress.as_ref(),
        )
        .await
        .map_err(|e| e.at_stage(UploadStage::UploadBytes))?;
        info!(file_id, bytes = payload.len(), "payload transferred");

        self.apps
            .commit_content_file(app_id, version_id, file_id, encryption)
            .await
            .map_err(|e| e.at_stage(UploadStage::CommitFile))?;

        let final_state = self
            .poll(UploadStage::AwaitCommitSuccess, deadline, || async move {
                let state = self.apps.get_content_file(app_id, version_id, file_id).await?;
                match state["uploadState"].as_str() {
                    Some(COMMIT_SUCCESS_STATE) => Ok(Some(COMMIT_SUCCESS_STATE.to_string())),
                    other => {
                        debug!(upload_state = ?other, "file commit still pending");
                        Ok(None)
                    }
                }
            })
            .await?;

        self.apps
            .commit_app(app_id, version_id)
            .await
            .map_err(|e| e.at_stage(UploadStage::CommitApp))?;
        info!(app_id, version_id, "content version committed");

        Ok(final_state)
    }

    /// Probe until a value appears, sleeping the configured interval between
    /// attempts. Probe errors abort with the stage attached; deadline expiry
    /// becomes a timeout carrying the same stage.
    async fn poll<T, F, Fut>(
        &self,
        stage: UploadStage,
        deadline: Option<Instant>,
        mut probe: F,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<T>>>,
    {
        let started = Instant::now();
        loop {
            match probe().await {
                Ok(Some(value)) => return Ok(value),
                Ok(None) => {}
                Err(e) => return Err(e.at_stage(stage)),
            }
            if let Some(limit) = deadline {
                if Instant::now() >= limit {
                    return Err(IntuneError::Timeout { stage, elapsed: started.elapsed() });
                }
            }
            sleep(self.options.poll_interval).await;
        }
    }
}

/// Resource ids normally arrive as strings, but content version ids have
/// been observed as bare numbers; accept both.
fn extract_id(value: &Value) -> Option<String> {
    match &value["id"] {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_id_accepts_strings_and_numbers() {
        assert_eq!(extract_id(&serde_json::json!({"id": "1"})).as_deref(), Some("1"));
        assert_eq!(extract_id(&serde_json::json!({"id": 7})).as_deref(), Some("7"));
        assert_eq!(extract_id(&serde_json::json!({})), None);
    }
}
