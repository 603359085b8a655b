//! Error types used throughout the client

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Stages of the application content upload pipeline, in execution order.
///
/// Carried inside [`IntuneError::UploadStage`] so a caller can tell which
/// step of the multi-call workflow failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    CreateApp,
    CreateContentVersion,
    RegisterFile,
    AwaitStorageUri,
    UploadBytes,
    CommitFile,
    AwaitCommitSuccess,
    CommitApp,
}

impl fmt::Display for UploadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CreateApp => "createApp",
            Self::CreateContentVersion => "createContentVersion",
            Self::RegisterFile => "registerFile",
            Self::AwaitStorageUri => "awaitStorageUri",
            Self::UploadBytes => "uploadBytes",
            Self::CommitFile => "commitFile",
            Self::AwaitCommitSuccess => "awaitCommitSuccess",
            Self::CommitApp => "commitApp",
        };
        write!(f, "{name}")
    }
}

/// Main error type for Intune client operations
#[derive(Error, Debug)]
pub enum IntuneError {
    /// The token endpoint rejected the credentials, or the exchange failed in
    /// transit. Never retried beyond the executor's single 401 recovery.
    #[error("authentication failed{}: {detail}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Auth {
        /// HTTP status returned by the token endpoint, if a response arrived.
        status: Option<u16>,
        detail: String,
    },

    /// Non-2xx API response, propagated with the upstream status and body.
    #[error("graph api error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    /// A stage of the upload pipeline failed; the pipeline aborts without
    /// compensation and the partially created resources are left behind.
    #[error("upload stage {stage} failed: {source}")]
    UploadStage {
        stage: UploadStage,
        #[source]
        source: Box<IntuneError>,
    },

    /// A polling stage exceeded the caller-supplied deadline.
    #[error("upload stage {stage} timed out after {elapsed:?}")]
    Timeout { stage: UploadStage, elapsed: Duration },

    /// Request rejected client-side before any network call was made.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Transport-level failure outside of authentication.
    #[error("transport error: {0}")]
    Transport(String),

    /// Response body could not be (de)serialized.
    #[error("decode error: {0}")]
    Decode(String),
}

impl IntuneError {
    /// Wrap an error with the upload stage it occurred in.
    ///
    /// Timeouts already carry their stage and pass through unchanged.
    #[must_use]
    pub fn at_stage(self, stage: UploadStage) -> Self {
        match self {
            timeout @ Self::Timeout { .. } => timeout,
            other => Self::UploadStage { stage, source: Box::new(other) },
        }
    }
}

/// Result type alias for Intune client operations
pub type Result<T> = std::result::Result<T, IntuneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_names_match_wire_casing() {
        assert_eq!(UploadStage::AwaitStorageUri.to_string(), "awaitStorageUri");
        assert_eq!(UploadStage::CommitApp.to_string(), "commitApp");
    }

    #[test]
    fn at_stage_wraps_api_errors() {
        let err = IntuneError::Api { status: 400, body: "bad".into() }
            .at_stage(UploadStage::RegisterFile);
        match err {
            IntuneError::UploadStage { stage, .. } => {
                assert_eq!(stage, UploadStage::RegisterFile);
            }
            other => panic!("expected UploadStage, got {other:?}"),
        }
    }

    #[test]
    fn at_stage_preserves_timeouts() {
        let err = IntuneError::Timeout {
            stage: UploadStage::AwaitCommitSuccess,
            elapsed: Duration::from_secs(30),
        }
        .at_stage(UploadStage::AwaitCommitSuccess);
        assert!(matches!(err, IntuneError::Timeout { .. }));
    }

    #[test]
    fn auth_error_display_includes_status() {
        let err = IntuneError::Auth { status: Some(400), detail: "invalid_client".into() };
        let msg = err.to_string();
        assert!(msg.contains("HTTP 400"));
        assert!(msg.contains("invalid_client"));
    }
}
