//! Content upload models
//!
//! These are the payloads exchanged during the Win32 LOB content upload
//! workflow: the file descriptor registered under a content version, and the
//! encryption manifest posted at commit time. The client never encrypts
//! anything itself; callers pre-encrypt the package and hand the resulting
//! manifest through verbatim.

use serde::{Deserialize, Serialize};

use super::apps::MOBILE_APP_CONTENT_FILE_TYPE;

/// Descriptor for a content file registered under a content version.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileAppContentFile {
    #[serde(rename = "@odata.type")]
    pub odata_type: String,

    /// File name as shown in the console, e.g. `IntunePackage.intunewin`.
    pub name: String,

    /// Plaintext byte length. Drives transfer block sizing.
    pub size: u64,

    /// Encrypted byte length, i.e. the number of bytes actually streamed to
    /// storage.
    pub size_encrypted: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<String>,

    pub is_dependency: bool,
}

impl MobileAppContentFile {
    /// Build a descriptor with the mandatory discriminator pre-filled.
    #[must_use]
    pub fn new(name: impl Into<String>, size: u64, size_encrypted: u64) -> Self {
        Self {
            odata_type: MOBILE_APP_CONTENT_FILE_TYPE.to_string(),
            name: name.into(),
            size,
            size_encrypted,
            manifest: None,
            is_dependency: false,
        }
    }
}

/// Encryption manifest for a committed content file.
///
/// Opaque to this client: produced by the caller's packaging step and posted
/// unchanged to the file's commit action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEncryptionInfo {
    pub encryption_key: String,
    pub mac_key: String,
    pub initialization_vector: String,
    pub mac: String,
    pub profile_identifier: String,
    pub file_digest: String,
    pub file_digest_algorithm: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_file_serializes_with_discriminator() {
        let file = MobileAppContentFile::new("IntunePackage.intunewin", 10_000, 10_048);
        let value = serde_json::to_value(&file).unwrap();
        assert_eq!(value["@odata.type"], "#microsoft.graph.mobileAppContentFile");
        assert_eq!(value["size"], 10_000);
        assert_eq!(value["sizeEncrypted"], 10_048);
        assert_eq!(value["isDependency"], false);
        assert!(value.get("manifest").is_none());
    }
}
