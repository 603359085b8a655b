//! Mobile application models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// OData type discriminator for Win32 line-of-business applications.
pub const WIN32_LOB_APP_TYPE: &str = "#microsoft.graph.win32LobApp";

/// OData type discriminator for registered content files.
pub const MOBILE_APP_CONTENT_FILE_TYPE: &str = "#microsoft.graph.mobileAppContentFile";

/// A mobile application resource.
///
/// Graph models roughly twenty concrete app variants (store apps, LOB apps,
/// web links, ...). They share the discriminator and a handful of common
/// fields; everything else is variant-specific and kept in `properties` so a
/// round trip through this type preserves the payload byte-for-byte in
/// meaning. Creating or updating an app without `odata_type` set fails
/// server-side, not client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileApp {
    /// Concrete variant discriminator, e.g. `#microsoft.graph.win32LobApp`.
    #[serde(rename = "@odata.type")]
    pub odata_type: String,

    /// Server-assigned resource id; absent on creation payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,

    /// Content version committed as active, present on LOB variants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committed_content_version: Option<String>,

    /// Variant-specific fields, passed through untouched.
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl MobileApp {
    /// Start a Win32 LOB app payload with the given display name.
    #[must_use]
    pub fn win32_lob(display_name: impl Into<String>) -> Self {
        Self {
            odata_type: WIN32_LOB_APP_TYPE.to_string(),
            id: None,
            display_name: Some(display_name.into()),
            description: None,
            publisher: None,
            committed_content_version: None,
            properties: Map::new(),
        }
    }

    /// Set an arbitrary variant-specific property.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win32_payload_round_trips_unknown_fields() {
        let json = serde_json::json!({
            "@odata.type": "#microsoft.graph.win32LobApp",
            "id": "app-1",
            "displayName": "7-Zip",
            "installCommandLine": "install.cmd",
            "minimumSupportedWindowsRelease": "21H2",
        });

        let app: MobileApp = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(app.odata_type, WIN32_LOB_APP_TYPE);
        assert_eq!(app.display_name.as_deref(), Some("7-Zip"));
        assert_eq!(
            app.properties.get("installCommandLine"),
            Some(&Value::String("install.cmd".into()))
        );

        let back = serde_json::to_value(&app).unwrap();
        assert_eq!(back, json);
    }

    #[test]
    fn creation_payload_omits_absent_fields() {
        let app = MobileApp::win32_lob("7-Zip");
        let value = serde_json::to_value(&app).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("id"));
        assert!(!object.contains_key("committedContentVersion"));
    }
}
