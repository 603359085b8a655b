//! Device management models

use serde::Serialize;

/// Autopilot device registration request.
///
/// All fields are optional on the caller side. The import endpoint expects
/// every key to be present with explicit `null` for anything unknown, so the
/// endpoint proxy maps this onto a wire payload that never skips a field.
#[derive(Debug, Clone, Default)]
pub struct AutopilotImport {
    pub serial_number: Option<String>,
    pub group_tag: Option<String>,
    pub product_key: Option<String>,
    pub hardware_identifier: Option<String>,
    pub assigned_user: Option<String>,
}

/// Options for the managed-device wipe action.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WipeOptions {
    pub keep_enrollment_data: bool,
    pub keep_user_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_os_unlock_code: Option<String>,
    pub persist_esim_data_plan: bool,
}
