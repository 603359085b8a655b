//! Resource models
//!
//! Only the resources the upload pipeline and validated flows depend on are
//! fully typed; everything else travels as `serde_json::Value` because the
//! Graph beta payload shapes are both enormous and unstable.

pub mod apps;
pub mod assignments;
pub mod devices;
pub mod upload;

pub use apps::{MobileApp, MOBILE_APP_CONTENT_FILE_TYPE, WIN32_LOB_APP_TYPE};
pub use assignments::{Assignment, AssignmentOptions, AssignmentTarget};
pub use devices::{AutopilotImport, WipeOptions};
pub use upload::{FileEncryptionInfo, MobileAppContentFile};
