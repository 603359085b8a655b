//! Assignment targeting models

use serde::{Deserialize, Serialize};

use crate::errors::{IntuneError, Result};

/// A single assignment entry as posted to an `/assign` action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub target: AssignmentTarget,
}

/// Assignment target variants, discriminated by OData type on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "@odata.type")]
pub enum AssignmentTarget {
    #[serde(rename = "#microsoft.graph.allDevicesAssignmentTarget")]
    AllDevices,

    #[serde(rename = "#microsoft.graph.allLicensedUsersAssignmentTarget")]
    AllLicensedUsers,

    #[serde(rename = "#microsoft.graph.groupAssignmentTarget")]
    Group {
        #[serde(rename = "groupId")]
        group_id: String,
    },

    #[serde(rename = "#microsoft.graph.exclusionGroupAssignmentTarget")]
    ExclusionGroup {
        #[serde(rename = "groupId")]
        group_id: String,
    },
}

/// High-level assignment options, expanded into concrete targets.
///
/// Replaces any existing assignments on the resource when applied.
#[derive(Debug, Clone, Default)]
pub struct AssignmentOptions {
    pub include_groups: Vec<String>,
    pub exclude_groups: Vec<String>,
    pub all_devices: bool,
    pub all_users: bool,
}

impl AssignmentOptions {
    /// Expand into the assignment list sent to the service.
    ///
    /// # Errors
    /// Rejects the combination of `all_devices` with non-empty
    /// `include_groups` before anything reaches the network: the service
    /// only accepts exclusion groups alongside an all-devices target.
    pub fn into_assignments(self) -> Result<Vec<Assignment>> {
        if self.all_devices && !self.include_groups.is_empty() {
            return Err(IntuneError::InvalidInput(
                "cannot include specific groups when all_devices is true".to_string(),
            ));
        }

        let mut assignments = Vec::new();

        if self.all_devices {
            assignments.push(Assignment { target: AssignmentTarget::AllDevices });
        }

        if self.all_users {
            assignments.push(Assignment { target: AssignmentTarget::AllLicensedUsers });
        }

        assignments.extend(self.include_groups.into_iter().map(|group_id| Assignment {
            target: AssignmentTarget::Group { group_id },
        }));

        assignments.extend(self.exclude_groups.into_iter().map(|group_id| Assignment {
            target: AssignmentTarget::ExclusionGroup { group_id },
        }));

        Ok(assignments)
    }
}
