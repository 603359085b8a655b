//! Resource endpoint proxies
//!
//! One proxy per resource family, each a thin mapping from method calls to
//! verbs and paths on the shared executor. Anything with real logic
//! (validation, the upload pipeline) lives next to the proxy that owns it.

mod autopilot;
mod collection;
mod configuration_policies;
mod custom;
mod device_configurations;
mod devices;
mod directory;
mod group_policy_configurations;
mod management;
mod mobile_apps;
mod scripts;

pub use autopilot::Autopilot;
pub use configuration_policies::ConfigurationPolicies;
pub use custom::CustomRequest;
pub use device_configurations::DeviceConfigurations;
pub use devices::Devices;
pub use directory::{Groups, Users};
pub use group_policy_configurations::GroupPolicyConfigurations;
pub use management::{Intents, Templates};
pub use mobile_apps::MobileApps;
pub use scripts::{DeviceHealthScripts, DeviceManagementScripts, DeviceShellScripts};
