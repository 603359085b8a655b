//! # Intune Client
//!
//! Typed async client for the Microsoft Intune (Graph beta) device-management
//! API.
//!
//! This crate contains:
//! - OAuth2 token acquisition and refresh against the Azure AD v2.0 endpoint
//! - An authenticated request executor with single-shot 401 recovery
//! - Cursor-driven pagination over `@odata.nextLink` envelopes
//! - The Win32 LOB content upload pipeline (content version, file
//!   registration, block transfer to pre-signed storage, commit)
//! - Thin endpoint proxies for the device-management resource families
//!
//! ## Architecture
//! - Pure data types live in `intune-domain`
//! - [`IntuneClient`] owns one authenticator/token-store pair and injects
//!   the shared executor into every proxy

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod http;
pub mod upload;

// Re-export commonly used items
pub use client::IntuneClient;
pub use endpoints::*;
pub use http::{GraphClient, GraphRequest};
pub use upload::UploadOptions;

// The domain crate is half of the public API surface.
pub use intune_domain as domain;
