//! HTTP layer: request executor and pagination.

mod client;
mod paging;

pub use client::{GraphClient, GraphRequest};
pub use paging::ListEnvelope;
