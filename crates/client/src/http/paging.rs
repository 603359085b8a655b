//! Cursor-driven pagination
//!
//! Every list-returning Graph endpoint wraps its results in an envelope with
//! a `value` array and an optional `@odata.nextLink` cursor. The cursor is an
//! absolute URL; the configured base origin must be stripped before reuse or
//! the follow-up request would bypass the client's host configuration.

use intune_domain::Result;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::client::{GraphClient, GraphRequest};

/// Standard OData list envelope.
#[derive(Debug, Deserialize)]
pub struct ListEnvelope {
    #[serde(default)]
    pub value: Vec<Value>,
    #[serde(rename = "@odata.nextLink")]
    pub next_link: Option<String>,
}

impl GraphClient {
    /// Fetch every page of a collection, concatenating `value` arrays in
    /// order. Follows `@odata.nextLink` until absent; no cycle detection,
    /// the server's cursor is trusted to make progress.
    pub async fn list_all(&self, first_path: &str) -> Result<Vec<Value>> {
        let mut items = Vec::new();
        let mut path = first_path.to_string();

        loop {
            let page: ListEnvelope = self.send_as(&GraphRequest::get(&path)).await?;
            items.extend(page.value);

            match page.next_link {
                Some(link) => {
                    path = self.relativize(&link);
                    debug!(next = %path, collected = items.len(), "following next link");
                }
                None => break,
            }
        }

        Ok(items)
    }

    /// Strip the configured base origin from a server-echoed cursor URL.
    fn relativize(&self, link: &str) -> String {
        link.strip_prefix(self.base_url()).unwrap_or(link).to_string()
    }
}
