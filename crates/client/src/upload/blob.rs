//! Block transfer to the pre-signed storage destination
//!
//! The file-registration step eventually yields a time-limited, pre-signed
//! blob URI. This module splits the payload into fixed-size blocks, stages
//! each with a `Put Block` call (bounded parallelism), then seals the blob
//! with a `Put Block List`. Authorization is embedded in the URI's SAS query
//! string and never interpreted here.

use std::sync::atomic::{AtomicU64, Ordering};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use futures::stream::{self, TryStreamExt};
use intune_domain::{IntuneError, Result};
use tracing::debug;
use url::Url;

use super::{ProgressCallback, MAX_PARALLEL_BLOCKS};

/// Components of the pre-signed storage URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StorageDestination {
    origin: String,
    container: String,
    blob_name: String,
    sas_query: String,
}

impl StorageDestination {
    /// Split a pre-signed URI into origin, container, blob name and SAS
    /// query string.
    pub(crate) fn parse(uri: &str) -> Result<Self> {
        let parsed = Url::parse(uri)
            .map_err(|e| IntuneError::Decode(format!("invalid storage uri: {e}")))?;

        let origin = parsed.origin().ascii_serialization();
        let sas_query = parsed
            .query()
            .ok_or_else(|| {
                IntuneError::Decode("storage uri is missing its SAS query string".to_string())
            })?
            .to_string();

        let mut segments = parsed
            .path_segments()
            .ok_or_else(|| IntuneError::Decode("storage uri has no path".to_string()))?;
        let container = segments
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| IntuneError::Decode("storage uri has no container".to_string()))?
            .to_string();
        let blob_name = segments.collect::<Vec<_>>().join("/");
        if blob_name.is_empty() {
            return Err(IntuneError::Decode("storage uri has no blob name".to_string()));
        }

        Ok(Self { origin, container, blob_name, sas_query })
    }

    fn blob_url(&self) -> String {
        format!("{}/{}/{}?{}", self.origin, self.container, self.blob_name, self.sas_query)
    }

    fn put_block_url(&self, block_id: &str) -> String {
        format!("{}&comp=block&blockid={}", self.blob_url(), urlencoding::encode(block_id))
    }

    fn put_block_list_url(&self) -> String {
        format!("{}&comp=blocklist", self.blob_url())
    }
}

/// Base64 block id for a block index. Every id in a blob must have the same
/// pre-encoding length, so the index is zero-padded.
fn block_id(index: usize) -> String {
    BASE64.encode(format!("block-{index:08}"))
}

/// Stage all blocks (up to [`MAX_PARALLEL_BLOCKS`] in flight), then commit
/// the block list. All blocks must land before the commit goes out; a failed
/// block aborts the whole transfer, and the stage restarts from byte zero on
/// retry (no checkpointing).
pub(crate) async fn upload_blocks(
    http: &reqwest::Client,
    storage_uri: &str,
    payload: &[u8],
    block_size: usize,
    progress: Option<&ProgressCallback>,
) -> Result<()> {
    let destination = StorageDestination::parse(storage_uri)?;
    let total = payload.len() as u64;
    let transferred = AtomicU64::new(0);

    let block_count = payload.len().div_ceil(block_size.max(1));
    debug!(blocks = block_count, block_size, total, "staging blocks");

    let destination_ref = &destination;
    let transferred_ref = &transferred;
    stream::iter(payload.chunks(block_size).enumerate().map(Ok::<_, IntuneError>))
        .try_for_each_concurrent(MAX_PARALLEL_BLOCKS, |(index, chunk)| async move {
            put_block(http, destination_ref, index, chunk).await?;
            let so_far = transferred_ref.fetch_add(chunk.len() as u64, Ordering::SeqCst)
                + chunk.len() as u64;
            if let Some(callback) = progress {
                callback(total, so_far);
            }
            Ok(())
        })
        .await?;

    put_block_list(http, &destination, block_count).await
}

async fn put_block(
    http: &reqwest::Client,
    destination: &StorageDestination,
    index: usize,
    chunk: &[u8],
) -> Result<()> {
    let url = destination.put_block_url(&block_id(index));
    let response = http
        .put(&url)
        .header("Content-Type", "application/octet-stream")
        .body(chunk.to_vec())
        .send()
        .await
        .map_err(|e| IntuneError::Transport(format!("block {index} transfer failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        return Err(IntuneError::Api { status: status.as_u16(), body });
    }
    Ok(())
}

async fn put_block_list(
    http: &reqwest::Client,
    destination: &StorageDestination,
    block_count: usize,
) -> Result<()> {
    let mut body = String::from(r#"<?xml version="1.0" encoding="utf-8"?><BlockList>"#);
    for index in 0..block_count {
        body.push_str("<Latest>");
        body.push_str(&block_id(index));
        body.push_str("</Latest>");
    }
    body.push_str("</BlockList>");

    let response = http
        .put(destination.put_block_list_url())
        .header("Content-Type", "application/xml")
        .body(body)
        .send()
        .await
        .map_err(|e| IntuneError::Transport(format!("block list commit failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        return Err(IntuneError::Api { status: status.as_u16(), body: text });
    }

    debug!(blocks = block_count, "block list committed");
    Ok(())
}
