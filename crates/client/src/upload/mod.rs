//! Content upload: options, block sizing, blob transfer, and the pipeline.

mod blob;
mod pipeline;

use std::time::Duration;

pub(crate) use pipeline::ContentUploadPipeline;

/// Called after each completed block with `(total_bytes, transferred_bytes)`.
pub type ProgressCallback = Box<dyn Fn(u64, u64) + Send + Sync>;

/// Default transfer block size.
pub const DEFAULT_BLOCK_SIZE: usize = 4 * 1024 * 1024;

/// Payloads below this plaintext size use [`SMALL_BLOCK_SIZE`] instead, so a
/// trivial package does not go out as one oversized block request.
pub const SMALL_PAYLOAD_THRESHOLD: u64 = 4000;

/// Block size for sub-threshold payloads.
pub const SMALL_BLOCK_SIZE: usize = 1024;

/// Maximum number of blocks in flight during the transfer stage.
pub const MAX_PARALLEL_BLOCKS: usize = 5;

/// Tuning knobs for one upload invocation.
///
/// The defaults reproduce the service's expected cadence: 1-second polls, no
/// deadline (polling stages run until the service produces an answer), block
/// size derived from the plaintext length.
pub struct UploadOptions {
    /// Explicit block size; wins over the size-derived default.
    pub block_size: Option<usize>,
    /// Sleep between polls while waiting on the storage URI or commit state.
    pub poll_interval: Duration,
    /// Upper bound across the polling stages, measured from pipeline entry.
    /// `None` preserves the unbounded legacy behavior.
    pub deadline: Option<Duration>,
    /// Per-block progress notifications.
    pub progress: Option<ProgressCallback>,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            block_size: None,
            poll_interval: Duration::from_secs(1),
            deadline: None,
            progress: None,
        }
    }
}

impl UploadOptions {
    #[must_use]
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = Some(block_size);
        self
    }

    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }
}

/// Pick the transfer block size for a payload.
#[must_use]
pub(crate) fn select_block_size(plaintext_size: u64, explicit: Option<usize>) -> usize {
    if let Some(size) = explicit {
        return size;
    }
    if plaintext_size < SMALL_PAYLOAD_THRESHOLD {
        SMALL_BLOCK_SIZE
    } else {
        DEFAULT_BLOCK_SIZE
    }
}
