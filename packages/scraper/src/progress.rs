//! Progress reporting for multi-page scrapes.
//!
//! [`ProgressCallback`] decouples the scraper from any rendering backend.
//! The CLI plugs in `indicatif` bars; library callers and tests can pass
//! [`null_progress`].

use std::sync::Arc;

/// Receives progress updates while several pages are scraped.
///
/// Implementations must be `Send + Sync` so a single callback can be shared
/// by concurrently running page fetches.
pub trait ProgressCallback: Send + Sync {
    /// Set the total number of pages that will be visited.
    fn set_total(&self, total: u64);

    /// Advance progress by `delta` pages.
    fn inc(&self, delta: u64);

    /// Update the message displayed alongside the progress indicator.
    fn set_message(&self, msg: String);

    /// Mark progress as complete with a final message.
    fn finish(&self, msg: String);
}

/// A [`ProgressCallback`] that ignores every update.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
}

/// Returns a shared [`NullProgress`] instance for convenient use.
#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}
