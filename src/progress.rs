//! Progress reporting during extraction.
//!
//! The extractor invokes the callback between node batches; batch
//! boundaries never affect the extracted record.

use std::sync::Arc;

/// Callback receiving human-readable progress messages.
pub type ProgressCallback = Arc<dyn Fn(&str) + Send + Sync>;
