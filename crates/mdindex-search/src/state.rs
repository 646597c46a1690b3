//! Accumulated state of one build.

use std::path::PathBuf;

use crate::model::SearchIndex;

/// Index entries and output location accumulated between two flushes.
///
/// Constructed by the caller and passed to both the per-page handler and the
/// flush handler. Nothing survives a successful flush.
#[derive(Debug, Default)]
pub struct IndexState {
    /// Accumulated index.
    pub index: SearchIndex,

    /// Where the index is written, resolved from the first page with output.
    pub output_path: Option<PathBuf>,
}

impl IndexState {
    /// Empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all entries and the cached output path.
    pub fn reset(&mut self) {
        self.index.clear();
        self.output_path = None;
    }
}
