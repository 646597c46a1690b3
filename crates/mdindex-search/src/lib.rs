//! mdindex Search Library
//!
//! Builds a cross-referenced JSON search index from Markdown pages.
//!
//! # Features
//!
//! - **Heading grouping**: content is grouped under the heading it follows
//! - **Flat cross-referenced index**: pages, headings and content entries
//!   point at each other by position
//! - **Hooks**: rewrite or drop headings and content, reshape the output
//!
//! # Example
//!
//! ```no_run
//! use mdindex_core::{IndexConfig, PageContext};
//! use mdindex_search::{IndexState, SearchIndexer};
//!
//! let indexer = SearchIndexer::new(IndexConfig::default());
//! let mut state = IndexState::new();
//!
//! let page = PageContext::new("content/intro.md", "public/intro/index.html", "/intro/");
//! indexer.index_document(&mut state, &page, "search")?;
//!
//! // After the last page of the build:
//! indexer.flush(&mut state)?;
//! # Ok::<(), mdindex_search::IndexError>(())
//! ```

pub mod filter;
pub mod hooks;
pub mod indexer;
pub mod model;
pub mod output;
pub mod plugin;
pub mod state;
pub mod walker;

use std::path::{Path, PathBuf};

pub use filter::{ContentFilter, Record};
pub use hooks::{Decision, HookError, Hooks, render_inline};
pub use indexer::{DocumentOutcome, FlushReport, SearchIndexer, SkipReason};
pub use model::{ContentEntry, Heading, IndexRange, IndexStats, Page, SearchIndex};
pub use plugin::SearchPlugin;
pub use state::IndexState;
use thiserror::Error;
pub use walker::{HeadingGroup, group_blocks};

/// Search index errors.
#[derive(Debug, Error)]
pub enum IndexError {
    /// I/O error reading a page or writing the index.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No page with output was seen, so there is nowhere to write the index.
    #[error("failed to obtain the output path for the search index")]
    MissingOutputPath,

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A heading, content or output callback failed.
    #[error("{hook} hook failed: {source}")]
    Hook {
        hook: &'static str,
        #[source]
        source: HookError,
    },
}

impl IndexError {
    /// Create an I/O error for `path`.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Wrap a callback error.
    pub fn hook(hook: &'static str, source: HookError) -> Self {
        Self::Hook { hook, source }
    }
}

/// Result type for search index operations.
pub type Result<T> = std::result::Result<T, IndexError>;
