//! Build plugin wiring the indexer to the host's page and after-build events.

use mdindex_core::{CoreError, IndexConfig, PageContext, Plugin};
use tracing::debug;

use crate::{
    hooks::Hooks,
    indexer::{DEFAULT_FILE_NAME, FlushReport, SearchIndexer},
    state::IndexState,
};

type FlushCallback = Box<dyn FnMut(&FlushReport)>;

/// Search index plugin.
///
/// Its shortcode indexes the page it is called for and renders nothing. The
/// first shortcode argument names the JSON file (default `search`). The index
/// is written when the build finishes.
pub struct SearchPlugin {
    indexer: SearchIndexer,
    state: IndexState,
    on_flush: Option<FlushCallback>,
}

impl std::fmt::Debug for SearchPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchPlugin")
            .field("indexer", &self.indexer)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl SearchPlugin {
    pub const NAME: &'static str = "search-index";

    pub fn new(config: IndexConfig) -> Self {
        Self::from_indexer(SearchIndexer::new(config))
    }

    pub fn with_hooks(config: IndexConfig, hooks: Hooks) -> Self {
        Self::from_indexer(SearchIndexer::with_hooks(config, hooks))
    }

    fn from_indexer(indexer: SearchIndexer) -> Self {
        Self {
            indexer,
            state: IndexState::new(),
            on_flush: None,
        }
    }

    /// Called with the report each time an index file is written.
    pub fn on_flush(mut self, callback: impl FnMut(&FlushReport) + 'static) -> Self {
        self.on_flush = Some(Box::new(callback));
        self
    }

    /// Entries accumulated since the last flush.
    pub fn state(&self) -> &IndexState {
        &self.state
    }
}

impl Plugin for SearchPlugin {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn shortcode(&self) -> Option<&str> {
        Some(self.indexer.config().shortcode.as_str())
    }

    fn render_shortcode(
        &mut self,
        page: &PageContext,
        args: &[String],
    ) -> mdindex_core::Result<String> {
        let file_name = args
            .first()
            .map(String::as_str)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_FILE_NAME);

        let outcome = self
            .indexer
            .index_document(&mut self.state, page, file_name)
            .map_err(|e| CoreError::plugin(Self::NAME, e))?;
        debug!(url = %page.url, ?outcome, "search shortcode");

        Ok(String::new())
    }

    fn after_build(&mut self) -> mdindex_core::Result<()> {
        let report = self
            .indexer
            .flush(&mut self.state)
            .map_err(|e| CoreError::plugin(Self::NAME, e))?;

        if let (Some(report), Some(callback)) = (&report, self.on_flush.as_mut()) {
            callback(report);
        }

        Ok(())
    }
}
