//! Search indexer: turns pages into index entries and flushes them.
//!
//! Pages are handled one at a time. Each page appends one page entry, then a
//! heading entry plus a synthetic heading content entry per retained heading,
//! then one content entry per retained block.

use std::{fs, path::PathBuf};

use mdindex_core::{ContentKind, Frontmatter, IndexConfig, PageContext};
use mdindex_parser::{MarkdownParser, slugify};
use tracing::{debug, info, warn};

use crate::{
    IndexError, Result,
    filter::ContentFilter,
    hooks::{Decision, Hooks},
    model::{ContentEntry, Heading, IndexRange, IndexStats, Page, SearchIndex},
    output,
    state::IndexState,
    walker::{HeadingGroup, group_blocks},
};

/// Default name of the JSON file, without extension.
pub const DEFAULT_FILE_NAME: &str = "search";

/// Why a page produced no entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The document does not open with frontmatter.
    NoFrontmatter,
    /// The frontmatter could not be parsed.
    InvalidFrontmatter(String),
    /// The frontmatter opts the page out.
    Disabled,
}

/// Result of handling one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// The page was recorded at `pidx`.
    Indexed { pidx: usize },
    /// The page was skipped.
    Skipped(SkipReason),
}

/// Summary of a written index file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlushReport {
    /// File that was written.
    pub path: PathBuf,
    /// Entry counts at flush time.
    pub stats: IndexStats,
    /// Whether the output hook replaced the index.
    pub transformed: bool,
}

/// Builds index entries from pages.
#[derive(Debug)]
pub struct SearchIndexer {
    config: IndexConfig,
    filter: ContentFilter,
    hooks: Hooks,
    parser: MarkdownParser,
}

impl SearchIndexer {
    /// Create an indexer; hooks follow the configuration.
    pub fn new(config: IndexConfig) -> Self {
        let hooks = Hooks::from_config(&config);
        Self::with_hooks(config, hooks)
    }

    /// Create an indexer with explicit hooks.
    pub fn with_hooks(config: IndexConfig, hooks: Hooks) -> Self {
        Self {
            filter: ContentFilter::new(&config),
            config,
            hooks,
            parser: MarkdownParser::new(),
        }
    }

    /// Index configuration.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Read a page's source file and index it.
    pub fn index_document(
        &self,
        state: &mut IndexState,
        page: &PageContext,
        file_name: &str,
    ) -> Result<DocumentOutcome> {
        let source =
            fs::read_to_string(&page.input_path).map_err(|e| IndexError::io(&page.input_path, e))?;
        self.index_source(state, page, file_name, &source)
    }

    /// Index a page from its Markdown source.
    pub fn index_source(
        &self,
        state: &mut IndexState,
        page: &PageContext,
        file_name: &str,
        source: &str,
    ) -> Result<DocumentOutcome> {
        if state.output_path.is_none() {
            state.output_path = output::resolve_output_path(page, &self.config.output, file_name);
            if let Some(path) = &state.output_path {
                debug!(path = %path.display(), "resolved search index path");
            }
        }

        let document = match self.parser.parse(source, &page.input_path) {
            Ok(document) => document,
            Err(e) => {
                warn!(
                    path = %page.input_path.display(),
                    error = %e,
                    "skipping page with invalid frontmatter"
                );
                return Ok(DocumentOutcome::Skipped(SkipReason::InvalidFrontmatter(
                    e.to_string(),
                )));
            }
        };

        let Some(frontmatter) = document.frontmatter else {
            debug!(url = %page.url, "skipping page without frontmatter");
            return Ok(DocumentOutcome::Skipped(SkipReason::NoFrontmatter));
        };

        if frontmatter.is_disabled(&self.config.frontmatter_key) {
            debug!(url = %page.url, key = %self.config.frontmatter_key, "page opted out of search");
            return Ok(DocumentOutcome::Skipped(SkipReason::Disabled));
        }

        let groups = group_blocks(&document.blocks, &self.filter);
        let pidx = self.assemble(&mut state.index, page, frontmatter, groups)?;

        Ok(DocumentOutcome::Indexed { pidx })
    }

    /// Append one page and its groups to the index. Returns the page index.
    pub fn assemble(
        &self,
        index: &mut SearchIndex,
        page: &PageContext,
        frontmatter: Frontmatter,
        groups: Vec<HeadingGroup>,
    ) -> Result<usize> {
        let pidx = index.pages.len();
        let first_heading = index.heading.len();

        index.pages.push(Page {
            title: frontmatter.title,
            description: frontmatter.description.unwrap_or_default(),
            tags: frontmatter.tags,
            url: page.url.clone(),
            pidx,
            hidx: IndexRange::new(first_heading),
            cidx: IndexRange::new(index.content.len()),
        });

        let pathname = page.url.strip_suffix('/').unwrap_or(&page.url);

        for group in groups {
            let text = match self
                .hooks
                .heading(&group.heading)
                .map_err(|e| IndexError::hook("heading", e))?
            {
                Decision::Keep(text) => text,
                Decision::Skip => continue,
            };

            let hidx = index.heading.len();
            let heading_cidx = index.content.len();

            index.heading.push(Heading {
                anchor: format!("{pathname}#{}", slugify(&group.heading)),
                pidx,
                hidx,
                cidx: IndexRange::new(heading_cidx),
            });

            index.content.push(ContentEntry {
                text,
                kind: ContentKind::Heading,
                lang: None,
                sort: ContentKind::Heading.sort(),
                pidx,
                hidx,
                cidx: heading_cidx,
            });

            for record in group.records {
                if record.text.is_empty() {
                    continue;
                }

                let text = match self
                    .hooks
                    .content(&record.text, record.kind, record.lang.as_deref())
                    .map_err(|e| IndexError::hook("content", e))?
                {
                    Decision::Keep(text) => text,
                    Decision::Skip => continue,
                };

                let cidx = index.content.len();
                index.content.push(ContentEntry {
                    text,
                    kind: record.kind,
                    lang: record.lang,
                    sort: record.kind.sort(),
                    pidx,
                    hidx,
                    cidx,
                });
            }

            let last = index.content.len() - 1;
            index.pages[pidx].cidx.extend_to(last);
            index.heading[hidx].cidx.extend_to(last);
        }

        if index.heading.len() > first_heading {
            index.pages[pidx].hidx.extend_to(index.heading.len() - 1);
        }

        debug!(
            url = %page.url,
            pidx,
            headings = index.heading.len() - first_heading,
            "indexed page"
        );

        Ok(pidx)
    }

    /// Write the accumulated index and reset the state.
    ///
    /// Nothing is written unless pages, headings and content are all
    /// non-empty. A missing output path is an error and leaves the state
    /// untouched so the caller can still inspect it.
    pub fn flush(&self, state: &mut IndexState) -> Result<Option<FlushReport>> {
        if !state.index.is_complete() {
            debug!(stats = ?state.index.stats(), "search index has nothing to write");
            state.reset();
            return Ok(None);
        }

        let path = state
            .output_path
            .clone()
            .ok_or(IndexError::MissingOutputPath)?;

        let replacement = self
            .hooks
            .output(&state.index)
            .map_err(|e| IndexError::hook("output", e))?;

        let json = match &replacement {
            Some(value) => output::to_json(value, self.config.minify)?,
            None => output::to_json(&state.index, self.config.minify)?,
        };

        output::write_file(&path, &json)?;

        let stats = state.index.stats();
        info!(
            path = %path.display(),
            pages = stats.pages,
            headings = stats.headings,
            content = stats.content,
            "wrote search index"
        );

        state.reset();

        Ok(Some(FlushReport {
            path,
            stats,
            transformed: replacement.is_some(),
        }))
    }
}
