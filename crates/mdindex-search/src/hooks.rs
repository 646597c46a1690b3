//! User callbacks run while headings, content and output are recorded.

use mdindex_core::{ContentKind, IndexConfig};
use pulldown_cmark::{Options, Parser, html};

use crate::model::SearchIndex;

/// Error type callbacks may return. It propagates out of the indexer.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for callbacks.
pub type HookResult<T> = std::result::Result<T, HookError>;

/// Outcome of a heading or content callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Store the unit with this text.
    Keep(String),
    /// Leave the unit out.
    Skip,
}

impl Decision {
    /// Keep the unit with `text`.
    pub fn keep(text: impl Into<String>) -> Self {
        Self::Keep(text.into())
    }
}

type HeadingHook = Box<dyn Fn(&str) -> HookResult<Decision>>;
type ContentHook = Box<dyn Fn(&str, ContentKind, Option<&str>) -> HookResult<Decision>>;
type OutputHook = Box<dyn Fn(&SearchIndex) -> HookResult<Option<serde_json::Value>>>;

/// Optional callbacks.
///
/// ```
/// use mdindex_search::{Decision, Hooks};
///
/// let hooks = Hooks::new()
///     .on_heading(|heading| Ok(Decision::keep(heading.to_uppercase())))
///     .on_content(|text, _kind, _lang| {
///         Ok(if text.starts_with("TODO") {
///             Decision::Skip
///         } else {
///             Decision::keep(text)
///         })
///     });
/// # let _ = hooks;
/// ```
#[derive(Default)]
pub struct Hooks {
    heading: Option<HeadingHook>,
    content: Option<ContentHook>,
    output: Option<OutputHook>,
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("on_heading", &self.heading.is_some())
            .field("on_content", &self.content.is_some())
            .field("on_output", &self.output.is_some())
            .finish()
    }
}

impl Hooks {
    /// No callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Callbacks implied by configuration.
    pub fn from_config(config: &IndexConfig) -> Self {
        if config.render_inline {
            Self::render_inline()
        } else {
            Self::new()
        }
    }

    /// Render inline Markdown of headings and non-code content to HTML.
    pub fn render_inline() -> Self {
        Self::new()
            .on_heading(|heading| Ok(Decision::Keep(render_inline(heading))))
            .on_content(|text, kind, _lang| {
                Ok(Decision::Keep(match kind {
                    ContentKind::Code => text.to_string(),
                    _ => render_inline(text),
                }))
            })
    }

    /// Set the heading callback.
    pub fn on_heading(mut self, hook: impl Fn(&str) -> HookResult<Decision> + 'static) -> Self {
        self.heading = Some(Box::new(hook));
        self
    }

    /// Set the content callback; it receives text, kind and code language.
    pub fn on_content(
        mut self,
        hook: impl Fn(&str, ContentKind, Option<&str>) -> HookResult<Decision> + 'static,
    ) -> Self {
        self.content = Some(Box::new(hook));
        self
    }

    /// Set the output callback. A returned array or object replaces the
    /// serialized index.
    pub fn on_output(
        mut self,
        hook: impl Fn(&SearchIndex) -> HookResult<Option<serde_json::Value>> + 'static,
    ) -> Self {
        self.output = Some(Box::new(hook));
        self
    }

    pub(crate) fn heading(&self, heading: &str) -> HookResult<Decision> {
        match &self.heading {
            Some(hook) => hook(heading),
            None => Ok(Decision::keep(heading)),
        }
    }

    pub(crate) fn content(
        &self,
        text: &str,
        kind: ContentKind,
        lang: Option<&str>,
    ) -> HookResult<Decision> {
        match &self.content {
            Some(hook) => hook(text, kind, lang),
            None => Ok(Decision::keep(text)),
        }
    }

    /// Replacement document from the output callback, if it returned an
    /// array or object.
    pub(crate) fn output(&self, index: &SearchIndex) -> HookResult<Option<serde_json::Value>> {
        let Some(hook) = &self.output else {
            return Ok(None);
        };

        Ok(hook(index)?.filter(|value| value.is_array() || value.is_object()))
    }
}

/// Render inline Markdown to HTML without a wrapping paragraph.
pub fn render_inline(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut rendered = String::with_capacity(text.len() + 16);
    html::push_html(&mut rendered, Parser::new_ext(text, options));

    let trimmed = rendered.trim_end();
    trimmed
        .strip_prefix("<p>")
        .and_then(|inner| inner.strip_suffix("</p>"))
        .unwrap_or(trimmed)
        .to_string()
}
