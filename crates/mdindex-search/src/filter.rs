//! Retention rules for headings and blocks.

use mdindex_core::{ContentKind, IndexConfig, Pattern};
use mdindex_parser::{BlockKind, BlockToken, StripOptions};

/// A block kept under a heading, before hooks run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Normalized text.
    pub text: String,
    /// Content kind.
    pub kind: ContentKind,
    /// Code language.
    pub lang: Option<String>,
}

/// Decides which headings and blocks enter the index.
#[derive(Debug, Clone)]
pub struct ContentFilter {
    content: Vec<ContentKind>,
    codeblock: Vec<String>,
    ignore_syntax: Vec<Pattern>,
    ignore_heading: Vec<Pattern>,
    strip: StripOptions,
}

impl ContentFilter {
    /// Build the filter from index configuration.
    pub fn new(config: &IndexConfig) -> Self {
        Self {
            content: config.content.clone(),
            codeblock: config.codeblock.clone(),
            ignore_syntax: config.ignore.syntax.clone(),
            ignore_heading: config.ignore.heading.clone(),
            strip: StripOptions {
                html: config.strip_html,
                markdown: config.strip_markdown,
            },
        }
    }

    /// Normalized text of a heading block.
    pub fn heading_text(&self, token: &BlockToken) -> String {
        self.strip.plain_text(token)
    }

    /// Whether a normalized heading is excluded.
    pub fn ignores_heading(&self, heading: &str) -> bool {
        self.ignore_heading
            .iter()
            .any(|pattern| pattern.matches_lowercase(heading))
    }

    /// Whether normalized block text is template or markup syntax.
    pub fn ignores_syntax(&self, text: &str) -> bool {
        self.ignore_syntax
            .iter()
            .any(|pattern| pattern.matches_prefix(text))
    }

    /// Turn a body block into a record, or `None` when it is not retained.
    pub fn record(&self, token: &BlockToken) -> Option<Record> {
        let kind = match &token.kind {
            BlockKind::Paragraph => ContentKind::Text,
            BlockKind::BlockQuote => ContentKind::Quote,
            BlockKind::List => ContentKind::List,
            BlockKind::Code { lang } => {
                let lang = lang.as_deref()?;
                if !self.allows(ContentKind::Code) || !self.codeblock.iter().any(|l| l == lang) {
                    return None;
                }
                return Some(Record {
                    text: token.text.clone(),
                    kind: ContentKind::Code,
                    lang: Some(lang.to_string()),
                });
            }
            _ => return None,
        };

        if !self.allows(kind) {
            return None;
        }

        let text = self.strip.plain_text(token);
        if self.ignores_syntax(&text) {
            return None;
        }

        Some(Record {
            text,
            kind,
            lang: None,
        })
    }

    fn allows(&self, kind: ContentKind) -> bool {
        self.content.contains(&kind)
    }
}
