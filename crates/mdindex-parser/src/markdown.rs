//! Markdown block tokenizer using pulldown-cmark.
//!
//! Flattens a document into its top-level blocks. Each block keeps the exact
//! source slice it came from and the inline text with Markdown syntax removed.

use std::{ops::Range, path::Path};

use mdindex_core::{
    error::CoreError,
    frontmatter::{Frontmatter, FrontmatterFormat},
};
use pulldown_cmark::{CodeBlockKind, Event, MetadataBlockKind, Options, Parser, Tag, TagEnd};
use thiserror::Error;
use tracing::trace;

/// Markdown parsing errors.
#[derive(Debug, Error)]
pub enum MarkdownError {
    /// Failed to parse frontmatter.
    #[error("frontmatter error: {0}")]
    Frontmatter(#[from] CoreError),
}

/// Result type for markdown operations.
pub type Result<T> = std::result::Result<T, MarkdownError>;

/// Kind of a top-level block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// Fenced metadata block at the very start of the document.
    FrontMatter(FrontmatterFormat),
    /// ATX or setext heading.
    Heading { level: u8 },
    /// Paragraph.
    Paragraph,
    /// Blockquote.
    BlockQuote,
    /// Fenced or indented code block.
    Code { lang: Option<String> },
    /// Ordered or unordered list.
    List,
    /// Raw HTML block.
    Html,
    /// Table.
    Table,
    /// Thematic break.
    Rule,
    /// Footnote definitions, definition lists.
    Other,
}

/// One top-level block of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockToken {
    /// Block kind.
    pub kind: BlockKind,
    /// Exact source slice of the block.
    pub raw: String,
    /// Text content with Markdown syntax removed. Inline HTML is kept verbatim.
    pub text: String,
}

impl BlockToken {
    /// Source text of the block without its block-level markers.
    ///
    /// For headings this drops the `#` markers or the setext underline; every
    /// other block returns its trimmed source.
    pub fn source_text(&self) -> &str {
        match self.kind {
            BlockKind::Heading { .. } => heading_source(&self.raw),
            _ => self.raw.trim(),
        }
    }
}

/// A tokenized document.
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    /// Parsed frontmatter, `None` when the document does not open with one.
    pub frontmatter: Option<Frontmatter>,
    /// Blocks after the frontmatter.
    pub blocks: Vec<BlockToken>,
}

/// Markdown block tokenizer.
#[derive(Debug)]
pub struct MarkdownParser {
    options: Options,
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownParser {
    /// Create a new parser with default options.
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
        options.insert(Options::ENABLE_PLUSES_DELIMITED_METADATA_BLOCKS);

        Self { options }
    }

    /// Parse a document: frontmatter (when it is the first block) and blocks.
    pub fn parse(&self, content: &str, path: &Path) -> Result<ParsedDocument> {
        let mut blocks = self.tokenize(content);

        let frontmatter = match blocks.first().map(|b| &b.kind) {
            Some(BlockKind::FrontMatter(format)) => {
                let format = *format;
                let block = blocks.remove(0);
                Some(Frontmatter::parse(format, &block.text, path)?)
            }
            _ => match empty_frontmatter_len(&blocks) {
                Some(len) => {
                    blocks.drain(..len);
                    Some(Frontmatter::default())
                }
                None => None,
            },
        };

        Ok(ParsedDocument {
            frontmatter,
            blocks,
        })
    }

    /// Split markdown into top-level blocks.
    pub fn tokenize(&self, content: &str) -> Vec<BlockToken> {
        let mut tokens = Vec::new();
        let mut current: Option<BlockBuilder> = None;
        let mut depth = 0usize;

        for (event, range) in Parser::new_ext(content, self.options).into_offset_iter() {
            match event {
                Event::Start(tag) => {
                    if depth == 0 {
                        current = Some(BlockBuilder::new(block_kind(&tag), range));
                    }
                    depth += 1;
                }

                Event::End(tag) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        if let Some(block) = current.take() {
                            tokens.push(block.finish(content));
                        }
                    } else if let Some(block) = current.as_mut() {
                        block.close(tag);
                    }
                }

                Event::Rule if depth == 0 => {
                    tokens.push(BlockToken {
                        kind: BlockKind::Rule,
                        raw: content[range].to_string(),
                        text: String::new(),
                    });
                }

                event => {
                    if let Some(block) = current.as_mut() {
                        block.push(event);
                    }
                }
            }
        }

        trace!(blocks = tokens.len(), "tokenized markdown");
        tokens
    }
}

/// Accumulates one top-level block while its events stream by.
struct BlockBuilder {
    kind: BlockKind,
    range: Range<usize>,
    text: String,
}

impl BlockBuilder {
    fn new(kind: BlockKind, range: Range<usize>) -> Self {
        Self {
            kind,
            range,
            text: String::new(),
        }
    }

    fn push(&mut self, event: Event<'_>) {
        match event {
            Event::Text(text) | Event::Code(text) => self.text.push_str(&text),
            Event::Html(html) | Event::InlineHtml(html) => self.text.push_str(&html),
            Event::InlineMath(math) | Event::DisplayMath(math) => self.text.push_str(&math),
            Event::SoftBreak => self.text.push(' '),
            Event::HardBreak => self.text.push('\n'),
            _ => {}
        }
    }

    /// Nested block ends separate their text from what follows.
    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::Item
            | TagEnd::CodeBlock
            | TagEnd::BlockQuote(_)
            | TagEnd::TableHead
            | TagEnd::TableRow
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition => {
                if !self.text.ends_with('\n') {
                    self.text.push('\n');
                }
            }
            TagEnd::TableCell => self.text.push(' '),
            _ => {}
        }
    }

    fn finish(self, source: &str) -> BlockToken {
        let raw = source.get(self.range).unwrap_or_default().to_string();
        let text = match self.kind {
            BlockKind::Code { .. } | BlockKind::FrontMatter(_) => {
                self.text.trim_end_matches('\n').to_string()
            }
            _ => self.text.trim().to_string(),
        };

        BlockToken {
            kind: self.kind,
            raw,
            text,
        }
    }
}

/// Number of leading blocks forming an empty delimiter pair.
///
/// pulldown-cmark needs at least one line between the delimiters of a
/// metadata block, so `---` `---` arrives as two rules and `+++` `+++` as a
/// paragraph.
fn empty_frontmatter_len(blocks: &[BlockToken]) -> Option<usize> {
    match blocks {
        [first, second, ..]
            if first.kind == BlockKind::Rule
                && second.kind == BlockKind::Rule
                && first.raw.trim() == "---"
                && second.raw.trim() == "---" =>
        {
            Some(2)
        }
        [first, ..]
            if first.kind == BlockKind::Paragraph
                && first.raw.lines().map(str::trim_end).eq(["+++", "+++"]) =>
        {
            Some(1)
        }
        _ => None,
    }
}

/// Map a top-level opening tag to its block kind.
fn block_kind(tag: &Tag<'_>) -> BlockKind {
    match tag {
        Tag::MetadataBlock(MetadataBlockKind::YamlStyle) => {
            BlockKind::FrontMatter(FrontmatterFormat::Yaml)
        }
        Tag::MetadataBlock(MetadataBlockKind::PlusesStyle) => {
            BlockKind::FrontMatter(FrontmatterFormat::Toml)
        }
        Tag::Heading { level, .. } => BlockKind::Heading {
            level: *level as u8,
        },
        Tag::Paragraph => BlockKind::Paragraph,
        Tag::BlockQuote(_) => BlockKind::BlockQuote,
        Tag::CodeBlock(CodeBlockKind::Fenced(info)) => BlockKind::Code {
            lang: info
                .split_whitespace()
                .next()
                .map(|lang| lang.trim_matches(|c| c == '{' || c == '}').to_string())
                .filter(|lang| !lang.is_empty()),
        },
        Tag::CodeBlock(CodeBlockKind::Indented) => BlockKind::Code { lang: None },
        Tag::List(_) => BlockKind::List,
        Tag::HtmlBlock => BlockKind::Html,
        Tag::Table(_) => BlockKind::Table,
        _ => BlockKind::Other,
    }
}

/// Inline source of a heading without ATX markers or setext underline.
fn heading_source(raw: &str) -> &str {
    let raw = raw.trim();

    if raw.starts_with('#') {
        let inner = raw.trim_start_matches('#').trim();
        // Optional closing sequence: spaces followed by only `#`.
        match inner.rfind(|c: char| c != '#') {
            Some(pos) if inner[pos..].starts_with(char::is_whitespace) => inner[..pos].trim_end(),
            _ if inner.chars().all(|c| c == '#') => "",
            _ => inner,
        }
    } else {
        raw.rsplit_once('\n')
            .map(|(content, _underline)| content.trim_end())
            .unwrap_or(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[BlockToken]) -> Vec<BlockKind> {
        tokens.iter().map(|t| t.kind.clone()).collect()
    }

    #[test]
    fn test_tokenize_blocks() {
        let parser = MarkdownParser::new();
        let tokens = parser.tokenize(
            r#"# Intro

Hello **world**.

> A quote

- one
- two

```bash
echo hi
```

<div>raw</div>

---
"#,
        );

        assert_eq!(
            kinds(&tokens),
            vec![
                BlockKind::Heading { level: 1 },
                BlockKind::Paragraph,
                BlockKind::BlockQuote,
                BlockKind::List,
                BlockKind::Code {
                    lang: Some("bash".to_string())
                },
                BlockKind::Html,
                BlockKind::Rule,
            ]
        );
        assert_eq!(tokens[0].text, "Intro");
        assert_eq!(tokens[1].text, "Hello world.");
        assert_eq!(tokens[1].raw.trim(), "Hello **world**.");
        assert_eq!(tokens[2].text, "A quote");
        assert_eq!(tokens[3].text, "one\ntwo");
        assert_eq!(tokens[4].text, "echo hi");
    }

    #[test]
    fn test_inline_markup_removed() {
        let parser = MarkdownParser::new();
        let tokens = parser.tokenize("See [the docs](https://x.dev) and `cargo build`.");
        assert_eq!(tokens[0].text, "See the docs and cargo build.");
    }

    #[test]
    fn test_inline_html_kept_in_text() {
        let parser = MarkdownParser::new();
        let tokens = parser.tokenize("Press <kbd>Ctrl</kbd> now");
        assert_eq!(tokens[0].text, "Press <kbd>Ctrl</kbd> now");
    }

    #[test]
    fn test_code_info_string() {
        let parser = MarkdownParser::new();
        let tokens = parser.tokenize("```rust ignore\nfn main() {}\n```\n\n    indented\n");
        assert_eq!(
            tokens[0].kind,
            BlockKind::Code {
                lang: Some("rust".to_string())
            }
        );
        assert_eq!(tokens[0].text, "fn main() {}");
        assert_eq!(tokens[1].kind, BlockKind::Code { lang: None });
    }

    #[test]
    fn test_nested_quote_paragraphs() {
        let parser = MarkdownParser::new();
        let tokens = parser.tokenize("> first\n>\n> second\n");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "first\nsecond");
    }

    #[test]
    fn test_parse_yaml_frontmatter() {
        let parser = MarkdownParser::new();
        let doc = parser
            .parse(
                "---\ntitle: A\ntags: [x]\n---\n\n# Intro\n\nHello\n",
                Path::new("a.md"),
            )
            .unwrap();

        let fm = doc.frontmatter.expect("frontmatter");
        assert_eq!(fm.title.as_deref(), Some("A"));
        assert_eq!(fm.tags, vec!["x"]);
        assert_eq!(
            kinds(&doc.blocks),
            vec![BlockKind::Heading { level: 1 }, BlockKind::Paragraph]
        );
    }

    #[test]
    fn test_parse_toml_frontmatter() {
        let parser = MarkdownParser::new();
        let doc = parser
            .parse("+++\ntitle = \"T\"\n+++\n\nBody\n", Path::new("a.md"))
            .unwrap();

        assert_eq!(doc.frontmatter.unwrap().title.as_deref(), Some("T"));
        assert_eq!(doc.blocks.len(), 1);
    }

    #[test]
    fn test_no_frontmatter() {
        let parser = MarkdownParser::new();
        let doc = parser
            .parse("# Just Content\n\nNo frontmatter here.", Path::new("a.md"))
            .unwrap();

        assert!(doc.frontmatter.is_none());
        assert_eq!(doc.blocks.len(), 2);
    }

    #[test]
    fn test_empty_yaml_frontmatter_pair() {
        let parser = MarkdownParser::new();
        let doc = parser
            .parse("---\n---\n\n# Intro\n\nHello\n", Path::new("a.md"))
            .unwrap();

        assert_eq!(doc.frontmatter, Some(Frontmatter::default()));
        assert_eq!(
            kinds(&doc.blocks),
            vec![BlockKind::Heading { level: 1 }, BlockKind::Paragraph]
        );
    }

    #[test]
    fn test_empty_toml_frontmatter_pair() {
        let parser = MarkdownParser::new();
        let doc = parser
            .parse("+++\n+++\n\nBody\n", Path::new("a.md"))
            .unwrap();

        assert_eq!(doc.frontmatter, Some(Frontmatter::default()));
        assert_eq!(doc.blocks.len(), 1);
        assert_eq!(doc.blocks[0].text, "Body");
    }

    #[test]
    fn test_rules_later_are_not_frontmatter() {
        let parser = MarkdownParser::new();
        let doc = parser
            .parse("# Intro\n\n---\n\n---\n", Path::new("a.md"))
            .unwrap();
        assert!(doc.frontmatter.is_none());

        let doc = parser.parse("***\n***\n", Path::new("a.md")).unwrap();
        assert!(doc.frontmatter.is_none());
    }

    #[test]
    fn test_malformed_frontmatter() {
        let parser = MarkdownParser::new();
        let result = parser.parse("---\ntitle: [oops\n---\n\nBody\n", Path::new("bad.md"));
        assert!(matches!(result, Err(MarkdownError::Frontmatter(_))));
    }

    #[test]
    fn test_heading_source() {
        assert_eq!(heading_source("## Hello *there*"), "Hello *there*");
        assert_eq!(heading_source("# Closed ##"), "Closed");
        assert_eq!(heading_source("# C#"), "C#");
        assert_eq!(heading_source("Setext\n======"), "Setext");
        assert_eq!(heading_source("#"), "");
    }

    #[test]
    fn test_heading_source_text() {
        let parser = MarkdownParser::new();
        let tokens = parser.tokenize("## Use `cargo` {#cargo}\n");
        assert_eq!(tokens[0].text, "Use cargo");
        assert_eq!(tokens[0].kind, BlockKind::Heading { level: 2 });
    }
}
