//! Content kinds and per-page context.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Kind of an indexed content entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Synthetic entry carrying a heading's text.
    Heading,
    /// Paragraph text.
    Text,
    /// Blockquote text.
    Quote,
    /// Fenced code block.
    Code,
    /// List text.
    List,
}

impl ContentKind {
    /// Kinds collected from a document body by default.
    pub const BLOCKS: [Self; 4] = [Self::Text, Self::Quote, Self::Code, Self::List];

    /// Sort priority used by consumers to rank matches.
    ///
    /// Lower values rank first: heading, text, list, code, quote.
    pub fn sort(&self) -> u8 {
        match self {
            Self::Heading => 1,
            Self::Text => 2,
            Self::List => 3,
            Self::Code => 4,
            Self::Quote => 5,
        }
    }

    /// Lowercase name as written in configuration and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Text => "text",
            Self::Quote => "quote",
            Self::Code => "code",
            Self::List => "list",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Context the host supplies for the page being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    /// Source file of the page.
    pub input_path: PathBuf,

    /// Rendered file location, `None` when the page produces no output.
    pub output_path: Option<PathBuf>,

    /// Public URL of the page (e.g. `/posts/hello/`).
    pub url: String,
}

impl PageContext {
    /// Create a context for a page that is written to `output_path`.
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: Some(output_path.into()),
            url: url.into(),
        }
    }

    /// Create a context for a page whose output is suppressed.
    pub fn without_output(input_path: impl Into<PathBuf>, url: impl Into<String>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: None,
            url: url.into(),
        }
    }

    /// Derive the URL and output file for a content file, the way a site
    /// generator with "pretty" URLs lays pages out.
    ///
    /// - `index.md` → `/`, `<output>/index.html`
    /// - `posts/hello.md` → `/posts/hello/`, `<output>/posts/hello/index.html`
    /// - `posts/index.md` → `/posts/`, `<output>/posts/index.html`
    pub fn for_content_file(content_dir: &Path, output_dir: &Path, file: &Path) -> Option<Self> {
        let relative = file.strip_prefix(content_dir).ok()?;
        let stem = relative.file_stem()?.to_str()?;

        let mut segments: Vec<String> = relative
            .parent()
            .map(|parent| {
                parent
                    .components()
                    .filter_map(|c| c.as_os_str().to_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        if stem != "index" {
            segments.push(stem.to_string());
        }

        let url = if segments.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", segments.join("/"))
        };

        let mut output_path = output_dir.to_path_buf();
        for segment in &segments {
            output_path.push(segment);
        }
        output_path.push("index.html");

        Some(Self::new(file, output_path, url))
    }
}
