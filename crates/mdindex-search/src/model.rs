//! Index model: pages, headings and content entries cross-referenced by
//! position.
//!
//! The three sequences are append-only. Every entry records the positions of
//! its owning page and heading, and pages and headings record the range of
//! entries written while they were processed.

use mdindex_core::ContentKind;
use serde::{Deserialize, Serialize};

/// Inclusive range of positions in a sequence.
///
/// Serialized as `[start]` until something is written, then `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<usize>", try_from = "Vec<usize>")]
pub struct IndexRange {
    /// First position.
    pub start: usize,
    /// Last position written, if any.
    pub end: Option<usize>,
}

impl IndexRange {
    /// A range starting at `start` with nothing written yet.
    pub fn new(start: usize) -> Self {
        Self { start, end: None }
    }

    /// Extend the range so it covers `index`. Ranges never shrink.
    pub fn extend_to(&mut self, index: usize) {
        let index = index.max(self.start);
        self.end = Some(self.end.map_or(index, |end| end.max(index)));
    }

    /// Whether `index` lies within the range.
    pub fn contains(&self, index: usize) -> bool {
        self.end
            .is_some_and(|end| (self.start..=end).contains(&index))
    }

    /// Number of positions covered.
    pub fn len(&self) -> usize {
        self.end.map_or(0, |end| (end + 1).saturating_sub(self.start))
    }

    /// Whether nothing was written into the range.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<IndexRange> for Vec<usize> {
    fn from(range: IndexRange) -> Self {
        match range.end {
            Some(end) => vec![range.start, end],
            None => vec![range.start],
        }
    }
}

impl TryFrom<Vec<usize>> for IndexRange {
    type Error = String;

    fn try_from(value: Vec<usize>) -> Result<Self, Self::Error> {
        match value.as_slice() {
            [start] => Ok(Self::new(*start)),
            [start, end] if end >= start => Ok(Self {
                start: *start,
                end: Some(*end),
            }),
            other => Err(format!("invalid index range {other:?}")),
        }
    }
}

/// One indexed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Title from frontmatter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Description from frontmatter.
    #[serde(default)]
    pub description: String,

    /// Tags from frontmatter.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Page URL.
    pub url: String,

    /// Position of this page in `pages`.
    pub pidx: usize,

    /// Headings written for this page.
    pub hidx: IndexRange,

    /// Content entries written for this page.
    pub cidx: IndexRange,
}

/// One heading-delimited section of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Page URL with the heading fragment, `/path#anchor`.
    pub anchor: String,

    /// Owning page.
    pub pidx: usize,

    /// Position of this heading in `heading`.
    pub hidx: usize,

    /// Content entries under this heading, including its own text entry.
    pub cidx: IndexRange,
}

/// One searchable unit of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    /// Text to search.
    pub text: String,

    /// Content kind.
    #[serde(rename = "type")]
    pub kind: ContentKind,

    /// Language of a code entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    /// Ranking priority of the kind, see [`ContentKind::sort`].
    pub sort: u8,

    /// Owning page.
    pub pidx: usize,

    /// Owning heading.
    pub hidx: usize,

    /// Position of this entry in `content`.
    pub cidx: usize,
}

/// The accumulated index of one build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIndex {
    /// Indexed pages.
    pub pages: Vec<Page>,

    /// Headings of all pages.
    pub heading: Vec<Heading>,

    /// Content entries of all headings.
    pub content: Vec<ContentEntry>,
}

impl SearchIndex {
    /// Whether every sequence holds at least one entry.
    pub fn is_complete(&self) -> bool {
        !self.pages.is_empty() && !self.heading.is_empty() && !self.content.is_empty()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() && self.heading.is_empty() && self.content.is_empty()
    }

    /// Entry counts of the three sequences.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            pages: self.pages.len(),
            headings: self.heading.len(),
            content: self.content.len(),
        }
    }

    /// Content entries under a heading, in order.
    pub fn heading_content(&self, hidx: usize) -> &[ContentEntry] {
        self.heading
            .get(hidx)
            .and_then(|heading| {
                let end = heading.cidx.end?;
                self.content.get(heading.cidx.start..=end)
            })
            .unwrap_or_default()
    }

    /// Clear all sequences.
    pub fn clear(&mut self) {
        self.pages.clear();
        self.heading.clear();
        self.content.clear();
    }
}

/// Entry counts of an index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of pages.
    pub pages: usize,

    /// Number of headings.
    pub headings: usize,

    /// Number of content entries.
    pub content: usize,
}
