//! mdindex Parser Library
//!
//! Markdown block tokenization, plain-text extraction and heading slugs.

pub mod markdown;
pub mod slug;
pub mod strip;

pub use markdown::{BlockKind, BlockToken, MarkdownError, MarkdownParser, ParsedDocument};
pub use slug::slugify;
pub use strip::{StripOptions, strip_html};
