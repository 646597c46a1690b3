//! Plain-text extraction from block tokens.

use crate::markdown::BlockToken;

/// What to remove when turning a block into index text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripOptions {
    /// Remove HTML tags.
    pub html: bool,
    /// Remove Markdown syntax.
    pub markdown: bool,
}

impl Default for StripOptions {
    fn default() -> Self {
        Self {
            html: true,
            markdown: true,
        }
    }
}

impl StripOptions {
    /// Plain text of a block under these options, trimmed.
    pub fn plain_text(&self, token: &BlockToken) -> String {
        let source = if self.markdown {
            token.text.as_str()
        } else {
            token.source_text()
        };

        if self.html {
            strip_html(source).trim().to_string()
        } else {
            source.trim().to_string()
        }
    }
}

/// Strip HTML tags, comments and doctype declarations from text.
///
/// A `<` only opens a tag when followed by a letter, `/` or `!`, so prose like
/// `a < b` survives. An unterminated tag is kept as text.
pub fn strip_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('<') {
        result.push_str(&rest[..start]);
        let candidate = &rest[start..];

        let opens_tag = candidate[1..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!');

        let end = if candidate.starts_with("<!--") {
            candidate.find("-->").map(|i| i + 3)
        } else if opens_tag {
            candidate.find('>').map(|i| i + 1)
        } else {
            None
        };

        match end {
            Some(end) => rest = &candidate[end..],
            None => {
                result.push('<');
                rest = &candidate[1..];
            }
        }
    }

    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::MarkdownParser;

    #[test]
    fn test_strip_html() {
        assert_eq!(
            strip_html("<p>Hello <strong>world</strong>!</p>"),
            "Hello world!"
        );
        assert_eq!(strip_html("a < b and c > d"), "a < b and c > d");
        assert_eq!(strip_html("x <!-- note --> y"), "x  y");
        assert_eq!(strip_html("broken <span"), "broken <span");
    }

    #[test]
    fn test_plain_text_defaults() {
        let parser = MarkdownParser::new();
        let token = &parser.tokenize("Press <kbd>Ctrl</kbd> **now**")[0];

        assert_eq!(StripOptions::default().plain_text(token), "Press Ctrl now");
    }

    #[test]
    fn test_plain_text_keep_markdown() {
        let parser = MarkdownParser::new();
        let token = &parser.tokenize("Press <kbd>Ctrl</kbd> **now**")[0];

        let options = StripOptions {
            html: true,
            markdown: false,
        };
        assert_eq!(options.plain_text(token), "Press Ctrl **now**");
    }

    #[test]
    fn test_plain_text_keep_html() {
        let parser = MarkdownParser::new();
        let token = &parser.tokenize("Press <kbd>Ctrl</kbd> **now**")[0];

        let options = StripOptions {
            html: false,
            markdown: true,
        };
        assert_eq!(options.plain_text(token), "Press <kbd>Ctrl</kbd> now");
    }

    #[test]
    fn test_plain_text_heading_source() {
        let parser = MarkdownParser::new();
        let token = &parser.tokenize("## Getting *started*\n")[0];

        let options = StripOptions {
            html: true,
            markdown: false,
        };
        assert_eq!(options.plain_text(token), "Getting *started*");
    }
}
