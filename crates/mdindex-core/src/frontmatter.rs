//! Frontmatter parsing for content files.

use std::{collections::HashMap, path::Path};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoreError, Result};

/// Frontmatter metadata for content files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frontmatter {
    /// Page title.
    #[serde(default)]
    pub title: Option<String>,

    /// Page description.
    #[serde(default)]
    pub description: Option<String>,

    /// Tags for the page, either a single string or a list.
    #[serde(default, deserialize_with = "string_or_seq")]
    pub tags: Vec<String>,

    /// Every other key, e.g. the per-page index switch.
    #[serde(default, flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl Frontmatter {
    /// Parse the inside of a frontmatter block (without delimiters).
    pub fn parse(format: FrontmatterFormat, block: &str, path: &Path) -> Result<Self> {
        if block.trim().is_empty() {
            return Ok(Self::default());
        }

        match format {
            FrontmatterFormat::Yaml => {
                serde_yaml::from_str(block).map_err(|e| CoreError::frontmatter(path, e.to_string()))
            }
            FrontmatterFormat::Toml => {
                toml::from_str(block).map_err(|e| CoreError::frontmatter(path, e.to_string()))
            }
        }
    }

    /// Whether `key` is explicitly set to `false`.
    pub fn is_disabled(&self, key: &str) -> bool {
        matches!(self.extra.get(key), Some(serde_yaml::Value::Bool(false)))
    }
}

fn string_or_seq<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_yaml::Value>::deserialize(deserializer)? {
        Some(serde_yaml::Value::Sequence(items)) => items.iter().filter_map(scalar_tag).collect(),
        Some(value) => scalar_tag(&value).into_iter().collect(),
        None => Vec::new(),
    })
}

/// Tag text of a scalar; nulls and nested structures carry no tag.
fn scalar_tag(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Tagged(tagged) => scalar_tag(&tagged.value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let block = r#"title: "Test Post"
description: A description
tags:
  - rust
  - test"#;

        let fm = Frontmatter::parse(FrontmatterFormat::Yaml, block, Path::new("test.md"))
            .expect("parse");

        assert_eq!(fm.title.as_deref(), Some("Test Post"));
        assert_eq!(fm.description.as_deref(), Some("A description"));
        assert_eq!(fm.tags, vec!["rust", "test"]);
    }

    #[test]
    fn test_parse_toml_frontmatter() {
        let block = r#"title = "Test Post"
tags = ["rust", "test"]
search = false"#;

        let fm = Frontmatter::parse(FrontmatterFormat::Toml, block, Path::new("test.md"))
            .expect("parse");

        assert_eq!(fm.title.as_deref(), Some("Test Post"));
        assert_eq!(fm.tags, vec!["rust", "test"]);
        assert!(fm.is_disabled("search"));
    }

    #[test]
    fn test_single_tag_string() {
        let fm = Frontmatter::parse(FrontmatterFormat::Yaml, "tags: rust", Path::new("t.md"))
            .expect("parse");
        assert_eq!(fm.tags, vec!["rust"]);
    }

    #[test]
    fn test_non_string_tags() {
        let fm = Frontmatter::parse(
            FrontmatterFormat::Yaml,
            "tags: [2024, rust, true, 1.5]",
            Path::new("t.md"),
        )
        .expect("parse");
        assert_eq!(fm.tags, vec!["2024", "rust", "true", "1.5"]);

        let fm = Frontmatter::parse(FrontmatterFormat::Yaml, "tags: 2024", Path::new("t.md"))
            .expect("parse");
        assert_eq!(fm.tags, vec!["2024"]);

        let fm = Frontmatter::parse(
            FrontmatterFormat::Toml,
            "tags = [2024, \"rust\"]",
            Path::new("t.md"),
        )
        .expect("parse");
        assert_eq!(fm.tags, vec!["2024", "rust"]);
    }

    #[test]
    fn test_null_tags() {
        let fm = Frontmatter::parse(FrontmatterFormat::Yaml, "tags:", Path::new("t.md"))
            .expect("parse");
        assert!(fm.tags.is_empty());
    }

    #[test]
    fn test_disabled_flag() {
        let fm = Frontmatter::parse(
            FrontmatterFormat::Yaml,
            "title: A\nsearch: false\nfuse: true",
            Path::new("t.md"),
        )
        .expect("parse");

        assert!(fm.is_disabled("search"));
        assert!(!fm.is_disabled("fuse"));
        assert!(!fm.is_disabled("missing"));
    }

    #[test]
    fn test_empty_block_is_default() {
        let fm = Frontmatter::parse(FrontmatterFormat::Yaml, "  \n", Path::new("t.md"))
            .expect("parse");
        assert_eq!(fm, Frontmatter::default());
    }

    #[test]
    fn test_malformed_yaml() {
        let result = Frontmatter::parse(
            FrontmatterFormat::Yaml,
            "title: [unclosed",
            Path::new("bad.md"),
        );
        let err = result.unwrap_err();
        assert!(err.to_string().contains("bad.md"));
    }
}
