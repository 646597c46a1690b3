//! mdindex Core Library
//!
//! Core types, configuration, front matter and the plugin contract shared by
//! the mdindex parser, search indexer and CLI host.

pub mod config;
pub mod content;
pub mod error;
pub mod frontmatter;
pub mod pattern;
pub mod plugin;

pub use config::{Config, IgnoreConfig, IndexConfig, ShortcodeCall, SiteConfig};
pub use content::{ContentKind, PageContext};
pub use error::{CoreError, Result};
pub use frontmatter::{Frontmatter, FrontmatterFormat};
pub use pattern::Pattern;
pub use plugin::{Plugin, PluginHost};
