//! Configuration management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    content::ContentKind,
    error::{CoreError, Result},
    pattern::Pattern,
};

/// Environment variable prefix for overrides, e.g. `MDINDEX__INDEX__MINIFY=true`.
pub const ENV_PREFIX: &str = "MDINDEX";

/// Main configuration structure for mdindex.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Site layout settings used by the CLI host.
    #[serde(default)]
    pub site: SiteConfig,

    /// Search index settings.
    #[serde(default)]
    pub index: IndexConfig,
}

/// Site layout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Directory holding Markdown sources.
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    /// Directory rendered pages are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Shortcodes the page layout invokes for every page.
    #[serde(default = "default_shortcodes")]
    pub shortcodes: Vec<ShortcodeCall>,
}

/// One shortcode invocation in the page layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcodeCall {
    /// Shortcode name.
    pub name: String,

    /// Positional arguments.
    #[serde(default)]
    pub args: Vec<String>,
}

/// Search index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Directory under the site root the JSON file is written to.
    #[serde(default)]
    pub output: String,

    /// Write compact JSON instead of two-space indentation.
    #[serde(default)]
    pub minify: bool,

    /// Name of the shortcode that indexes a page.
    #[serde(default = "default_shortcode")]
    pub shortcode: String,

    /// Frontmatter key that opts a page out when set to `false`.
    #[serde(default = "default_frontmatter_key")]
    pub frontmatter_key: String,

    /// Block kinds collected under headings.
    #[serde(default = "default_content")]
    pub content: Vec<ContentKind>,

    /// Code block languages to collect. Code is opt-in per language.
    #[serde(default)]
    pub codeblock: Vec<String>,

    /// Remove HTML tags from collected text.
    #[serde(default = "default_true")]
    pub strip_html: bool,

    /// Remove Markdown syntax from collected text.
    #[serde(default = "default_true")]
    pub strip_markdown: bool,

    /// Render inline Markdown of headings and text to HTML before storing.
    #[serde(default)]
    pub render_inline: bool,

    /// Ignore patterns.
    #[serde(default)]
    pub ignore: IgnoreConfig,
}

/// Patterns excluding headings and blocks from the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IgnoreConfig {
    /// Block text patterns; literals match as a prefix.
    #[serde(default = "default_ignore_syntax")]
    pub syntax: Vec<Pattern>,

    /// Heading patterns; literals match the lowercased heading exactly.
    #[serde(default)]
    pub heading: Vec<Pattern>,
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_shortcodes() -> Vec<ShortcodeCall> {
    vec![ShortcodeCall {
        name: default_shortcode(),
        args: vec!["search".to_string()],
    }]
}

fn default_shortcode() -> String {
    "search".to_string()
}

fn default_frontmatter_key() -> String {
    "search".to_string()
}

fn default_content() -> Vec<ContentKind> {
    ContentKind::BLOCKS.to_vec()
}

fn default_true() -> bool {
    true
}

fn default_ignore_syntax() -> Vec<Pattern> {
    // Template-language delimiters and raw HTML.
    let mut patterns: Vec<Pattern> = ["{{", "{%", ":::"]
        .into_iter()
        .map(Pattern::literal)
        .collect();
    if let Ok(html) = Pattern::regex("^<[a-z]") {
        patterns.insert(0, html);
    }
    patterns
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            output_dir: default_output_dir(),
            shortcodes: default_shortcodes(),
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            output: String::new(),
            minify: false,
            shortcode: default_shortcode(),
            frontmatter_key: default_frontmatter_key(),
            content: default_content(),
            codeblock: Vec::new(),
            strip_html: true,
            strip_markdown: true,
            render_inline: false,
            ignore: IgnoreConfig::default(),
        }
    }
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            syntax: default_ignore_syntax(),
            heading: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `MDINDEX__*` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        Self::load_with_env_source(path, None)
    }

    /// Load with overrides read from `vars` instead of the process
    /// environment when given.
    fn load_with_env_source(
        path: &Path,
        vars: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .source(vars),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.index.shortcode.trim().is_empty() {
            return Err(CoreError::config("index.shortcode cannot be empty"));
        }

        if self.index.frontmatter_key.trim().is_empty() {
            return Err(CoreError::config("index.frontmatter_key cannot be empty"));
        }

        if self.index.content.contains(&ContentKind::Heading) {
            tracing::warn!("index.content lists `heading`; headings are always indexed");
        }

        if self.index.content.contains(&ContentKind::Code) && self.index.codeblock.is_empty() {
            tracing::debug!("index.codeblock is empty, code blocks will not be indexed");
        }

        Ok(())
    }
}
