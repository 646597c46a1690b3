//! Check command - validate configuration and content

use std::{fs, path::Path};

use color_eyre::eyre::{Result, bail};
use mdindex_core::Config;
use mdindex_parser::MarkdownParser;

use super::{load_config, resolve_dir};
use crate::site::collect_pages;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates configuration and the frontmatter of all content files.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and content");

    let result = validate(config_path);

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Collect errors and warnings without printing a summary.
pub fn validate(config_path: &Path) -> ValidationResult {
    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = match load_config(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            c
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e:#}"));
            println!("  ✗ Configuration invalid: {e:#}");
            return result;
        }
    };

    check_shortcodes(&config, &mut result);

    let content_dir = resolve_dir(config_path, &config.site.content_dir);
    if content_dir.is_dir() {
        println!("\nChecking content files...");
        validate_content_files(&config, &content_dir, &mut result);
    } else {
        result.add_warning(format!(
            "Content directory does not exist: {}",
            content_dir.display()
        ));
    }

    result
}

/// The index is only built when the layout calls the index shortcode.
fn check_shortcodes(config: &Config, result: &mut ValidationResult) {
    let shortcode = &config.index.shortcode;

    if !config.site.shortcodes.iter().any(|call| &call.name == shortcode) {
        result.add_warning(format!(
            "site.shortcodes never calls `{shortcode}`, no search index will be written"
        ));
    }

    for call in &config.site.shortcodes {
        if &call.name != shortcode {
            result.add_error(format!("Unknown shortcode in site.shortcodes: `{}`", call.name));
        }
    }
}

/// Validate the frontmatter of every Markdown file, read the way the
/// indexer reads it.
fn validate_content_files(config: &Config, dir: &Path, result: &mut ValidationResult) {
    let parser = MarkdownParser::new();
    let key = &config.index.frontmatter_key;
    let mut checked = 0;
    let mut failed = 0;
    let mut indexed = 0;

    for page in collect_pages(dir, &config.site.output_dir) {
        checked += 1;
        let path = &page.input_path;

        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                result.add_error(format!("{}: Failed to read file: {e}", path.display()));
                failed += 1;
                continue;
            }
        };

        match parser.parse(&content, path).map(|document| document.frontmatter) {
            Ok(Some(frontmatter)) if frontmatter.is_disabled(key) => {
                tracing::debug!(url = %page.url, "page opted out of search");
            }
            Ok(Some(_)) => indexed += 1,
            Ok(None) => result.add_warning(format!(
                "{}: No frontmatter, page will not be indexed",
                path.display()
            )),
            Err(e) => {
                result.add_error(format!("{}: {e}", path.display()));
                failed += 1;
            }
        }
    }

    if failed == 0 {
        println!("  ✓ All {checked} content files valid ({indexed} indexed)");
    } else {
        println!("  ✗ {failed}/{checked} content files have errors");
    }
}
