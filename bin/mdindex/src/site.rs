//! Content discovery.

use std::{fs, path::Path};

use mdindex_core::PageContext;
use mdindex_parser::MarkdownParser;
use walkdir::WalkDir;

/// Frontmatter key that suppresses a page's output when set to `false`.
pub const PERMALINK_KEY: &str = "permalink";

/// Collect page contexts for every Markdown file under `content_dir`, sorted
/// by path so builds are deterministic.
///
/// A page whose frontmatter sets `permalink: false` gets no output path.
/// Frontmatter is detected with the same parser the indexer uses. Unreadable
/// files and invalid frontmatter are left for the indexer to report.
pub fn collect_pages(content_dir: &Path, output_dir: &Path) -> Vec<PageContext> {
    let mut files: Vec<_> = WalkDir::new(content_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
        .collect();
    files.sort();

    let parser = MarkdownParser::new();
    files
        .iter()
        .filter_map(|file| {
            let page = PageContext::for_content_file(content_dir, output_dir, file)?;
            if has_permalink_disabled(&parser, file) {
                tracing::debug!(url = %page.url, "page output suppressed");
                return Some(PageContext::without_output(page.input_path, page.url));
            }
            Some(page)
        })
        .collect()
}

fn has_permalink_disabled(parser: &MarkdownParser, file: &Path) -> bool {
    let Ok(content) = fs::read_to_string(file) else {
        return false;
    };

    parser
        .parse(&content, file)
        .ok()
        .and_then(|document| document.frontmatter)
        .is_some_and(|frontmatter| frontmatter.is_disabled(PERMALINK_KEY))
}
