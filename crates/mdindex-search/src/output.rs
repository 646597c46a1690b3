//! Output path resolution and JSON file writing.

use std::{
    fs,
    path::{Path, PathBuf},
};

use mdindex_core::PageContext;
use serde::Serialize;

use crate::{IndexError, Result};

/// Resolve the JSON file location from the first page that has output.
///
/// The site root is the directory of the page's output file with the page
/// URL removed from it: `public/posts/a/index.html` at `/posts/a/` gives
/// `public`. The file lands at `<root>/<output>/<file_name>.json`.
pub fn resolve_output_path(page: &PageContext, output: &str, file_name: &str) -> Option<PathBuf> {
    let page_dir = page.output_path.as_deref()?.parent()?;
    let page_dir = page_dir.to_string_lossy();

    let url_dir = page.url.strip_suffix('/').unwrap_or(&page.url);
    let root = if url_dir.is_empty() {
        page_dir.into_owned()
    } else {
        page_dir.replacen(url_dir, "", 1)
    };

    Some(
        PathBuf::from(root)
            .join(output)
            .join(format!("{file_name}.json")),
    )
}

/// Serialize with a two-space indent, or compact when `minify` is set.
pub fn to_json<T: Serialize + ?Sized>(value: &T, minify: bool) -> Result<String> {
    let json = if minify {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}

/// Write `data` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, data: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| IndexError::io(dir, e))?;
        }
    }

    fs::write(path, data).map_err(|e| IndexError::io(path, e))
}
