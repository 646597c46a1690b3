//! Build command - indexes the site and writes the search index

use std::{cell::RefCell, path::Path, rc::Rc, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use mdindex_core::PluginHost;
use mdindex_search::{FlushReport, SearchPlugin};

use super::{load_config, resolve_dir};
use crate::site::collect_pages;

/// Outcome of a build.
#[derive(Debug, Default)]
pub struct BuildSummary {
    /// Pages passed to the shortcodes.
    pub pages: usize,
    /// Written index, if any page made it into the index.
    pub report: Option<FlushReport>,
}

/// Run the build command.
///
/// `output` overrides `site.output_dir`, `minify` forces compact JSON.
pub fn run(config_path: &Path, output: Option<&Path>, minify: bool) -> Result<BuildSummary> {
    let start = Instant::now();
    tracing::info!(?config_path, ?output, minify, "Starting build");

    let mut config = load_config(config_path)?;

    if let Some(output) = output {
        config.site.output_dir = output.to_path_buf();
    }
    if minify {
        config.index.minify = true;
    }

    tracing::debug!(?config, "Loaded configuration");

    let content_dir = resolve_dir(config_path, &config.site.content_dir);
    let output_dir = resolve_dir(config_path, &config.site.output_dir);

    let written = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&written);
    let plugin = SearchPlugin::new(config.index.clone())
        .on_flush(move |report| *sink.borrow_mut() = Some(report.clone()));

    let mut host = PluginHost::new();
    host.register(plugin)?;

    let pages = collect_pages(&content_dir, &output_dir);
    if pages.is_empty() {
        tracing::warn!(?content_dir, "no Markdown files found");
    }

    for page in &pages {
        for call in &config.site.shortcodes {
            host.call_shortcode(&call.name, page, &call.args)
                .wrap_err_with(|| format!("Shortcode `{}` failed on {}", call.name, page.url))?;
        }
    }

    host.after_build().wrap_err("Failed to write search index")?;

    let summary = BuildSummary {
        pages: pages.len(),
        report: written.borrow_mut().take(),
    };
    let duration = start.elapsed();

    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Pages:      {}", summary.pages);
    match &summary.report {
        Some(report) => {
            println!("  Indexed:    {}", report.stats.pages);
            println!("  Headings:   {}", report.stats.headings);
            println!("  Content:    {}", report.stats.content);
            println!("  Index:      {}", report.path.display());
        }
        None => println!("  Index:      nothing to write"),
    }
    println!();
    println!("  Duration:   {:.2}s", duration.as_secs_f64());
    println!();

    tracing::info!(pages = summary.pages, ?duration, "Build completed successfully");

    Ok(summary)
}
