//! mdindex CLI Library
//!
//! Drives a build over a Markdown content directory: every page is passed to
//! the configured shortcodes, then the after-build event writes the search
//! index.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, check)
//! - [`site`] - Content discovery and page contexts
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use mdindex::cmd;
//!
//! cmd::build::run(Path::new("mdindex.toml"), None, false).unwrap();
//! ```

pub mod cmd;
pub mod site;

pub use mdindex_core::Config;
pub use mdindex_search::{FlushReport, SearchPlugin};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
