//! Plugin contract between the host build and its plugins.
//!
//! The host renders pages one at a time. Page layouts invoke named shortcodes,
//! which the [`PluginHost`] routes to the plugin that registered the name. Once
//! every page is rendered the host fires the after-build event on all plugins
//! in registration order.

use tracing::debug;

use crate::{
    content::PageContext,
    error::{CoreError, Result},
};

/// A build plugin.
pub trait Plugin {
    /// Plugin name used in logs and errors.
    fn name(&self) -> &str;

    /// Shortcode this plugin answers to, if any.
    fn shortcode(&self) -> Option<&str> {
        None
    }

    /// Render the shortcode for one page; the returned text replaces the call.
    fn render_shortcode(&mut self, page: &PageContext, args: &[String]) -> Result<String> {
        let _ = (page, args);
        Ok(String::new())
    }

    /// Runs once after all pages of a build were rendered.
    fn after_build(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Registry of plugins for one build.
#[derive(Default)]
pub struct PluginHost {
    plugins: Vec<Box<dyn Plugin>>,
}

impl std::fmt::Debug for PluginHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginHost")
            .field(
                "plugins",
                &self.plugins.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl PluginHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin. A later plugin never shadows an earlier shortcode.
    pub fn register(&mut self, plugin: impl Plugin + 'static) -> Result<()> {
        if let Some(name) = plugin.shortcode() {
            if self.has_shortcode(name) {
                return Err(CoreError::config(format!(
                    "shortcode `{name}` is already registered"
                )));
            }
        }

        debug!(plugin = plugin.name(), shortcode = ?plugin.shortcode(), "registered plugin");
        self.plugins.push(Box::new(plugin));
        Ok(())
    }

    /// Whether a plugin answers to `name`.
    pub fn has_shortcode(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p.shortcode() == Some(name))
    }

    /// Dispatch a shortcode call for one page.
    pub fn call_shortcode(
        &mut self,
        name: &str,
        page: &PageContext,
        args: &[String],
    ) -> Result<String> {
        let plugin = self
            .plugins
            .iter_mut()
            .find(|p| p.shortcode() == Some(name))
            .ok_or_else(|| CoreError::UnknownShortcode(name.to_string()))?;

        plugin.render_shortcode(page, args)
    }

    /// Fire the after-build event on every plugin, stopping at the first error.
    pub fn after_build(&mut self) -> Result<()> {
        for plugin in &mut self.plugins {
            debug!(plugin = plugin.name(), "after build");
            plugin.after_build()?;
        }
        Ok(())
    }

    /// Number of registered plugins.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Whether no plugin is registered.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
