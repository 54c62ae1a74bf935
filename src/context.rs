//! Capabilities the host hands to the plugin.
//!
//! The plugin reports every outcome through the injected logger and never
//! reaches for a global one.

use std::sync::Arc;

/// Logging capability supplied by the host
pub trait HostLogger: Send + Sync {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards host log calls to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogLogger;

impl HostLogger for LogLogger {
    fn info(&self, message: &str) {
        log::info!(target: "tumblr_export", "{}", message);
    }

    fn error(&self, message: &str) {
        log::error!(target: "tumblr_export", "{}", message);
    }
}

/// Context provided to the plugin at construction
#[derive(Clone)]
pub struct PluginContext {
    pub logger: Arc<dyn HostLogger>,
}

impl PluginContext {
    pub fn new(logger: Arc<dyn HostLogger>) -> Self {
        Self { logger }
    }
}

impl Default for PluginContext {
    fn default() -> Self {
        Self::new(Arc::new(LogLogger))
    }
}
