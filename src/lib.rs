//! Tumblr export hook for a research-data host.
//!
//! The host hands [`TumblrPlugin::export`] its export payload; the plugin
//! collects the items' photo files and tags and publishes them as a single
//! OAuth-signed multi-photo post.

pub mod config;
pub mod context;
pub mod errors;
pub mod payload;
pub mod plugin;
pub mod uploader;

pub use config::PluginConfig;
pub use context::{HostLogger, LogLogger, PluginContext};
pub use errors::{ExportError, ExportResult};
pub use plugin::TumblrPlugin;
