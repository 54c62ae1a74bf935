//! The export hook the host invokes.

use serde_json::Value;

use crate::config::PluginConfig;
use crate::context::PluginContext;
use crate::payload;
use crate::uploader::{post_id, TumblrClient};

/// Tumblr export plugin. Holds only immutable configuration, so exports are
/// independent of each other.
pub struct TumblrPlugin {
    config: PluginConfig,
    context: PluginContext,
    client: TumblrClient,
}

impl TumblrPlugin {
    pub fn new(options: &Value, context: PluginContext) -> Self {
        let config = PluginConfig::from_options(options);
        log::debug!("Tumblr plugin configured: {:?}", config);

        let client = TumblrClient::new(&config);
        Self {
            config,
            context,
            client,
        }
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Export the selected items as one photo post.
    ///
    /// Failures are reported through the host logger and never returned.
    pub async fn export(&self, data: Option<&Value>) {
        let logger = &self.context.logger;

        let Some(items) = payload::graph_items(data) else {
            logger.info("Tumblr export: nothing to export");
            return;
        };

        let extraction = payload::extract_items(items);
        if extraction.is_empty() {
            logger.info("Tumblr export: no photo files found, nothing to post");
            return;
        }

        let tags: Vec<String> = extraction.tags.into_iter().collect();
        logger.info(&format!(
            "Tumblr export: posting {} photo(s) with {} tag(s) to {}",
            extraction.paths.len(),
            tags.len(),
            self.config.blog_host()
        ));

        // Caption is always empty
        match self.client.upload(&extraction.paths, "", &tags).await {
            Ok(response) => match post_id(&response) {
                Some(id) => logger.info(&format!("Tumblr export: created post {}", id)),
                None => logger.info(&format!("Tumblr export: posted ({})", response)),
            },
            Err(e) if e.is_auth_failure() => logger.error(&format!(
                "Tumblr export failed: {} (check the consumer key/secret and access token/secret)",
                e
            )),
            Err(e) => logger.error(&format!("Tumblr export failed: {}", e)),
        }
    }
}
