use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{ExportError, ExportResult};

pub const DEFAULT_API_BASE: &str = "https://api.tumblr.com";

/// Immutable plugin configuration, assembled once from the host's options
#[derive(Clone, PartialEq, Eq)]
pub struct PluginConfig {
    pub blog_identifier: String,
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token: String,
    pub token_secret: String,
    pub api_base: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            blog_identifier: "your-blog".to_string(),
            consumer_key: "your-consumer-key".to_string(),
            consumer_secret: "your-consumer-secret".to_string(),
            token: "your-access-token".to_string(),
            token_secret: "your-access-token-secret".to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

// Secrets never reach the logs, even through {:?}
impl fmt::Debug for PluginConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginConfig")
            .field("blog_identifier", &self.blog_identifier)
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("token", &"<redacted>")
            .field("token_secret", &"<redacted>")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl PluginConfig {
    /// Merge host-supplied options over the built-in defaults.
    ///
    /// Each recognised key takes the host's value when it is a string and
    /// keeps the default otherwise. Nothing is validated here: placeholder
    /// credentials are rejected by Tumblr, not locally.
    pub fn from_options(options: &serde_json::Value) -> Self {
        let mut config = Self::default();

        let Some(map) = options.as_object() else {
            if !options.is_null() {
                log::warn!("Plugin options are not an object; using defaults");
            }
            return config;
        };

        let pick = |key: &str, slot: &mut String| {
            if let Some(value) = map.get(key).and_then(|v| v.as_str()) {
                *slot = value.to_string();
            }
        };

        pick("blogIdentifier", &mut config.blog_identifier);
        pick("consumerKey", &mut config.consumer_key);
        pick("consumerSecret", &mut config.consumer_secret);
        pick("token", &mut config.token);
        pick("tokenSecret", &mut config.token_secret);
        pick("apiBase", &mut config.api_base);

        config
    }

    /// Bare blog name, with any scheme, trailing slash or `.tumblr.com`
    /// suffix removed.
    pub fn blog_name(&self) -> &str {
        let s = self.blog_identifier.trim();
        let s = s
            .strip_prefix("https://")
            .or_else(|| s.strip_prefix("http://"))
            .unwrap_or(s);
        let s = s.strip_suffix('/').unwrap_or(s);
        s.strip_suffix(".tumblr.com").unwrap_or(s)
    }

    pub fn blog_host(&self) -> String {
        format!("{}.tumblr.com", self.blog_name())
    }

    /// Fixed post endpoint for the configured blog
    pub fn post_endpoint(&self) -> String {
        format!(
            "{}/v2/blog/{}/post",
            self.api_base.trim_end_matches('/'),
            self.blog_host()
        )
    }
}

/// Default location of the options document: `<config dir>/tumblr-export/options.json`
pub fn default_options_path() -> ExportResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ExportError::config("Could not find config directory"))?
        .join("tumblr-export");

    Ok(config_dir.join("options.json"))
}

pub fn load_options(path: &Path) -> ExportResult<serde_json::Value> {
    let options_str = fs::read_to_string(path)?;
    let options: serde_json::Value = serde_json::from_str(&options_str)?;
    log::debug!("Loaded plugin options from {}", path.display());
    Ok(options)
}

/// Options from an explicit file, else the default file if present, else none.
pub fn resolve_options(explicit: Option<&Path>) -> ExportResult<serde_json::Value> {
    if let Some(path) = explicit {
        return load_options(path);
    }

    match default_options_path() {
        Ok(path) if path.exists() => load_options(&path),
        Ok(path) => {
            log::info!(
                "No options file at {}; using placeholder credentials",
                path.display()
            );
            Ok(serde_json::Value::Null)
        }
        Err(e) => {
            log::warn!("{}; using placeholder credentials", e);
            Ok(serde_json::Value::Null)
        }
    }
}
