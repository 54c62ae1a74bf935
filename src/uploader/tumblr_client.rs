//! Tumblr post client.
//!
//! One signed multipart POST per post; the JSON body is parsed before the
//! status is looked at.

use crate::config::PluginConfig;
use crate::errors::{ExportError, ExportResult};
use reqwest::header::AUTHORIZATION;
use reqwest::{multipart, Body, Client};
use std::path::{Path, PathBuf};
use tokio_util::io::ReaderStream;

use super::oauth::OAuthCredentials;

const POST_TYPE: &str = "photo";

/// Tumblr API client for the configured blog
pub struct TumblrClient {
    client: Client,
    credentials: OAuthCredentials,
    endpoint: String,
}

impl TumblrClient {
    pub fn new(config: &PluginConfig) -> Self {
        Self {
            client: Client::new(),
            credentials: OAuthCredentials::from(config),
            endpoint: config.post_endpoint(),
        }
    }

    pub fn post_endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Create one photo post from the given files. Exactly one request is made.
    pub async fn upload(
        &self,
        files: &[PathBuf],
        caption: &str,
        tags: &[String],
    ) -> ExportResult<serde_json::Value> {
        let post = PhotoPost::new(caption, tags, files)?;
        self.send(&post).await
    }

    pub async fn send(&self, post: &PhotoPost) -> ExportResult<serde_json::Value> {
        // Files are opened here and closed when the form is sent or dropped
        let form = post.build_form().await?;
        let authorization = self
            .credentials
            .authorization_header("POST", &self.endpoint)?;

        log::debug!(
            "Posting {} photo(s) with {} tag(s) to {}",
            post.files.len(),
            post.tags.len(),
            self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, authorization)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        let json: serde_json::Value =
            serde_json::from_slice(&body).map_err(|source| ExportError::ResponseParse {
                status: status.as_u16(),
                source,
            })?;

        if !status.is_success() {
            return Err(ExportError::platform_rejected(status.as_u16(), &json));
        }

        Ok(json)
    }
}

/// One multi-photo post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoPost {
    pub caption: String,
    pub tags: Vec<String>,
    pub files: Vec<PathBuf>,
}

impl PhotoPost {
    pub fn new(caption: &str, tags: &[String], files: &[PathBuf]) -> ExportResult<Self> {
        if files.is_empty() {
            return Err(ExportError::NoPhotos);
        }

        Ok(Self {
            caption: caption.to_string(),
            tags: tags.to_vec(),
            files: files.to_vec(),
        })
    }

    /// Text fields in send order; `tags` is left out when there are none
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("type", POST_TYPE.to_string()),
            ("caption", self.caption.clone()),
        ];

        if !self.tags.is_empty() {
            fields.push(("tags", self.tags.join(",")));
        }

        fields
    }

    /// Multipart field name of the n-th photo
    pub fn file_field_name(index: usize) -> String {
        format!("data[{}]", index)
    }

    pub async fn build_form(&self) -> ExportResult<multipart::Form> {
        let mut form = multipart::Form::new();

        for (key, value) in self.text_fields() {
            form = form.text(key, value);
        }

        for (index, path) in self.files.iter().enumerate() {
            let part = file_part(path).await?;
            form = form.part(Self::file_field_name(index), part);
        }

        Ok(form)
    }
}

async fn file_part(path: &Path) -> ExportResult<multipart::Part> {
    let file = tokio::fs::File::open(path).await?;
    let length = file.metadata().await?.len();

    let filename = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    let body = Body::wrap_stream(ReaderStream::new(file));
    let part = multipart::Part::stream_with_length(body, length)
        .file_name(filename)
        .mime_str(mime_type_for(path))?;

    Ok(part)
}

/// MIME type from the file extension
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("tif") | Some("tiff") => "image/tiff",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Id of the created post from a successful response body
pub fn post_id(response: &serde_json::Value) -> Option<String> {
    let created = response.get("response")?;
    if let Some(id) = created.get("id_string").and_then(|s| s.as_str()) {
        return Some(id.to_string());
    }

    match created.get("id")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
