//! OAuth 1.0a request signing (HMAC-SHA1, RFC 5849).
//!
//! Only the OAuth protocol parameters and any URL query parameters enter the
//! signature. Multipart bodies are never part of the base string.

use base64::Engine;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::distr::Alphanumeric;
use rand::Rng;
use reqwest::Url;
use sha1::Sha1;

use crate::config::PluginConfig;
use crate::errors::{ExportError, ExportResult};

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";
const NONCE_LEN: usize = 32;

/// RFC 3986 unreserved characters stay as-is, everything else is encoded
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, OAUTH_ENCODE_SET).to_string()
}

#[derive(Clone)]
pub struct OAuthCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token: String,
    pub token_secret: String,
}

impl From<&PluginConfig> for OAuthCredentials {
    fn from(config: &PluginConfig) -> Self {
        Self {
            consumer_key: config.consumer_key.clone(),
            consumer_secret: config.consumer_secret.clone(),
            token: config.token.clone(),
            token_secret: config.token_secret.clone(),
        }
    }
}

impl OAuthCredentials {
    /// `Authorization` header value for one request, with a fresh nonce and timestamp
    pub fn authorization_header(&self, method: &str, url: &str) -> ExportResult<String> {
        let nonce = generate_nonce();
        let timestamp = chrono::Utc::now().timestamp();
        self.authorization_header_with(method, url, &nonce, timestamp)
    }

    pub fn authorization_header_with(
        &self,
        method: &str,
        url: &str,
        nonce: &str,
        timestamp: i64,
    ) -> ExportResult<String> {
        let mut oauth_params = self.protocol_params(nonce, timestamp);

        let url = Url::parse(url)
            .map_err(|e| ExportError::Signing(format!("invalid request URL {}: {}", url, e)))?;

        let mut signed_params = oauth_params.clone();
        signed_params.extend(
            url.query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned())),
        );

        let base = signature_base_string(method, &url, &signed_params);
        let signature = sign(&base, &self.consumer_secret, &self.token_secret)?;
        oauth_params.push(("oauth_signature".to_string(), signature));
        oauth_params.sort();

        let header_params = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!("OAuth {}", header_params))
    }

    fn protocol_params(&self, nonce: &str, timestamp: i64) -> Vec<(String, String)> {
        vec![
            ("oauth_consumer_key".to_string(), self.consumer_key.clone()),
            ("oauth_nonce".to_string(), nonce.to_string()),
            (
                "oauth_signature_method".to_string(),
                SIGNATURE_METHOD.to_string(),
            ),
            ("oauth_timestamp".to_string(), timestamp.to_string()),
            ("oauth_token".to_string(), self.token.clone()),
            ("oauth_version".to_string(), OAUTH_VERSION.to_string()),
        ]
    }
}

/// Base string URI: scheme, host, non-default port and path, without query or fragment
fn base_string_uri(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default().to_lowercase();
    let authority = match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    };
    format!("{}://{}{}", url.scheme(), authority, url.path())
}

pub fn signature_base_string(method: &str, url: &Url, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let normalized = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(&base_string_uri(url)),
        percent_encode(&normalized)
    )
}

pub fn sign(base_string: &str, consumer_secret: &str, token_secret: &str) -> ExportResult<String> {
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );

    let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes())
        .map_err(|e| ExportError::Signing(e.to_string()))?;
    mac.update(base_string.as_bytes());

    Ok(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}

fn generate_nonce() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}
