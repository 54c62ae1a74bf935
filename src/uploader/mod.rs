// Uploader module - signs and submits photo posts to Tumblr

pub mod oauth;
pub mod tumblr_client;

pub use oauth::OAuthCredentials;
pub use tumblr_client::{post_id, PhotoPost, TumblrClient};
