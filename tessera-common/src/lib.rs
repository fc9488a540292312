//! Common types shared across Tessera crates.
//!
//! This crate defines the error taxonomy, credentials record, and
//! observability helpers used throughout the Tessera workspace. It is
//! intentionally lightweight so that every crate can depend on it without
//! pulling in heavy transitive costs.
//!
//! # Overview
//!
//! - [`TesseraError`] and [`Result`]: shared error handling
//! - [`Credentials`]: the immutable OAuth 1.0a credential record
//! - [`observability`]: centralised tracing/logging initialisation
use serde::{Deserialize, Serialize};

pub mod observability;

/// OAuth 1.0a credentials for the posting platform.
///
/// Provided once at startup and never mutated; every outbound platform
/// request is signed with this record. Values are secrets and must never
/// appear in logs — the manual `Debug` impl redacts them.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub token_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &"<redacted>")
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("token_secret", &"<redacted>")
            .finish()
    }
}

/// Error types used across the Tessera system.
///
/// Each pipeline stage maps its failure onto exactly one variant; the
/// orchestrator short-circuits on the first error and reports it upward.
#[derive(thiserror::Error, Debug)]
pub enum TesseraError {
    /// The text- or image-generation provider returned a failure.
    #[error("provider error: {0}")]
    Provider(String),

    /// The news feed could not be fetched or its markup parsed.
    #[error("news error: {0}")]
    News(String),

    /// The generated image could not be downloaded.
    #[error("media fetch error: {0}")]
    MediaFetch(String),

    /// The platform media endpoint rejected the upload.
    #[error("media upload error: {0}")]
    MediaUpload(String),

    /// Post creation failed after a successful media upload.
    #[error("post error: {0}")]
    Post(String),

    /// The platform rejected the request signature.
    #[error("auth error: {0}")]
    Auth(String),

    /// Configuration was incomplete or invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenient alias for results that use [`TesseraError`].
pub type Result<T> = std::result::Result<T, TesseraError>;
