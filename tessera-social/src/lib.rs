//! Social network publishing for Tessera.
//!
//! Currently only the Twitter/X publisher is implemented: an OAuth 1.0a
//! request signer plus the two-call media-upload-then-post flow.
pub mod oauth;
pub mod twitter;

pub use twitter::{PostReceipt, Publisher, TwitterPublisher};
