//! Twitter/X publishing surface.
//!
//! Submodules provide the publisher client and strongly typed response
//! models for the media-upload and post-creation endpoints.
pub mod client;
pub mod types;

pub use client::{Publisher, TwitterPublisher};
pub use types::PostReceipt;
