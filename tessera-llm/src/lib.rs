//! Provider-agnostic model integration for Tessera.
//!
//! This crate exposes the [`traits::TextModel`] and [`traits::ImageModel`]
//! interfaces the pipeline is written against, plus concrete OpenAI-backed
//! implementations. The traits exist so the orchestrator can be exercised
//! with deterministic in-memory fakes.
pub mod openai;
pub mod traits;

pub use openai::{OpenAiImageClient, OpenAiTextClient};
pub use traits::{ImageModel, TextModel};
