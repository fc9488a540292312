use async_trait::async_trait;
use tessera_common::Result;

/// A text-completion provider: one system instruction, one user message,
/// one generated string back. No streaming, no retries.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

/// An image-generation provider. Returns a hosted URL for the generated
/// image; the URL expires on a provider-defined schedule, so callers must
/// dereference it promptly.
#[async_trait]
pub trait ImageModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
