//! OpenAI-backed implementations of the model traits.
//!
//! Text goes through the chat-completions endpoint; images through the
//! image-generations endpoint with fixed parameters (one image, 1024x1024).
//! Any non-success status or malformed body maps to
//! [`TesseraError::Provider`] carrying the provider's own message.
use crate::traits::{ImageModel, TextModel};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tessera_common::{Result, TesseraError};
use tessera_http::{Auth, HttpClient, HttpError, RequestOpts};

const OPENAI_API_BASE: &str = "https://api.openai.com/v1/";

pub struct OpenAiTextClient {
    client: HttpClient,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub content: String,
}

impl OpenAiTextClient {
    pub fn new(api_key: String, model: String) -> Result<Self> {
        let client = HttpClient::new(OPENAI_API_BASE)
            .map_err(|e| TesseraError::Provider(format!("HttpClient init failed: {e}")))?;

        Ok(Self {
            client,
            api_key,
            model,
        })
    }

    /// Same client against a different base URL, for tests and gateways.
    pub fn with_base_url(api_key: String, model: String, base: &str) -> Result<Self> {
        let client = HttpClient::new(base)
            .map_err(|e| TesseraError::Provider(format!("HttpClient init failed: {e}")))?;
        Ok(Self {
            client,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl TextModel for OpenAiTextClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let req = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user.to_string(),
                },
            ],
        };

        let resp: ChatResponse = self
            .client
            .post_json(
                "chat/completions",
                &req,
                RequestOpts {
                    auth: Some(Auth::Bearer(&self.api_key)),
                    ..Default::default()
                },
            )
            .await
            .map_err(http_to_provider)?;

        let text = resp
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| TesseraError::Provider("empty choices in completion".into()))?;

        tracing::debug!(model=%self.model, len = text.len(), "llm.completion");
        Ok(text)
    }
}

pub struct OpenAiImageClient {
    client: HttpClient,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ImageRequest {
    model: String,
    prompt: String,
    n: u8,
    size: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ImageResponse {
    #[serde(default)]
    pub data: Vec<ImageResult>,
}

#[derive(Debug, Deserialize)]
pub struct ImageResult {
    pub url: String,
}

impl OpenAiImageClient {
    pub fn new(api_key: String, model: String) -> Result<Self> {
        let client = HttpClient::new(OPENAI_API_BASE)
            .map_err(|e| TesseraError::Provider(format!("HttpClient init failed: {e}")))?;
        Ok(Self {
            client,
            api_key,
            model,
        })
    }

    pub fn with_base_url(api_key: String, model: String, base: &str) -> Result<Self> {
        let client = HttpClient::new(base)
            .map_err(|e| TesseraError::Provider(format!("HttpClient init failed: {e}")))?;
        Ok(Self {
            client,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl ImageModel for OpenAiImageClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        tracing::info!(model=%self.model, prompt_len = prompt.len(), "image.generate.start");

        let req = ImageRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            n: 1,
            size: "1024x1024",
        };

        let resp: ImageResponse = self
            .client
            .post_json(
                "images/generations",
                &req,
                RequestOpts {
                    auth: Some(Auth::Bearer(&self.api_key)),
                    // Image generation routinely takes longer than chat.
                    timeout: Some(std::time::Duration::from_secs(120)),
                    ..Default::default()
                },
            )
            .await
            .map_err(http_to_provider)?;

        resp.data
            .into_iter()
            .next()
            .map(|d| d.url)
            .ok_or_else(|| TesseraError::Provider("empty data in image response".into()))
    }
}

fn http_to_provider(e: HttpError) -> TesseraError {
    TesseraError::Provider(format!("{e}"))
}
