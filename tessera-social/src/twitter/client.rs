//! Publisher for Twitter/X: download the generated image, upload it to the
//! v1.1 media endpoint, then create a v2 post referencing the media id.
//!
//! Each of the three steps is its own failure point and maps onto its own
//! error kind; the first failure aborts the remaining steps. A rejected
//! signature (401/403) surfaces as [`TesseraError::Auth`] rather than the
//! step's kind, so auth problems are distinguishable from endpoint ones.
use crate::oauth;
use crate::twitter::types::{
    CreatePostRequest, CreatePostResponse, MediaUploadResponse, PostMedia, PostReceipt,
};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::multipart::{Form, Part};
use tessera_common::{Credentials, Result, TesseraError};
use tessera_http::{Auth, HttpClient, HttpError, RequestOpts};

const MEDIA_UPLOAD_URL: &str = "https://upload.twitter.com/1.1/media/upload.json";
const CREATE_POST_URL: &str = "https://api.twitter.com/2/tweets";

/// Anything that can publish a text + image pair.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, text: &str, image_url: &str) -> Result<PostReceipt>;
}

pub struct TwitterPublisher {
    http: HttpClient,
    credentials: Credentials,
    media_upload_url: String,
    create_post_url: String,
}

impl TwitterPublisher {
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_endpoints(credentials, MEDIA_UPLOAD_URL, CREATE_POST_URL)
    }

    /// Point the publisher at alternate endpoints. Used by tests.
    pub fn with_endpoints(
        credentials: Credentials,
        media_upload_url: &str,
        create_post_url: &str,
    ) -> Result<Self> {
        let http = HttpClient::new(create_post_url)
            .map_err(|e| TesseraError::Post(format!("HttpClient init failed: {e}")))?;
        Ok(Self {
            http,
            credentials,
            media_upload_url: media_upload_url.to_string(),
            create_post_url: create_post_url.to_string(),
        })
    }

    /// Download the image bytes. The hosted URL is time-limited, so this
    /// runs as the first step with no delay after generation.
    async fn fetch_media(&self, image_url: &str) -> Result<Vec<u8>> {
        self.http
            .get_bytes(
                image_url,
                RequestOpts {
                    allow_absolute: true,
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| TesseraError::MediaFetch(format!("{e}")))
    }

    /// Upload the image as multipart form data and return the platform's
    /// media identifier. The multipart body does not participate in the
    /// OAuth signature.
    async fn upload_media(&self, bytes: Vec<u8>) -> Result<String> {
        let header = self.signed_header("POST", &self.media_upload_url)?;

        let form = Form::new().part("media", Part::bytes(bytes));
        let resp: MediaUploadResponse = self
            .http
            .post_multipart(
                &self.media_upload_url,
                form,
                RequestOpts {
                    auth: Some(Auth::Header {
                        name: AUTHORIZATION,
                        value: header,
                    }),
                    allow_absolute: true,
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| classify(e, TesseraError::MediaUpload))?;

        tracing::debug!(media_id=%resp.media_id_string, "publish.media_uploaded");
        Ok(resp.media_id_string)
    }

    async fn create_post(&self, text: &str, media_id: String) -> Result<PostReceipt> {
        let header = self.signed_header("POST", &self.create_post_url)?;

        let req = CreatePostRequest {
            text: text.to_string(),
            media: PostMedia {
                media_ids: vec![media_id.clone()],
            },
        };
        let resp: CreatePostResponse = self
            .http
            .post_json(
                &self.create_post_url,
                &req,
                RequestOpts {
                    auth: Some(Auth::Header {
                        name: AUTHORIZATION,
                        value: header,
                    }),
                    allow_absolute: true,
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| classify(e, TesseraError::Post))?;

        Ok(PostReceipt {
            post_id: resp.data.id,
            text: resp.data.text,
            media_id,
        })
    }

    fn signed_header(&self, method: &str, url: &str) -> Result<HeaderValue> {
        let value = oauth::authorization_header(&self.credentials, method, url, &[])?;
        HeaderValue::from_str(&value)
            .map_err(|e| TesseraError::Auth(format!("invalid Authorization header: {e}")))
    }
}

#[async_trait]
impl Publisher for TwitterPublisher {
    async fn publish(&self, text: &str, image_url: &str) -> Result<PostReceipt> {
        tracing::info!(text_len = text.len(), "publish.start");

        let bytes = self.fetch_media(image_url).await?;
        let media_id = self.upload_media(bytes).await?;
        let receipt = self.create_post(text, media_id).await?;

        tracing::info!(post_id=%receipt.post_id, "publish.done");
        Ok(receipt)
    }
}

/// Auth rejections are their own kind; everything else belongs to the step.
fn classify(e: HttpError, step: fn(String) -> TesseraError) -> TesseraError {
    if let HttpError::Api { status, .. } = &e {
        if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN {
            return TesseraError::Auth(format!("{e}"));
        }
    }
    step(format!("{e}"))
}
