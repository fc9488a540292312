use serde::{Deserialize, Serialize};

/// v1.1 media upload response. Only the string id is used; the numeric id
/// loses precision in some JSON decoders, which is why the platform ships
/// both.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaUploadResponse {
    pub media_id_string: String,
    #[serde(default)]
    pub expires_after_secs: Option<u64>,
}

/// v2 post creation request body.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePostRequest {
    pub text: String,
    pub media: PostMedia,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostMedia {
    pub media_ids: Vec<String>,
}

/// v2 post creation response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostResponse {
    pub data: CreatedPost,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedPost {
    pub id: String,
    pub text: String,
}

/// Confirmation handed back to the orchestrator after a successful publish.
#[derive(Debug, Clone)]
pub struct PostReceipt {
    pub post_id: String,
    pub text: String,
    pub media_id: String,
}
