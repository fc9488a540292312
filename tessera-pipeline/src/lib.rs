//! The end-to-end posting pipeline.
//!
//! One run is a strict sequential chain of asynchronous calls: pick a
//! source work, ask the text model for an anecdote, blend in current news,
//! derive an image prompt, generate the image, add hashtags, repair the
//! length if needed, publish. Every stage consumes exactly its
//! predecessor's output, and the first failing stage short-circuits the
//! rest via `?`. Nothing is cached or reused across runs, so concurrent
//! runs only share the read-only credentials and catalog.
use rand::Rng;
use std::sync::Arc;
use tessera_common::Result;
use tessera_llm::{ImageModel, TextModel};
use tessera_news::HeadlineSource;
use tessera_social::{PostReceipt, Publisher};

pub mod catalog;
pub mod prompts;

pub use catalog::Medium;

/// Platform character limit for one post.
pub const POST_CHAR_LIMIT: usize = 280;

/// Bounded length-repair: at most this many abbreviate passes before the
/// text is forcibly truncated.
pub const MAX_ABBREVIATE_PASSES: usize = 2;

/// Everything needed to publish, produced by [`Pipeline::compose`].
#[derive(Debug, Clone)]
pub struct ComposedPost {
    pub work: &'static str,
    pub medium: Medium,
    pub text: String,
    pub image_url: String,
}

pub struct Pipeline {
    text: Arc<dyn TextModel>,
    image: Arc<dyn ImageModel>,
    news: Arc<dyn HeadlineSource>,
    publisher: Arc<dyn Publisher>,
    char_limit: usize,
    abbreviate_passes: usize,
}

impl Pipeline {
    pub fn new(
        text: Arc<dyn TextModel>,
        image: Arc<dyn ImageModel>,
        news: Arc<dyn HeadlineSource>,
        publisher: Arc<dyn Publisher>,
    ) -> Self {
        Self {
            text,
            image,
            news,
            publisher,
            char_limit: POST_CHAR_LIMIT,
            abbreviate_passes: MAX_ABBREVIATE_PASSES,
        }
    }

    /// Override the character limit. Used by tests.
    pub fn with_char_limit(mut self, limit: usize) -> Self {
        self.char_limit = limit;
        self
    }

    /// Run every stage up to (but not including) Publish.
    pub async fn compose<R: Rng + Send>(&self, rng: &mut R) -> Result<ComposedPost> {
        let work = catalog::pick_work(rng);
        let medium = catalog::pick_medium(rng);
        tracing::info!(%work, medium = medium.as_str(), "pipeline.start");

        let anecdote = self
            .text
            .complete(&prompts::anecdote_system(work), prompts::ANECDOTE_USER)
            .await?;
        tracing::debug!(len = anecdote.len(), "pipeline.anecdote");

        // An empty feed is fine; the summary stage just sees an empty list.
        let headlines = self.news.fetch_headlines().await?;
        let summary = self
            .text
            .complete(prompts::SUMMARIZE_NEWS_SYSTEM, &headlines.join("\n"))
            .await?;
        tracing::debug!(headlines = headlines.len(), "pipeline.news_summarized");

        let modernized = self
            .text
            .complete(
                prompts::MODERNIZE_SYSTEM,
                &prompts::modernize_user(&anecdote, &summary),
            )
            .await?;

        let scene = self
            .text
            .complete(prompts::IMAGE_PROMPT_SYSTEM, &modernized)
            .await?;
        let image_prompt = catalog::art_prompt(medium, &scene);

        let image_url = self.image.generate(&image_prompt).await?;
        tracing::debug!("pipeline.image_generated");

        let tagged = self
            .text
            .complete(prompts::HASHTAG_SYSTEM, &modernized)
            .await?;
        let text = self.repair_length(tagged).await?;

        Ok(ComposedPost {
            work,
            medium,
            text,
            image_url,
        })
    }

    /// Full run: compose, then publish. The hosted image URL is
    /// time-limited, so publishing follows composition with no extra
    /// stage in between.
    pub async fn run<R: Rng + Send>(&self, rng: &mut R) -> Result<PostReceipt> {
        let post = self.compose(rng).await?;
        let receipt = self.publisher.publish(&post.text, &post.image_url).await?;
        tracing::info!(post_id=%receipt.post_id, "pipeline.done");
        Ok(receipt)
    }

    /// Bounded abbreviate-and-recheck loop. The model is not guaranteed to
    /// converge, so after `abbreviate_passes` attempts the text is truncated
    /// on a character boundary — an over-limit post is never submitted.
    async fn repair_length(&self, mut text: String) -> Result<String> {
        let mut passes = 0;
        while text.chars().count() > self.char_limit && passes < self.abbreviate_passes {
            passes += 1;
            tracing::info!(
                pass = passes,
                chars = text.chars().count(),
                limit = self.char_limit,
                "pipeline.abbreviate"
            );
            text = self
                .text
                .complete(&prompts::abbreviate_system(self.char_limit), &text)
                .await?;
        }

        if text.chars().count() > self.char_limit {
            tracing::warn!(
                chars = text.chars().count(),
                limit = self.char_limit,
                "pipeline.truncating_over_limit_text"
            );
            text = text.chars().take(self.char_limit).collect();
        }
        Ok(text)
    }
}
