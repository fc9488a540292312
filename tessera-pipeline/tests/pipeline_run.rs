//! Orchestrator tests with deterministic in-memory stand-ins for every
//! external collaborator.
use async_trait::async_trait;
use rand::RngCore;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tessera_common::{Result, TesseraError};
use tessera_llm::{ImageModel, TextModel};
use tessera_news::HeadlineSource;
use tessera_pipeline::{catalog, Pipeline, POST_CHAR_LIMIT};
use tessera_social::twitter::types::PostReceipt;
use tessera_social::Publisher;

/// Rng that always yields zero, pinning every catalog pick to index 0.
struct ZeroRng;

impl RngCore for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        0
    }
    fn next_u64(&mut self) -> u64 {
        0
    }
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        dest.fill(0);
        Ok(())
    }
}

/// Text model that replays a script and records every call.
struct ScriptedText {
    responses: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedText {
    fn new<I: IntoIterator<Item = S>, S: Into<String>>(script: I) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(script.into_iter().map(Into::into).collect()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextModel for ScriptedText {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| TesseraError::Provider("script exhausted".into()))
    }
}

struct FixedImage {
    url: String,
    prompts: Mutex<Vec<String>>,
}

impl FixedImage {
    fn new(url: &str) -> Arc<Self> {
        Arc::new(Self {
            url: url.to_string(),
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ImageModel for FixedImage {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.url.clone())
    }
}

struct FailingImage;

#[async_trait]
impl ImageModel for FailingImage {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(TesseraError::Provider("image service returned 500".into()))
    }
}

struct FixedNews(Vec<String>);

#[async_trait]
impl HeadlineSource for FixedNews {
    async fn fetch_headlines(&self) -> Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

struct FailingNews;

#[async_trait]
impl HeadlineSource for FailingNews {
    async fn fetch_headlines(&self) -> Result<Vec<String>> {
        Err(TesseraError::News("feed unreachable".into()))
    }
}

struct RecordingPublisher {
    calls: Mutex<Vec<(String, String)>>,
}

impl RecordingPublisher {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(&self, text: &str, image_url: &str) -> Result<PostReceipt> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), image_url.to_string()));
        Ok(PostReceipt {
            post_id: "1".into(),
            text: text.to_string(),
            media_id: "m1".into(),
        })
    }
}

#[tokio::test]
async fn end_to_end_threads_each_stage_into_the_next() {
    let text = ScriptedText::new([
        "Hrothgar rewards the hero with a golden torque at Heorot. (c. 700 AD)", // anecdote
        "Markets wobble while leaders trade barbs.",                             // news summary
        "Hrothgar hands out golden bonuses while the hall grumbles. (c. 700 AD)", // modernized
        "a king presenting a golden torque in a crowded mead hall",              // scene
        "Hrothgar hands out golden bonuses while the hall grumbles. (c. 700 AD) #history #art", // hashtags
    ]);
    let image = FixedImage::new("https://img.example/x.png");
    let publisher = RecordingPublisher::new();

    let pipeline = Pipeline::new(
        text.clone(),
        image.clone(),
        Arc::new(FixedNews(vec!["Headline A".into(), "Headline B".into()])),
        publisher.clone(),
    );

    let receipt = pipeline.run(&mut ZeroRng).await.unwrap();
    assert_eq!(receipt.post_id, "1");

    let calls = text.calls();
    assert_eq!(calls.len(), 5, "no abbreviate pass for an in-limit post");
    // Anecdote stage is specialised to the pinned catalog pick.
    assert!(calls[0].0.contains(catalog::WORKS[0]));
    // Summarize receives exactly the joined headlines.
    assert_eq!(calls[1].1, "Headline A\nHeadline B");
    // Modernize receives the anecdote plus the summary, nothing staler.
    assert!(calls[2].1.contains("golden torque"));
    assert!(calls[2].1.contains("Markets wobble"));
    // Hashtag stage runs over the modernized caption.
    assert!(calls[4].1.contains("golden bonuses"));

    // Image prompt is the scene framed in the pinned medium.
    let prompts = image.prompts.lock().unwrap().clone();
    assert_eq!(
        prompts,
        vec!["A relief sculpture of a king presenting a golden torque in a crowded mead hall"]
    );

    let published = publisher.calls();
    assert_eq!(published.len(), 1);
    assert_eq!(
        published[0].0,
        "Hrothgar hands out golden bonuses while the hall grumbles. (c. 700 AD) #history #art"
    );
    assert_eq!(published[0].1, "https://img.example/x.png");
}

#[tokio::test]
async fn one_abbreviate_pass_repairs_an_over_limit_post() {
    let over = "x".repeat(310);
    let short = "y".repeat(200);
    let text = ScriptedText::new([
        "anecdote (44 BC)".to_string(),
        "summary".to_string(),
        "modernized (44 BC)".to_string(),
        "scene".to_string(),
        over,
        short.clone(), // first (and only) abbreviate pass
    ]);
    let publisher = RecordingPublisher::new();

    let pipeline = Pipeline::new(
        text.clone(),
        FixedImage::new("https://img.example/x.png"),
        Arc::new(FixedNews(vec![])),
        publisher.clone(),
    );

    pipeline.run(&mut ZeroRng).await.unwrap();

    let calls = text.calls();
    assert_eq!(calls.len(), 6, "exactly one abbreviate call");
    assert!(calls[5].0.contains("280"));

    let published = publisher.calls();
    assert_eq!(published[0].0, short);
}

#[tokio::test]
async fn stubborn_over_limit_text_is_truncated_not_submitted() {
    let over = "z".repeat(310);
    let text = ScriptedText::new([
        "anecdote (44 BC)".to_string(),
        "summary".to_string(),
        "modernized (44 BC)".to_string(),
        "scene".to_string(),
        over.clone(),
        over.clone(), // pass 1: still over
        over.clone(), // pass 2: still over
    ]);
    let publisher = RecordingPublisher::new();

    let pipeline = Pipeline::new(
        text.clone(),
        FixedImage::new("https://img.example/x.png"),
        Arc::new(FixedNews(vec![])),
        publisher.clone(),
    );

    pipeline.run(&mut ZeroRng).await.unwrap();

    // Two passes, then forced truncation: the published text is never over
    // the limit.
    assert_eq!(text.calls().len(), 7);
    let published = publisher.calls();
    assert_eq!(published[0].0.chars().count(), POST_CHAR_LIMIT);
}

#[tokio::test]
async fn empty_headlines_do_not_stop_the_run() {
    let text = ScriptedText::new([
        "anecdote (44 BC)",
        "", // summary of nothing
        "modernized (44 BC)",
        "scene",
        "modernized (44 BC) #history",
    ]);
    let publisher = RecordingPublisher::new();

    let pipeline = Pipeline::new(
        text.clone(),
        FixedImage::new("https://img.example/x.png"),
        Arc::new(FixedNews(vec![])),
        publisher.clone(),
    );

    pipeline.run(&mut ZeroRng).await.unwrap();

    // Summarize saw an empty joined string and the pipeline still published.
    assert_eq!(text.calls()[1].1, "");
    assert_eq!(publisher.calls().len(), 1);
}

#[tokio::test]
async fn image_failure_short_circuits_before_publish() {
    let text = ScriptedText::new([
        "anecdote (44 BC)",
        "summary",
        "modernized (44 BC)",
        "scene",
    ]);
    let publisher = RecordingPublisher::new();

    let pipeline = Pipeline::new(
        text.clone(),
        Arc::new(FailingImage),
        Arc::new(FixedNews(vec![])),
        publisher.clone(),
    );

    let err = pipeline.run(&mut ZeroRng).await.unwrap_err();
    assert!(matches!(err, TesseraError::Provider(_)));
    assert!(publisher.calls().is_empty(), "no post on a failed run");
}

#[tokio::test]
async fn news_failure_stops_every_later_stage() {
    let text = ScriptedText::new(["anecdote (44 BC)"]);
    let publisher = RecordingPublisher::new();

    let pipeline = Pipeline::new(
        text.clone(),
        FixedImage::new("https://img.example/x.png"),
        Arc::new(FailingNews),
        publisher.clone(),
    );

    let err = pipeline.run(&mut ZeroRng).await.unwrap_err();
    assert!(matches!(err, TesseraError::News(_)));
    // Only the anecdote stage ran before the failure.
    assert_eq!(text.calls().len(), 1);
    assert!(publisher.calls().is_empty());
}
