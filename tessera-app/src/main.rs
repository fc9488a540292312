//! Tessera binary: run the posting pipeline once, or on an interval.
//!
//! The exit status is the acknowledgement to the invoker: 0 when a post
//! was published, 1 when the run failed (with the error logged). In
//! interval mode each tick is an independent run; a failed tick is logged
//! and the schedule continues.
use anyhow::Result;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;
use tessera_common::observability::{LogConfig, LogFormat, init_logging};
use tessera_config::{TesseraConfig, TesseraConfigLoader};
use tessera_llm::{OpenAiImageClient, OpenAiTextClient};
use tessera_news::RssHeadlineClient;
use tessera_pipeline::Pipeline;
use tessera_social::TwitterPublisher;

#[derive(Parser, Debug)]
#[command(name = "tessera", about = "Posts a historic-art image to X on a schedule")]
struct Args {
    /// Path to the YAML configuration file.
    #[arg(long, default_value = "tessera.yaml")]
    config: String,

    /// Run forever, once every N seconds, instead of once.
    #[arg(long, value_name = "SECS")]
    every: Option<u64>,

    /// Compose the post but stop before publishing.
    #[arg(long)]
    dry_run: bool,

    /// Also log to stderr.
    #[arg(long)]
    verbose: bool,

    /// Log encoding: text or json.
    #[arg(long, default_value = "text")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(LogConfig {
        emit_stderr: args.verbose,
        format: args.log_format,
        ..LogConfig::default()
    })?;

    let cfg: TesseraConfig = TesseraConfigLoader::new().with_file(&args.config).load()?;
    let pipeline = build_pipeline(&cfg)?;
    let mut rng = StdRng::from_entropy();

    match args.every {
        None => run_once(&pipeline, &mut rng, args.dry_run).await,
        Some(secs) => {
            let period = Duration::from_secs(secs.max(1));
            loop {
                if let Err(err) = run_once(&pipeline, &mut rng, args.dry_run).await {
                    tracing::error!(%err, "scheduled run failed");
                }
                tokio::time::sleep(period).await;
            }
        }
    }
}

fn build_pipeline(cfg: &TesseraConfig) -> Result<Pipeline> {
    let text = OpenAiTextClient::new(cfg.openai.api_key.clone(), cfg.openai.text_model.clone())?;
    let image = OpenAiImageClient::new(cfg.openai.api_key.clone(), cfg.openai.image_model.clone())?;
    let news = RssHeadlineClient::with_url(&cfg.news.feed_url)?;
    let publisher = TwitterPublisher::new(cfg.twitter.credentials())?;

    Ok(Pipeline::new(
        Arc::new(text),
        Arc::new(image),
        Arc::new(news),
        Arc::new(publisher),
    ))
}

async fn run_once(pipeline: &Pipeline, rng: &mut StdRng, dry_run: bool) -> Result<()> {
    if dry_run {
        let post = pipeline.compose(rng).await?;
        tracing::info!(
            work = post.work,
            medium = post.medium.as_str(),
            text = %post.text,
            image_url = %post.image_url,
            "dry run: composed post"
        );
        return Ok(());
    }

    let receipt = pipeline.run(rng).await?;
    tracing::info!(post_id = %receipt.post_id, "published");
    Ok(())
}
