//! Loader for workspace configuration with YAML + environment overlays.
//!
//! Secrets never live in the YAML file itself: the expected pattern is
//! `${VAR}` placeholders that are expanded from the environment after the
//! sources are merged, so the file can be committed while the credentials
//! stay in the deployment environment.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tessera_common::Credentials;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Deserialize)]
pub struct TesseraConfig {
    pub openai: OpenAiConfig,
    pub twitter: TwitterConfig,
    #[serde(default)]
    pub news: NewsConfig,
}

#[derive(Debug, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    #[serde(default = "default_text_model")]
    pub text_model: String,
    #[serde(default = "default_image_model")]
    pub image_model: String,
}

/// The four OAuth 1.0a credential values for the posting platform.
#[derive(Debug, Deserialize)]
pub struct TwitterConfig {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub token_secret: String,
}

impl TwitterConfig {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            consumer_key: self.consumer_key.clone(),
            consumer_secret: self.consumer_secret.clone(),
            access_token: self.access_token.clone(),
            token_secret: self.token_secret.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewsConfig {
    #[serde(default = "default_feed_url")]
    pub feed_url: String,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
        }
    }
}

fn default_text_model() -> String {
    "gpt-4o-mini".into()
}
fn default_image_model() -> String {
    "dall-e-3".into()
}
fn default_feed_url() -> String {
    "https://news.google.com/rss?hl=en-US&gl=US&ceid=US:en".into()
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct TesseraConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for TesseraConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TesseraConfigLoader {
    /// Start with sensible defaults: YAML file sources, overridden by
    /// `TESSERA_` env variables (e.g. `TESSERA_OPENAI__API_KEY`) at load
    /// time.
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self.builder.add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly
    /// typed config, expanding `${VAR}` placeholders along the way.
    pub fn load(self) -> Result<TesseraConfig, ConfigError> {
        // Later sources win in the `config` crate, so the env source is
        // attached last: a `TESSERA_*` variable overrides the file value.
        let cfg = self
            .builder
            .add_source(Environment::with_prefix("TESSERA")
                .prefix_separator("_")
                .separator("__"))
            .build()?;

        // Convert to serde_json::Value first
        let mut v: Value = cfg.try_deserialize()?;
        // Recursively expand environment variables
        expand_env_in_value(&mut v);

        let typed: TesseraConfig =
            serde_json::from_value(v).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}
