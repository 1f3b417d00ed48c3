use crate::error::{EasyToolsError, Result};
use std::time::Duration;
use url::Url;

pub const DEFAULT_AI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_SPEECH_MODEL: &str = "gemini-2.5-flash-preview-tts";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Settings for the generative-AI collaborator.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub base_url: Url,
    pub speech_model: String,
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Reads `GEMINI_API_KEY` (or `API_KEY`) and `EASYTOOLS_AI_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |name: &str| lookup(name).filter(|key| !key.trim().is_empty());
        let api_key = present("GEMINI_API_KEY")
            .or_else(|| present("API_KEY"))
            .ok_or_else(|| EasyToolsError::Config {
                reason: "API_KEY environment variable not set".to_string(),
            })?;

        let base_url = lookup("EASYTOOLS_AI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_AI_BASE_URL.to_string());

        Ok(Self {
            api_key,
            base_url: Url::parse(base_url.trim_end_matches('/'))?,
            speech_model: DEFAULT_SPEECH_MODEL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    pub fn with_speech_model(mut self, model: Option<String>) -> Self {
        if let Some(model) = model {
            self.speech_model = model;
        }
        self
    }

    /// `{base}/models/{model}:generateContent`
    pub fn generate_content_url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.as_str().trim_end_matches('/'),
            model
        )
    }
}
