use crate::config::AppConfig;
use crate::error::{EasyToolsError, Result};
use crate::services::wav::WavEncoder;
use crate::types::Voice;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

pub const MAX_SPEECH_CHARS: usize = 500;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_modalities: [&'static str; 1],
    speech_config: SpeechConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig<'a> {
    voice_config: VoiceConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig<'a> {
    prebuilt_voice_config: PrebuiltVoiceConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig<'a> {
    voice_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct SpeechResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    data: String,
}

/// Client for the hosted text-to-speech model.
pub struct SpeechClient {
    config: AppConfig,
    http: reqwest::Client,
}

impl SpeechClient {
    pub fn new(config: AppConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { config, http })
    }

    /// Base64 PCM (24 kHz mono 16-bit) for `text` spoken by `voice`.
    pub async fn generate_speech(&self, text: &str, voice: Voice) -> Result<String> {
        validate_speech_text(text)?;

        let url = self.config.generate_content_url(&self.config.speech_model);
        info!("Requesting speech from {} with voice {}", self.config.speech_model, voice.api_name());

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&build_request(text, voice))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            error!("Speech generation failed with status {}", status);
            return Err(EasyToolsError::HttpStatus { status });
        }

        let body = response.text().await?;
        extract_audio(&body)
    }

    /// Generates speech and wraps it in a playable WAV container.
    pub async fn generate_wav(&self, text: &str, voice: Voice) -> Result<Vec<u8>> {
        let audio = self.generate_speech(text, voice).await?;
        WavEncoder::default().encode_base64(&audio)
    }
}

fn validate_speech_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(EasyToolsError::InvalidInput {
            reason: "Please enter some text to generate audio.".to_string(),
        });
    }
    let chars = text.chars().count();
    if chars > MAX_SPEECH_CHARS {
        return Err(EasyToolsError::InvalidInput {
            reason: format!("Text is {} characters; the limit is {}.", chars, MAX_SPEECH_CHARS),
        });
    }
    Ok(())
}

fn build_request(text: &str, voice: Voice) -> SpeechRequest<'_> {
    SpeechRequest {
        contents: vec![Content {
            parts: vec![TextPart { text }],
        }],
        generation_config: GenerationConfig {
            response_modalities: ["AUDIO"],
            speech_config: SpeechConfig {
                voice_config: VoiceConfig {
                    prebuilt_voice_config: PrebuiltVoiceConfig {
                        voice_name: voice.api_name(),
                    },
                },
            },
        },
    }
}

fn extract_audio(body: &str) -> Result<String> {
    let response: SpeechResponse = serde_json::from_str(body)?;
    let audio = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.inline_data)
        .map(|d| d.data)
        .filter(|data| !data.is_empty());

    match audio {
        Some(data) => {
            debug!("Received {} base64 characters of audio", data.len());
            Ok(data)
        }
        None => Err(EasyToolsError::Ai {
            reason: "AI did not return any audio data.".to_string(),
        }),
    }
}
