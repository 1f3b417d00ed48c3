use thiserror::Error;

#[derive(Error, Debug)]
pub enum EasyToolsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("PDF error: {reason}")]
    Pdf { reason: String },

    #[error("Please enter valid page numbers or ranges to extract.")]
    EmptySelection,

    #[error("Invalid WAV data: {reason}")]
    InvalidWav { reason: String },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Configuration error: {reason}")]
    Config { reason: String },

    #[error("AI service error: {reason}")]
    Ai { reason: String },

    #[error("HTTP status error: {status}")]
    HttpStatus { status: u16 },

    #[error("Timed out after {waited_ms} ms waiting for {what}")]
    Timeout { what: String, waited_ms: u128 },

    #[error("Output error: {reason}")]
    Output { reason: String },

    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl From<lopdf::Error> for EasyToolsError {
    fn from(e: lopdf::Error) -> Self {
        EasyToolsError::Pdf {
            reason: format!("Could not read the PDF. It might be corrupted or encrypted ({})", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, EasyToolsError>;
