//! # EasyTools Library
//!
//! Small single-purpose document, audio and text utilities: page-range
//! selection and PDF page extraction/merging, PCM-to-WAV wrapping for
//! generated speech, and a handful of text helpers.
//!
//! ## Example Usage
//!
//! ```rust
//! use easytools::{PageRangeParser, WavEncoder};
//!
//! let pages = PageRangeParser::parse("1-3, 5, 8-10", 10);
//! assert_eq!(pages.as_slice(), &[0, 1, 2, 4, 7, 8, 9]);
//!
//! let wav = WavEncoder::default().encode(&[0, 0, 255, 127]);
//! assert_eq!(wav.len(), 48);
//! assert_eq!(&wav[0..4], b"RIFF");
//! ```

pub mod config;
pub mod error;
pub mod services;
pub mod types;

// Re-export main types and services for easier usage
pub use config::AppConfig;
pub use error::{EasyToolsError, Result};
pub use services::{
    PageRangeParser, PdfTools, ReadyGate, SpeechClient, TextTools, WavEncoder,
};
pub use types::{
    CaseStyle, CleanedText, PageIndexSet, PasswordOptions, PasswordStrength, TextStats, Voice,
    WavFormat, WavHeader,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::pdf::fixtures::{page_labels, sample_pdf};

    #[test]
    fn test_split_workflow() {
        let source = sample_pdf(6);
        let page_count = PdfTools::page_count(&source).unwrap();

        // The split tool pre-fills the whole document, the user edits it down.
        let default_expr = PageRangeParser::full_range(page_count);
        assert_eq!(PageRangeParser::parse(&default_expr, page_count).len(), 6);

        let selection = PageRangeParser::parse("6, 2-3, 3, 99", page_count);
        assert_eq!(selection.to_string(), "2-3,6");

        let extracted = PdfTools::extract_pages(&source, &selection).unwrap();
        assert_eq!(page_labels(&extracted), vec!["Page 2", "Page 3", "Page 6"]);
    }

    #[test]
    fn test_speech_payload_workflow() {
        // Transport form of two samples: 0 and -1.
        let wav = WavEncoder::default().encode_base64("AAD//w==").unwrap();
        let header = WavHeader::parse(&wav).unwrap();

        assert_eq!(header.data_size, 4);
        assert_eq!(header.sample_rate, WavFormat::SPEECH.sample_rate());
        assert_eq!(&wav[44..], &[0x00, 0x00, 0xFF, 0xFF]);
    }

    #[test]
    fn test_error_messages_are_user_facing() {
        assert_eq!(
            EasyToolsError::EmptySelection.to_string(),
            "Please enter valid page numbers or ranges to extract."
        );
    }
}
