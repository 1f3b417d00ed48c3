use crate::error::{EasyToolsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ascending, duplicate-free zero-based page indices, all below the page
/// count they were parsed against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageIndexSet(Vec<usize>);

impl PageIndexSet {
    /// Caller guarantees `indices` is strictly ascending.
    pub(crate) fn from_sorted(indices: Vec<usize>) -> Self {
        debug_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        Self(indices)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.binary_search(&index).is_ok()
    }

    /// 1-based page numbers, as lopdf and humans count them.
    pub fn to_one_based(&self) -> Vec<u32> {
        self.0.iter().map(|&i| i as u32 + 1).collect()
    }
}

/// Renders the set as a compact 1-based expression, e.g. `1-3,5,8-10`.
impl fmt::Display for PageIndexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let mut iter = self.0.iter().copied().peekable();
        while let Some(start) = iter.next() {
            let mut end = start;
            while iter.peek() == Some(&(end + 1)) {
                end += 1;
                iter.next();
            }
            if !first {
                f.write_str(",")?;
            }
            first = false;
            if start == end {
                write!(f, "{}", start + 1)?;
            } else {
                write!(f, "{}-{}", start + 1, end + 1)?;
            }
        }
        Ok(())
    }
}

/// PCM stream parameters written into the WAV `fmt ` chunk.
///
/// Built through [`WavFormat::new`], which rejects formats whose derived
/// block align or byte rate would not fit their header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WavFormat {
    sample_rate: u32,
    channels: u16,
    bits_per_sample: u16,
    block_align: u16,
    byte_rate: u32,
}

impl WavFormat {
    /// 24 kHz mono 16-bit, the format the speech endpoint returns.
    pub const SPEECH: WavFormat = WavFormat {
        sample_rate: 24_000,
        channels: 1,
        bits_per_sample: 16,
        block_align: 2,
        byte_rate: 48_000,
    };

    pub fn new(sample_rate: u32, channels: u16, bits_per_sample: u16) -> Result<Self> {
        let invalid = |reason: String| EasyToolsError::InvalidWav { reason };

        if channels == 0 {
            return Err(invalid("channel count must be at least 1".to_string()));
        }
        if sample_rate == 0 {
            return Err(invalid("sample rate must be at least 1 Hz".to_string()));
        }
        if bits_per_sample == 0 || bits_per_sample % 8 != 0 {
            return Err(invalid(format!(
                "bits per sample must be a positive multiple of 8, got {}",
                bits_per_sample
            )));
        }

        let block_align = channels.checked_mul(bits_per_sample / 8).ok_or_else(|| {
            invalid(format!(
                "block align overflows for {} channels of {} bits",
                channels, bits_per_sample
            ))
        })?;
        let byte_rate = sample_rate
            .checked_mul(u32::from(block_align))
            .ok_or_else(|| {
                invalid(format!(
                    "byte rate overflows for {} Hz with {} byte frames",
                    sample_rate, block_align
                ))
            })?;

        Ok(Self {
            sample_rate,
            channels,
            bits_per_sample,
            block_align,
            byte_rate,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn bits_per_sample(&self) -> u16 {
        self.bits_per_sample
    }

    pub fn block_align(&self) -> u16 {
        self.block_align
    }

    pub fn byte_rate(&self) -> u32 {
        self.byte_rate
    }
}

impl Default for WavFormat {
    fn default() -> Self {
        Self::SPEECH
    }
}

/// Fields of a canonical 44-byte WAV header, as read back from bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WavHeader {
    pub chunk_size: u32,
    pub audio_format: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub data_size: u32,
}

impl WavHeader {
    pub fn duration_secs(&self) -> f64 {
        if self.byte_rate == 0 {
            return 0.0;
        }
        self.data_size as f64 / self.byte_rate as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextStats {
    pub words: usize,
    pub characters: usize,
    pub sentences: usize,
    pub paragraphs: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedText {
    pub text: String,
    pub spaces_removed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CaseStyle {
    Sentence,
    Lower,
    Upper,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordOptions {
    pub length: usize,
    pub uppercase: bool,
    pub numbers: bool,
    pub symbols: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: 16,
            uppercase: true,
            numbers: true,
            symbols: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PasswordStrength {
    Weak,
    Strong,
    VeryStrong,
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PasswordStrength::Weak => "Weak",
            PasswordStrength::Strong => "Strong",
            PasswordStrength::VeryStrong => "Very Strong",
        };
        f.write_str(label)
    }
}

/// Prebuilt voices offered by the speech endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Voice {
    #[default]
    Kore,
    Puck,
    Charon,
    Fenrir,
    Zephyr,
}

impl Voice {
    pub fn api_name(&self) -> &'static str {
        match self {
            Voice::Kore => "Kore",
            Voice::Puck => "Puck",
            Voice::Charon => "Charon",
            Voice::Fenrir => "Fenrir",
            Voice::Zephyr => "Zephyr",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Voice::Kore => "Female, Calm",
            Voice::Puck => "Male, Energetic",
            Voice::Charon => "Male, Deep",
            Voice::Fenrir => "Male, Raspy",
            Voice::Zephyr => "Female, Cheerful",
        }
    }
}

/// JSON report written by `pages --json`.
#[derive(Debug, Clone, Serialize)]
pub struct PageSelectionReport {
    pub expression: String,
    pub max_pages: usize,
    pub indices: PageIndexSet,
    pub canonical: String,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speech_format_matches_new() {
        assert_eq!(WavFormat::new(24_000, 1, 16).unwrap(), WavFormat::SPEECH);
        assert_eq!(WavFormat::SPEECH.byte_rate(), 48_000);
        assert_eq!(WavFormat::SPEECH.block_align(), 2);
    }

    #[test]
    fn test_wav_format_rejects_unrepresentable_values() {
        for (rate, channels, bits) in [
            (24_000, 0, 16),
            (0, 1, 16),
            (24_000, 1, 0),
            (24_000, 1, 12),
            (24_000, 40_000, 16),
            (4_000_000_000, 1, 16),
            (u32::MAX, u16::MAX, 16),
        ] {
            let result = WavFormat::new(rate, channels, bits);
            assert!(
                matches!(result, Err(EasyToolsError::InvalidWav { .. })),
                "accepted {} Hz, {} channels, {} bits",
                rate,
                channels,
                bits
            );
        }
    }

    #[test]
    fn test_wav_format_largest_valid_values() {
        let format = WavFormat::new(48_000, 32_767, 16).unwrap();
        assert_eq!(format.block_align(), 65_534);
        assert_eq!(format.byte_rate(), 48_000 * 65_534);
    }
}
