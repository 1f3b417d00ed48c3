use crate::error::{EasyToolsError, Result};
use crate::types::{WavFormat, WavHeader};
use base64::Engine;
use tracing::debug;

pub const WAV_HEADER_LEN: usize = 44;

const PCM_FORMAT: u16 = 1;
const FMT_CHUNK_LEN: u32 = 16;

/// Wraps raw little-endian PCM in a canonical RIFF/WAVE container.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavEncoder {
    format: WavFormat,
}

impl WavEncoder {
    pub fn new(format: WavFormat) -> Self {
        Self { format }
    }

    /// Header followed by a verbatim copy of `pcm`. Sample alignment is not
    /// checked; an odd trailing byte is kept as-is.
    pub fn encode(&self, pcm: &[u8]) -> Vec<u8> {
        let data_size = pcm.len() as u32;
        let mut out = Vec::with_capacity(WAV_HEADER_LEN + pcm.len());

        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data_size).to_le_bytes());
        out.extend_from_slice(b"WAVE");

        out.extend_from_slice(b"fmt ");
        out.extend_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
        out.extend_from_slice(&PCM_FORMAT.to_le_bytes());
        out.extend_from_slice(&self.format.channels().to_le_bytes());
        out.extend_from_slice(&self.format.sample_rate().to_le_bytes());
        out.extend_from_slice(&self.format.byte_rate().to_le_bytes());
        out.extend_from_slice(&self.format.block_align().to_le_bytes());
        out.extend_from_slice(&self.format.bits_per_sample().to_le_bytes());

        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_size.to_le_bytes());
        out.extend_from_slice(pcm);

        debug!("Encoded {} PCM bytes into {} byte WAV", pcm.len(), out.len());
        out
    }

    /// Decodes the base64 transport encoding first, then encodes.
    pub fn encode_base64(&self, pcm_base64: &str) -> Result<Vec<u8>> {
        let pcm = base64::engine::general_purpose::STANDARD.decode(pcm_base64.trim())?;
        Ok(self.encode(&pcm))
    }
}

/// Shorthand for the 24 kHz mono 16-bit speech format.
pub fn encode_speech_wav(pcm: &[u8]) -> Vec<u8> {
    WavEncoder::default().encode(pcm)
}

impl WavHeader {
    /// Reads back a canonical 44-byte header.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < WAV_HEADER_LEN {
            return Err(EasyToolsError::InvalidWav {
                reason: format!("expected at least {} bytes, got {}", WAV_HEADER_LEN, bytes.len()),
            });
        }

        for (offset, tag) in [(0, b"RIFF"), (8, b"WAVE"), (12, b"fmt "), (36, b"data")] {
            if &bytes[offset..offset + 4] != tag {
                return Err(EasyToolsError::InvalidWav {
                    reason: format!(
                        "missing '{}' tag at offset {}",
                        String::from_utf8_lossy(tag),
                        offset
                    ),
                });
            }
        }

        let u16_at = |offset: usize| u16::from_le_bytes([bytes[offset], bytes[offset + 1]]);
        let u32_at = |offset: usize| {
            u32::from_le_bytes([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ])
        };

        Ok(WavHeader {
            chunk_size: u32_at(4),
            audio_format: u16_at(20),
            channels: u16_at(22),
            sample_rate: u32_at(24),
            byte_rate: u32_at(28),
            block_align: u16_at(32),
            bits_per_sample: u16_at(34),
            data_size: u32_at(40),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn u32_le(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    fn u16_le(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
    }

    #[test]
    fn test_length_is_header_plus_payload() {
        for len in [0usize, 1, 2, 3, 480, 48_001] {
            let pcm = vec![0x5Au8; len];
            assert_eq!(encode_speech_wav(&pcm).len(), 44 + len);
        }
    }

    #[test]
    fn test_empty_input_is_bare_header() {
        let wav = encode_speech_wav(&[]);
        assert_eq!(wav.len(), 44);
        assert_eq!(u32_le(&wav, 40), 0);
        assert_eq!(u32_le(&wav, 4), 36);
    }

    #[test]
    fn test_exact_header_layout() {
        let pcm = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
        let wav = encode_speech_wav(&pcm);

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32_le(&wav, 4), 36 + 6);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(u32_le(&wav, 16), 16);
        assert_eq!(u16_le(&wav, 20), 1);
        assert_eq!(u16_le(&wav, 22), 1);
        assert_eq!(u32_le(&wav, 24), 24_000);
        assert_eq!(u32_le(&wav, 28), 48_000);
        assert_eq!(u16_le(&wav, 32), 2);
        assert_eq!(u16_le(&wav, 34), 16);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32_le(&wav, 40), 6);
        assert_eq!(&wav[44..], &pcm);
    }

    #[test]
    fn test_odd_length_payload_kept_verbatim() {
        let pcm = [0xFF, 0x7F, 0x01];
        let wav = encode_speech_wav(&pcm);
        assert_eq!(u32_le(&wav, 40), 3);
        assert_eq!(&wav[44..], &pcm);
    }

    #[test]
    fn test_format_fields_constant_across_inputs() {
        for pcm in [vec![], vec![0u8; 7], vec![0xAB; 1024]] {
            let header = WavHeader::parse(&encode_speech_wav(&pcm)).unwrap();
            assert_eq!(header.audio_format, 1);
            assert_eq!(header.channels, 1);
            assert_eq!(header.sample_rate, 24_000);
            assert_eq!(header.bits_per_sample, 16);
            assert_eq!(header.chunk_size, 36 + pcm.len() as u32);
            assert_eq!(header.data_size, pcm.len() as u32);
        }
    }

    #[test]
    fn test_custom_format_derives_rates() {
        let encoder = WavEncoder::new(WavFormat::new(44_100, 2, 16).unwrap());
        let header = WavHeader::parse(&encoder.encode(&[0u8; 8])).unwrap();
        assert_eq!(header.byte_rate, 176_400);
        assert_eq!(header.block_align, 4);
    }

    #[test]
    fn test_base64_input() {
        // [1, 0, 255, 127] -> samples 1 and i16::MAX
        let wav = WavEncoder::default().encode_base64("AQD/fw==").unwrap();
        assert_eq!(&wav[44..], &[1, 0, 255, 127]);

        let err = WavEncoder::default().encode_base64("not base64!").unwrap_err();
        assert!(matches!(err, EasyToolsError::Base64(_)));
    }

    #[test]
    fn test_output_loads_in_standard_reader() {
        let samples: [i16; 5] = [0, 1000, -1000, i16::MAX, i16::MIN];
        let pcm: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        let wav = encode_speech_wav(&pcm);

        let mut reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 24_000);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);

        let decoded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(decoded, samples);
    }

    #[test]
    fn test_header_parse_rejects_garbage() {
        assert!(WavHeader::parse(&[0u8; 10]).is_err());
        let mut wav = encode_speech_wav(&[0, 0]);
        wav[8..12].copy_from_slice(b"AVI ");
        assert!(matches!(
            WavHeader::parse(&wav),
            Err(EasyToolsError::InvalidWav { .. })
        ));
    }

    #[test]
    fn test_duration() {
        let header = WavHeader::parse(&encode_speech_wav(&vec![0u8; 48_000])).unwrap();
        assert!((header.duration_secs() - 1.0).abs() < f64::EPSILON);
    }
}
