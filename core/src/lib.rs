// Morse code audio codec: WAV synthesis from patterns or key timings,
// and blind timing recovery from recorded WAV buffers

pub mod audio;
pub mod config;
pub mod envelope;
pub mod error;
pub mod interpret;
pub mod patterns;
pub mod segment;
pub mod timing;
pub mod types;
pub mod wav;

// Re-export main public API
pub use error::{MorseAudioError, Result};
pub use interpret::Classification;
pub use timing::MorseTimings;
pub use types::*;
pub use wav::WavAudio;

use log::{debug, warn};

/// Synthesize a pattern string (`.`, `-`, ` `, `/`) as a mono 16-bit WAV
pub fn encode_morse_to_wav(pattern: &str, params: &MorseTimingParams) -> Vec<u8> {
    let timings = MorseTimings::farnsworth(params.wpm, params.character_wpm);
    let samples = audio::sequence_pattern(
        pattern,
        &timings,
        params.tone_freq_hz as f64,
        params.sample_rate,
    );
    wav::encode_wav(&samples, params.sample_rate)
}

/// Synthesize plain text by way of its morse pattern
pub fn encode_text_to_wav(text: &str, params: &MorseTimingParams) -> Vec<u8> {
    encode_morse_to_wav(&patterns::text_to_pattern(text), params)
}

/// Reproduce recorded key-press and gap durations verbatim as a WAV
pub fn encode_timings_to_wav(
    press_ms: &[u32],
    gap_ms: &[u32],
    tone_hz: u32,
    sample_rate: u32,
) -> Vec<u8> {
    let samples = audio::sequence_timings(press_ms, gap_ms, tone_hz as f64, sample_rate);
    wav::encode_wav(&samples, sample_rate)
}

/// Every intermediate stage of one decode
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub segments: Vec<Segment>,
    pub classification: Classification,
    pub result: DecodeResult,
}

/// Run envelope extraction, segmentation, classification and scoring over normalized samples
pub fn analyze_samples(
    samples: &[f32],
    sample_rate: u32,
    params: &DecodeParams,
) -> Result<Analysis> {
    let envelope = envelope::rms_envelope(samples, sample_rate);
    let segments = segment::segment_envelope(&envelope, params);
    let classification = interpret::classify_segments(&segments)?;
    let result = interpret::decode_result(&segments, &classification);

    Ok(Analysis {
        segments,
        classification,
        result,
    })
}

/// Parse a WAV buffer and run the full analysis
pub fn analyze_wav(bytes: &[u8], params: &DecodeParams) -> Result<Analysis> {
    let wav = wav::decode_wav_bytes(bytes)?;
    if let Err(e) = wav.check_sample_format() {
        warn!("{}, decoding silence", e);
    }
    analyze_samples(&wav.samples, wav.sample_rate, params)
}

/// Decode a WAV buffer with default detection settings. Never fails: problems
/// come back as an empty result whose text explains what went wrong.
pub fn decode_wav(bytes: &[u8]) -> DecodeResult {
    decode_wav_with(bytes, &DecodeParams::default())
}

/// Decode a WAV buffer with explicit detection settings
pub fn decode_wav_with(bytes: &[u8], params: &DecodeParams) -> DecodeResult {
    match analyze_wav(bytes, params) {
        Ok(analysis) => analysis.result,
        Err(e) => {
            debug!("Decode produced no result: {}", e);
            let message = if e.is_invalid_container() {
                format!("Invalid WAV file: {}", e)
            } else {
                e.to_string()
            };
            DecodeResult::empty(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_dot_round_trip() {
        let bytes = encode_morse_to_wav(".", &MorseTimingParams::default());
        let result = decode_wav(&bytes);
        assert!(result.morse_pattern.contains('.'));
        assert_eq!(result.decoded_text, "E");
        assert_eq!(result.confidence, 0.5);
    }

    #[test]
    fn test_garbage_input_is_explained() {
        let result = decode_wav(b"definitely not a wav file, but long enough to pass the size check");
        assert_eq!(result.morse_pattern, "");
        assert_eq!(result.estimated_wpm, 0);
        assert_eq!(result.confidence, 0.0);
        assert!(result.decoded_text.starts_with("Invalid WAV file"));
    }

    #[test]
    fn test_text_encoding_matches_pattern_encoding() {
        let params = MorseTimingParams::default();
        assert_eq!(
            encode_text_to_wav("sos", &params),
            encode_morse_to_wav("... --- ...", &params)
        );
    }

    #[test]
    fn test_analysis_exposes_stages() {
        let bytes = encode_morse_to_wav(".-", &MorseTimingParams::default());
        let analysis = analyze_wav(&bytes, &DecodeParams::default()).unwrap();
        assert_eq!(analysis.segments.len(), 3);
        assert!(analysis.segments[0].is_signal);
        assert!(!analysis.segments[1].is_signal);
        assert_eq!(analysis.classification.pattern, ".-");
        assert_eq!(analysis.result.decoded_text, "A");
    }
}
