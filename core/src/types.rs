use serde::{Deserialize, Serialize};

/// Sample rate used for every synthesized recording unless a caller overrides it
pub const SAMPLE_RATE: u32 = 44100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MorseTimingParams {
    pub wpm: u32,
    /// Farnsworth character speed. Elements are sent at this speed while
    /// letter and word gaps stay at `wpm`.
    pub character_wpm: Option<u32>,
    pub tone_freq_hz: u32,
    pub sample_rate: u32,
}

impl Default for MorseTimingParams {
    fn default() -> Self {
        Self {
            wpm: 20,
            character_wpm: None,
            tone_freq_hz: 600,
            sample_rate: SAMPLE_RATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecodeParams {
    /// Normalized envelope level above which a frame counts as tone
    pub threshold: f32,
    /// Tone regions shorter than this are discarded as clicks
    pub min_signal_ms: u32,
}

impl Default for DecodeParams {
    fn default() -> Self {
        Self {
            threshold: 0.15,
            min_signal_ms: 20,
        }
    }
}

/// A run of tone or silence measured on the envelope.
///
/// `start_index` and `end_index` are envelope frame indices (end exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub is_signal: bool,
    pub start_index: usize,
    pub end_index: usize,
    pub duration_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodeResult {
    pub morse_pattern: String,
    pub decoded_text: String,
    pub estimated_wpm: u32,
    pub confidence: f32,
}

impl DecodeResult {
    /// Empty result carrying an explanation of why nothing was decoded
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            morse_pattern: String::new(),
            decoded_text: message.into(),
            estimated_wpm: 0,
            confidence: 0.0,
        }
    }
}
