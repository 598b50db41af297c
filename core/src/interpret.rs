use crate::error::{MorseAudioError, Result};
use crate::patterns::char_for;
use crate::timing::{clamp_wpm, dot_ms_for_wpm};
use crate::types::{DecodeResult, Segment};
use log::debug;

/// Assumed dot length when there is nothing to measure (20 WPM)
pub const DEFAULT_DOT_MS: u32 = 60;

// A dash is anything at least twice the dot; the midpoint of the 1:3 ratio.
const DASH_THRESHOLD: u64 = 2;
// Letter gaps sit between 1 and 3 units, word gaps between 3 and 7.
const LETTER_GAP_THRESHOLD: u64 = 2;
const WORD_GAP_THRESHOLD: u64 = 5;

/// Detected timing and the reconstructed pattern for one recording
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub dot_ms: u32,
    pub estimated_wpm: u32,
    pub pattern: String,
}

/// Estimate the dot length from signal durations.
///
/// Takes the shorter half of the sorted durations (presumed dots) and returns
/// its lower median, so a cluster of dashes cannot drag the estimate upward.
pub fn estimate_dot_ms(signal_durations: &[u32]) -> u32 {
    if signal_durations.is_empty() {
        return DEFAULT_DOT_MS;
    }

    let mut sorted = signal_durations.to_vec();
    sorted.sort_unstable();
    let shorter_half = &sorted[..sorted.len().div_ceil(2)];
    shorter_half[(shorter_half.len() - 1) / 2].max(1)
}

/// WPM implied by a dot length, clamped to 5-50
pub fn wpm_for_dot_ms(dot_ms: u32) -> u32 {
    clamp_wpm(dot_ms_for_wpm(dot_ms))
}

/// Map one segment to its pattern text: `.`/`-` for tones; `" / "`, `" "` or nothing for gaps
fn classify_segment(segment: &Segment, dot_ms: u32) -> &'static str {
    // Widened so multiples of very long units cannot overflow
    let duration = u64::from(segment.duration_ms);
    let dot_ms = u64::from(dot_ms);
    if segment.is_signal {
        if duration < DASH_THRESHOLD * dot_ms {
            "."
        } else {
            "-"
        }
    } else if duration >= WORD_GAP_THRESHOLD * dot_ms {
        " / "
    } else if duration >= LETTER_GAP_THRESHOLD * dot_ms {
        " "
    } else {
        ""
    }
}

fn signal_durations(segments: &[Segment]) -> Vec<u32> {
    segments
        .iter()
        .filter(|s| s.is_signal)
        .map(|s| s.duration_ms)
        .collect()
}

/// Estimate the unit and rebuild the morse pattern from alternating segments
pub fn classify_segments(segments: &[Segment]) -> Result<Classification> {
    let durations = signal_durations(segments);
    if durations.is_empty() {
        return Err(MorseAudioError::NoSignalDetected);
    }

    let dot_ms = estimate_dot_ms(&durations);
    let estimated_wpm = wpm_for_dot_ms(dot_ms);

    let pattern: String = segments
        .iter()
        .map(|segment| classify_segment(segment, dot_ms))
        .collect();
    let pattern = pattern.trim().to_string();

    debug!(
        "Estimated dot {} ms ({} WPM) from {} tones: {:?}",
        dot_ms,
        estimated_wpm,
        durations.len(),
        pattern
    );

    Ok(Classification {
        dot_ms,
        estimated_wpm,
        pattern,
    })
}

/// Decode a pattern string (`" "` between letters, `" / "` between words) into text.
/// Letter patterns missing from the alphabet are dropped.
pub fn pattern_to_text(pattern: &str) -> String {
    pattern
        .split(" / ")
        .map(|word| {
            word.split(' ')
                .filter(|letter| !letter.is_empty())
                .filter_map(|letter| {
                    let ch = char_for(letter);
                    if ch.is_none() {
                        debug!("Unknown letter pattern {:?}, dropping", letter);
                    }
                    ch
                })
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Score how tightly tone durations cluster around one or three units of `dot_ms`.
///
/// No tones scores 0; a single tone gives no timing evidence and scores 0.5.
pub fn timing_confidence(signal_durations: &[u32], dot_ms: u32) -> f32 {
    match signal_durations.len() {
        0 => return 0.0,
        1 => return 0.5,
        _ => {}
    }

    let unit = dot_ms.max(1) as f64;
    let total_error: f64 = signal_durations
        .iter()
        .map(|&d| {
            let d = d as f64;
            let dot_error = (d - unit).abs() / unit;
            let dash_error = (d - 3.0 * unit).abs() / (3.0 * unit);
            dot_error.min(dash_error)
        })
        .sum();
    let mean_error = total_error / signal_durations.len() as f64;

    (1.0 - mean_error).clamp(0.0, 1.0) as f32
}

/// Decode the text of a classification and score the timing it was built from
pub fn decode_result(segments: &[Segment], classification: &Classification) -> DecodeResult {
    DecodeResult {
        morse_pattern: classification.pattern.clone(),
        decoded_text: pattern_to_text(&classification.pattern),
        estimated_wpm: classification.estimated_wpm,
        confidence: timing_confidence(&signal_durations(segments), classification.dot_ms),
    }
}
