use crate::error::{MorseAudioError, Result};
use log::debug;

// PARIS timing: dot duration = 1200 / WPM milliseconds
const DOT_LENGTH_WPM_MS: f64 = 1200.0;
const DOTS_PER_DASH: u32 = 3; // dash = 3 dot durations
const DOTS_PER_CHAR_GAP: u32 = 3; // inter-character gap = 3 dot durations
const DOTS_PER_WORD_GAP: u32 = 7; // inter-word gap = 7 dot durations

pub const MIN_WPM: u32 = 5;
pub const MAX_WPM: u32 = 50;

/// Element durations in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorseTimings {
    pub dot_ms: u32,
    pub dash_ms: u32,
    pub symbol_gap_ms: u32,
    pub letter_gap_ms: u32,
    pub word_gap_ms: u32,
}

/// Dot duration in milliseconds for a WPM already known to be in range
pub fn dot_ms_for_wpm(wpm: u32) -> u32 {
    (DOT_LENGTH_WPM_MS / wpm.max(1) as f64).round() as u32
}

/// Clamp a WPM value into the practical range, logging when it had to move
pub fn clamp_wpm(wpm: u32) -> u32 {
    let clamped = wpm.clamp(MIN_WPM, MAX_WPM);
    if clamped != wpm {
        debug!("{}, clamping to {}", MorseAudioError::OutOfRangeTiming { wpm }, clamped);
    }
    clamped
}

impl MorseTimings {
    /// Standard timing for `wpm`, rejecting speeds outside 5-50 WPM
    pub fn try_from_wpm(wpm: u32) -> Result<Self> {
        if !(MIN_WPM..=MAX_WPM).contains(&wpm) {
            return Err(MorseAudioError::OutOfRangeTiming { wpm });
        }
        Ok(Self::from_wpm(wpm))
    }

    /// Standard timing for `wpm`, clamped into 5-50 WPM
    pub fn from_wpm(wpm: u32) -> Self {
        Self::farnsworth(wpm, None)
    }

    /// Farnsworth timing: dots, dashes and intra-letter gaps at `character_wpm`,
    /// letter and word gaps at the slower overall `wpm`.
    ///
    /// A character speed below `wpm` is raised to `wpm`.
    pub fn farnsworth(wpm: u32, character_wpm: Option<u32>) -> Self {
        let wpm = clamp_wpm(wpm);
        let character_wpm = clamp_wpm(character_wpm.unwrap_or(wpm)).max(wpm);

        let dot_ms = dot_ms_for_wpm(character_wpm);
        let spacing_dot_ms = dot_ms_for_wpm(wpm);

        Self {
            dot_ms,
            dash_ms: dot_ms * DOTS_PER_DASH,
            symbol_gap_ms: dot_ms,
            letter_gap_ms: spacing_dot_ms * DOTS_PER_CHAR_GAP,
            word_gap_ms: spacing_dot_ms * DOTS_PER_WORD_GAP,
        }
    }
}
