use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MorseAudioError {
    #[error("Buffer too short for a WAV header ({len} bytes)")]
    TooShort { len: usize },

    #[error("Missing {expected} marker")]
    BadMagic { expected: &'static str },

    #[error("Missing {id:?} chunk")]
    MissingChunk { id: &'static str },

    #[error("Truncated {id:?} chunk")]
    TruncatedChunk { id: &'static str },

    #[error("Unsupported sample format: {bits_per_sample} bits per sample")]
    UnsupportedSampleFormat { bits_per_sample: u16 },

    #[error("No Morse code detected")]
    NoSignalDetected,

    #[error("WPM {wpm} outside practical range")]
    OutOfRangeTiming { wpm: u32 },
}

impl MorseAudioError {
    /// True for every failure that means the bytes are not a usable WAV container
    pub fn is_invalid_container(&self) -> bool {
        matches!(
            self,
            Self::TooShort { .. }
                | Self::BadMagic { .. }
                | Self::MissingChunk { .. }
                | Self::TruncatedChunk { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MorseAudioError>;
