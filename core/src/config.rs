// JSON configuration helpers shared by the library and its bindings
use log::warn;
use serde::de::DeserializeOwned;

/// Parse a JSON config, overlaying it on the defaults.
/// Empty input or `{}` yields the default; malformed input is logged and also yields the default.
pub fn parse_with_defaults<T: DeserializeOwned + Default>(config_json: &str) -> T {
    if config_json.trim().is_empty() || config_json.trim() == "{}" {
        return T::default();
    }

    serde_json::from_str::<T>(config_json).unwrap_or_else(|e| {
        warn!("Ignoring invalid config JSON ({}), using defaults", e);
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DecodeParams, MorseTimingParams};

    #[test]
    fn test_timing_params_json_deserialization() {
        let params: MorseTimingParams = parse_with_defaults("{}");
        assert_eq!(params, MorseTimingParams::default());

        let params: MorseTimingParams =
            parse_with_defaults(r#"{"wpm": 30, "characterWpm": 35, "toneFreqHz": 700}"#);
        assert_eq!(params.wpm, 30);
        assert_eq!(params.character_wpm, Some(35));
        assert_eq!(params.tone_freq_hz, 700);
        assert_eq!(params.sample_rate, 44100); // default
    }

    #[test]
    fn test_decode_params_partial_json() {
        let params: DecodeParams = parse_with_defaults(r#"{"minSignalMs": 30}"#);
        assert_eq!(params.min_signal_ms, 30);
        assert_eq!(params.threshold, 0.15);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        let params: DecodeParams = parse_with_defaults("{not json");
        assert_eq!(params, DecodeParams::default());
        let params: MorseTimingParams = parse_with_defaults("   ");
        assert_eq!(params.wpm, 20);
    }
}
