use crate::timing::MorseTimings;
use log::trace;
use std::f64::consts::PI;

// Audio constants
const FADE_SECONDS: f64 = 0.005; // Linear fade in/out to prevent audio clicks
const AMPLITUDE: f64 = 32767.0 * 0.8;

/// Silence appended to every generated stream
pub const TAIL_SILENCE_MS: u32 = 100;

fn samples_for_ms(duration_ms: u32, sample_rate: u32) -> usize {
    (sample_rate as f64 * duration_ms as f64 / 1000.0).round() as usize
}

/// Generate a sine tone of `duration_ms` with linear fade in and fade out.
///
/// When the tone is shorter than two fades the ramps overlap and the
/// lower of the two wins.
pub fn tone(duration_ms: u32, freq_hz: f64, sample_rate: u32) -> Vec<i16> {
    let n = samples_for_ms(duration_ms, sample_rate);
    let fade_samples = (sample_rate as f64 * FADE_SECONDS).round();

    (0..n)
        .map(|i| {
            let envelope = if fade_samples > 0.0 {
                let attack = i as f64 / fade_samples;
                let release = (n - 1 - i) as f64 / fade_samples;
                attack.min(release).min(1.0)
            } else {
                1.0
            };

            let phase = 2.0 * PI * freq_hz * i as f64 / sample_rate as f64;
            let value = phase.sin() * envelope * AMPLITUDE;
            value.round().clamp(i16::MIN as f64, i16::MAX as f64) as i16
        })
        .collect()
}

/// Generate `duration_ms` of zero samples
pub fn silence(duration_ms: u32, sample_rate: u32) -> Vec<i16> {
    vec![0; samples_for_ms(duration_ms, sample_rate)]
}

fn is_symbol(ch: char) -> bool {
    ch == '.' || ch == '-'
}

/// Expand a pattern string (`.`, `-`, ` ` letter break, `/` word break) into samples.
///
/// A symbol followed by another symbol or a letter break is followed by one
/// symbol gap; the letter break then adds `letter_gap - symbol_gap`, so the
/// silence between letters totals exactly one letter gap. `/` adds a full
/// word gap on top of whatever surrounds it.
pub fn sequence_pattern(
    pattern: &str,
    timings: &MorseTimings,
    freq_hz: f64,
    sample_rate: u32,
) -> Vec<i16> {
    let mut samples = Vec::new();
    let mut chars = pattern.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '.' | '-' => {
                let duration = if ch == '.' {
                    timings.dot_ms
                } else {
                    timings.dash_ms
                };
                samples.extend(tone(duration, freq_hz, sample_rate));

                // Intra-letter spacing
                if matches!(chars.peek(), Some(&next) if is_symbol(next) || next == ' ') {
                    samples.extend(silence(timings.symbol_gap_ms, sample_rate));
                }
            }
            ' ' => {
                let remaining = timings.letter_gap_ms.saturating_sub(timings.symbol_gap_ms);
                samples.extend(silence(remaining, sample_rate));
            }
            '/' => samples.extend(silence(timings.word_gap_ms, sample_rate)),
            other => trace!("Ignoring {:?} in morse pattern", other),
        }
    }

    samples.extend(silence(TAIL_SILENCE_MS, sample_rate));
    samples
}

/// Reproduce recorded key presses verbatim: `press_ms[i]` of tone, then `gap_ms[i]`
/// of silence when present.
pub fn sequence_timings(
    press_ms: &[u32],
    gap_ms: &[u32],
    freq_hz: f64,
    sample_rate: u32,
) -> Vec<i16> {
    let mut samples = Vec::new();

    for (i, &press) in press_ms.iter().enumerate() {
        samples.extend(tone(press, freq_hz, sample_rate));
        if let Some(&gap) = gap_ms.get(i) {
            samples.extend(silence(gap, sample_rate));
        }
    }

    samples.extend(silence(TAIL_SILENCE_MS, sample_rate));
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: u32 = 44100;

    #[test]
    fn test_tone_length_and_fades() {
        let samples = tone(60, 600.0, RATE);
        assert_eq!(samples.len(), 2646);
        // Envelope starts and ends at zero
        assert_eq!(samples[0], 0);
        assert!(samples[1].abs() < 100);
        assert_eq!(samples[samples.len() - 1], 0);
        assert!(samples[samples.len() - 2].abs() < 150);
    }

    #[test]
    fn test_tone_amplitude() {
        let samples = tone(20, 600.0, RATE);
        assert!(samples.iter().any(|&s| s.abs() > 100));
        let peak = samples.iter().map(|&s| (s as i32).abs()).max().unwrap();
        assert!(peak <= 26214);
        assert!(peak > 20000);
    }

    #[test]
    fn test_short_tone_overlapping_fades() {
        // 4 ms is shorter than two 5 ms fades
        let samples = tone(4, 1000.0, RATE);
        assert_eq!(samples.len(), 176);
        let peak = samples.iter().map(|&s| (s as i32).abs()).max().unwrap();
        assert!(peak < 26214);
    }

    #[test]
    fn test_silence() {
        let samples = silence(100, RATE);
        assert_eq!(samples.len(), 4410);
        assert!(samples.iter().all(|&s| s == 0));
        assert!(silence(0, RATE).is_empty());
    }

    #[test]
    fn test_single_symbols_include_tail() {
        let t = MorseTimings::from_wpm(20);
        assert_eq!(sequence_pattern(".", &t, 600.0, RATE).len(), 2646 + 4410);
        assert_eq!(sequence_pattern("-", &t, 600.0, RATE).len(), 7938 + 4410);
    }

    #[test]
    fn test_letter_break_sums_to_letter_gap() {
        let t = MorseTimings::from_wpm(20);
        // dot, 60 ms symbol gap, 120 ms remainder, dot, tail
        let samples = sequence_pattern(". .", &t, 600.0, RATE);
        let expected_ms = 60 + 180 + 60 + 100;
        assert_eq!(samples.len(), samples_for_ms(expected_ms, RATE));
    }

    #[test]
    fn test_intra_letter_and_word_gaps() {
        let t = MorseTimings::from_wpm(20);
        let letter = sequence_pattern("..", &t, 600.0, RATE);
        assert_eq!(letter.len(), samples_for_ms(60 + 60 + 60 + 100, RATE));

        let words = sequence_pattern("./.", &t, 600.0, RATE);
        assert_eq!(words.len(), samples_for_ms(60 + 420 + 60 + 100, RATE));
    }

    #[test]
    fn test_unknown_characters_ignored() {
        let t = MorseTimings::from_wpm(20);
        assert_eq!(
            sequence_pattern(".x", &t, 600.0, RATE),
            sequence_pattern(".", &t, 600.0, RATE)
        );
    }

    #[test]
    fn test_sequence_timings_verbatim() {
        let samples = sequence_timings(&[50, 170], &[70], 700.0, RATE);
        assert_eq!(samples.len(), samples_for_ms(50 + 70 + 170 + 100, RATE));
        // The gap is silent
        let gap_start = samples_for_ms(50, RATE);
        let gap_end = gap_start + samples_for_ms(70, RATE);
        assert!(samples[gap_start..gap_end].iter().all(|&s| s == 0));
    }

    #[test]
    fn test_sequence_timings_extra_gaps_ignored() {
        let a = sequence_timings(&[50], &[70, 80, 90], 700.0, RATE);
        let b = sequence_timings(&[50], &[70], 700.0, RATE);
        assert_eq!(a, b);
        assert_eq!(sequence_timings(&[], &[], 700.0, RATE).len(), 4410);
    }
}
