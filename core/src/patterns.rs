// Morse alphabet - one canonical table, both lookup directions derived from it
use log::debug;
use std::collections::HashMap;
use std::sync::OnceLock;

const MORSE_TABLE: &[(u8, &str)] = &[
    // Letters
    (b'A', ".-"),
    (b'B', "-..."),
    (b'C', "-.-."),
    (b'D', "-.."),
    (b'E', "."),
    (b'F', "..-."),
    (b'G', "--."),
    (b'H', "...."),
    (b'I', ".."),
    (b'J', ".---"),
    (b'K', "-.-"),
    (b'L', ".-.."),
    (b'M', "--"),
    (b'N', "-."),
    (b'O', "---"),
    (b'P', ".--."),
    (b'Q', "--.-"),
    (b'R', ".-."),
    (b'S', "..."),
    (b'T', "-"),
    (b'U', "..-"),
    (b'V', "...-"),
    (b'W', ".--"),
    (b'X', "-..-"),
    (b'Y', "-.--"),
    (b'Z', "--.."),
    // Numbers
    (b'0', "-----"),
    (b'1', ".----"),
    (b'2', "..---"),
    (b'3', "...--"),
    (b'4', "....-"),
    (b'5', "....."),
    (b'6', "-...."),
    (b'7', "--..."),
    (b'8', "---.."),
    (b'9', "----."),
    // Punctuation
    (b'.', ".-.-.-"),
    (b',', "--..--"),
    (b'?', "..--.."),
    (b'\'', ".----."),
    (b'!', "-.-.--"),
    (b'/', "-..-."),
    (b'(', "-.--."),
    (b')', "-.--.-"),
    (b'&', ".-..."),
    (b':', "---..."),
    (b';', "-.-.-."),
    (b'=', "-...-"),
    (b'+', ".-.-."),
    (b'-', "-....-"),
    (b'_', "..--.-"),
    (b'"', ".-..-."),
    (b'$', "...-..-"),
    (b'@', ".--.-."),
];

// Direct lookup table for O(1) access - 256 entries for all possible bytes
static MORSE_PATTERNS: [Option<&str>; 256] = {
    let mut patterns: [Option<&'static str>; 256] = [None; 256];
    let mut i = 0;
    while i < MORSE_TABLE.len() {
        let (ch, pattern) = MORSE_TABLE[i];
        patterns[ch as usize] = Some(pattern);
        // Lowercase letters share the uppercase pattern
        patterns[ch.to_ascii_lowercase() as usize] = Some(pattern);
        i += 1;
    }
    patterns
};

static REVERSE_PATTERNS: OnceLock<HashMap<&'static str, char>> = OnceLock::new();

fn reverse_patterns() -> &'static HashMap<&'static str, char> {
    REVERSE_PATTERNS.get_or_init(|| {
        MORSE_TABLE
            .iter()
            .map(|&(ch, pattern)| (pattern, ch as char))
            .collect()
    })
}

/// Get the morse pattern for a character - O(1) lookup, case-insensitive
pub fn pattern_for(ch: char) -> Option<&'static str> {
    if ch.is_ascii() {
        MORSE_PATTERNS[ch as usize]
    } else {
        None
    }
}

/// Get the (uppercase) character for a morse pattern such as `".-"`
pub fn char_for(pattern: &str) -> Option<char> {
    reverse_patterns().get(pattern).copied()
}

/// Convert text to a pattern string: letters separated by `" "`, words by `" / "`.
/// Characters with no morse equivalent are skipped.
pub fn text_to_pattern(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            word.chars()
                .filter_map(|ch| {
                    let pattern = pattern_for(ch);
                    if pattern.is_none() {
                        debug!("No morse pattern for {:?}, skipping", ch);
                    }
                    pattern
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" / ")
}
