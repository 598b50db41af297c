// WebAssembly bindings for the morse audio codec
use js_sys::{Array, Object, Reflect};
use morse_audio_core::config::parse_with_defaults;
use morse_audio_core::types::{DecodeParams, DecodeResult, MorseTimingParams, Segment};
use wasm_bindgen::prelude::*;

mod support;

/// Route core logging to the browser console. Returns the level in effect.
#[wasm_bindgen]
pub fn init_logging(level: &str) -> String {
    support::init_console_logging(level).to_string()
}

// Main JavaScript API functions

#[wasm_bindgen]
pub fn encode_morse_to_wav(pattern: &str, config_json: &str) -> Vec<u8> {
    let params = parse_with_defaults::<MorseTimingParams>(config_json);
    morse_audio_core::encode_morse_to_wav(pattern, &params)
}

#[wasm_bindgen]
pub fn encode_text_to_wav(text: &str, config_json: &str) -> Vec<u8> {
    let params = parse_with_defaults::<MorseTimingParams>(config_json);
    morse_audio_core::encode_text_to_wav(text, &params)
}

#[wasm_bindgen]
pub fn encode_timings_to_wav(
    press_ms: Vec<u32>,
    gap_ms: Vec<u32>,
    tone_hz: u32,
    sample_rate: u32,
) -> Vec<u8> {
    morse_audio_core::encode_timings_to_wav(&press_ms, &gap_ms, tone_hz, sample_rate)
}

// JavaScript-compatible result type
#[wasm_bindgen]
pub struct DecodeResultJs {
    inner: DecodeResult,
}

#[wasm_bindgen]
impl DecodeResultJs {
    #[wasm_bindgen(getter)]
    pub fn morse_pattern(&self) -> String {
        self.inner.morse_pattern.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn decoded_text(&self) -> String {
        self.inner.decoded_text.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn estimated_wpm(&self) -> u32 {
        self.inner.estimated_wpm
    }

    #[wasm_bindgen(getter)]
    pub fn confidence(&self) -> f32 {
        self.inner.confidence
    }

    /// Plain object with camelCase keys
    #[wasm_bindgen(js_name = toObject)]
    pub fn to_object(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[wasm_bindgen]
pub fn decode_wav(bytes: &[u8], config_json: &str) -> DecodeResultJs {
    let params = parse_with_defaults::<DecodeParams>(config_json);
    DecodeResultJs {
        inner: morse_audio_core::decode_wav_with(bytes, &params),
    }
}

#[wasm_bindgen]
pub struct AnalysisResultJs {
    segments: Vec<Segment>,
    dot_ms: u32,
    result: DecodeResult,
}

#[wasm_bindgen]
impl AnalysisResultJs {
    #[wasm_bindgen(getter)]
    pub fn dot_ms(&self) -> u32 {
        self.dot_ms
    }

    #[wasm_bindgen(getter)]
    pub fn result(&self) -> DecodeResultJs {
        DecodeResultJs {
            inner: self.result.clone(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn segments(&self) -> Result<Array, JsValue> {
        let array = Array::new();
        for segment in &self.segments {
            let obj = Object::new();
            let kind = if segment.is_signal { "signal" } else { "gap" };
            Reflect::set(&obj, &"type".into(), &kind.into())?;
            Reflect::set(&obj, &"startIndex".into(), &(segment.start_index as u32).into())?;
            Reflect::set(&obj, &"endIndex".into(), &(segment.end_index as u32).into())?;
            Reflect::set(&obj, &"durationMs".into(), &segment.duration_ms.into())?;
            array.push(&obj);
        }
        Ok(array)
    }
}

/// Full analysis with intermediate segments; errors (bad container, no signal) are thrown
#[wasm_bindgen]
pub fn analyze_wav(bytes: &[u8], config_json: &str) -> Result<AnalysisResultJs, JsValue> {
    let params = parse_with_defaults::<DecodeParams>(config_json);
    let analysis = morse_audio_core::analyze_wav(bytes, &params)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    Ok(AnalysisResultJs {
        dot_ms: analysis.classification.dot_ms,
        segments: analysis.segments,
        result: analysis.result,
    })
}
