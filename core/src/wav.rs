// Canonical 44-byte-header PCM WAV writer and a chunk-scanning reader
use crate::error::{MorseAudioError, Result};
use log::{debug, warn};

const HEADER_LEN: usize = 44;
const CHUNK_HEADER_LEN: usize = 8;
const FMT_CHUNK_MIN_LEN: usize = 16;
// ChunkSize (36 + data size) must fit in a u32; keep whole 16-bit samples
const MAX_DATA_SIZE: usize = (u32::MAX as usize - 36) & !1;

/// Number of 16-bit samples that fit in one data chunk
fn writable_sample_count(len: usize) -> usize {
    let max_samples = MAX_DATA_SIZE / 2;
    if len > max_samples {
        warn!(
            "{} samples exceed the WAV size limit, truncating to {}",
            len, max_samples
        );
        max_samples
    } else {
        len
    }
}

/// Pack mono 16-bit PCM samples into a WAV byte buffer.
/// Streams longer than a 4 GiB container allows are truncated.
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    let samples = &samples[..writable_sample_count(samples.len())];
    let num_channels: u16 = 1;
    let bits_per_sample: u16 = 16;
    let block_align = num_channels * bits_per_sample / 8;
    let byte_rate = sample_rate * block_align as u32;
    // Bounded by writable_sample_count
    let data_size = (samples.len() * block_align as usize) as u32;

    let mut buf = Vec::with_capacity(HEADER_LEN + data_size as usize);

    // RIFF header
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&(36 + data_size).to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    // fmt sub-chunk
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&(FMT_CHUNK_MIN_LEN as u32).to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
    buf.extend_from_slice(&num_channels.to_le_bytes());
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&bits_per_sample.to_le_bytes());

    // data sub-chunk
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_size.to_le_bytes());
    for &s in samples {
        buf.extend_from_slice(&s.to_le_bytes());
    }

    buf
}

/// Parsed WAV contents with samples normalized to [-1, 1]
#[derive(Debug, Clone, PartialEq)]
pub struct WavAudio {
    pub audio_format: u16,
    pub num_channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    /// Interleaved samples as stored; multi-channel data is not mixed down
    pub samples: Vec<f32>,
}

impl WavAudio {
    /// Only 8-bit unsigned and 16-bit signed PCM carry real sample values
    pub fn check_sample_format(&self) -> Result<()> {
        match self.bits_per_sample {
            8 | 16 => Ok(()),
            bits_per_sample => Err(MorseAudioError::UnsupportedSampleFormat { bits_per_sample }),
        }
    }
}

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Find the first chunk with `id` at or after `offset`.
/// Returns the chunk's header offset and declared size.
fn find_chunk(bytes: &[u8], mut offset: usize, id: &[u8; 4]) -> Option<(usize, usize)> {
    while offset.checked_add(CHUNK_HEADER_LEN)? <= bytes.len() {
        let size = read_u32(bytes, offset + 4) as usize;
        if &bytes[offset..offset + 4] == id {
            return Some((offset, size));
        }
        offset = offset.checked_add(CHUNK_HEADER_LEN)?.checked_add(size)?;
    }
    None
}

fn normalize_samples(data: &[u8], bits_per_sample: u16) -> Vec<f32> {
    match bits_per_sample {
        16 => data
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]) as f32 / 32768.0)
            .collect(),
        8 => data.iter().map(|&b| (b as f32 - 128.0) / 128.0).collect(),
        bits => {
            let bytes_per_sample = (bits as usize / 8).max(1);
            vec![0.0; data.len() / bytes_per_sample]
        }
    }
}

/// Parse a WAV byte buffer
pub fn decode_wav_bytes(bytes: &[u8]) -> Result<WavAudio> {
    if bytes.len() < HEADER_LEN {
        return Err(MorseAudioError::TooShort { len: bytes.len() });
    }
    if &bytes[0..4] != b"RIFF" {
        return Err(MorseAudioError::BadMagic { expected: "RIFF" });
    }
    if &bytes[8..12] != b"WAVE" {
        return Err(MorseAudioError::BadMagic { expected: "WAVE" });
    }

    let (fmt_offset, fmt_size) =
        find_chunk(bytes, 12, b"fmt ").ok_or(MorseAudioError::MissingChunk { id: "fmt " })?;
    let fmt_body = fmt_offset + CHUNK_HEADER_LEN;
    if fmt_size < FMT_CHUNK_MIN_LEN || fmt_body + FMT_CHUNK_MIN_LEN > bytes.len() {
        return Err(MorseAudioError::TruncatedChunk { id: "fmt " });
    }

    let audio_format = read_u16(bytes, fmt_body);
    let num_channels = read_u16(bytes, fmt_body + 2);
    let sample_rate = read_u32(bytes, fmt_body + 4);
    let bits_per_sample = read_u16(bytes, fmt_body + 14);

    let (data_offset, data_size) = find_chunk(bytes, fmt_body.saturating_add(fmt_size), b"data")
        .ok_or(MorseAudioError::MissingChunk { id: "data" })?;
    let data_start = data_offset + CHUNK_HEADER_LEN;
    let data_end = data_start.saturating_add(data_size).min(bytes.len());
    if data_end - data_start < data_size {
        warn!(
            "data chunk declares {} bytes but only {} present",
            data_size,
            data_end - data_start
        );
    }

    debug!(
        "WAV format={} channels={} rate={} bits={} data={} bytes",
        audio_format,
        num_channels,
        sample_rate,
        bits_per_sample,
        data_end - data_start
    );

    Ok(WavAudio {
        audio_format,
        num_channels,
        sample_rate,
        bits_per_sample,
        samples: normalize_samples(&bytes[data_start..data_end], bits_per_sample),
    })
}
