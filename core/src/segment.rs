use crate::envelope::Envelope;
use crate::types::{DecodeParams, Segment};
use log::{debug, trace};

fn frames_to_ms(frames: usize, hop_ms: f64) -> u32 {
    (frames as f64 * hop_ms).round() as u32
}

fn close_region(
    start: usize,
    end: usize,
    hop_ms: f64,
    params: &DecodeParams,
    signals: &mut Vec<Segment>,
) {
    let duration_ms = frames_to_ms(end - start, hop_ms);
    if duration_ms >= params.min_signal_ms {
        signals.push(Segment {
            is_signal: true,
            start_index: start,
            end_index: end,
            duration_ms,
        });
    } else {
        trace!("Dropping {} ms blip at frame {}", duration_ms, start);
    }
}

/// Threshold the envelope into tone regions, then interleave the silences between them.
///
/// Tone regions shorter than `min_signal_ms` are dropped; gaps are always kept,
/// so the output alternates signal/gap and starts and ends with a signal.
pub fn segment_envelope(envelope: &Envelope, params: &DecodeParams) -> Vec<Segment> {
    let hop_ms = envelope.hop_ms();
    let mut signals = Vec::new();
    let mut open: Option<usize> = None;

    for (i, &level) in envelope.values.iter().enumerate() {
        match open {
            None if level > params.threshold => open = Some(i),
            Some(start) if level <= params.threshold => {
                close_region(start, i, hop_ms, params, &mut signals);
                open = None;
            }
            _ => {}
        }
    }

    // Recording ended mid-tone
    if let Some(start) = open {
        close_region(start, envelope.len(), hop_ms, params, &mut signals);
    }

    let mut segments = Vec::with_capacity(signals.len() * 2);
    let mut prev_end: Option<usize> = None;
    for signal in signals {
        if let Some(end) = prev_end {
            segments.push(Segment {
                is_signal: false,
                start_index: end,
                end_index: signal.start_index,
                duration_ms: frames_to_ms(signal.start_index - end, hop_ms),
            });
        }
        prev_end = Some(signal.end_index);
        segments.push(signal);
    }

    debug!(
        "Segmented {} frames into {} segments",
        envelope.len(),
        segments.len()
    );
    segments
}
