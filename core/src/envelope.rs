use log::debug;

const WINDOW_SECONDS: f64 = 0.01;

/// Normalized RMS energy envelope, one value per hop
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub values: Vec<f32>,
    pub hop_size: usize,
    pub sample_rate: u32,
}

impl Envelope {
    /// Duration covered by one envelope frame
    pub fn hop_ms(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.hop_size as f64 * 1000.0 / self.sample_rate as f64
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Compute a ~10 ms RMS envelope with 50% overlap, normalized so the loudest frame is 1.0.
///
/// Silent or too-short input produces an empty envelope.
pub fn rms_envelope(samples: &[f32], sample_rate: u32) -> Envelope {
    let window = ((sample_rate as f64 * WINDOW_SECONDS).round() as usize).max(1);
    let hop_size = (window / 2).max(1);

    let mut values: Vec<f32> = if samples.len() < window {
        Vec::new()
    } else {
        (0..=samples.len() - window)
            .step_by(hop_size)
            .map(|start| {
                let frame = &samples[start..start + window];
                let energy: f64 = frame.iter().map(|&s| (s as f64) * (s as f64)).sum();
                (energy / window as f64).sqrt() as f32
            })
            .collect()
    };

    let max = values.iter().copied().fold(0.0f32, f32::max);
    if max > 0.0 {
        values.iter_mut().for_each(|v| *v /= max);
    } else {
        values.clear();
    }

    debug!(
        "Envelope: {} frames, window={} hop={}",
        values.len(),
        window,
        hop_size
    );

    Envelope {
        values,
        hop_size,
        sample_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silence_gives_empty_envelope() {
        assert!(rms_envelope(&[0.0; 44100], 44100).is_empty());
        assert!(rms_envelope(&[], 44100).is_empty());
    }

    #[test]
    fn test_short_input_gives_empty_envelope() {
        assert!(rms_envelope(&[0.5; 100], 44100).is_empty());
    }

    #[test]
    fn test_frame_count_and_hop() {
        let env = rms_envelope(&[0.25; 4410], 44100);
        // window 441, hop 220: starts 0, 220, ..., 3960
        assert_eq!(env.hop_size, 220);
        assert_eq!(env.len(), 19);
        assert!((env.hop_ms() - 220.0 * 1000.0 / 44100.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalized_to_peak() {
        let mut samples = vec![0.1f32; 2205];
        samples.extend(vec![0.4f32; 2205]);
        let env = rms_envelope(&samples, 44100);
        let max = env.values.iter().copied().fold(0.0f32, f32::max);
        assert!((max - 1.0).abs() < 1e-6);
        assert!((env.values[0] - 0.25).abs() < 1e-4);
        assert!(env.values.iter().all(|&v| (0.0..=1.0 + 1e-6).contains(&v)));
    }
}
