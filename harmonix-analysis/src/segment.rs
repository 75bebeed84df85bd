//! Windowed FFT over overlapping segments around an anchor sample.

use rustfft::{num_complex::Complex, FftPlanner};
use std::sync::Arc;

/// Samples per analyzed segment.
pub const SEGMENT_SIZE: usize = 32768;
/// Fraction of the segment width the ten overlapping windows share.
pub const OVERLAP_COEFFICIENT: f64 = 0.661;
/// Number of overlapping windows taken around each anchor.
pub const INCREMENTS: usize = 10;

/// One windowed-FFT spectrum: `|Re(X_k)|` for bins `0..=SEGMENT_SIZE/2`,
/// i.e. the same non-redundant half a real-input FFT would return.
pub type Segment = Vec<f64>;

fn overlap_offset() -> i64 {
    let n = SEGMENT_SIZE as f64;
    ((n / 2.0) + (n - n * OVERLAP_COEFFICIENT)) as i64
}

fn segment_increment() -> i64 {
    let n = SEGMENT_SIZE as f64;
    (n + (n * OVERLAP_COEFFICIENT) / INCREMENTS as f64) as i64
}

fn blackman_window(len: usize) -> Vec<f64> {
    let denom = (len - 1) as f64;
    (0..len)
        .map(|i| {
            let x = i as f64 / denom;
            0.42 - 0.5 * (2.0 * std::f64::consts::PI * x).cos()
                + 0.08 * (4.0 * std::f64::consts::PI * x).cos()
        })
        .collect()
}

/// Windows and FFTs a mono signal around anchor samples.
///
/// [`SegmentAnalyzer::analyze_at`] takes ten overlapping windows
/// straddling the anchor, spaced `segment_increment()` samples apart and
/// starting `overlap_offset()` samples before it. Windows that would run
/// off either end of the signal are skipped, so the result can be
/// shorter than [`INCREMENTS`] or empty near the edges of a track.
pub struct SegmentAnalyzer {
    fft: Arc<dyn rustfft::Fft<f64>>,
    window: Vec<f64>,
}

impl Default for SegmentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentAnalyzer {
    pub fn new() -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(SEGMENT_SIZE);
        Self {
            fft,
            window: blackman_window(SEGMENT_SIZE),
        }
    }

    /// Take the overlapping windows around `anchor_sample`, returning one
    /// [`Segment`] per window that fit entirely inside `mono`.
    pub fn analyze_at(&self, mono: &[f64], anchor_sample: i64) -> Vec<Segment> {
        let mut start = anchor_sample - overlap_offset();
        let step = segment_increment();
        let mut segments = Vec::with_capacity(INCREMENTS);

        for _ in 0..INCREMENTS {
            if start >= 0 && (start as usize) + SEGMENT_SIZE <= mono.len() {
                segments.push(self.analyze_window(&mono[start as usize..start as usize + SEGMENT_SIZE]));
            }
            start += step;
        }
        segments
    }

    fn analyze_window(&self, window: &[f64]) -> Segment {
        let mut buffer: Vec<Complex<f64>> = window
            .iter()
            .zip(self.window.iter())
            .map(|(&sample, &w)| Complex::new(sample * w, 0.0))
            .collect();
        self.fft.process(&mut buffer);
        buffer[..=SEGMENT_SIZE / 2].iter().map(|c| c.re.abs()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_length_is_half_plus_one() {
        let analyzer = SegmentAnalyzer::new();
        let mono: Vec<f64> = (0..SEGMENT_SIZE * 3).map(|i| (i as f64 * 0.01).sin()).collect();
        let segments = analyzer.analyze_at(&mono, (SEGMENT_SIZE * 3 / 2) as i64);
        assert!(!segments.is_empty());
        for s in &segments {
            assert_eq!(s.len(), SEGMENT_SIZE / 2 + 1);
        }
    }

    #[test]
    fn windows_near_track_edges_are_skipped() {
        let analyzer = SegmentAnalyzer::new();
        let mono: Vec<f64> = vec![0.0; SEGMENT_SIZE];
        // Anchored right at the very start, most windows run off the left edge.
        let segments = analyzer.analyze_at(&mono, 0);
        assert!(segments.len() < INCREMENTS);
    }

    #[test]
    fn pure_tone_concentrates_energy_near_its_bin() {
        let analyzer = SegmentAnalyzer::new();
        let sample_rate = 44_100.0;
        let freq = 440.0;
        let mono: Vec<f64> = (0..SEGMENT_SIZE * 3)
            .map(|i| (2.0 * std::f64::consts::PI * freq * i as f64 / sample_rate).sin())
            .collect();
        let segments = analyzer.analyze_at(&mono, (SEGMENT_SIZE * 3 / 2) as i64);
        let segment = &segments[0];
        let bin_size = sample_rate / SEGMENT_SIZE as f64;
        let target_bin = (freq / bin_size).round() as usize;
        let peak_bin = segment
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert!(
            (peak_bin as i64 - target_bin as i64).abs() <= 2,
            "expected peak near bin {target_bin}, got {peak_bin}"
        );
    }
}
