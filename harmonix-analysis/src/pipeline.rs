//! Ties the segment analyzer, presence extractor, and tonality scorer
//! together into a single per-track analysis pass.

use crate::coefficients::CoefficientVector;
use crate::presence::PresenceExtractor;
use crate::segment::SegmentAnalyzer;
use crate::track::Track;
use harmonix_pitch::{Buffer, PitchTable};

/// Analysis iteration increment, in proportion of a second.
const SEQUENCING_COEFFICIENT: f64 = 0.25;

/// Walk `mono` in quarter-second steps, averaging the overlapping
/// windows around each step into one [`Buffer`], extracting fundamentals
/// from it, and folding them into a [`Track`] — then assign the track's
/// key(s) from the accumulated presence.
pub fn analyze_track(
    name: impl Into<String>,
    mono: &[f64],
    sample_rate: u32,
    coefficients: &CoefficientVector,
    collapse_to_general: bool,
) -> Track {
    let mut track = Track::new(name, mono.len() as u64);
    let segment_analyzer = SegmentAnalyzer::new();
    let presence_extractor = PresenceExtractor::new(PitchTable::new());

    let sequencing_increment = (SEQUENCING_COEFFICIENT * sample_rate as f64) as i64;
    let iterations = if sequencing_increment > 0 {
        (mono.len() as f64 / sequencing_increment as f64) as i64
    } else {
        0
    };

    for i in 0..iterations {
        let sample = i * sequencing_increment;
        let segments = segment_analyzer.analyze_at(mono, sample);
        if segments.is_empty() {
            continue;
        }

        let length = segments[0].len();
        let mut averaged = vec![0.0; length];
        for segment in &segments {
            for (acc, &value) in averaged.iter_mut().zip(segment.iter()) {
                *acc += value;
            }
        }
        for value in averaged.iter_mut() {
            *value /= segments.len() as f64;
        }

        let dc_offset = averaged[0];
        let spectrum = averaged[1..].to_vec();
        let buffer = Buffer::new(spectrum, dc_offset, sample_rate, sample as u64);

        if let Some(map) = presence_extractor.extract(&buffer) {
            track.accumulate(buffer.sample_index, &map);
        }
    }

    track.assign_keys(coefficients, collapse_to_general);
    track
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_track_degrades_to_c_major() {
        let mono = vec![0.0; 44_100 * 2];
        let track = analyze_track("silence", &mono, 44_100, &CoefficientVector::orchestral(), false);
        assert_eq!(track.easy_key.as_deref(), Some("C"));
    }

    #[test]
    fn analyze_track_does_not_panic_on_short_audio() {
        let mono = vec![0.0; 1000];
        let track = analyze_track("short", &mono, 44_100, &CoefficientVector::orchestral(), false);
        assert!(track.easy_key.is_some());
    }
}
