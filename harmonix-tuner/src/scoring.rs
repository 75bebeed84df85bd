//! Scores a batch of analyzed tracks against hand-labeled ground truth.

use harmonix_analysis::Track;
use harmonix_corpus::GroundTruthCorpus;

/// Percentage of tracks whose assigned start and end tonics both match
/// their ground-truth entry (a relative-key match counts). Tracks absent
/// from the corpus still count in the denominator, matching every
/// analyzed track being scored — they just can never contribute a match.
pub fn score_against_ground_truth(tracks: &[Track], corpus: &GroundTruthCorpus) -> f64 {
    if tracks.is_empty() {
        return 0.0;
    }

    let matches = tracks
        .iter()
        .filter(|track| {
            let Some(entry) = corpus.get(&track.name) else {
                return false;
            };
            let Some(start_key) = track.start_key else { return false };
            let Some(end_key) = track.end_key else { return false };
            entry.matches_start(&start_key.tonic.to_string()) && entry.matches_end(&end_key.tonic.to_string())
        })
        .count();

    let fraction = matches as f64 / tracks.len() as f64;
    ((fraction * 10_000.0).round() / 10_000.0) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use harmonix_analysis::{CoefficientVector, Key, Mode};
    use harmonix_corpus::GroundTruthEntry;
    use harmonix_pitch::PitchClass;
    use std::collections::HashMap;

    fn keyed_track(name: &str, tonic: PitchClass) -> Track {
        let mut track = Track::new(name, 1000);
        track.start_key = Some(Key::new(tonic, Mode::Major));
        track.end_key = Some(Key::new(tonic, Mode::Major));
        track.easy_key = Some(tonic.to_string());
        track
    }

    #[test]
    fn matching_tracks_score_one_hundred() {
        let tracks = vec![keyed_track("song-a", PitchClass::C)];
        let mut entries = HashMap::new();
        entries.insert(
            "song-a".to_string(),
            GroundTruthEntry {
                starting_key: "C".to_string(),
                closing_key: "C".to_string(),
                starting_relative_key: None,
                closing_relative_key: None,
            },
        );
        let corpus: GroundTruthCorpus =
            serde_json::from_value(serde_json::json!({ "tracks": entries })).unwrap();

        let score = score_against_ground_truth(&tracks, &corpus);
        assert_eq!(score, 100.0);
    }

    #[test]
    fn unlisted_tracks_never_contribute_a_match() {
        let tracks = vec![keyed_track("unknown", PitchClass::C)];
        let corpus = GroundTruthCorpus::default();
        assert_eq!(score_against_ground_truth(&tracks, &corpus), 0.0);
    }

    #[test]
    fn empty_batch_scores_zero() {
        let corpus = GroundTruthCorpus::default();
        assert_eq!(score_against_ground_truth(&[], &corpus), 0.0);
        let _ = CoefficientVector::orchestral();
    }
}
