//! Per-pitch-class candidate scores for the next track in a playlist.

use harmonix_pitch::PitchClass;

/// A score per pitch class, independent of mode — the playlist builder
/// picks its next track by tonic alone.
#[derive(Debug, Clone, Copy)]
pub struct KeyScores {
    scores: [f64; 12],
}

impl Default for KeyScores {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyScores {
    pub fn new() -> Self {
        Self { scores: [0.0; 12] }
    }

    pub fn add(&mut self, pitch_class: PitchClass, amount: f64) {
        self.scores[pitch_class.index() as usize] += amount;
    }

    pub fn get(&self, pitch_class: PitchClass) -> f64 {
        self.scores[pitch_class.index() as usize]
    }

    /// Pitch classes ordered by descending score. Ties keep
    /// [`PitchClass::all`]'s canonical order.
    pub fn ranked(&self) -> Vec<PitchClass> {
        let mut ranked: Vec<PitchClass> = PitchClass::all().to_vec();
        ranked.sort_by(|a, b| self.get(*b).partial_cmp(&self.get(*a)).unwrap());
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranked_orders_by_descending_score() {
        let mut scores = KeyScores::new();
        scores.add(PitchClass::G, 5.0);
        scores.add(PitchClass::D, 9.0);
        scores.add(PitchClass::C, 1.0);
        let ranked = scores.ranked();
        assert_eq!(ranked[0], PitchClass::D);
        assert_eq!(ranked[1], PitchClass::G);
    }

    #[test]
    fn ties_keep_canonical_order() {
        let scores = KeyScores::new();
        let ranked = scores.ranked();
        assert_eq!(ranked, PitchClass::all().to_vec());
    }
}
