//! The process-wide pitch table: every named pitch C0..C9, built once.

use crate::note::Note;
use crate::pitch_class::PitchClass;

/// C0 through C9 inclusive, 109 equal-tempered notes built once at
/// startup and shared read-only by every worker thereafter.
#[derive(Debug, Clone)]
pub struct PitchTable {
    notes: Vec<Note>,
}

impl Default for PitchTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PitchTable {
    /// Build the table: one equal-tempered note per semitone offset
    /// -57..=51 from A4, covering C0 through C9 inclusive.
    pub fn new() -> Self {
        let order = PitchClass::all();
        let notes = (0..109)
            .map(|index| {
                let pitch_class = order[index % 12];
                let octave = (index / 12) as i32;
                Note::equal_tempered(pitch_class, octave)
            })
            .collect();
        Self { notes }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// All notes in the table, ordered C0, C#0, .., B0, C1, .., C9.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Notes whose octave is strictly below `max_octave` — power above
    /// the 6th octave is unlikely to be that of a fundamental's, so the
    /// presence extractor only scans this subset (spec §4.3 step 4).
    pub fn notes_below_octave(&self, max_octave: i32) -> impl Iterator<Item = &Note> {
        self.notes.iter().filter(move |n| n.octave < max_octave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_109_notes_from_c0_to_c9() {
        let table = PitchTable::new();
        assert_eq!(table.len(), 109);
        assert_eq!(table.notes()[0].pitch_class, PitchClass::C);
        assert_eq!(table.notes()[0].octave, 0);
        assert_eq!(table.notes()[108].pitch_class, PitchClass::C);
        assert_eq!(table.notes()[108].octave, 9);
    }

    #[test]
    fn c0_frequency_matches_equal_temperament() {
        let table = PitchTable::new();
        let c0 = &table.notes()[0];
        // C0 is 57 semitones below A4.
        let expected = 440.0 * 2f64.powf(-57.0 / 12.0);
        assert!((c0.frequency - expected).abs() < 1e-6);
    }

    #[test]
    fn notes_below_octave_excludes_high_octaves() {
        let table = PitchTable::new();
        let below_six: Vec<_> = table.notes_below_octave(6).collect();
        assert!(below_six.iter().all(|n| n.octave < 6));
        assert!(below_six.len() < table.len());
    }
}
