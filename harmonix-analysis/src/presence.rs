//! Per-note presence extraction from an averaged spectral buffer.

use harmonix_pitch::{Buffer, PitchClass, PitchTable};

/// Power above this value is no longer assumed to be noise floor.
const NOISE_GATE: f64 = 10.0;
/// A candidate fundamental needs at least this many corroborating
/// overtones before its power is counted.
const CORROBORATION_THRESHOLD: usize = 10;
/// Power above this octave is unlikely to belong to a fundamental.
const FUNDAMENTAL_OCTAVE_LIMIT: i32 = 6;

/// Accumulated spectral power per pitch class, independent of octave.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresenceMap {
    power: [f64; 12],
}

impl PresenceMap {
    pub fn new() -> Self {
        Self { power: [0.0; 12] }
    }

    pub fn get(&self, pitch_class: PitchClass) -> f64 {
        self.power[pitch_class.index() as usize]
    }

    pub fn add(&mut self, pitch_class: PitchClass, amount: f64) {
        self.power[pitch_class.index() as usize] += amount;
    }

    /// Fold another map's power into this one, pitch class by pitch class.
    pub fn merge(&mut self, other: &PresenceMap) {
        for pc in PitchClass::all() {
            self.add(pc, other.get(pc));
        }
    }

    /// The strongest pitch class's accumulated power; tonality scoring
    /// expresses every other note's power relative to this.
    pub fn principal_power(&self) -> f64 {
        self.power.iter().cloned().fold(0.0, f64::max)
    }
}

/// Scans a buffer's spectrum for fundamentals, corroborated by their
/// overtone series, and folds their power into a [`PresenceMap`].
pub struct PresenceExtractor {
    table: PitchTable,
}

impl Default for PresenceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PresenceExtractor {
    pub fn new(table: PitchTable) -> Self {
        Self { table }
    }

    /// Extract fundamentals from `buffer`. Returns `None` if the buffer's
    /// peak power never clears the noise gate, i.e. there's nothing in it
    /// worth scanning.
    pub fn extract(&self, buffer: &Buffer) -> Option<PresenceMap> {
        if buffer.max() <= NOISE_GATE {
            return None;
        }

        let average = buffer.mean();
        let mut map = PresenceMap::new();

        for note in self.table.notes_below_octave(FUNDAMENTAL_OCTAVE_LIMIT) {
            let note_power = note.power_in(buffer);
            let neighbor_power = note.adjacent(1).power_in(buffer).max(note.adjacent(-1).power_in(buffer));

            if note_power <= neighbor_power {
                continue;
            }

            let valid_overtones = note
                .overtones()
                .iter()
                .filter(|overtone| {
                    let overtone_power = overtone.power_in(buffer);
                    let overtone_neighbor_power =
                        overtone.adjacent(1).power_in(buffer).max(overtone.adjacent(-1).power_in(buffer));
                    overtone_power > overtone_neighbor_power
                        || (overtone_power > average && overtone_power > overtone_neighbor_power * 0.8)
                })
                .count();

            if valid_overtones >= CORROBORATION_THRESHOLD {
                map.add(note.pitch_class, note_power);
            }
        }

        Some(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_buffer_yields_no_presence() {
        let extractor = PresenceExtractor::new(PitchTable::new());
        let buffer = Buffer::new(vec![0.0; 16384], 0.0, 44_100, 0);
        assert!(extractor.extract(&buffer).is_none());
    }

    #[test]
    fn merge_sums_component_wise() {
        let mut a = PresenceMap::new();
        a.add(PitchClass::C, 5.0);
        let mut b = PresenceMap::new();
        b.add(PitchClass::C, 2.0);
        b.add(PitchClass::G, 1.0);
        a.merge(&b);
        assert_eq!(a.get(PitchClass::C), 7.0);
        assert_eq!(a.get(PitchClass::G), 1.0);
    }

    #[test]
    fn a_peak_with_strong_overtones_is_recorded() {
        // Build a synthetic spectrum with power concentrated at A4 and the
        // first dozen or so overtones above it, strong enough to clear
        // both the noise gate and the overtone corroboration threshold.
        let table = PitchTable::new();
        let sample_rate = 44_100u32;
        let spectrum_len = 16384usize;
        let mut spectrum = vec![1.0; spectrum_len];
        let bin_size = sample_rate as f64 / spectrum_len as f64;

        let a4 = table.notes().iter().find(|n| n.pitch_class == PitchClass::A && n.octave == 4).unwrap();
        for overtone in std::iter::once(*a4).chain(a4.overtones().into_iter()) {
            let bin = ((overtone.frequency - 1.0) / bin_size).round() as usize;
            if bin < spectrum_len {
                spectrum[bin] = 500.0;
            }
        }

        let buffer = Buffer::new(spectrum, 0.0, sample_rate, 0);
        let extractor = PresenceExtractor::new(table);
        let map = extractor.extract(&buffer).expect("buffer clears the noise gate");
        assert!(map.get(PitchClass::A) > 0.0, "expected A to register presence");
    }
}
