//! A tonal note with an explicit frequency.
//!
//! Frequency is not derivable from pitch class and octave alone: an
//! overtone-tuned note deviates from equal temperament by a few cents,
//! so [`Note`] always carries its own frequency, constructed either
//! equal-tempered or explicitly detuned (see [`Note::equal_tempered`]
//! and [`Note::detuned`]).

use crate::buffer::Buffer;
use crate::overtone::OVERTONE_TABLE;
use crate::pitch_class::PitchClass;

const STUTTGART_PITCH: f64 = 440.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub pitch_class: PitchClass,
    pub octave: i32,
    pub frequency: f64,
    /// Equal-tempered semitone distance from A4, independent of any
    /// detuning applied to `frequency`. This is what `adjacent` walks.
    semitones_above_a4: i32,
}

impl Note {
    fn semitones_above_a4(pitch_class: PitchClass, octave: i32) -> i32 {
        12 * (octave - 4) + (pitch_class.index() - PitchClass::A.index())
    }

    /// Construct a note at the standard equal-tempered frequency for its
    /// pitch class and octave: `440 * 2^((12*(octave-4)+semitonesFromA)/12)`.
    pub fn equal_tempered(pitch_class: PitchClass, octave: i32) -> Self {
        let semitones_above_a4 = Self::semitones_above_a4(pitch_class, octave);
        let frequency = STUTTGART_PITCH * 2f64.powf(semitones_above_a4 as f64 / 12.0);
        Self {
            pitch_class,
            octave,
            frequency,
            semitones_above_a4,
        }
    }

    /// Construct a note with an explicitly supplied frequency (used for
    /// overtones, which deviate from equal temperament by a few cents).
    pub fn detuned(pitch_class: PitchClass, octave: i32, frequency: f64) -> Self {
        Self {
            pitch_class,
            octave,
            frequency,
            semitones_above_a4: Self::semitones_above_a4(pitch_class, octave),
        }
    }

    /// The equal-tempered note `delta_semitones` away. Always computed
    /// from this note's equal-tempered identity, even if `self` itself
    /// is detuned.
    pub fn adjacent(&self, delta_semitones: i32) -> Note {
        let raw_index = self.pitch_class.index() + delta_semitones;
        let pitch_class = PitchClass::from_index(raw_index);
        let octave = self.octave + raw_index.div_euclid(12);
        let semitones_above_a4 = self.semitones_above_a4 + delta_semitones;
        let frequency = STUTTGART_PITCH * 2f64.powf(semitones_above_a4 as f64 / 12.0);
        Note {
            pitch_class,
            octave,
            frequency,
            semitones_above_a4,
        }
    }

    /// The first 15 overtones above this note, cent-corrected per
    /// [`OVERTONE_TABLE`].
    pub fn overtones(&self) -> [Note; 15] {
        let mut result = [*self; 15];
        for (slot, &(semitones, cents)) in result.iter_mut().zip(OVERTONE_TABLE.iter()) {
            let mut target = self.adjacent(semitones);
            if cents != 0 {
                let direction = if cents < 0 { -1 } else { 1 };
                let adjacent = target.adjacent(direction);
                let tuned_frequency =
                    target.frequency + (target.frequency - adjacent.frequency).abs() * (cents as f64 / 100.0);
                target = Note::detuned(target.pitch_class, target.octave, tuned_frequency);
            }
            *slot = target;
        }
        result
    }

    /// Aggregate spectral power of the buffer's bins that fall within
    /// this note's frequency window (the midpoints to its equal-tempered
    /// neighbors). The `-1` before converting to a bin index compensates
    /// for the DC bin the buffer already popped off.
    pub fn power_in(&self, buffer: &Buffer) -> f64 {
        let below = self.adjacent(-1);
        let above = self.adjacent(1);

        let lower_threshold = (self.frequency - (self.frequency - below.frequency).abs() * 0.5).ceil();
        let upper_threshold = (self.frequency + (above.frequency - self.frequency).abs() * 0.5).floor();

        let bin_size = buffer.bin_size();
        let lower_index = (((lower_threshold - 1.0) / bin_size).round() as i64).max(0) as usize;
        let upper_index = (((upper_threshold - 1.0) / bin_size).round() as i64).max(0) as usize;

        let len = buffer.spectrum.len();
        let lower_index = lower_index.min(len);
        let upper_index = upper_index.min(len);

        if lower_index >= upper_index {
            return 0.0;
        }
        buffer.spectrum[lower_index..upper_index].iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_is_440hz() {
        let a4 = Note::equal_tempered(PitchClass::A, 4);
        assert!((a4.frequency - 440.0).abs() < 1e-9);
    }

    #[test]
    fn octave_up_doubles_frequency() {
        for pc in PitchClass::all() {
            let n = Note::equal_tempered(pc, 4);
            let up = n.adjacent(12);
            assert!(
                (up.frequency - 2.0 * n.frequency).abs() / n.frequency < 1e-9,
                "octave-up should double frequency for {pc:?}"
            );
        }
    }

    #[test]
    fn adjacent_wraps_pitch_class_and_carries_octave() {
        let b4 = Note::equal_tempered(PitchClass::B, 4);
        let c5 = b4.adjacent(1);
        assert_eq!(c5.pitch_class, PitchClass::C);
        assert_eq!(c5.octave, 5);
    }

    #[test]
    fn adjacent_from_detuned_note_stays_equal_tempered() {
        // A detuned note's adjacent() should ignore its own detuning and
        // walk from its equal-tempered identity, per the source algorithm.
        let detuned = Note::detuned(PitchClass::E, 4, 330.5);
        let equal_tempered_e4 = Note::equal_tempered(PitchClass::E, 4);
        assert_eq!(detuned.adjacent(1).frequency, equal_tempered_e4.adjacent(1).frequency);
    }

    #[test]
    fn overtones_second_element_is_octave_plus_fifth() {
        // A3's overtone table: second entry is +19 semitones, +2 cents.
        let a3 = Note::equal_tempered(PitchClass::A, 3);
        let overtones = a3.overtones();
        let second = overtones[1];
        assert_eq!(second.pitch_class, PitchClass::E);
        // Equal-tempered E5 is ~659.26Hz; the source's linear cents
        // correction nudges it to ~660.04Hz (close to the true 3rd
        // harmonic of 220Hz, 660Hz exactly).
        assert!((second.frequency - 660.04).abs() < 0.1, "got {}", second.frequency);
    }

    #[test]
    fn overtone_with_zero_cents_matches_equal_temperament() {
        let c4 = Note::equal_tempered(PitchClass::C, 4);
        let overtones = c4.overtones();
        // First entry: +12 semitones, 0 cents -> exactly equal-tempered octave.
        let octave = overtones[0];
        assert!((octave.frequency - c4.adjacent(12).frequency).abs() < 1e-9);
    }

    #[test]
    fn power_in_sums_bins_in_window() {
        let spectrum = vec![1.0; 16384];
        let buffer = Buffer::new(spectrum, 0.0, 48000, 0);
        let a4 = Note::equal_tempered(PitchClass::A, 4);
        let power = a4.power_in(&buffer);
        assert!(power > 0.0);
    }
}
