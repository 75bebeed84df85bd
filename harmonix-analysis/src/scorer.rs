//! Scores each pitch class as a candidate tonic, given a presence map.

use crate::coefficients::CoefficientVector;
use crate::key::{Key, Mode};
use crate::presence::PresenceMap;
use harmonix_pitch::PitchClass;

/// Weighs a candidate tonic's ten harmonic relationships to a presence
/// map, in the manner of a functional-harmony analysis: how much does
/// this note's dominant, subdominant, relative major/minor, and so on
/// stand out relative to the loudest pitch class present.
pub struct TonalityScorer<'a> {
    presence: &'a PresenceMap,
    coefficients: &'a CoefficientVector,
    tonic: PitchClass,
    principal_power: f64,
}

impl<'a> TonalityScorer<'a> {
    pub fn new(presence: &'a PresenceMap, tonic: PitchClass, coefficients: &'a CoefficientVector) -> Self {
        Self {
            presence,
            coefficients,
            tonic,
            principal_power: presence.principal_power(),
        }
    }

    fn at(&self, semitones: i32) -> f64 {
        self.presence.get(self.tonic.offset(semitones))
    }

    pub fn significance(&self) -> f64 {
        self.at(0) / self.principal_power
    }

    pub fn dominant_relationship(&self) -> f64 {
        self.coefficients.dom_coefficient * (self.at(7) / self.principal_power)
    }

    pub fn dominant_subdominant_relationship(&self) -> f64 {
        self.coefficients.dom_sub_coefficient * (((self.at(5) + self.at(7)) / 2.0) / self.principal_power)
    }

    pub fn minor_relative_relationship(&self) -> f64 {
        self.coefficients.minor_coefficient * ((self.at(-3) - self.at(3)) / self.principal_power)
    }

    pub fn major_relative_relationship(&self) -> f64 {
        self.coefficients.major_coefficient * ((self.at(3) - self.at(-3)) / self.principal_power)
    }

    pub fn triadic_relationship(&self) -> f64 {
        self.coefficients.triadic_coefficient * ((self.at(0) + (self.at(3) + self.at(4)) + self.at(7)) / 3.0)
            / self.principal_power
    }

    /// Minor leading tone gets special treatment: if the major second
    /// below outweighs the minor second below, the relationship folds
    /// both together instead of just weighting the minor second.
    pub fn leading_tone_relationship(&self) -> f64 {
        let minor_second_below = self.at(-1);
        let major_second_below = self.at(-2);
        if major_second_below > minor_second_below {
            let lo = minor_second_below.min(major_second_below);
            let hi = minor_second_below.max(major_second_below);
            (minor_second_below + major_second_below) * (lo / hi) / self.principal_power
        } else {
            self.coefficients.leading_tone_coefficient * (minor_second_below / self.principal_power)
        }
    }

    pub fn tritone_relationship(&self) -> f64 {
        self.coefficients.tritone_coefficient * (self.at(6) / self.principal_power)
    }

    pub fn phrygian_relationship(&self) -> f64 {
        self.coefficients.phrygian_coefficient * (self.at(1) / self.principal_power)
    }

    pub fn diatonic_relationship(&self) -> f64 {
        let minor_relationship = (self.at(0) + self.at(2) + self.at(3) + self.at(5) + self.at(7) + self.at(-4) + self.at(-2)) / 7.0
            / self.principal_power;
        let major_relationship = (self.at(0) + self.at(2) + self.at(4) + self.at(5) + self.at(7) + self.at(-3) + self.at(-1)) / 7.0
            / self.principal_power;
        minor_relationship.max(major_relationship) * self.coefficients.diatonic_coefficient
    }

    fn total_score(&self) -> f64 {
        self.significance()
            + self.dominant_relationship()
            + self.dominant_subdominant_relationship()
            + self.minor_relative_relationship()
            + self.major_relative_relationship()
            + self.triadic_relationship()
            + self.leading_tone_relationship()
            + self.tritone_relationship()
            + self.phrygian_relationship()
            + self.diatonic_relationship()
    }

    /// Score every pitch class as a candidate tonic and return the
    /// highest-scoring one. Ties keep the earlier pitch class in
    /// [`PitchClass::all`] order.
    pub fn calculate_tonic(presence: &PresenceMap, coefficients: &CoefficientVector) -> PitchClass {
        let mut best = PitchClass::C;
        let mut best_score = f64::NEG_INFINITY;
        for candidate in PitchClass::all() {
            let score = TonalityScorer::new(presence, candidate, coefficients).total_score() * 10.0;
            if score > best_score {
                best_score = score;
                best = candidate;
            }
        }
        best
    }

    /// Decide major/minor by comparing the relative-minor's and
    /// relative-major's combined third-and-sixth power.
    pub fn determine_mode(tonic: PitchClass, presence: &PresenceMap) -> Mode {
        let minor_power = presence.get(tonic.offset(3)) + presence.get(tonic.offset(8));
        let major_power = presence.get(tonic.offset(4)) + presence.get(tonic.offset(9));
        if minor_power > major_power {
            Mode::Minor
        } else {
            Mode::Major
        }
    }
}

/// The pair of keys assigned to a track, plus its human-readable label.
pub struct KeyAssignment {
    pub start_key: Key,
    pub end_key: Key,
    pub easy_key: String,
}

/// Assemble a track's key(s) from its general, start-half, and end-half
/// presence maps.
///
/// `collapse_to_general` is true for genres (e.g. Pop) whose key rarely
/// modulates mid-track, where splitting into a start/end pair would just
/// add noise. A track with no extracted presence at all (silence, or
/// audio with no discernible pitch) degrades to C major rather than
/// dividing by a zero principal power.
pub fn assign_keys(
    general_presence: &PresenceMap,
    start_presence: &PresenceMap,
    end_presence: &PresenceMap,
    coefficients: &CoefficientVector,
    collapse_to_general: bool,
) -> KeyAssignment {
    if general_presence.principal_power() == 0.0 {
        let key = Key::new(PitchClass::C, Mode::Major);
        return KeyAssignment {
            start_key: key,
            end_key: key,
            easy_key: PitchClass::C.to_string(),
        };
    }

    let general_tonic = TonalityScorer::calculate_tonic(general_presence, coefficients);
    let general_mode = TonalityScorer::determine_mode(general_tonic, general_presence);

    let start_tonic = TonalityScorer::calculate_tonic(start_presence, coefficients);
    let end_tonic = TonalityScorer::calculate_tonic(end_presence, coefficients);

    if collapse_to_general || start_tonic == end_tonic {
        let key = Key::new(general_tonic, general_mode);
        KeyAssignment {
            start_key: key,
            end_key: key,
            easy_key: general_tonic.to_string(),
        }
    } else {
        let start_key = Key::new(start_tonic, TonalityScorer::determine_mode(start_tonic, start_presence));
        let end_key = Key::new(end_tonic, TonalityScorer::determine_mode(end_tonic, end_presence));
        KeyAssignment {
            start_key,
            end_key,
            easy_key: format!("{} - {}", start_tonic, end_tonic),
        }
    }
}
