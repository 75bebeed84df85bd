//! Weights the tonality scorer applies to each harmonic relationship.

/// The ten weighted relationships a [`crate::TonalityScorer`] sums.
///
/// Field names mirror the relationships they weight, not a generic
/// "weight 1..10" scheme, so a reader can match a coefficient straight
/// back to the scoring method it scales.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoefficientVector {
    pub self_coefficient: f64,
    pub dom_coefficient: f64,
    pub dom_sub_coefficient: f64,
    pub minor_coefficient: f64,
    pub major_coefficient: f64,
    pub triadic_coefficient: f64,
    pub leading_tone_coefficient: f64,
    pub tritone_coefficient: f64,
    pub phrygian_coefficient: f64,
    pub diatonic_coefficient: f64,
}

/// Valid sampling range for each coefficient, used by the tuner when it
/// draws a random configuration to evaluate.
pub const SELF_RANGE: (f64, f64) = (1.0, 2.0);
pub const DOM_RANGE: (f64, f64) = (0.0, 0.7);
pub const DOM_SUB_RANGE: (f64, f64) = (0.5, 1.5);
pub const MINOR_RANGE: (f64, f64) = (0.0, 0.25);
pub const MAJOR_RANGE: (f64, f64) = (0.0, 0.25);
pub const TRIADIC_RANGE: (f64, f64) = (1.0, 2.0);
pub const LEADING_TONE_RANGE: (f64, f64) = (0.5, 1.0);
pub const TRITONE_RANGE: (f64, f64) = (-5.0, 0.0);
pub const PHRYGIAN_RANGE: (f64, f64) = (-5.0, 0.0);
pub const DIATONIC_RANGE: (f64, f64) = (1.0, 2.0);

/// A coefficient vector failed validation: either a field fell outside
/// its documented range, or it wasn't finite (`NaN`/`±inf`).
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
#[error("coefficient {field} = {value} is invalid (expected a finite value in {lo}..={hi})")]
pub struct CoefficientError {
    pub field: &'static str,
    pub value: f64,
    pub lo: f64,
    pub hi: f64,
}

impl CoefficientVector {
    /// The hand-tuned preset that scores well on orchestral material.
    pub fn orchestral() -> Self {
        Self {
            self_coefficient: 1.98,
            dom_coefficient: 0.05,
            dom_sub_coefficient: 1.45,
            minor_coefficient: 0.02,
            major_coefficient: 0.19,
            triadic_coefficient: 1.44,
            leading_tone_coefficient: 0.74,
            tritone_coefficient: -4.35,
            phrygian_coefficient: -3.34,
            diatonic_coefficient: 1.23,
        }
    }

    /// Check every field against its documented range, rejecting
    /// non-finite values outright. Sampled vectors (see
    /// `harmonix_tuner::sample_coefficient_vector`) always pass; this
    /// guards vectors arriving from outside the process, e.g. a
    /// persisted tuning document or a user-supplied preset.
    pub fn validate(&self) -> Result<(), CoefficientError> {
        let checks: [(&'static str, f64, (f64, f64)); 10] = [
            ("self", self.self_coefficient, SELF_RANGE),
            ("dom", self.dom_coefficient, DOM_RANGE),
            ("domSub", self.dom_sub_coefficient, DOM_SUB_RANGE),
            ("minor", self.minor_coefficient, MINOR_RANGE),
            ("major", self.major_coefficient, MAJOR_RANGE),
            ("triadic", self.triadic_coefficient, TRIADIC_RANGE),
            ("leadingTone", self.leading_tone_coefficient, LEADING_TONE_RANGE),
            ("tritone", self.tritone_coefficient, TRITONE_RANGE),
            ("phrygian", self.phrygian_coefficient, PHRYGIAN_RANGE),
            ("diatonic", self.diatonic_coefficient, DIATONIC_RANGE),
        ];
        for (field, value, (lo, hi)) in checks {
            if !value.is_finite() || value < lo || value > hi {
                return Err(CoefficientError { field, value, lo, hi });
            }
        }
        Ok(())
    }
}
