//! Random coefficient-vector sampling for the tuning loop.

use harmonix_analysis::{
    CoefficientVector, DIATONIC_RANGE, DOM_RANGE, DOM_SUB_RANGE, LEADING_TONE_RANGE, MAJOR_RANGE, MINOR_RANGE,
    PHRYGIAN_RANGE, SELF_RANGE, TRIADIC_RANGE, TRITONE_RANGE,
};
use rand::Rng;

fn sample_range(rng: &mut impl Rng, range: (f64, f64)) -> f64 {
    rng.gen_range(range.0..=range.1)
}

/// Draw a coefficient vector uniformly from each coefficient's valid
/// range, independent of the others.
pub fn sample_coefficient_vector(rng: &mut impl Rng) -> CoefficientVector {
    CoefficientVector {
        self_coefficient: sample_range(rng, SELF_RANGE),
        dom_coefficient: sample_range(rng, DOM_RANGE),
        dom_sub_coefficient: sample_range(rng, DOM_SUB_RANGE),
        minor_coefficient: sample_range(rng, MINOR_RANGE),
        major_coefficient: sample_range(rng, MAJOR_RANGE),
        triadic_coefficient: sample_range(rng, TRIADIC_RANGE),
        leading_tone_coefficient: sample_range(rng, LEADING_TONE_RANGE),
        tritone_coefficient: sample_range(rng, TRITONE_RANGE),
        phrygian_coefficient: sample_range(rng, PHRYGIAN_RANGE),
        diatonic_coefficient: sample_range(rng, DIATONIC_RANGE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn sampled_coefficients_stay_within_their_ranges() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let v = sample_coefficient_vector(&mut rng);
            assert!((SELF_RANGE.0..=SELF_RANGE.1).contains(&v.self_coefficient));
            assert!((TRITONE_RANGE.0..=TRITONE_RANGE.1).contains(&v.tritone_coefficient));
            assert!((DIATONIC_RANGE.0..=DIATONIC_RANGE.1).contains(&v.diatonic_coefficient));
        }
    }
}
