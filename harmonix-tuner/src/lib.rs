//! Coefficient-vector tuning loop for Harmonix.
//!
//! Repeatedly samples a random [`CoefficientVector`], re-analyzes a
//! corpus of tracks with it, scores the result against hand-labeled
//! ground truth, and records the outcome — so a human can later pick the
//! best-scoring configuration for a given genre.

mod parallel;
mod sampler;
mod scoring;

pub use parallel::analyze_parallel;
pub use sampler::sample_coefficient_vector;
pub use scoring::score_against_ground_truth;

use harmonix_analysis::CoefficientVector;
use harmonix_corpus::{GroundTruthCorpus, TuningDocument, TuningSink, TuningSinkError};
use rand::Rng;
use std::collections::HashMap;

/// One track's decoded audio, ready to be re-analyzed under any
/// coefficient vector.
pub struct TuningTrack {
    pub name: String,
    pub mono: Vec<f64>,
    pub sample_rate: u32,
}

/// Run `iterations` rounds of: sample a configuration, analyze every
/// track under it using `cores` worker threads, score against `corpus`,
/// and hand the result to `sink`.
///
/// A failure to persist one iteration's result only loses that
/// iteration: it's logged at `warn` and the loop moves on, rather than
/// aborting the whole run.
pub fn run(
    tracks: &[TuningTrack],
    corpus: &GroundTruthCorpus,
    genre: &str,
    iterations: usize,
    cores: usize,
    sink: &dyn TuningSink,
    rng: &mut impl Rng,
) {
    for i in 0..iterations {
        let coefficients = sample_coefficient_vector(rng);
        let analyzed = analyze_parallel(tracks, &coefficients, genre == "Pop", cores);
        let score = score_against_ground_truth(&analyzed, corpus);

        tracing::debug!(iteration = i, score, "scored tuning configuration");

        let document = TuningDocument {
            score,
            genre: genre.to_string(),
            coefficients: coefficient_vector_to_map(&coefficients),
        };
        if let Err(err) = sink.record(&document) {
            tracing::warn!(iteration = i, error = %err, "failed to persist tuning iteration, continuing");
        }
    }
}

/// Round to two decimal places, matching `Configuration.toDictionary()`'s
/// `round(x, 2)` before a tuning document is persisted.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn coefficient_vector_to_map(coefficients: &CoefficientVector) -> HashMap<String, f64> {
    let mut map = HashMap::with_capacity(10);
    map.insert("selfCoefficient".to_string(), round2(coefficients.self_coefficient));
    map.insert("domCoefficient".to_string(), round2(coefficients.dom_coefficient));
    map.insert("domSubCoefficient".to_string(), round2(coefficients.dom_sub_coefficient));
    map.insert("minorCoefficient".to_string(), round2(coefficients.minor_coefficient));
    map.insert("majorCoefficient".to_string(), round2(coefficients.major_coefficient));
    map.insert("triadicCoefficient".to_string(), round2(coefficients.triadic_coefficient));
    map.insert("leadingToneCoefficient".to_string(), round2(coefficients.leading_tone_coefficient));
    map.insert("tritoneCoefficient".to_string(), round2(coefficients.tritone_coefficient));
    map.insert("phrygianCoefficient".to_string(), round2(coefficients.phrygian_coefficient));
    map.insert("diatonicCoefficient".to_string(), round2(coefficients.diatonic_coefficient));
    map
}
