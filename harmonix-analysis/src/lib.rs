//! Spectral presence extraction and tonality scoring for Harmonix.
//!
//! Three stages run in order over a decoded, mono track: the segment
//! analyzer windows and FFTs the signal around an anchor sample, the
//! presence extractor turns those spectra into per-note energy, and the
//! tonality scorer weighs that presence map into a musical key.

mod coefficients;
mod key;
mod pipeline;
mod presence;
mod scorer;
mod segment;
mod timestamp;
mod track;

pub use coefficients::{
    CoefficientError, CoefficientVector, DIATONIC_RANGE, DOM_RANGE, DOM_SUB_RANGE, LEADING_TONE_RANGE, MAJOR_RANGE,
    MINOR_RANGE, PHRYGIAN_RANGE, SELF_RANGE, TRIADIC_RANGE, TRITONE_RANGE,
};
pub use key::{Key, Mode};
pub use pipeline::analyze_track;
pub use presence::{PresenceExtractor, PresenceMap};
pub use scorer::{assign_keys, KeyAssignment, TonalityScorer};
pub use segment::{Segment, SegmentAnalyzer};
pub use timestamp::format_timestamp_range;
pub use track::Track;
