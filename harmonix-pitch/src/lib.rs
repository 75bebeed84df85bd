//! Pitch table and overtone math for Harmonix
//!
//! Builds, once at startup, the equal-tempered reference frequency for
//! every named pitch C0..C9, and provides the overtone/cent-deviation
//! math that the presence extractor uses to corroborate fundamentals.

mod buffer;
mod note;
mod overtone;
mod pitch_class;
mod table;

pub use buffer::Buffer;
pub use note::Note;
pub use overtone::OVERTONE_TABLE;
pub use pitch_class::PitchClass;
pub use table::PitchTable;
