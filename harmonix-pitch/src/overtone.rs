//! Fixed overtone-series table: semitone offset above a fundamental to
//! the cent deviation from equal temperament for the first 15 overtones.
//!
//! Most overtones don't align exactly with equal temperament, so each
//! entry carries the cents correction needed to recover its exact
//! frequency (see [`crate::note::Note::overtones`]).

/// `(semitones above fundamental, cent deviation)`, process-wide constant.
pub const OVERTONE_TABLE: [(i32, i32); 15] = [
    (12, 0),
    (19, 2),
    (24, 0),
    (28, -14),
    (31, 2),
    (34, -31),
    (36, 0),
    (38, 2),
    (40, -14),
    (42, -49),
    (43, 2),
    (44, 41),
    (46, -31),
    (47, -12),
    (48, 0),
];
