//! Harmonic-mixing playlist ordering for Harmonix.
//!
//! Given a set of already-keyed tracks, [`build_playlist`] orders them so
//! each transition favors harmonically close, diatonically related, or
//! recently-heard keys, with a little randomness to keep repeat runs
//! from converging on the same order.

mod builder;
mod scores;

pub use builder::build_playlist;
pub use scores::KeyScores;
