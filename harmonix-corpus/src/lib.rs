//! External collaborators for Harmonix: audio decoding, the ground-truth
//! corpus the tuner scores coefficient vectors against, tuning-run
//! persistence, and on-disk configuration.

mod audio;
mod config;
mod corpus;
mod tuning_sink;

pub use audio::{AudioSource, DecodedAudio, LoadError, SymphoniaAudioSource};
pub use config::Config;
pub use corpus::{GroundTruthCorpus, GroundTruthEntry};
pub use tuning_sink::{JsonlTuningSink, SqliteTuningSink, TuningDocument, TuningSink};
