//! Ground-truth key labels the tuner scores coefficient vectors against.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// The known key(s) of a training track, as hand-labeled ground truth.
///
/// A "relative" key (e.g. A minor for a track labeled C major) is
/// accepted as an alternate match, since major/minor relative pairs
/// share every note and the tonic the scorer settles on can legitimately
/// land on either.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundTruthEntry {
    pub starting_key: String,
    pub closing_key: String,
    #[serde(default)]
    pub starting_relative_key: Option<String>,
    #[serde(default)]
    pub closing_relative_key: Option<String>,
}

impl GroundTruthEntry {
    pub fn matches_start(&self, tonic: &str) -> bool {
        self.starting_key == tonic || self.starting_relative_key.as_deref() == Some(tonic)
    }

    pub fn matches_end(&self, tonic: &str) -> bool {
        self.closing_key == tonic || self.closing_relative_key.as_deref() == Some(tonic)
    }
}

/// A corpus of training tracks keyed by track name, loaded from a single
/// JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroundTruthCorpus {
    tracks: HashMap<String, GroundTruthEntry>,
}

impl GroundTruthCorpus {
    pub fn load_from(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    pub fn get(&self, track_name: &str) -> Option<&GroundTruthEntry> {
        self.tracks.get(track_name)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
