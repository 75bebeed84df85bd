//! A track's accumulated presence and the key(s) assigned to it.

use crate::coefficients::CoefficientVector;
use crate::key::Key;
use crate::presence::PresenceMap;
use crate::scorer::assign_keys;

/// A decoded track's running analysis state: presence accumulated over
/// its full length, and separately over its first and second halves (so
/// a mid-track modulation can be detected instead of averaged away).
#[derive(Debug, Clone)]
pub struct Track {
    pub name: String,
    pub halfway_sample: u64,
    presence: PresenceMap,
    start_presence: PresenceMap,
    end_presence: PresenceMap,
    pub start_key: Option<Key>,
    pub end_key: Option<Key>,
    pub easy_key: Option<String>,
}

impl Track {
    pub fn new(name: impl Into<String>, total_samples: u64) -> Self {
        Self {
            name: name.into(),
            halfway_sample: total_samples / 2,
            presence: PresenceMap::new(),
            start_presence: PresenceMap::new(),
            end_presence: PresenceMap::new(),
            start_key: None,
            end_key: None,
            easy_key: None,
        }
    }

    /// Fold a buffer's extracted presence into the track, splitting it
    /// into the start or end half by the sample it was centered on.
    pub fn accumulate(&mut self, buffer_sample: u64, map: &PresenceMap) {
        self.presence.merge(map);
        if buffer_sample < self.halfway_sample {
            self.start_presence.merge(map);
        } else {
            self.end_presence.merge(map);
        }
    }

    /// Assign this track's start/end keys from its accumulated presence.
    /// `collapse_to_general` should be true for genres whose key rarely
    /// modulates mid-track (e.g. Pop).
    pub fn assign_keys(&mut self, coefficients: &CoefficientVector, collapse_to_general: bool) {
        let assignment = assign_keys(
            &self.presence,
            &self.start_presence,
            &self.end_presence,
            coefficients,
            collapse_to_general,
        );
        self.start_key = Some(assignment.start_key);
        self.end_key = Some(assignment.end_key);
        self.easy_key = Some(assignment.easy_key);
    }

    pub fn presence(&self) -> &PresenceMap {
        &self.presence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harmonix_pitch::PitchClass;

    #[test]
    fn accumulate_splits_by_halfway_sample() {
        let mut track = Track::new("test", 1000);
        let mut early = PresenceMap::new();
        early.add(PitchClass::C, 5.0);
        track.accumulate(100, &early);

        let mut late = PresenceMap::new();
        late.add(PitchClass::G, 3.0);
        track.accumulate(900, &late);

        assert_eq!(track.start_presence.get(PitchClass::C), 5.0);
        assert_eq!(track.end_presence.get(PitchClass::G), 3.0);
        assert_eq!(track.presence().get(PitchClass::C), 5.0);
        assert_eq!(track.presence().get(PitchClass::G), 3.0);
    }

    #[test]
    fn assign_keys_populates_easy_key() {
        let mut track = Track::new("test", 1000);
        let mut map = PresenceMap::new();
        map.add(PitchClass::C, 100.0);
        map.add(PitchClass::E, 60.0);
        map.add(PitchClass::G, 70.0);
        track.accumulate(10, &map);
        track.accumulate(990, &map);

        track.assign_keys(&CoefficientVector::orchestral(), false);
        assert!(track.easy_key.is_some());
        assert!(track.start_key.is_some());
    }
}
