//! Greedy, multi-criteria playlist construction.

use crate::scores::KeyScores;
use harmonix_analysis::{Key, Mode, Track};
use harmonix_pitch::PitchClass;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

const HARMONIC_COEFFICIENT: f64 = 3.0;
const DIATONIC_COEFFICIENT: f64 = 0.5;
const NEIGHBOR_COEFFICIENT: f64 = 2.0;
const HISTORICAL_COEFFICIENT: f64 = 1.0;
const RANDOM_COEFFICIENT: f64 = 2.0;

const MINOR_SCALE: [i32; 7] = [0, 2, 3, 5, 7, 8, 10];
const MAJOR_SCALE: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Order `tracks` into a playlist, starting from a random track and
/// greedily choosing each next track by combined key-proximity score.
///
/// Every track must already have [`Track::assign_keys`] called on it;
/// this function only reads `start_key`/`end_key`, it never re-derives
/// them.
pub fn build_playlist(mut tracks: Vec<Track>, rng: &mut impl Rng) -> Vec<Track> {
    let playlist_size = tracks.len();
    if playlist_size == 0 {
        return Vec::new();
    }

    let buffer_capacity = if playlist_size < 50 { playlist_size / 5 } else { 10 };
    let mut key_buffer: BoundedKeyBuffer = BoundedKeyBuffer::new(buffer_capacity);
    let mut keylist: Vec<Key> = Vec::with_capacity(playlist_size * 2);
    let mut playlist: Vec<Track> = Vec::with_capacity(playlist_size);

    let start_index = rng.gen_range(0..tracks.len());
    let starting_track = tracks.remove(start_index);
    let start_key = starting_track.start_key.expect("track must be keyed before playlisting");
    let end_key = starting_track.end_key.expect("track must be keyed before playlisting");

    keylist.push(start_key);
    key_buffer.push(start_key);
    if start_key.tonic != end_key.tonic {
        keylist.push(end_key);
        key_buffer.push(end_key);
    }
    playlist.push(starting_track);

    for _ in 1..playlist_size {
        let previous_key = playlist.last().unwrap().end_key.expect("track must be keyed before playlisting");

        let mut key_scores = KeyScores::new();
        score_harmonic_proximity(previous_key, &mut key_scores);
        score_diatonic_proximity(previous_key, &mut key_scores);
        score_neighbor_proximity(&keylist, &mut key_scores);
        score_historic_proximity(key_buffer.iter(), &mut key_scores);

        for pitch_class in PitchClass::all() {
            key_scores.add(pitch_class, rng.gen_range(-RANDOM_COEFFICIENT..=RANDOM_COEFFICIENT));
        }

        let ranked = key_scores.ranked();
        tracks.shuffle(rng);

        let next_index = ranked
            .iter()
            .find_map(|&candidate| tracks.iter().position(|t| t.start_key.map(|k| k.tonic) == Some(candidate)))
            .unwrap_or(0);

        let next_track = tracks.remove(next_index);
        let next_start = next_track.start_key.expect("track must be keyed before playlisting");
        let next_end = next_track.end_key.expect("track must be keyed before playlisting");

        keylist.push(next_start);
        key_buffer.push(next_start);
        if next_start.tonic != next_end.tonic {
            keylist.push(next_end);
            key_buffer.push(next_end);
        }
        playlist.push(next_track);
    }

    playlist
}

/// Favor keys in close harmonic proximity (the circle of fifths) to the
/// previous track's key: the tonic itself, then its fifths out to five
/// steps in either direction with decaying weight.
fn score_harmonic_proximity(key: Key, key_scores: &mut KeyScores) {
    key_scores.add(key.tonic, 1.0);
    for i in 1..=5i32 {
        let weight = (1.0 / i as f64 * 100.0).round() / 100.0 * HARMONIC_COEFFICIENT;
        key_scores.add(key.tonic.offset(7 * i), weight);
        key_scores.add(key.tonic.offset(-7 * i), weight);
    }
}

/// Favor keys whose tonic falls within the previous key's diatonic scale.
fn score_diatonic_proximity(key: Key, key_scores: &mut KeyScores) {
    let scale = if key.mode == Mode::Minor { &MINOR_SCALE[..] } else { &MAJOR_SCALE[..] };
    for &degree in scale {
        key_scores.add(key.tonic.offset(degree), DIATONIC_COEFFICIENT);
    }
}

/// If the last two keys heard form an isolated stepwise (2nd) movement,
/// favor returning to the one before that — encourages neighbor-tone
/// resolutions like C - D - C instead of open-ended stepwise drift.
fn score_neighbor_proximity(keylist: &[Key], key_scores: &mut KeyScores) {
    let len = keylist.len();
    if len < 2 {
        return;
    }
    let current = keylist[len - 1];
    let previous = keylist[len - 2];

    if !are_neighbors(current, previous) {
        return;
    }
    if len > 2 {
        let tertiary = keylist[len - 3];
        if are_neighbors(previous, tertiary) {
            return;
        }
    }
    key_scores.add(previous.tonic, NEIGHBOR_COEFFICIENT);
}

fn are_neighbors(a: Key, b: Key) -> bool {
    let distance = (a.tonic.index() - b.tonic.index()).abs();
    distance <= 2 || distance >= 10
}

/// Favor keys that were heard recently in the playlist, so the same
/// handful of keys don't disappear for long stretches.
fn score_historic_proximity<'a>(key_buffer: impl ExactSizeIterator<Item = &'a Key>, key_scores: &mut KeyScores) {
    let len = key_buffer.len();
    if len == 0 {
        return;
    }
    for key in key_buffer {
        key_scores.add(key.tonic, (1.0 / len as f64) * HISTORICAL_COEFFICIENT);
    }
}

/// A fixed-capacity FIFO of recently-assigned keys. A zero-capacity
/// buffer (tiny playlists) simply discards everything pushed to it.
struct BoundedKeyBuffer {
    capacity: usize,
    keys: VecDeque<Key>,
}

impl BoundedKeyBuffer {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            keys: VecDeque::with_capacity(capacity),
        }
    }

    fn push(&mut self, key: Key) {
        if self.capacity == 0 {
            return;
        }
        if self.keys.len() == self.capacity {
            self.keys.pop_front();
        }
        self.keys.push_back(key);
    }

    fn iter(&self) -> impl ExactSizeIterator<Item = &Key> {
        self.keys.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harmonix_analysis::Track;
    use rand::SeedableRng;

    fn keyed_track(name: &str, tonic: PitchClass) -> Track {
        use harmonix_pitch::{Buffer, PitchTable};

        let mut track = Track::new(name, 1000);
        let table = PitchTable::new();
        let extractor = harmonix_analysis::PresenceExtractor::new(table.clone());

        let sample_rate = 44_100u32;
        let spectrum_len = 16384usize;
        let mut spectrum = vec![1.0; spectrum_len];
        let bin_size = sample_rate as f64 / spectrum_len as f64;
        let triad = [tonic, tonic.offset(4), tonic.offset(7)];
        for note in table.notes().iter().filter(|n| triad.contains(&n.pitch_class) && n.octave == 4) {
            for overtone in std::iter::once(*note).chain(note.overtones().into_iter()) {
                let bin = ((overtone.frequency - 1.0) / bin_size).round() as usize;
                if bin < spectrum_len {
                    spectrum[bin] = 500.0;
                }
            }
        }
        let buffer = Buffer::new(spectrum, 0.0, sample_rate, 10);
        if let Some(map) = extractor.extract(&buffer) {
            track.accumulate(10, &map);
            track.accumulate(990, &map);
        }
        track.assign_keys(&harmonix_analysis::CoefficientVector::orchestral(), false);
        track
    }

    #[test]
    fn build_playlist_preserves_track_count() {
        let tracks = vec![
            keyed_track("a", PitchClass::C),
            keyed_track("b", PitchClass::G),
            keyed_track("c", PitchClass::D),
        ];
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let playlist = build_playlist(tracks, &mut rng);
        assert_eq!(playlist.len(), 3);
    }

    #[test]
    fn empty_input_yields_empty_playlist() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        assert!(build_playlist(Vec::new(), &mut rng).is_empty());
    }

    #[test]
    fn neighbor_proximity_favors_returning_to_previous_key() {
        let mut scores = KeyScores::new();
        let keylist = vec![
            Key::new(PitchClass::C, Mode::Major),
            Key::new(PitchClass::D, Mode::Major),
        ];
        score_neighbor_proximity(&keylist, &mut scores);
        assert!(scores.get(PitchClass::C) > 0.0);
    }

    #[test]
    fn neighbor_proximity_suppresses_repeating_loops() {
        let mut scores = KeyScores::new();
        let keylist = vec![
            Key::new(PitchClass::C, Mode::Major),
            Key::new(PitchClass::D, Mode::Major),
            Key::new(PitchClass::C, Mode::Major),
        ];
        score_neighbor_proximity(&keylist, &mut scores);
        assert_eq!(scores.get(PitchClass::D), 0.0);
    }
}
