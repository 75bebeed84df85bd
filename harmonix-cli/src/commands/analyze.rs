//! `harmonix analyze` — decode a directory of tracks, assign each a key,
//! and print them in harmonically-ordered playlist order.

use super::{collect_files, track_name};
use harmonix_analysis::{analyze_track, CoefficientVector};
use harmonix_corpus::{AudioSource, SymphoniaAudioSource};
use harmonix_playlist::build_playlist;
use rand::thread_rng;
use std::path::Path;

pub fn run(dir: &Path, genre: &str) -> anyhow::Result<()> {
    let files = collect_files(dir);
    if files.is_empty() {
        anyhow::bail!("no supported audio files found in {}", dir.display());
    }

    let source = SymphoniaAudioSource::new();
    let coefficients = CoefficientVector::orchestral();
    let collapse_to_general = genre.eq_ignore_ascii_case("Pop");

    // A decode failure is a per-track analysis failure, not a fatal
    // error for the batch: log it and move on to the next file.
    let mut tracks = Vec::with_capacity(files.len());
    for path in &files {
        let decoded = match source.load(path) {
            Ok(decoded) => decoded,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping track: decode failed");
                continue;
            }
        };
        tracing::debug!(path = %path.display(), samples = decoded.samples.len(), "decoded track");

        let track = analyze_track(track_name(path), &decoded.samples, decoded.sample_rate, &coefficients, collapse_to_general);
        tracks.push(track);
    }

    if tracks.is_empty() {
        anyhow::bail!("no tracks in {} could be decoded", dir.display());
    }

    let mut rng = thread_rng();
    let playlist = build_playlist(tracks, &mut rng);

    for track in &playlist {
        let label = track.easy_key.as_deref().unwrap_or("?");
        println!("{label} ~ {}", track.name);
    }

    Ok(())
}
