//! `harmonix tune` — repeatedly sample coefficient vectors, re-analyze a
//! labeled corpus under each, and record how well it recovers the known
//! keys.

use super::{collect_files, track_name};
use anyhow::Context;
use harmonix_corpus::{AudioSource, GroundTruthCorpus, JsonlTuningSink, SqliteTuningSink, SymphoniaAudioSource, TuningSink};
use harmonix_tuner::TuningTrack;
use rand::thread_rng;
use std::path::Path;

pub fn run(corpus_path: &Path, dir: &Path, iterations: usize, genre: &str, out: &Path, cores: usize) -> anyhow::Result<()> {
    let corpus = GroundTruthCorpus::load_from(corpus_path)
        .with_context(|| format!("failed to load ground-truth corpus from {}", corpus_path.display()))?;

    let files = collect_files(dir);
    if files.is_empty() {
        anyhow::bail!("no supported audio files found in {}", dir.display());
    }

    let source = SymphoniaAudioSource::new();
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
        tracks.push(TuningTrack {
            name: track_name(path),
            mono: decoded.samples,
            sample_rate: decoded.sample_rate,
        });
    }

    if tracks.is_empty() {
        anyhow::bail!("no tracks in {} could be decoded", dir.display());
    }

    let is_jsonl = out.extension().and_then(|e| e.to_str()).map(|e| e.eq_ignore_ascii_case("jsonl")).unwrap_or(false);

    let mut rng = thread_rng();
    if is_jsonl {
        let sink = JsonlTuningSink::new(out);
        run_with_sink(&tracks, &corpus, genre, iterations, cores, &sink, &mut rng)?;
    } else {
        let sink = SqliteTuningSink::open(out).with_context(|| format!("failed to open tuning database at {}", out.display()))?;
        run_with_sink(&tracks, &corpus, genre, iterations, cores, &sink, &mut rng)?;
    }

    println!("ran {iterations} tuning iterations over {} tracks, results in {}", tracks.len(), out.display());
    Ok(())
}

fn run_with_sink(
    tracks: &[TuningTrack],
    corpus: &GroundTruthCorpus,
    genre: &str,
    iterations: usize,
    cores: usize,
    sink: &dyn TuningSink,
    rng: &mut impl rand::Rng,
) -> anyhow::Result<()> {
    harmonix_tuner::run(tracks, corpus, genre, iterations, cores, sink, rng);
    Ok(())
}
