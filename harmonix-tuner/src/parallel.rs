//! Static contiguous-chunk parallel track analysis.
//!
//! Unlike a work-stealing pool, the track list is partitioned up front
//! into `cores` contiguous chunks of `ceil(n / cores)` tracks each; every
//! worker thread processes its chunk sequentially from start to finish,
//! and results are gathered back in the original track order. This
//! mirrors a `multiprocessing.Pool.map` call with an explicit chunk size
//! rather than a dynamic task queue.

use crate::TuningTrack;
use harmonix_analysis::{analyze_track, CoefficientVector, Track};

pub fn analyze_parallel(
    tracks: &[TuningTrack],
    coefficients: &CoefficientVector,
    collapse_to_general: bool,
    cores: usize,
) -> Vec<Track> {
    if tracks.is_empty() {
        return Vec::new();
    }

    let cores = cores.max(1);
    let chunk_size = (tracks.len() as f64 / cores as f64).ceil() as usize;
    let chunk_size = chunk_size.max(1);

    std::thread::scope(|scope| {
        let handles: Vec<_> = tracks
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|track| analyze_track(track.name.clone(), &track.mono, track.sample_rate, coefficients, collapse_to_general))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles.into_iter().flat_map(|handle| handle.join().expect("analysis worker panicked")).collect()
    })
}
