//! Audio file decoding via Symphonia.

use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no audio track found in file")]
    NoAudioTrack,
    #[error("decode error: {0}")]
    Decode(String),
}

/// A fully decoded, mono track ready for segment analysis.
pub struct DecodedAudio {
    /// Mono samples: for multi-channel source audio, only the first two
    /// channels of each frame are summed (not averaged), regardless of
    /// how many channels the file actually carries, matching the source
    /// analysis algorithm's own mono downmix.
    pub samples: Vec<f64>,
    pub sample_rate: u32,
}

/// Decodes a track into mono samples at its file's native sample rate.
///
/// The pipeline never resamples: every downstream formula (segment
/// increment, sequencing increment, bin-to-frequency mapping) is
/// expressed in terms of the source sample rate, so there's nothing for
/// a canonical target rate to buy here.
pub trait AudioSource {
    fn load(&self, path: &Path) -> Result<DecodedAudio, LoadError>;
}

#[derive(Debug, Default)]
pub struct SymphoniaAudioSource;

impl SymphoniaAudioSource {
    pub fn new() -> Self {
        Self
    }
}

impl AudioSource for SymphoniaAudioSource {
    fn load(&self, path: &Path) -> Result<DecodedAudio, LoadError> {
        let file = std::fs::File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
            .map_err(|e| LoadError::Decode(e.to_string()))?;

        let mut format = probed.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or(LoadError::NoAudioTrack)?;

        let track_id = track.id;
        let codec_params = track.codec_params.clone();
        let sample_rate = codec_params.sample_rate.unwrap_or(44_100);
        let channels = codec_params.channels.map(|c| c.count()).unwrap_or(1).max(1);

        let mut decoder = symphonia::default::get_codecs()
            .make(&codec_params, &DecoderOptions::default())
            .map_err(|e| LoadError::Decode(e.to_string()))?;

        let mut samples = Vec::new();

        loop {
            let packet = match format.next_packet() {
                Ok(p) => p,
                Err(symphonia::core::errors::Error::IoError(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
                Err(_) => break,
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(d) => d,
                Err(_) => continue,
            };

            let spec = *decoded.spec();
            let duration = decoded.capacity() as u64;
            let mut sample_buf = SampleBuffer::<f32>::new(duration, spec);
            sample_buf.copy_interleaved_ref(decoded);

            for frame in sample_buf.samples().chunks(channels) {
                samples.push(downmix_frame(frame));
            }
        }

        Ok(DecodedAudio { samples, sample_rate })
    }
}

/// Downmix one interleaved frame to mono: the first two channels summed,
/// regardless of how many channels the frame actually carries. A
/// single-channel frame passes its one sample through unchanged.
fn downmix_frame(frame: &[f32]) -> f64 {
    if frame.len() > 1 {
        frame[0] as f64 + frame[1] as f64
    } else {
        frame[0] as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_surfaces_io_error() {
        let source = SymphoniaAudioSource::new();
        let result = source.load(Path::new("/nonexistent/track.wav"));
        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[test]
    fn mono_frame_passes_through() {
        assert_eq!(downmix_frame(&[0.5]), 0.5);
    }

    #[test]
    fn stereo_frame_sums_both_channels() {
        assert_eq!(downmix_frame(&[0.5, 0.25]), 0.75);
    }

    #[test]
    fn surround_frame_sums_only_first_two_channels() {
        assert_eq!(downmix_frame(&[0.5, 0.25, 10.0, 10.0, 10.0]), 0.75);
    }
}
