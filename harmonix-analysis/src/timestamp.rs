//! Human-readable timestamp ranges for a buffer's position in a track.

/// Format the `minute:second:hundredth - minute:second:hundredth` range a
/// buffer spans, given the sample it is centered on and the number of
/// samples (post-DC-pop) it was averaged over.
///
/// Useful for diagnostics: pairing a detected fundamental with where in
/// the track it was heard.
pub fn format_timestamp_range(center_sample: u64, half_width_samples: u64, sample_rate: u32) -> String {
    let start = (center_sample.saturating_sub(half_width_samples)) as f64 / sample_rate as f64;
    let end = (center_sample + half_width_samples) as f64 / sample_rate as f64;
    format!("{} - {}", format_timestamp(start), format_timestamp(end))
}

fn format_timestamp(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor() as i64;
    let secs = (seconds % 60.0).floor() as i64;
    let hundredths = ((seconds - seconds.floor()) * 100.0) as i64;
    format!("{minutes}:{secs:02}:{hundredths:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_seconds_hundredths() {
        let range = format_timestamp_range(44_100 * 90, 16_384, 44_100);
        assert!(range.contains(" - "));
        assert!(range.starts_with("1:2"));
    }

    #[test]
    fn clamps_rather_than_underflows_near_track_start() {
        let range = format_timestamp_range(100, 16_384, 44_100);
        assert!(range.starts_with("0:00:00"));
    }
}
