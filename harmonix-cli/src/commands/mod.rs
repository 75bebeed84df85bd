pub mod analyze;
pub mod tune;

use std::path::{Path, PathBuf};

/// Extensions Symphonia is built against in this workspace.
const SUPPORTED_EXTENSIONS: [&str; 5] = ["mp3", "flac", "ogg", "wav", "aac"];

/// Collect supported audio files directly inside `dir`, sorted by
/// filename for a stable, repeatable scan order.
pub fn collect_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return files,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_file() {
            if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                if SUPPORTED_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
                    files.push(path);
                }
            }
        }
    }

    files.sort();
    files
}

/// A track's filename stem, used as its name throughout analysis and as
/// the key under which ground-truth entries are looked up.
pub fn track_name(path: &Path) -> String {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or("unknown").to_string()
}
