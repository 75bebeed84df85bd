//! Durable storage for tuning-run results.

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TuningSinkError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// One scored coefficient configuration: how well it recovered the
/// ground-truth keys, which genre it was evaluated under, and the
/// coefficient values themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuningDocument {
    pub score: f64,
    pub genre: String,
    pub coefficients: HashMap<String, f64>,
}

/// Where a completed tuning run's results get written.
pub trait TuningSink {
    fn record(&self, document: &TuningDocument) -> Result<(), TuningSinkError>;
}

/// Appends tuning documents to a SQLite table, one row per run.
pub struct SqliteTuningSink {
    conn: Connection,
}

impl SqliteTuningSink {
    const SCHEMA: &'static str = r#"
        CREATE TABLE IF NOT EXISTS tunings (
            id INTEGER PRIMARY KEY,
            score REAL NOT NULL,
            genre TEXT NOT NULL,
            coefficients TEXT NOT NULL,
            recorded_at INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_score ON tunings(score);
    "#;

    pub fn open(db_path: &Path) -> Result<Self, TuningSinkError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(db_path)?;
        conn.execute_batch(Self::SCHEMA)?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub fn in_memory() -> Result<Self, TuningSinkError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(Self::SCHEMA)?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub fn count(&self) -> Result<usize, TuningSinkError> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM tunings", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl TuningSink for SqliteTuningSink {
    fn record(&self, document: &TuningDocument) -> Result<(), TuningSinkError> {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let coefficients = serde_json::to_string(&document.coefficients)?;
        self.conn.execute(
            "INSERT INTO tunings (score, genre, coefficients, recorded_at) VALUES (?1, ?2, ?3, ?4)",
            params![document.score, document.genre, coefficients, now],
        )?;
        Ok(())
    }
}

/// Appends tuning documents as newline-delimited JSON, for setups
/// without a SQLite database on hand.
pub struct JsonlTuningSink {
    path: std::path::PathBuf,
}

impl JsonlTuningSink {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TuningSink for JsonlTuningSink {
    fn record(&self, document: &TuningDocument) -> Result<(), TuningSinkError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::OpenOptions::new().create(true).append(true).open(&self.path)?;
        let line = serde_json::to_string(document)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> TuningDocument {
        let mut coefficients = HashMap::new();
        coefficients.insert("selfCoefficient".to_string(), 1.98);
        TuningDocument {
            score: 87.5,
            genre: "Orchestral".to_string(),
            coefficients,
        }
    }

    #[test]
    fn sqlite_sink_records_and_counts() {
        let sink = SqliteTuningSink::in_memory().unwrap();
        sink.record(&sample_document()).unwrap();
        assert_eq!(sink.count().unwrap(), 1);
    }

    #[test]
    fn jsonl_sink_appends_one_line_per_document() {
        let dir = std::env::temp_dir().join(format!("harmonix-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tunings.jsonl");
        let sink = JsonlTuningSink::new(&path);

        sink.record(&sample_document()).unwrap();
        sink.record(&sample_document()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        std::fs::remove_dir_all(&dir).ok();
    }
}
