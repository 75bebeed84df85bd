//! Simple configuration persistence for Harmonix.
//!
//! Stores the tuner's defaults so they don't need to be repeated on
//! every CLI invocation: where the ground-truth corpus lives, where
//! tuning results go, which genre to tag runs with, and how many
//! iterations a tuning run should sample.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Config {
    pub ground_truth_path: Option<PathBuf>,
    pub tuning_db_path: Option<PathBuf>,
    pub genre: String,
    pub iterations: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ground_truth_path: None,
            tuning_db_path: None,
            genre: "Orchestral".to_string(),
            iterations: 1000,
        }
    }
}

impl Config {
    /// Load config from the default location, falling back to defaults
    /// if the file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        let path = Self::config_path();
        Self::load_from(&path).unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    pub fn save(&self) -> io::Result<()> {
        let path = Self::config_path();
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.serialize())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("harmonix").join("config.txt")
    }

    fn parse(content: &str) -> Self {
        let mut config = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim();

                match key {
                    "ground_truth_path" if !value.is_empty() => config.ground_truth_path = Some(PathBuf::from(value)),
                    "tuning_db_path" if !value.is_empty() => config.tuning_db_path = Some(PathBuf::from(value)),
                    "genre" if !value.is_empty() => config.genre = value.to_string(),
                    "iterations" => {
                        if let Ok(n) = value.parse() {
                            config.iterations = n;
                        }
                    }
                    _ => {}
                }
            }
        }

        config
    }

    fn serialize(&self) -> String {
        let mut lines = vec!["# Harmonix configuration".to_string()];

        if let Some(ref path) = self.ground_truth_path {
            lines.push(format!("ground_truth_path={}", path.display()));
        }
        if let Some(ref path) = self.tuning_db_path {
            lines.push(format!("tuning_db_path={}", path.display()));
        }
        lines.push(format!("genre={}", self.genre));
        lines.push(format!("iterations={}", self.iterations));

        lines.join("\n")
    }
}
