//! File-backed persistence for the best score
//!
//! Features:
//! - Single integer stored as JSON text
//! - Atomic write (tmp → rename)
//! - Missing or corrupt files read back as 0

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::platform::ScoreStore;

/// Default best score file name
pub const DEFAULT_SCORE_FILE: &str = "highscore.txt";

/// Errors from writing persistent data
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Best score kept in a text file
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl Default for FileScoreStore {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_FILE)
    }
}

impl ScoreStore for FileScoreStore {
    fn load_best_score(&self) -> u64 {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No best score at {}, starting fresh", self.path.display());
                return 0;
            }
            Err(e) => {
                log::warn!("Failed to read {}: {}", self.path.display(), e);
                return 0;
            }
        };

        match serde_json::from_str::<u64>(text.trim()) {
            Ok(score) => {
                log::info!("Loaded best score {}", score);
                score
            }
            Err(e) => {
                log::warn!("Ignoring corrupt best score file {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn persist_best_score(&mut self, score: u64) -> Result<(), PersistError> {
        let text = serde_json::to_string(&score)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        log::info!("Best score {} saved to {}", score, self.path.display());
        Ok(())
    }
}

/// In-memory store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    pub best: Option<u64>,
    /// Make every persist fail
    pub fail_writes: bool,
}

impl ScoreStore for MemoryScoreStore {
    fn load_best_score(&self) -> u64 {
        self.best.unwrap_or(0)
    }

    fn persist_best_score(&mut self, score: u64) -> Result<(), PersistError> {
        if self.fail_writes {
            return Err(PersistError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "writes disabled",
            )));
        }
        self.best = Some(score);
        Ok(())
    }
}
