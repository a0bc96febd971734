use crate::domain::model::PairingRound;
use crate::domain::ports::{CandidateSource, HistoryStore};
use crate::utils::error::{BuddyError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Plain-text roster, one name per line.
#[derive(Debug, Clone)]
pub struct FileCandidateSource {
    path: PathBuf,
}

impl FileCandidateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn parse(content: &str) -> Vec<String> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect()
    }
}

impl CandidateSource for FileCandidateSource {
    fn load_candidates(&self) -> Result<Vec<String>> {
        tracing::debug!("Reading candidates from {}", self.path.display());
        let content =
            fs::read_to_string(&self.path).map_err(|source| BuddyError::UnreadableFile {
                path: self.path.display().to_string(),
                source,
            })?;
        Ok(Self::parse(&content))
    }
}

/// History kept as a JSON array of rounds. Every append rewrites the file.
#[derive(Debug, Clone)]
pub struct JsonHistoryStore {
    path: PathBuf,
}

impl JsonHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HistoryStore for JsonHistoryStore {
    fn load_history(&self) -> Result<Vec<PairingRound>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    "History file {} not found, starting with an empty history",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(BuddyError::UnreadableFile {
                    path: self.path.display().to_string(),
                    source,
                })
            }
        };

        // 空檔案視為沒有歷史
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_slice(&data)?)
    }

    fn append_round(&self, round: &PairingRound) -> Result<()> {
        let mut rounds = self.load_history()?;
        rounds.push(round.clone());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&rounds)?;
        fs::write(&self.path, json)?;

        tracing::debug!(
            "Wrote {} round(s) to {}",
            rounds.len(),
            self.path.display()
        );
        Ok(())
    }
}
