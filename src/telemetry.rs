//! JSON-lines page-visit telemetry

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hooks::WalkthroughHooks;

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One line of the telemetry file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageVisit {
    pub timestamp: DateTime<Utc>,
    pub mnemonic: String,
    pub step: u8,
    pub completed: bool,
}

/// Appends page visits to a file, one JSON object per line
#[derive(Debug, Clone)]
pub struct JsonlTelemetry {
    path: PathBuf,
}

impl JsonlTelemetry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self, visit: &PageVisit) -> Result<(), TelemetryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(visit)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    /// Read every recorded visit back
    pub fn read_all(&self) -> Result<Vec<PageVisit>, TelemetryError> {
        let file = fs::File::open(&self.path)?;
        let mut visits = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            visits.push(serde_json::from_str(&line)?);
        }
        Ok(visits)
    }
}

impl WalkthroughHooks for JsonlTelemetry {
    fn page_visit(&self, mnemonic: &str, step: u8, completed: bool) {
        let visit = PageVisit {
            timestamp: Utc::now(),
            mnemonic: mnemonic.to_string(),
            step,
            completed,
        };
        if let Err(e) = self.record(&visit) {
            tracing::warn!(path = ?self.path, error = %e, "Failed to record page visit");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_visits_round_trip_through_file() {
        let temp_dir = TempDir::new().unwrap();
        let telemetry = JsonlTelemetry::new(temp_dir.path().join("nested/telemetry.jsonl"));

        telemetry.page_visit("edtext", 2, false);
        telemetry.page_visit("edtext", 2, true);

        let visits = telemetry.read_all().unwrap();
        assert_eq!(visits.len(), 2);
        assert_eq!(visits[0].mnemonic, "edtext");
        assert!(!visits[0].completed);
        assert!(visits[1].completed);
    }

    #[test]
    fn test_unwritable_path_does_not_panic() {
        let temp_dir = TempDir::new().unwrap();
        // A directory cannot be opened for appending
        let telemetry = JsonlTelemetry::new(temp_dir.path());
        telemetry.page_visit("fin", 7, false);
        assert!(telemetry.read_all().is_err());
    }
}
