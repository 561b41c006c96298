//! Whole-collection snapshot file.
//!
//! The collection is stored as one `serde_json` document carrying a fixed
//! format marker, the save time and every record with its variant tag. Saves
//! write a sibling temporary file and rename it over the destination, so a
//! reader sees either the previous snapshot or the new one.

use crate::domain::error::RealfinError;
use crate::domain::financing::Financing;
use crate::ports::snapshot_port::SnapshotPort;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

pub const SNAPSHOT_FORMAT: &str = "realfin-snapshot";

#[derive(Serialize)]
struct SnapshotOut<'a> {
    format: &'a str,
    saved_at: DateTime<Utc>,
    records: &'a [Financing],
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotIn {
    format: String,
    saved_at: DateTime<Utc>,
    records: Vec<Financing>,
}

pub struct SnapshotFileAdapter {
    path: PathBuf,
}

impl SnapshotFileAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

pub fn encode_snapshot(records: &[Financing]) -> Result<Vec<u8>, RealfinError> {
    let snapshot = SnapshotOut {
        format: SNAPSHOT_FORMAT,
        saved_at: Utc::now(),
        records,
    };
    serde_json::to_vec(&snapshot).map_err(|e| RealfinError::MalformedSnapshot {
        reason: format!("failed to encode: {}", e),
    })
}

pub fn decode_snapshot(bytes: &[u8]) -> Result<Vec<Financing>, RealfinError> {
    let snapshot: SnapshotIn =
        serde_json::from_slice(bytes).map_err(|e| RealfinError::MalformedSnapshot {
            reason: e.to_string(),
        })?;

    if snapshot.format != SNAPSHOT_FORMAT {
        return Err(RealfinError::MalformedSnapshot {
            reason: format!("unexpected format marker '{}'", snapshot.format),
        });
    }

    tracing::debug!(saved_at = %snapshot.saved_at, "decoding snapshot");
    for (idx, record) in snapshot.records.iter().enumerate() {
        record
            .validate()
            .map_err(|e| RealfinError::MalformedSnapshot {
                reason: format!("record {}: {}", idx + 1, e),
            })?;
    }

    Ok(snapshot.records)
}

impl SnapshotPort for SnapshotFileAdapter {
    fn save(&self, records: &[Financing]) -> Result<(), RealfinError> {
        let bytes = encode_snapshot(records)?;
        let temp = self.temp_path();
        fs::write(&temp, &bytes)?;
        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }
        tracing::info!(
            path = %self.path.display(),
            count = records.len(),
            "snapshot saved"
        );
        Ok(())
    }

    fn load(&self) -> Result<Vec<Financing>, RealfinError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(RealfinError::NotFound {
                    path: self.path.display().to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        let records = decode_snapshot(&bytes)?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "snapshot loaded");
        Ok(records)
    }
}
