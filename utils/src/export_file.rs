//! Persisting session exports.
//!
//! One pretty-printed JSON file per participant, named after the participant id.
//! Files are written atomically and never overwrite an existing export.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use fairwalk_types::ParticipantId;

use crate::atomic_write::{AtomicWriteOptions, atomic_write_new};

#[derive(Debug, Error)]
pub enum ExportWriteError {
    #[error("failed to create export directory {}: {source}", dir.display())]
    CreateDir { dir: PathBuf, source: io::Error },
    #[error("failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write export {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// `crowd-study-{participantId}.json`
#[must_use]
pub fn export_file_name(participant_id: &ParticipantId) -> String {
    format!("crowd-study-{participant_id}.json")
}

/// Write `export` as pretty JSON into `dir`, creating the directory if needed.
///
/// Returns the path of the new file.
pub fn write_export<T: Serialize>(
    dir: &Path,
    participant_id: &ParticipantId,
    export: &T,
) -> Result<PathBuf, ExportWriteError> {
    fs::create_dir_all(dir).map_err(|source| ExportWriteError::CreateDir {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut json = serde_json::to_string_pretty(export)?;
    json.push('\n');

    let path = dir.join(export_file_name(participant_id));
    atomic_write_new(&path, json.as_bytes(), AtomicWriteOptions::default()).map_err(|source| {
        ExportWriteError::Write {
            path: path.clone(),
            source,
        }
    })?;

    tracing::info!(path = %path.display(), "Export written");
    Ok(path)
}
