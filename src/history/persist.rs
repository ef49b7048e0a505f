//! On-disk history file
//!
//! The history is stored as JSON Lines, one entry per line, most recent
//! first. Every write replaces the whole file: the snapshot goes to a
//! sibling `.tmp` file which is synced and then renamed over the live file,
//! so a reader never observes a half-written history.

use super::entry::HistoryEntry;
use crate::error::{RelaunchError, RelaunchResult};
use std::ffi::OsString;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// What a write should leave on disk
#[derive(Debug, Clone)]
pub(crate) enum Snapshot {
    /// Replace the file with these entries
    Save(Arc<Vec<HistoryEntry>>),
    /// Delete the file
    Remove,
}

/// A snapshot tagged with the mutation generation that produced it
#[derive(Debug, Clone)]
pub(crate) struct WriteJob {
    pub generation: u64,
    pub snapshot: Snapshot,
}

/// Outcome of the most recent background write
#[derive(Debug, Clone, Default)]
pub(crate) struct WriteStatus {
    pub generation: u64,
    pub error: Option<String>,
}

/// Load entries from `path`
///
/// Never fails: a missing or unreadable file yields an empty history and
/// malformed lines are skipped. When a key appears more than once the
/// later line wins.
pub fn load(path: &Path) -> Vec<HistoryEntry> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No history file at {}", path.display());
            return Vec::new();
        }
        Err(e) => {
            warn!("Failed to read history file {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    let entries = decode(&content);
    debug!("Loaded {} history entries from {}", entries.len(), path.display());
    entries
}

/// Parse JSON Lines content, skipping malformed records
pub fn decode(content: &str) -> Vec<HistoryEntry> {
    let mut entries: Vec<HistoryEntry> = Vec::new();

    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<HistoryEntry>(line) {
            Ok(entry) if entry.key.trim().is_empty() => {
                warn!("Skipping history record {} with empty key", index + 1);
            }
            Ok(entry) => {
                entries.retain(|e| e.key != entry.key);
                entries.push(entry);
            }
            Err(e) => warn!("Skipping malformed history record {}: {}", index + 1, e),
        }
    }

    entries
}

/// Serialize entries as JSON Lines
pub fn encode(entries: &[HistoryEntry]) -> RelaunchResult<String> {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&serde_json::to_string(entry)?);
        out.push('\n');
    }
    Ok(out)
}

/// Atomically replace the file at `path` with `entries`
pub fn write_atomic(path: &Path, entries: &[HistoryEntry]) -> RelaunchResult<()> {
    let content = encode(entries)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| RelaunchError::io(format!("creating {}", parent.display()), e))?;
    }

    let temp_path = temp_path(path);
    {
        let mut file = fs::File::create(&temp_path)
            .map_err(|e| RelaunchError::io(format!("creating {}", temp_path.display()), e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| RelaunchError::io(format!("writing {}", temp_path.display()), e))?;
        file.sync_all()
            .map_err(|e| RelaunchError::io(format!("syncing {}", temp_path.display()), e))?;
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        RelaunchError::io(format!("replacing {}", path.display()), e)
    })?;

    // Make the rename itself durable.
    #[cfg(unix)]
    {
        if let Some(parent) = path.parent() {
            fs::File::open(parent)
                .and_then(|dir| dir.sync_all())
                .map_err(|e| RelaunchError::io(format!("syncing {}", parent.display()), e))?;
        }
    }

    debug!("Wrote {} history entries to {}", entries.len(), path.display());
    Ok(())
}

/// Delete the history file and any leftover temp file
pub fn remove(path: &Path) -> RelaunchResult<()> {
    for target in [path.to_path_buf(), temp_path(path)] {
        match fs::remove_file(&target) {
            Ok(()) => debug!("Removed {}", target.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(RelaunchError::io(
                    format!("removing {}", target.display()),
                    e,
                ))
            }
        }
    }
    Ok(())
}

/// Apply a snapshot to disk
pub(crate) fn apply(path: &Path, snapshot: &Snapshot) -> RelaunchResult<()> {
    match snapshot {
        Snapshot::Save(entries) => write_atomic(path, entries),
        Snapshot::Remove => remove(path),
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("history"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Background writer loop
///
/// Only the newest job is written; jobs published while a write is in
/// flight are coalesced into the next one.
pub(crate) async fn run_writer(
    path: PathBuf,
    mut jobs: watch::Receiver<WriteJob>,
    status: watch::Sender<WriteStatus>,
) {
    while jobs.changed().await.is_ok() {
        let job = jobs.borrow_and_update().clone();
        let target = path.clone();

        let result = tokio::task::spawn_blocking(move || apply(&target, &job.snapshot))
            .await
            .unwrap_or_else(|e| Err(RelaunchError::Persist(format!("writer task failed: {}", e))));

        let error = match result {
            Ok(()) => None,
            Err(e) => {
                warn!("Failed to persist history to {}: {}", path.display(), e);
                Some(e.to_string())
            }
        };

        status.send_replace(WriteStatus {
            generation: job.generation,
            error,
        });
    }

    debug!("History writer for {} stopped", path.display());
}
