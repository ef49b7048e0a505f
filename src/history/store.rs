//! History store
//!
//! Keeps the most recently launched coordinates in LRU order, answers
//! freshness-aware lookups and mirrors every change to a file under the
//! storage root.
//!
//! # Persistence modes
//!
//! | Mode | Write happens | Used for |
//! |------|---------------|----------|
//! | Background | on a writer task, coalesced | interactive callers |
//! | Blocking | before the mutating call returns | tests, controlled shutdown |
//!
//! In both modes the in-memory list is updated first and is what every read
//! sees. Call [`HistoryStore::flush`] to wait for pending background writes.

use super::clock::{Clock, SystemClock};
use super::entry::HistoryEntry;
use super::persist::{self, Snapshot, WriteJob, WriteStatus};
use crate::config::HistoryConfig;
use crate::error::{RelaunchError, RelaunchResult};
use chrono::Duration;
use parking_lot::{Mutex, RwLock};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// How changes reach the disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistMode {
    /// Dispatch writes to a background task
    Background,
    /// Write before returning
    Blocking,
}

/// Options for opening a [`HistoryStore`]
#[derive(Clone)]
pub struct StoreOptions {
    /// Maximum number of entries kept
    pub max_history_size: usize,

    /// Entries older than this are not returned by `search`
    pub expiry: Duration,

    /// Persistence mode
    pub persist_mode: PersistMode,

    /// File name inside the storage root
    pub file_name: String,

    /// Time source
    pub clock: Arc<dyn Clock>,
}

impl StoreOptions {
    /// Options taken from the `[history]` config section
    pub fn from_config(config: &HistoryConfig) -> Self {
        Self {
            max_history_size: config.max_entries,
            expiry: config.expiry(),
            persist_mode: if config.blocking_writes {
                PersistMode::Blocking
            } else {
                PersistMode::Background
            },
            file_name: config.file_name.clone(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Write before returning from each change
    pub fn blocking(mut self) -> Self {
        self.persist_mode = PersistMode::Blocking;
        self
    }

    /// Use a custom time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Set the size bound
    pub fn with_max_history_size(mut self, max: usize) -> Self {
        self.max_history_size = max;
        self
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self::from_config(&HistoryConfig::default())
    }
}

struct State {
    entries: Vec<HistoryEntry>,
    generation: u64,
    /// Last failure of a write done on the calling thread
    write_error: Option<String>,
}

struct BackgroundWriter {
    /// Taken on shutdown; the writer drains the last job and exits
    jobs: Mutex<Option<watch::Sender<WriteJob>>>,
    status: watch::Receiver<WriteStatus>,
    task: Mutex<Option<JoinHandle<()>>>,
}

/// Launch history with bounded size, recency order and expiry
pub struct HistoryStore {
    path: PathBuf,
    max_history_size: usize,
    expiry: Duration,
    clock: RwLock<Arc<dyn Clock>>,
    state: RwLock<State>,
    writer: Option<BackgroundWriter>,
}

impl HistoryStore {
    /// Open the store rooted at `root`, loading any saved history
    ///
    /// Load problems are logged and leave the store empty. Background mode
    /// needs a tokio runtime; without one the store writes synchronously.
    pub fn open(root: impl AsRef<Path>, options: StoreOptions) -> Self {
        let path = root.as_ref().join(&options.file_name);
        let max_history_size = options.max_history_size.max(1);

        let mut entries = persist::load(&path);
        if entries.len() > max_history_size {
            debug!(
                "Trimming loaded history from {} to {} entries",
                entries.len(),
                max_history_size
            );
            entries.truncate(max_history_size);
        }

        let writer = match options.persist_mode {
            PersistMode::Blocking => None,
            PersistMode::Background => match Handle::try_current() {
                Ok(handle) => Some(Self::spawn_writer(&handle, path.clone())),
                Err(_) => {
                    warn!("No async runtime available, history writes will block");
                    None
                }
            },
        };

        info!(
            "Opened launch history at {} ({} entries)",
            path.display(),
            entries.len()
        );

        Self {
            path,
            max_history_size,
            expiry: options.expiry,
            clock: RwLock::new(options.clock),
            state: RwLock::new(State {
                entries,
                generation: 0,
                write_error: None,
            }),
            writer,
        }
    }

    fn spawn_writer(handle: &Handle, path: PathBuf) -> BackgroundWriter {
        let (jobs, jobs_rx) = watch::channel(WriteJob {
            generation: 0,
            snapshot: Snapshot::Remove,
        });
        let (status_tx, status) = watch::channel(WriteStatus::default());
        let task = handle.spawn(persist::run_writer(path, jobs_rx, status_tx));

        BackgroundWriter {
            jobs: Mutex::new(Some(jobs)),
            status,
            task: Mutex::new(Some(task)),
        }
    }

    /// Record a successful resolution
    ///
    /// Any entry with the same key is replaced. The stored entry carries the
    /// store clock's current time and is returned.
    pub fn record_entry(&self, entry: HistoryEntry) -> RelaunchResult<HistoryEntry> {
        if entry.key.trim().is_empty() {
            return Err(RelaunchError::EmptyKey);
        }

        // Stamp under the write lock so list order matches timestamp order.
        let mut state = self.state.write();
        let entry = entry.refreshed_at(self.clock.read().now());

        state.entries.retain(|e| e.key != entry.key);
        state.entries.insert(0, entry.clone());

        if state.entries.len() > self.max_history_size {
            for evicted in state.entries.drain(self.max_history_size..) {
                debug!("Evicted {} from launch history", evicted.key);
            }
        }

        let snapshot = Snapshot::Save(Arc::new(state.entries.clone()));
        self.persist(&mut state, snapshot);

        debug!("Recorded {} at {}", entry.key, entry.last_refresh_time);
        Ok(entry)
    }

    /// Look up a fresh entry for `key`
    ///
    /// Expired entries count as a miss but stay in the history.
    pub fn search(&self, key: &str) -> Option<HistoryEntry> {
        let entry = self
            .state
            .read()
            .entries
            .iter()
            .find(|e| e.key == key)
            .cloned()?;

        if self.is_expired(&entry) {
            debug!("Cached resolution for {} has expired", key);
            return None;
        }

        Some(entry)
    }

    /// Whether `entry` is past the expiry window
    pub fn is_expired(&self, entry: &HistoryEntry) -> bool {
        self.clock.read().now() - entry.last_refresh_time > self.expiry
    }

    /// Snapshot of all entries, most recent first
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.state.read().entries.clone()
    }

    /// Number of remembered entries
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    /// Whether nothing is remembered
    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }

    /// Size bound
    pub fn max_history_size(&self) -> usize {
        self.max_history_size
    }

    /// Path of the history file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the time source
    pub fn set_clock(&self, clock: Arc<dyn Clock>) {
        *self.clock.write() = clock;
    }

    /// Forget everything, in memory and on disk
    pub fn clear_cache(&self) -> RelaunchResult<()> {
        let mut state = self.state.write();
        let removed = state.entries.len();
        state.entries.clear();
        self.persist(&mut state, Snapshot::Remove);

        info!("Cleared {} launch history entries", removed);
        Ok(())
    }

    /// Wait until every change made so far is on disk
    ///
    /// Returns the error of the latest write if it failed.
    pub async fn flush(&self) -> RelaunchResult<()> {
        let (target, local_error) = {
            let state = self.state.read();
            (state.generation, state.write_error.clone())
        };

        if let Some(writer) = &self.writer {
            let mut status = writer.status.clone();
            let outcome = status
                .wait_for(|s| s.generation >= target)
                .await
                .map(|s| s.error.clone());

            // A closed channel means the writer stopped and later changes
            // were written on the calling thread.
            if let Ok(error) = outcome {
                return error.map_or(Ok(()), |e| Err(RelaunchError::Persist(e)));
            }
        }

        local_error.map_or(Ok(()), |e| Err(RelaunchError::Persist(e)))
    }

    /// Stop the background writer after it has written everything
    ///
    /// The writer keeps receiving jobs until it has caught up with the
    /// in-memory state, so no inline write can race an older background
    /// one. Changes made afterwards are written on the calling thread.
    pub async fn shutdown(&self) -> RelaunchResult<()> {
        let Some(writer) = &self.writer else {
            return self.flush().await;
        };

        let result = loop {
            let result = self.flush().await;

            let drained = {
                let state = self.state.write();
                let mut jobs = writer.jobs.lock();
                if jobs.is_none() || writer.status.borrow().generation >= state.generation {
                    drop(jobs.take());
                    true
                } else {
                    false
                }
            };

            if drained {
                break result;
            }
        };

        let task = writer.task.lock().take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                warn!("History writer ended abnormally: {}", e);
            }
            debug!("Stopped history writer");
        }

        result
    }

    fn persist(&self, state: &mut State, snapshot: Snapshot) {
        state.generation += 1;
        let generation = state.generation;

        if let Some(writer) = &self.writer {
            if let Some(jobs) = writer.jobs.lock().as_ref() {
                jobs.send_replace(WriteJob {
                    generation,
                    snapshot,
                });
                return;
            }
        }

        match persist::apply(&self.path, &snapshot) {
            Ok(()) => state.write_error = None,
            Err(e) => {
                warn!("Failed to persist history to {}: {}", self.path.display(), e);
                state.write_error = Some(e.to_string());
            }
        }
    }
}
