//! relaunch - launch history for a package-coordinate app launcher
//!
//! Remembers resolved launch coordinates so the launcher can list recent
//! apps and skip resolution while a cached result is still fresh.

pub mod cli;
pub mod config;
pub mod error;
pub mod history;

pub use error::{RelaunchError, RelaunchResult};
pub use history::{HistoryEntry, HistoryStore, StoreOptions};
