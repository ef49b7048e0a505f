//! History command - show recently launched apps

use crate::cli::args::{HistoryArgs, OutputFormat};
use crate::error::RelaunchResult;
use crate::history::{HistoryEntry, HistoryStore};
use console::style;
use serde::Serialize;

/// Execute the history command
pub async fn execute(args: HistoryArgs, store: &HistoryStore) -> RelaunchResult<()> {
    let entries = store.history();

    if entries.is_empty() {
        match args.format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Plain => {}
            OutputFormat::Table => println!("No launch history"),
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => print_table(store, &entries),
        OutputFormat::Json => print_json(store, &entries)?,
        OutputFormat::Plain => print_plain(&entries),
    }

    Ok(())
}

/// Entry as shown in JSON listings
#[derive(Serialize)]
pub(crate) struct EntryJson<'a> {
    #[serde(flatten)]
    entry: &'a HistoryEntry,
    expired: bool,
}

impl<'a> EntryJson<'a> {
    pub(crate) fn new(store: &HistoryStore, entry: &'a HistoryEntry) -> Self {
        Self {
            entry,
            expired: store.is_expired(entry),
        }
    }
}

fn print_table(store: &HistoryStore, entries: &[HistoryEntry]) {
    println!(
        "{:<32} {:<24} {:<18} {:<8}",
        style("KEY").bold(),
        style("NAME").bold(),
        style("REFRESHED").bold(),
        style("STATE").bold()
    );
    println!("{}", "-".repeat(84));

    for entry in entries {
        let state = if store.is_expired(entry) {
            style("stale").dim()
        } else {
            style("fresh").green()
        };

        let refreshed = entry.last_refresh_time.format("%Y-%m-%d %H:%M").to_string();

        println!(
            "{:<32} {:<24} {:<18} {:<8}",
            entry.key, entry.display_name, refreshed, state
        );
    }

    println!();
    println!("{} app(s)", entries.len());
}

fn print_json(store: &HistoryStore, entries: &[HistoryEntry]) -> RelaunchResult<()> {
    let rows: Vec<EntryJson<'_>> = entries.iter().map(|e| EntryJson::new(store, e)).collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn print_plain(entries: &[HistoryEntry]) {
    for entry in entries {
        println!("{}", entry.key);
    }
}
