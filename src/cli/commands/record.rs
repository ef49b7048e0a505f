//! Record command - remember a successful resolution

use crate::cli::args::RecordArgs;
use crate::error::RelaunchResult;
use crate::history::{HistoryEntry, HistoryStore};
use console::style;

/// Execute the record command
pub async fn execute(args: RecordArgs, store: &HistoryStore) -> RelaunchResult<()> {
    let name = args.name.unwrap_or_else(|| args.key.clone());
    let mut entry = HistoryEntry::new(args.key, args.artifact, args.class_path, name);
    if let Some(description) = args.description {
        entry = entry.with_description(description);
    }

    let stored = store.record_entry(entry)?;

    println!(
        "{} Recorded {} -> {} at {}",
        style("✓").green(),
        stored.key,
        stored.resolved_artifact,
        stored.last_refresh_time.to_rfc3339()
    );

    Ok(())
}
