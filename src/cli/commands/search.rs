//! Search command - look up a cached resolution

use crate::cli::args::{OutputFormat, SearchArgs};
use crate::cli::commands::history::EntryJson;
use crate::error::RelaunchResult;
use crate::history::HistoryStore;
use console::style;

/// Execute the search command
pub async fn execute(args: SearchArgs, store: &HistoryStore) -> RelaunchResult<()> {
    let Some(entry) = store.search(&args.key) else {
        match args.format {
            OutputFormat::Json => println!("null"),
            OutputFormat::Plain => {}
            OutputFormat::Table => println!(
                "{} No fresh cached resolution for {}",
                style("○").dim(),
                args.key
            ),
        }
        return Ok(());
    };

    match args.format {
        OutputFormat::Json => {
            let json = EntryJson::new(store, &entry);
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Plain => println!("{}", entry.resolved_artifact),
        OutputFormat::Table => {
            println!("{:<12} {}", style("Key:").bold(), entry.key);
            println!("{:<12} {}", style("Name:").bold(), entry.display_name);
            if let Some(description) = &entry.description {
                println!("{:<12} {}", style("About:").bold(), description);
            }
            println!("{:<12} {}", style("Artifact:").bold(), entry.resolved_artifact);
            println!("{:<12} {}", style("Class path:").bold(), entry.class_path);
            println!(
                "{:<12} {}",
                style("Refreshed:").bold(),
                entry.last_refresh_time.to_rfc3339()
            );
        }
    }

    Ok(())
}
