//! Clear command - forget all launch history

use crate::cli::args::ClearArgs;
use crate::error::RelaunchResult;
use crate::history::HistoryStore;
use console::style;
use std::io::{self, Write};

/// Execute the clear command
pub async fn execute(args: ClearArgs, store: &HistoryStore) -> RelaunchResult<()> {
    let count = store.len();

    if count == 0 && !store.path().exists() {
        println!("Launch history is already empty.");
        return Ok(());
    }

    if !args.yes {
        println!("This will forget {} app(s). Apps will be resolved again next launch.", count);
        print!("Are you sure? [y/N] ");
        let _ = io::stdout().flush();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            println!("Failed to read input, aborting.");
            return Ok(());
        }

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    store.clear_cache()?;
    println!("{} Cache has been cleared", style("✓").green());

    Ok(())
}
