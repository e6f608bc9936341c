//! Search command implementation.

use crate::cli::SearchArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use casegraph_domain::Dataset;
use casegraph_view::{Explorer, FilterState, VisibilityLedger};

/// Execute the search command.
pub fn execute_search(
    args: SearchArgs,
    dataset: &Dataset,
    state: FilterState,
    formatter: &Formatter,
) -> Result<()> {
    let query = args.text();
    if query.trim().is_empty() {
        return Err(CliError::InvalidInput("Search query must not be empty".to_string()));
    }

    let explorer = Explorer::with_state(dataset, state, VisibilityLedger::new());
    let mut hits = explorer.search(&query);
    hits.truncate(args.limit);
    println!("{}", formatter.format_hits(&hits)?);
    Ok(())
}
