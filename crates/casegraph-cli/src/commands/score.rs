//! Score command implementation.

use crate::cli::ScoreArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use casegraph_domain::Dataset;
use casegraph_view::{Explorer, VisibilityLedger};

/// Execute the score command.
pub fn execute_score(args: ScoreArgs, dataset: &Dataset, formatter: &Formatter) -> Result<()> {
    if args.limit == 0 {
        return Err(CliError::InvalidInput("Limit must be at least 1".to_string()));
    }

    let explorer = Explorer::new(dataset, VisibilityLedger::new());
    let ranked = explorer.top_risk(args.limit);
    println!("{}", formatter.format_ranking(&ranked)?);
    Ok(())
}
