//! Person command implementation.

use crate::cli::PersonArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use casegraph_domain::Dataset;
use casegraph_view::{Explorer, FilterState, VisibilityLedger};

/// Execute the person command.
///
/// Visibility and hop distance in the panel reflect `state`.
pub fn execute_person(
    args: PersonArgs,
    dataset: &Dataset,
    state: FilterState,
    formatter: &Formatter,
) -> Result<()> {
    let explorer = Explorer::with_state(dataset, state, VisibilityLedger::new());
    let detail = explorer
        .person_detail(&args.id)
        .ok_or_else(|| CliError::UnknownPerson(args.id.clone()))?;
    println!("{}", formatter.format_person(&detail)?);
    Ok(())
}
