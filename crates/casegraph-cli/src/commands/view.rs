//! View command implementation.

use crate::cli::ViewArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use casegraph_domain::{Dataset, PersonType};
use casegraph_view::{Explorer, FilterState, FilterUpdate, VisibilityLedger};

/// Translate view arguments into a filter update.
///
/// Types not listed in `--hide` are left as they are.
pub fn build_update(args: &ViewArgs) -> Result<FilterUpdate> {
    let mut update = FilterUpdate::new();
    for &hidden in &args.hide {
        update = update.show(PersonType::from(hidden), false);
    }
    if let Some(risk_min) = args.risk_min {
        if !(0.0..=1.0).contains(&risk_min) {
            return Err(CliError::InvalidInput(
                "Risk threshold must be between 0.0 and 1.0".to_string(),
            ));
        }
        update = update.risk_min(risk_min);
    }
    Ok(update)
}

/// Execute the view command.
pub fn execute_view(
    args: ViewArgs,
    dataset: &Dataset,
    state: FilterState,
    formatter: &Formatter,
) -> Result<()> {
    let update = build_update(&args)?;

    let mut explorer = Explorer::with_state(dataset, state, VisibilityLedger::new());
    if !update.is_empty() {
        explorer.apply_filters(&update);
    }
    if let Some(limit) = args.degree {
        explorer.set_degree_limit(limit);
    }
    if let Some(id) = &args.focus {
        if !dataset.contains_person(id) {
            return Err(CliError::UnknownPerson(id.clone()));
        }
        explorer.focus_person(id);
    }

    println!("{}", formatter.format_view(&explorer, args.edges)?);
    Ok(())
}
