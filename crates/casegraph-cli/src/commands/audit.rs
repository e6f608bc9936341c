//! Audit command implementation.

use crate::error::Result;
use crate::output::Formatter;
use casegraph_loader::LoadReport;

/// Execute the audit command.
pub fn execute_audit(report: &LoadReport, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_report(report)?);
    Ok(())
}
