//! CLI command definitions and argument parsing.

use casegraph_domain::PersonType;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Casegraph - explore people, relationships and evidence ranked by risk.
#[derive(Debug, Parser)]
#[command(name = "casegraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CASEGRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding people.json, edges.json, cases.json and documents.json
    #[arg(short, long, global = true, env = "CASEGRAPH_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Reject duplicate people and negative weights instead of repairing them
    #[arg(long, global = true)]
    pub strict: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (ids only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rank non-victims by risk
    Score(ScoreArgs),

    /// Apply filters and print the visible graph
    View(ViewArgs),

    /// Show the detail panel for one person
    Person(PersonArgs),

    /// Search people by name, id or tag
    Search(SearchArgs),

    /// Report repairs and dangling references found while loading
    Audit,

    /// Show or write the configuration file
    Config(ConfigArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the score command.
#[derive(Debug, Parser)]
pub struct ScoreArgs {
    /// Maximum number of people listed
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// Arguments for the view command.
#[derive(Debug, Default, Parser)]
pub struct ViewArgs {
    /// Person types to hide (repeatable)
    #[arg(long, value_enum)]
    pub hide: Vec<TypeArg>,

    /// Minimum risk for non-victims (0.0-1.0)
    #[arg(short, long)]
    pub risk_min: Option<f64>,

    /// Restrict the view to this person's neighborhood
    #[arg(long)]
    pub focus: Option<String>,

    /// Hop radius around the focused person
    #[arg(short = 'n', long)]
    pub degree: Option<usize>,

    /// Also list visible edges
    #[arg(short, long)]
    pub edges: bool,
}

/// Arguments for the person command.
#[derive(Debug, Parser)]
pub struct PersonArgs {
    /// Person id
    pub id: String,
}

/// Arguments for the search command.
#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Search query text
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Maximum number of results
    #[arg(short, long, default_value = "10")]
    pub limit: usize,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Person type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TypeArg {
    /// Victims
    Victim,
    /// Accused people
    Accused,
    /// Everyone else
    Other,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<TypeArg> for PersonType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Victim => PersonType::Victim,
            TypeArg::Accused => PersonType::Accused,
            TypeArg::Other => PersonType::Other,
        }
    }
}

impl SearchArgs {
    /// Query words joined back into one string
    pub fn text(&self) -> String {
        self.query.join(" ")
    }
}
