//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! One explorer lives for the whole session, so filters and focus carry over
//! from command to command.

use crate::config::Settings;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use casegraph_domain::{Dataset, PersonType};
use casegraph_view::{Explorer, FilterState, FilterUpdate, VisibilityLedger};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_TOP: usize = 10;

/// Run the interactive REPL.
pub fn run_repl(
    dataset: &Dataset,
    state: FilterState,
    settings: &Settings,
    formatter: &Formatter,
) -> Result<()> {
    println!(
        "{}",
        formatter.info(&format!(
            "Casegraph REPL - {} people, {} edges loaded. Type 'help' for commands, 'exit' to quit",
            dataset.people().len(),
            dataset.edges().len()
        ))
    );
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(settings.history_size)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config)?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut explorer = Explorer::with_state(dataset, state, VisibilityLedger::new());

    loop {
        let prompt = match &explorer.state().focused {
            Some(id) => format!("casegraph [{}]> ", id),
            None => "casegraph> ".to_string(),
        };

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        if let Err(e) = execute_repl_command(cmd, &mut explorer, formatter) {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, Clone, PartialEq)]
enum ReplCommand {
    Exit,
    Help,
    Show(PersonType),
    Hide(PersonType),
    Risk(f64),
    Degree(usize),
    Focus(String),
    Reset,
    Search(String),
    Person(String),
    View { edges: bool },
    Top(usize),
    State,
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    let Some((&head, args)) = parts.split_first() else {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    };

    match head {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "show" => Ok(ReplCommand::Show(parse_type_arg(args, "show")?)),
        "hide" => Ok(ReplCommand::Hide(parse_type_arg(args, "hide")?)),
        "risk" => {
            let value = args
                .first()
                .and_then(|s| s.parse::<f64>().ok())
                .filter(|v| (0.0..=1.0).contains(v))
                .ok_or_else(|| CliError::InvalidInput("Usage: risk <0.0-1.0>".to_string()))?;
            Ok(ReplCommand::Risk(value))
        }
        "degree" => {
            let value = args
                .first()
                .and_then(|s| s.parse::<usize>().ok())
                .ok_or_else(|| CliError::InvalidInput("Usage: degree <hops>".to_string()))?;
            Ok(ReplCommand::Degree(value))
        }
        "focus" => match args.first() {
            Some(id) => Ok(ReplCommand::Focus(id.to_string())),
            None => Err(CliError::InvalidInput("Usage: focus <person-id>".to_string())),
        },
        "reset" => Ok(ReplCommand::Reset),
        "search" => {
            if args.is_empty() {
                return Err(CliError::InvalidInput("Usage: search <query>".to_string()));
            }
            Ok(ReplCommand::Search(args.join(" ")))
        }
        "person" => match args.first() {
            Some(id) => Ok(ReplCommand::Person(id.to_string())),
            None => Err(CliError::InvalidInput("Usage: person <person-id>".to_string())),
        },
        "view" => Ok(ReplCommand::View {
            edges: args.first() == Some(&"edges"),
        }),
        "top" => {
            let limit = match args.first() {
                Some(s) => s
                    .parse::<usize>()
                    .map_err(|_| CliError::InvalidInput("Usage: top [count]".to_string()))?,
                None => DEFAULT_TOP,
            };
            Ok(ReplCommand::Top(limit))
        }
        "state" => Ok(ReplCommand::State),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            head
        ))),
    }
}

fn parse_type_arg(args: &[&str], command: &str) -> Result<PersonType> {
    args.first()
        .map(|s| s.trim_end_matches('s'))
        .and_then(PersonType::parse)
        .ok_or_else(|| {
            CliError::InvalidInput(format!("Usage: {} <victim|accused|other>", command))
        })
}

/// Execute a REPL command against the session explorer.
fn execute_repl_command(
    cmd: ReplCommand,
    explorer: &mut Explorer<'_, VisibilityLedger>,
    formatter: &Formatter,
) -> Result<()> {
    debug!(command = ?cmd, "Executing REPL command");

    match cmd {
        ReplCommand::Show(person_type) => {
            explorer.apply_filters(&FilterUpdate::new().show(person_type, true));
            print_counts(explorer, formatter);
        }
        ReplCommand::Hide(person_type) => {
            explorer.apply_filters(&FilterUpdate::new().show(person_type, false));
            print_counts(explorer, formatter);
        }
        ReplCommand::Risk(value) => {
            explorer.apply_filters(&FilterUpdate::new().risk_min(value));
            print_counts(explorer, formatter);
        }
        ReplCommand::Degree(limit) => {
            explorer.set_degree_limit(limit);
            print_counts(explorer, formatter);
        }
        ReplCommand::Focus(id) => {
            if explorer.focus_person(&id).is_none() {
                return Err(CliError::UnknownPerson(id));
            }
            print_counts(explorer, formatter);
        }
        ReplCommand::Reset => {
            explorer.reset_view();
            print_counts(explorer, formatter);
        }
        ReplCommand::Search(query) => {
            let hits = explorer.search(&query);
            println!("{}", formatter.format_hits(&hits)?);
        }
        ReplCommand::Person(id) => {
            let detail = explorer
                .person_detail(&id)
                .ok_or(CliError::UnknownPerson(id))?;
            println!("{}", formatter.format_person(&detail)?);
        }
        ReplCommand::View { edges } => {
            println!("{}", formatter.format_view(explorer, edges)?);
        }
        ReplCommand::Top(limit) => {
            println!("{}", formatter.format_ranking(&explorer.top_risk(limit))?);
        }
        ReplCommand::State => {
            println!("{}", serde_json::to_string_pretty(explorer.state())?);
        }
        ReplCommand::Exit | ReplCommand::Help => {}
    }

    Ok(())
}

fn print_counts(explorer: &Explorer<'_, VisibilityLedger>, formatter: &Formatter) {
    let view = explorer.view();
    println!(
        "{}",
        formatter.info(&format!(
            "{} people, {} edges visible",
            view.people.len(),
            view.edges.len()
        ))
    );
}

fn get_history_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    let dir = home.join(".casegraph");
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  show <type>            - Show victims, accused or other people");
    println!("  hide <type>            - Hide victims, accused or other people");
    println!("  risk <0.0-1.0>         - Minimum risk for non-victims");
    println!("  degree <hops>          - Hop radius around the focused person");
    println!("  focus <id>             - Restrict the view to a person's neighborhood");
    println!("  reset                  - Clear focus and type filters (keeps risk and degree)");
    println!("  search <query>         - Search names, ids and tags");
    println!("  person <id>            - Show the detail panel for a person");
    println!("  view [edges]           - List visible people (and edges)");
    println!("  top [n]                - Rank non-victims by risk (default: {})", DEFAULT_TOP);
    println!("  state                  - Print the current filter state");
    println!("  help, ?                - Show this help");
    println!("  exit, quit, q          - Exit REPL");
    println!();
}
