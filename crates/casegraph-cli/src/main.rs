//! Casegraph CLI - explore a case relationship graph ranked by risk.

use anyhow::Context;
use casegraph_cli::{commands, repl, Cli, Command, Config, Formatter};
use casegraph_domain::RiskScorer;
use casegraph_loader::Loader;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // `config init` must work before any config file exists
    let loaded = Config::load(cli.config.as_deref());
    let mut config = match (&cli.command, loaded) {
        (Some(Command::Config(_)), Err(_)) => Config::default(),
        (_, loaded) => loaded?,
    };

    // Command-line overrides
    if let Some(dir) = cli.data_dir {
        config.data.data_dir = dir;
    }
    if cli.strict {
        config.data.strict = true;
    }
    config.validate()?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Some(Command::Config(args)) => {
            commands::execute_config(args, &config, cli.config.as_deref(), &formatter)?;
        }
        command => {
            let loaded = Loader::new(config.data.clone())
                .with_scorer(RiskScorer::new(config.scoring.clone()))
                .load()
                .await
                .with_context(|| {
                    format!("Failed to load datasets from {}", config.data.data_dir.display())
                })?;
            let dataset = &loaded.dataset;
            let state = config.explorer.initial_state();

            match command {
                None | Some(Command::Repl) => {
                    repl::run_repl(dataset, state, &config.settings, &formatter)?;
                }
                Some(Command::Score(args)) => {
                    commands::execute_score(args, dataset, &formatter)?;
                }
                Some(Command::View(args)) => {
                    commands::execute_view(args, dataset, state, &formatter)?;
                }
                Some(Command::Person(args)) => {
                    commands::execute_person(args, dataset, state, &formatter)?;
                }
                Some(Command::Search(args)) => {
                    commands::execute_search(args, dataset, state, &formatter)?;
                }
                Some(Command::Audit) => {
                    commands::execute_audit(&loaded.report, &formatter)?;
                }
                Some(Command::Config(args)) => {
                    commands::execute_config(args, &config, cli.config.as_deref(), &formatter)?;
                }
            }
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
