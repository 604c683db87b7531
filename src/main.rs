use clap::Parser;
use kanban::cli::commands::Cli;
use kanban::cli::handlers;
use kanban::io::{config_io, logging, seed};

fn main() {
    let cli = Cli::parse();

    let config = match config_io::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.command.is_some() {
        if let Err(e) = handlers::dispatch(cli) {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // No subcommand → launch TUI
    if let Err(e) = logging::init(&config.log) {
        eprintln!("warning: logging disabled: {}", e);
    }
    let state = match seed::load(cli.seed.as_deref()) {
        Ok(state) => state,
        Err(e) => {
            tracing::warn!(error = %e, "rejected seed");
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = kanban::tui::run(state, &config, cli.theme) {
        tracing::error!(error = %e, "terminal session failed");
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
