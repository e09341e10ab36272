use anyhow::Result;

use fairplay_monitor::cli::Command;
use fairplay_monitor::{
    handle_completions, handle_presets, handle_reputation, handle_score, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Score {
            input,
            rated_only,
            debug,
            preset,
            now,
        } => handle_score(input, *rated_only, *debug, *preset, now.as_deref()),
        Command::Reputation { input } => handle_reputation(input),
        Command::Presets => handle_presets(),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
