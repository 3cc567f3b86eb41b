use anyhow::Result;

use wrestling_universe::cli::Command;
use wrestling_universe::services::AutoBooking;
use wrestling_universe::{handle_auto, handle_card, handle_completions, handle_rank, handle_run, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
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
        Command::Run { matches, options } => handle_run(matches, options),
        Command::Auto {
            div1_singles,
            div2_singles,
            div1_multiman,
            div2_multiman,
            options,
        } => {
            let booking = AutoBooking {
                div1_singles: *div1_singles,
                div2_singles: *div2_singles,
                div1_multiman: *div1_multiman,
                div2_multiman: *div2_multiman,
            };
            handle_auto(booking, options)
        }
        Command::Rank { target } => handle_rank(target),
        Command::Card { seed, target } => handle_card(*seed, target),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
