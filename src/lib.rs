pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod rating;
pub mod services;
pub mod store;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use log::info;
use std::path::Path;

use crate::cli::{Command, ShowArgs, UniverseArgs};
use crate::config::settings::AppConfig;
use crate::rating::StrategyKind;
use crate::services::report::print_summary;
use crate::services::{AutoBooking, ProcessingService, ShowOptions};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_run(matches: &Path, args: &ShowArgs) -> Result<()> {
    let descriptors = store::load_descriptors(matches)?;
    let service = build_service(&args.target);
    let summary = service.run_show(&descriptors, &show_options(args, StrategyKind::Storyline))?;
    print_summary(&summary);
    Ok(())
}

pub fn handle_auto(booking: AutoBooking, args: &ShowArgs) -> Result<()> {
    let service = build_service(&args.target);
    let summary = service.run_auto(&booking, &show_options(args, StrategyKind::Chaos))?;
    print_summary(&summary);
    Ok(())
}

pub fn handle_rank(target: &UniverseArgs) -> Result<()> {
    build_service(target).rerank(target.dry_run)
}

pub fn handle_card(seed: Option<u64>, target: &UniverseArgs) -> Result<()> {
    let card = build_service(target).regenerate_card(seed, target.dry_run)?;
    for descriptor in &card {
        println!("{}", descriptor);
    }
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn build_service(target: &UniverseArgs) -> ProcessingService {
    let config = AppConfig::new().with_universe_path(target.universe.clone());
    info!("Using universe document {}", config.universe_path.display());
    ProcessingService::new(config)
}

fn show_options(args: &ShowArgs, default_strategy: StrategyKind) -> ShowOptions {
    ShowOptions {
        strategy: args.strategy.unwrap_or(default_strategy),
        seed: args.seed,
        regenerate_card: !args.no_card,
        dry_run: args.target.dry_run,
    }
}
