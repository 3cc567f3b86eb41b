use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::rating::StrategyKind;

#[derive(Parser, Debug)]
#[command(author, version, about = "Wrestling universe show processor")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Replay a file of match results into the universe
    Run {
        /// Match descriptors, one per line
        #[arg(short, long)]
        matches: PathBuf,
        #[command(flatten)]
        options: ShowArgs,
    },
    /// Book random division matches and replay them
    Auto {
        /// Singles matches drawn from Div 1
        #[arg(long, default_value_t = 2)]
        div1_singles: usize,
        /// Singles matches drawn from Div 2
        #[arg(long, default_value_t = 2)]
        div2_singles: usize,
        /// Size of the Div 1 multi-man match (0 for none)
        #[arg(long, default_value_t = 3)]
        div1_multiman: usize,
        /// Size of the Div 2 multi-man match (0 for none)
        #[arg(long, default_value_t = 4)]
        div2_multiman: usize,
        #[command(flatten)]
        options: ShowArgs,
    },
    /// Recompute divisions, rankings and contenders without any matches
    Rank {
        #[command(flatten)]
        target: UniverseArgs,
    },
    /// Regenerate the upcoming weekly card
    Card {
        /// Seed for the card shuffle
        #[arg(long)]
        seed: Option<u64>,
        #[command(flatten)]
        target: UniverseArgs,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct UniverseArgs {
    /// Universe document (defaults to $UNIVERSE_PATH or universe.json)
    #[arg(short, long)]
    pub universe: Option<PathBuf>,
    /// Process everything but do not write the document
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct ShowArgs {
    #[command(flatten)]
    pub target: UniverseArgs,
    /// Rating pipeline (run defaults to storyline, auto to chaos)
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyKind>,
    /// Seed for the chaos term and card shuffle
    #[arg(long)]
    pub seed: Option<u64>,
    /// Keep the existing weekly card
    #[arg(long)]
    pub no_card: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_arguments() {
        let cli = Cli::parse_from([
            "universe", "run", "--matches", "week12.txt", "--strategy", "chaos", "--seed", "4", "--no-card",
        ]);
        let Command::Run { matches, options } = cli.command else {
            panic!("expected run");
        };

        assert_eq!(matches, PathBuf::from("week12.txt"));
        assert_eq!(options.strategy, Some(StrategyKind::Chaos));
        assert_eq!(options.seed, Some(4));
        assert!(options.no_card);
        assert!(!options.target.dry_run);
    }

    #[test]
    fn test_auto_defaults() {
        let cli = Cli::parse_from(["universe", "auto", "--dry-run"]);
        let Command::Auto { div1_singles, div2_multiman, options, .. } = cli.command else {
            panic!("expected auto");
        };

        assert_eq!(div1_singles, 2);
        assert_eq!(div2_multiman, 4);
        assert_eq!(options.strategy, None);
        assert!(options.target.dry_run);
    }
}
