use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use ohana::EngineConfig;
use search::PhaseDepths;

#[derive(Parser, Debug)]
#[command(name = "ohana")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Picks chess moves with a shallow alpha-beta search")]
pub struct Args {
    /// TOML file overriding the default engine configuration.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Search depth for every game phase.
    #[arg(short, long, global = true)]
    pub depth: Option<u8>,

    /// Turn the online endgame tablebase on or off.
    #[arg(long, global = true)]
    pub tablebase: Option<bool>,

    /// Seed for tie-breaking, for reproducible games.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Write the log to a file instead of the terminal.
    #[arg(short, long, global = true)]
    pub log_file: Option<PathBuf>,

    /// More log output; repeat for more.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the move the engine plays in a position.
    Select {
        /// Starting position. Defaults to the standard start.
        #[arg(long)]
        fen: Option<String>,

        /// Moves played from the starting position, in SAN or UCI.
        #[arg(long, num_args = 1..)]
        moves: Vec<String>,
    },
    /// Let the engine play both sides.
    Selfplay {
        #[arg(long)]
        fen: Option<String>,

        /// Stop after this many plies.
        #[arg(long, default_value_t = 200)]
        max_plies: u32,
    },
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Applies the command-line overrides on top of `config`.
    pub fn apply(&self, config: &mut EngineConfig) {
        if let Some(depth) = self.depth {
            config.search.depth_by_phase = PhaseDepths::uniform(depth);
        }
        if let Some(enabled) = self.tablebase {
            config.oracle.enabled = enabled;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_select() {
        let args = Args::try_parse_from([
            "ohana", "select", "--moves", "e4", "e5", "--depth", "3", "--tablebase", "false", "-vv",
        ])
        .unwrap();

        assert_eq!(args.log_level(), LevelFilter::Debug);
        match &args.command {
            Command::Select { fen, moves } => {
                assert!(fen.is_none());
                assert_eq!(moves, &["e4".to_string(), "e5".to_string()]);
            }
            other => panic!("unexpected command {:?}", other),
        }

        let mut config = EngineConfig::default();
        args.apply(&mut config);
        assert_eq!(config.search.depth_by_phase, PhaseDepths::uniform(3));
        assert!(!config.oracle.enabled);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_parse_selfplay_defaults() {
        let args = Args::try_parse_from(["ohana", "--seed", "9", "selfplay"]).unwrap();
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.log_level(), LevelFilter::Warn);
        assert!(matches!(args.command, Command::Selfplay { max_plies: 200, .. }));
    }
}
