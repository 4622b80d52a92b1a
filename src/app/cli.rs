//! Command-line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Finger chooser - picks random winners from fingers on a screen
#[derive(Parser, Debug)]
#[command(name = "chooser")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config profile to load (defaults to APP_PROFILE, then "release")
    #[arg(short, long, global = true)]
    pub profile: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a recorded touch scenario and print the timeline
    Replay {
        /// Scenario file (TOML, JSON or YAML)
        file: PathBuf,

        /// Seed for the draw, for reproducible results
        #[arg(short, long)]
        seed: Option<u64>,

        /// Run against the wall clock instead of jumping between events
        #[arg(long)]
        realtime: bool,

        /// Frame length in milliseconds for --realtime
        #[arg(long, default_value = "16")]
        frame_ms: u64,
    },

    /// Run the self-test suite
    Health,

    /// Show build information
    Info,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_arguments() {
        let cli = Cli::parse_from(["chooser", "-v", "replay", "round.toml", "--seed", "9"]);
        assert!(cli.verbose);
        let Commands::Replay {
            file,
            seed,
            realtime,
            frame_ms,
        } = cli.command
        else {
            panic!("expected replay");
        };
        assert_eq!(file, PathBuf::from("round.toml"));
        assert_eq!(seed, Some(9));
        assert!(!realtime);
        assert_eq!(frame_ms, 16);
    }

    #[test]
    fn test_global_profile_after_subcommand() {
        let cli = Cli::parse_from(["chooser", "health", "--profile", "debug"]);
        assert_eq!(cli.profile.as_deref(), Some("debug"));
        assert!(matches!(cli.command, Commands::Health));
    }
}
