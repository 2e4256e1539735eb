//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "holdem",
    version,
    about = "Texas Hold'em table engine driver",
    disable_help_subcommand = true
)]
pub struct HoldemCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the resolved configuration and where each value came from
    Cfg,
    /// Deal one hand at a table and show hole cards and the full board
    Deal {
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(2..=9))]
        players: u8,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Evaluate hole cards against a board
    Eval {
        /// Two hole cards, e.g. "Ah Kh"
        #[arg(long)]
        hole: String,
        /// Zero to five community cards
        #[arg(long, default_value = "")]
        board: String,
    },
    /// Estimate win/tie chances by Monte-Carlo run-outs
    Equity {
        /// Hole cards of one player; repeat for every player
        #[arg(long = "hand", required = true)]
        hands: Vec<String>,
        #[arg(long, default_value = "")]
        board: String,
        #[arg(long, default_value_t = 10_000)]
        iterations: u32,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play hands between simple bots and report the results
    Sim {
        #[arg(long, default_value_t = 100)]
        hands: u64,
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(2..=9))]
        players: u8,
        #[arg(long)]
        seed: Option<u64>,
        /// Write every finished hand as one JSON line
        #[arg(long)]
        output: Option<String>,
    },
}

pub const COMMANDS: &[&str] = &["cfg", "deal", "eval", "equity", "sim"];
