//! CLI commands module.

use anyhow::Result;
use clap::Subcommand;
use std::path::Path;

mod bank;
mod counter;
mod escrow;
mod genesis;
mod init;
mod params;
mod tweet;

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a data directory
    Init(init::InitArgs),
    /// Balances: mint, transfer, burn
    Bank(bank::BankArgs),
    /// Per-address counters
    Counter(counter::CounterArgs),
    /// Post, like and delete tweets
    Tweet(tweet::TweetArgs),
    /// Lock coins until someone pays for them
    Escrow(escrow::EscrowArgs),
    /// Example module params
    Params(params::ParamsArgs),
    /// Dump or inspect the whole state
    Genesis(genesis::GenesisArgs),
}

pub fn run(cmd: Commands, data_dir: &Path) -> Result<()> {
    match cmd {
        Commands::Init(args) => init::run(args, data_dir),
        Commands::Bank(args) => bank::run(args, data_dir),
        Commands::Counter(args) => counter::run(args, data_dir),
        Commands::Tweet(args) => tweet::run(args, data_dir),
        Commands::Escrow(args) => escrow::run(args, data_dir),
        Commands::Params(args) => params::run(args, data_dir),
        Commands::Genesis(args) => genesis::run(args, data_dir),
    }
}
