//! Initialize data directory command.

use crate::app::{App, Config};
use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use minikeeper_core::Address;
use minikeeper_example::{GenesisState, Params, DEFAULT_MAX_TWEET_LENGTH};
use std::fs;
use std::path::Path;

#[derive(Args)]
pub struct InitArgs {
    /// Authority address (hex). Defaults to the `gov` module account
    #[arg(short, long)]
    authority: Option<String>,

    /// Denomination handled by the bank
    #[arg(long, default_value = "stake")]
    denom: String,

    /// Maximum tweet length, in characters
    #[arg(long, default_value_t = DEFAULT_MAX_TWEET_LENGTH)]
    max_tweet_length: u64,
}

pub fn run(args: InitArgs, data_dir: &Path) -> Result<()> {
    println!("{}", "Initializing minikeeper...".bold().cyan());
    println!();

    if Config::path(data_dir).exists() {
        bail!(
            "{} already exists; remove it to start over",
            Config::path(data_dir).display()
        );
    }

    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;
    println!("{}  Created data directory", "✓".green().bold());

    let authority = args
        .authority
        .unwrap_or_else(|| Address::module("gov").to_hex());
    let config = Config {
        authority,
        denom: args.denom,
        example: GenesisState {
            params: Params {
                max_tweet_length: args.max_tweet_length,
            },
            counters: Vec::new(),
        },
    };

    // Keeper construction validates the authority and denom before anything
    // is written.
    let app = App::open_with(data_dir, config)?;
    app.init_genesis()
        .with_context(|| "Failed to load genesis state")?;
    let config_file = app.config.save(data_dir)?;

    println!("{}  Loaded genesis state", "✓".green().bold());
    println!("    Authority: {}", app.config.authority.bright_yellow());
    println!("    Denom:     {}", app.config.denom.bright_cyan());
    println!("    Height:    {}", "0".bright_cyan());
    println!(
        "{}  Saved config to: {}",
        "✓".green().bold(),
        config_file.display().to_string().bright_black()
    );

    println!();
    println!("{}", "Store initialized successfully!".green().bold());
    println!();
    println!("Next steps:");
    println!(
        "  • Use {} to create coins",
        "minikeeper bank mint".bright_cyan()
    );
    println!(
        "  • Use {} to post a tweet",
        "minikeeper tweet post".bright_cyan()
    );

    Ok(())
}
