//! State export and status commands.

use crate::app::App;
use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::Path;

#[derive(Args)]
pub struct GenesisArgs {
    #[command(subcommand)]
    command: GenesisCommand,
}

#[derive(Subcommand)]
enum GenesisCommand {
    /// Print every module's state as JSON
    Export,
    /// Show the current height and state hash
    Status,
}

pub fn run(args: GenesisArgs, data_dir: &Path) -> Result<()> {
    let app = App::open(data_dir)?;
    match args.command {
        GenesisCommand::Export => export(&app),
        GenesisCommand::Status => status(&app),
    }
}

fn export(app: &App) -> Result<()> {
    let ctx = app.query_context()?;

    let balances: Vec<_> = app
        .bank
        .export(&ctx)?
        .into_iter()
        .map(|(address, amount)| serde_json::json!({ "address": address, "amount": amount }))
        .collect();
    let escrows: Vec<_> = app
        .escrow
        .escrows(&ctx)?
        .into_iter()
        .map(|(locker, escrow)| serde_json::json!({ "locker": locker, "escrow": escrow }))
        .collect();

    let state = serde_json::json!({
        "height": ctx.block_height(),
        "bank": {
            "denom": app.config.denom,
            "balances": balances,
        },
        "example": app.example.export_genesis(&ctx)?,
        "escrow": escrows,
    });
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

fn status(app: &App) -> Result<()> {
    println!();
    println!("  Height:     {}", app.height()?.to_string().bright_cyan());
    println!("  State hash: {}", app.state_hash()?.bright_yellow());
    println!("  Authority:  {}", app.config.authority.bright_yellow());
    println!();
    Ok(())
}
