//! Bank commands.

use crate::app::App;
use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use minikeeper_bank::{MsgBurn, MsgMintCoins, MsgServer, MsgTransferCoins};
use std::path::Path;

#[derive(Args)]
pub struct BankArgs {
    #[command(subcommand)]
    command: BankCommand,
}

#[derive(Subcommand)]
enum BankCommand {
    /// Mint coins (authority only)
    Mint {
        /// Authority address; defaults to the configured authority
        #[arg(short, long)]
        from: Option<String>,

        /// Recipient address (hex format)
        #[arg(short, long)]
        to: String,

        /// Amount to mint
        #[arg(short, long)]
        amount: u64,
    },
    /// Send coins to another address
    Transfer {
        #[arg(short, long)]
        from: String,

        #[arg(short, long)]
        to: String,

        #[arg(short, long)]
        amount: u64,
    },
    /// Destroy coins
    Burn {
        #[arg(short, long)]
        from: String,

        #[arg(short, long)]
        amount: u64,
    },
    /// Check an address balance
    Balance {
        /// Account address (hex format)
        address: String,
    },
    /// List every balance
    Export,
}

pub fn run(args: BankArgs, data_dir: &Path) -> Result<()> {
    let app = App::open(data_dir)?;
    match args.command {
        BankCommand::Mint { from, to, amount } => {
            let authority = from.unwrap_or_else(|| app.config.authority.clone());
            mint(&app, authority, to, amount)
        }
        BankCommand::Transfer { from, to, amount } => transfer(&app, from, to, amount),
        BankCommand::Burn { from, amount } => burn(&app, from, amount),
        BankCommand::Balance { address } => balance(&app, address),
        BankCommand::Export => export(&app),
    }
}

fn mint(app: &App, authority: String, recipient: String, amount: u64) -> Result<()> {
    let msg = MsgMintCoins {
        authority,
        recipient,
        amount,
    };
    let resp = app.execute(|ctx| Ok(MsgServer::new(&app.bank).mint_coins(ctx, &msg)?))?;

    println!("{}  Minted {} {}", "✓".green().bold(), amount, app.config.denom);
    println!("    To:      {}", msg.recipient.bright_yellow());
    println!("    Balance: {}", resp.balance.to_string().bright_cyan());
    Ok(())
}

fn transfer(app: &App, sender: String, receiver: String, amount: u64) -> Result<()> {
    let msg = MsgTransferCoins {
        sender,
        receiver,
        amount,
    };
    let resp = app.execute(|ctx| Ok(MsgServer::new(&app.bank).transfer_coins(ctx, &msg)?))?;

    println!(
        "{}  Transferred {} {}",
        "✓".green().bold(),
        amount,
        app.config.denom
    );
    println!(
        "    {} -> {}",
        msg.sender.bright_yellow(),
        msg.receiver.bright_yellow()
    );
    println!(
        "    Balances: {} / {}",
        resp.sender_balance.to_string().bright_cyan(),
        resp.receiver_balance.to_string().bright_cyan()
    );
    Ok(())
}

fn burn(app: &App, sender: String, amount: u64) -> Result<()> {
    let msg = MsgBurn { sender, amount };
    let resp = app.execute(|ctx| Ok(MsgServer::new(&app.bank).burn(ctx, &msg)?))?;

    println!("{}  Burned {} {}", "✓".green().bold(), amount, app.config.denom);
    println!("    Balance: {}", resp.balance.to_string().bright_cyan());
    Ok(())
}

fn balance(app: &App, address: String) -> Result<()> {
    let ctx = app.query_context()?;
    let address = app.bank.validate_address(&address)?;
    let balance = app.bank.balance(&ctx, &address)?;

    println!();
    println!("  Address: {}", address.bright_yellow());
    println!(
        "  Balance: {} {}",
        balance.to_string().bright_cyan(),
        app.config.denom
    );
    println!();
    Ok(())
}

fn export(app: &App) -> Result<()> {
    let ctx = app.query_context()?;
    let balances = app.bank.export(&ctx)?;

    if balances.is_empty() {
        println!("{}", "No balances".yellow());
        return Ok(());
    }
    for (address, amount) in &balances {
        println!("  {}  {}", address.bright_yellow(), amount);
    }
    println!();
    println!(
        "  Total supply: {} {}",
        app.bank.total_supply(&ctx)?.to_string().bright_cyan(),
        app.config.denom
    );
    Ok(())
}
