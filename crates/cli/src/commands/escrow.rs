//! Escrow commands.

use crate::app::App;
use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use minikeeper_core::Coin;
use minikeeper_escrow::{Escrow, MsgClaimEscrow, MsgCreateEscrow, MsgServer};
use std::path::Path;

#[derive(Args)]
pub struct EscrowArgs {
    #[command(subcommand)]
    command: EscrowCommand,
}

#[derive(Subcommand)]
enum EscrowCommand {
    /// Lock coins in exchange for a payment
    Create {
        #[arg(short, long)]
        creator: String,

        /// Coins to lock, e.g. 100stake
        #[arg(short, long)]
        locked: Coin,

        /// Coins wanted in exchange, e.g. 50stake
        #[arg(short, long)]
        wanted: Coin,
    },
    /// Pay an escrow's wanted coins and take its locked coins
    Claim {
        #[arg(short, long)]
        claimer: String,

        /// Address that created the escrow
        #[arg(short, long)]
        locker: String,
    },
    /// Show the open escrow of an address
    Show { locker: String },
    /// List every open escrow
    List,
}

pub fn run(args: EscrowArgs, data_dir: &Path) -> Result<()> {
    let app = App::open(data_dir)?;
    let server = MsgServer::new(&app.escrow);

    match args.command {
        EscrowCommand::Create {
            creator,
            locked,
            wanted,
        } => {
            let msg = MsgCreateEscrow {
                creator,
                locked,
                wanted,
            };
            app.execute(|ctx| Ok(server.create_escrow(ctx, &msg)?))?;
            println!("{}  Escrow opened", "✓".green().bold());
            print_escrow(
                &msg.creator,
                &Escrow {
                    locked: msg.locked.clone(),
                    wanted: msg.wanted.clone(),
                },
            );
        }
        EscrowCommand::Claim { claimer, locker } => {
            let msg = MsgClaimEscrow { claimer, locker };
            let resp = app.execute(|ctx| Ok(server.claim_escrow(ctx, &msg)?))?;
            println!("{}  Escrow claimed", "✓".green().bold());
            println!("    Paid:     {}", resp.paid.to_string().bright_cyan());
            println!("    Received: {}", resp.received.to_string().bright_cyan());
        }
        EscrowCommand::Show { locker } => {
            let ctx = app.query_context()?;
            let escrow = app.escrow.get_escrow(&ctx, &locker)?;
            print_escrow(&locker, &escrow);
        }
        EscrowCommand::List => {
            let ctx = app.query_context()?;
            let escrows = app.escrow.escrows(&ctx)?;
            if escrows.is_empty() {
                println!("{}", "No open escrows".yellow());
            }
            for (locker, escrow) in &escrows {
                print_escrow(locker, escrow);
            }
        }
    }
    Ok(())
}

fn print_escrow(locker: &str, escrow: &Escrow) {
    println!(
        "  {}  locked {} for {}",
        locker.bright_yellow(),
        escrow.locked.to_string().bright_cyan(),
        escrow.wanted.to_string().bright_cyan()
    );
}
