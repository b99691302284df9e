//! Counter commands.

use crate::app::App;
use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use minikeeper_example::{MsgIncrementCounter, MsgServer};
use std::path::Path;

#[derive(Args)]
pub struct CounterArgs {
    #[command(subcommand)]
    command: CounterCommand,
}

#[derive(Subcommand)]
enum CounterCommand {
    /// Add one to the sender's counter
    Increment {
        #[arg(short, long)]
        sender: String,
    },
    /// Show an address's counter
    Show { address: String },
    /// List every counter
    List,
}

pub fn run(args: CounterArgs, data_dir: &Path) -> Result<()> {
    let app = App::open(data_dir)?;
    match args.command {
        CounterCommand::Increment { sender } => {
            let msg = MsgIncrementCounter { sender };
            let resp =
                app.execute(|ctx| Ok(MsgServer::new(&app.example).increment_counter(ctx, &msg)?))?;
            println!(
                "{}  Counter of {} is now {}",
                "✓".green().bold(),
                msg.sender.bright_yellow(),
                resp.count.to_string().bright_cyan()
            );
        }
        CounterCommand::Show { address } => {
            let ctx = app.query_context()?;
            let address = app.example.validate_address(&address)?;
            let count = app.example.get_counter(&ctx, &address)?;
            println!("  {}  {}", address.bright_yellow(), count);
        }
        CounterCommand::List => {
            let ctx = app.query_context()?;
            let counters = app.example.counters(&ctx)?;
            if counters.is_empty() {
                println!("{}", "No counters".yellow());
            }
            for (address, count) in counters {
                println!("  {}  {}", address.bright_yellow(), count);
            }
        }
    }
    Ok(())
}
