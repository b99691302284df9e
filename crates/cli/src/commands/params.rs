//! Params commands.

use crate::app::App;
use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use minikeeper_example::{MsgServer, MsgUpdateParams, Params};
use std::path::Path;

#[derive(Args)]
pub struct ParamsArgs {
    #[command(subcommand)]
    command: ParamsCommand,
}

#[derive(Subcommand)]
enum ParamsCommand {
    /// Replace the params (authority only)
    Update {
        /// Authority address; defaults to the configured authority
        #[arg(short, long)]
        authority: Option<String>,

        #[arg(long)]
        max_tweet_length: u64,
    },
    /// Show the current params
    Show,
}

pub fn run(args: ParamsArgs, data_dir: &Path) -> Result<()> {
    let app = App::open(data_dir)?;
    match args.command {
        ParamsCommand::Update {
            authority,
            max_tweet_length,
        } => {
            let msg = MsgUpdateParams {
                authority: authority.unwrap_or_else(|| app.config.authority.clone()),
                params: Params { max_tweet_length },
            };
            app.execute(|ctx| Ok(MsgServer::new(&app.example).update_params(ctx, &msg)?))?;
            println!("{}  Params updated", "✓".green().bold());
            print_params(&msg.params);
        }
        ParamsCommand::Show => {
            let ctx = app.query_context()?;
            print_params(&app.example.get_params(&ctx)?);
        }
    }
    Ok(())
}

fn print_params(params: &Params) {
    println!(
        "    Max tweet length: {}",
        params.max_tweet_length.to_string().bright_cyan()
    );
}
