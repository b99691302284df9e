//! minikeeper CLI entry point.

use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

mod app;
mod commands;

#[derive(Parser)]
#[command(name = "minikeeper")]
#[command(about = "Run bank, example and escrow module messages against a local store", long_about = None)]
struct Cli {
    /// Directory holding config.json and the database
    #[arg(short, long, global = true, default_value = "./data")]
    data_dir: PathBuf,

    /// Log keeper activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<commands::Commands>,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(cmd) => {
            if let Err(e) = commands::run(cmd, &cli.data_dir) {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        }
        None => {
            println!("minikeeper - typed module state over a local key-value store");
            println!("Run 'minikeeper --help' for usage information.");
        }
    }
}
