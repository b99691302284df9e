//! Tweet commands.

use crate::app::App;
use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use minikeeper_example::{MsgDeleteTweet, MsgLikeTweet, MsgPostTweet, MsgServer, Tweet};
use std::path::Path;

#[derive(Args)]
pub struct TweetArgs {
    #[command(subcommand)]
    command: TweetCommand,
}

#[derive(Subcommand)]
enum TweetCommand {
    /// Post a tweet
    Post {
        #[arg(short, long)]
        sender: String,

        /// Tweet text
        text: String,
    },
    /// Like a tweet (once per address)
    Like {
        #[arg(short, long)]
        sender: String,

        id: u64,
    },
    /// Delete one of your tweets
    Delete {
        #[arg(short, long)]
        sender: String,

        id: u64,
    },
    /// Show a tweet and who liked it
    Show { id: u64 },
    /// List every tweet
    List,
}

pub fn run(args: TweetArgs, data_dir: &Path) -> Result<()> {
    let app = App::open(data_dir)?;
    let server = MsgServer::new(&app.example);

    match args.command {
        TweetCommand::Post { sender, text } => {
            let msg = MsgPostTweet { sender, text };
            let resp = app.execute(|ctx| Ok(server.post_tweet(ctx, &msg)?))?;
            println!(
                "{}  Posted tweet {}",
                "✓".green().bold(),
                resp.tweet_id.to_string().bright_cyan()
            );
        }
        TweetCommand::Like { sender, id } => {
            let msg = MsgLikeTweet {
                sender,
                tweet_id: id,
            };
            let resp = app.execute(|ctx| Ok(server.like_tweet(ctx, &msg)?))?;
            println!(
                "{}  Liked tweet {} ({} likes)",
                "✓".green().bold(),
                id,
                resp.likes.to_string().bright_cyan()
            );
        }
        TweetCommand::Delete { sender, id } => {
            let msg = MsgDeleteTweet {
                sender,
                tweet_id: id,
            };
            app.execute(|ctx| Ok(server.delete_tweet(ctx, &msg)?))?;
            println!("{}  Deleted tweet {}", "✓".green().bold(), id);
        }
        TweetCommand::Show { id } => {
            let ctx = app.query_context()?;
            let tweet = app.example.get_tweet(&ctx, id)?;
            print_tweet(id, &tweet);
            for voter in app.example.likers(&ctx, id)? {
                println!("    liked by {}", voter.bright_black());
            }
        }
        TweetCommand::List => {
            let ctx = app.query_context()?;
            let tweets = app.example.tweets(&ctx)?;
            if tweets.is_empty() {
                println!("{}", "No tweets".yellow());
            }
            for (id, tweet) in &tweets {
                print_tweet(*id, tweet);
            }
        }
    }
    Ok(())
}

fn print_tweet(id: u64, tweet: &Tweet) {
    println!(
        "  #{} {} (height {}, {} likes)",
        id.to_string().bright_cyan(),
        tweet.creator.bright_yellow(),
        tweet.height,
        tweet.likes
    );
    println!("    {}", tweet.text);
}
