use anyhow::Context;
use clap::{Parser, Subcommand};
use futures::stream::{BoxStream, StreamExt};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use twitter_scraper::{
    Authentication, HttpTransport, Scraper, ScraperConfig, SequenceConfig, SessionMode,
    MAX_PAGE_SIZE,
};

#[derive(Parser, Debug)]
#[clap(version)]
struct Args {
    /// Path to the authentication details file
    #[clap(short, long, default_value = "./auth.json")]
    auth: PathBuf,
    /// Session mode: guest, logged-in or open-account (guessed from the auth file when omitted)
    #[clap(long)]
    mode: Option<SessionMode>,
    /// Entities requested per page
    #[clap(long, default_value_t = MAX_PAGE_SIZE)]
    page_size: usize,
    /// Consecutive pages without new entities before giving up
    #[clap(long, default_value_t = 2)]
    stall_limit: usize,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tweets posted by a user
    Tweets {
        username: String,
        #[clap(long, default_value_t = 100)]
        count: usize,
    },
    /// Tweets and replies posted by a user
    Replies {
        username: String,
        #[clap(long, default_value_t = 100)]
        count: usize,
    },
    /// Bookmarks of the logged-in account
    Bookmarks {
        #[clap(long, default_value_t = 100)]
        count: usize,
    },
    /// The "Following" home timeline
    Home {
        #[clap(long, default_value_t = 100)]
        count: usize,
    },
    /// The "For you" home timeline
    ForYou {
        #[clap(long, default_value_t = 100)]
        count: usize,
    },
    /// Accounts following a user
    Followers {
        username: String,
        #[clap(long, default_value_t = 100)]
        count: usize,
    },
    /// Accounts a user follows
    Following {
        username: String,
        #[clap(long, default_value_t = 100)]
        count: usize,
    },
    /// Accounts that retweeted a tweet
    Retweeters {
        tweet_id: String,
        #[clap(long, default_value_t = 100)]
        count: usize,
    },
    /// A single tweet, or its whole conversation with --replies
    Tweet {
        tweet_id: String,
        #[clap(long)]
        replies: bool,
        #[clap(long, default_value_t = 100)]
        count: usize,
    },
    /// A user's profile
    Profile { username: String },
    /// An audio space
    Space { space_id: String },
    /// Scheduled tweets of the logged-in account
    Scheduled,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    if let Err(e) = main2().await {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

async fn main2() -> anyhow::Result<()> {
    let args: Args = Args::parse();
    let auth = Authentication::load(&args.auth).await?;
    let mode = args.mode.unwrap_or(if auth.is_logged_in() {
        SessionMode::LoggedIn
    } else {
        SessionMode::Guest
    });
    log::info!("Using {:?} session", mode);

    let transport = HttpTransport::new(&auth).context("Unable to create HTTP client")?;
    let config = ScraperConfig {
        mode,
        page_size: args.page_size,
        sequence: SequenceConfig {
            stall_limit: args.stall_limit,
        },
    };
    let scraper = Scraper::with_config(Arc::new(transport), config);

    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("Interrupted, finishing the current page");
            token.cancel();
        }
    });

    match args.command {
        Command::Tweets { username, count } => {
            print_stream(scraper.get_tweets(&username, count, cancel)).await
        }
        Command::Replies { username, count } => {
            print_stream(scraper.get_tweets_and_replies(&username, count, cancel)).await
        }
        Command::Bookmarks { count } => print_stream(scraper.get_bookmarks(count, cancel)).await,
        Command::Home { count } => print_stream(scraper.get_home_tweets(count, cancel)).await,
        Command::ForYou { count } => print_stream(scraper.get_for_you_tweets(count, cancel)).await,
        Command::Followers { username, count } => {
            print_stream(scraper.get_followers(&username, count, cancel)).await
        }
        Command::Following { username, count } => {
            print_stream(scraper.get_following(&username, count, cancel)).await
        }
        Command::Retweeters { tweet_id, count } => {
            print_stream(scraper.get_retweeters(&tweet_id, count, cancel)).await
        }
        Command::Tweet {
            tweet_id,
            replies: true,
            count,
        } => print_stream(scraper.get_tweet_replies(&tweet_id, count, cancel)).await,
        Command::Tweet { tweet_id, .. } => {
            let tweet = scraper
                .get_tweet(&tweet_id)
                .await
                .context("Unable to load tweet")?;
            print_json(&tweet)
        }
        Command::Profile { username } => {
            let profile = scraper
                .get_profile(&username)
                .await
                .with_context(|| format!("Unable to load profile of @{}", username))?;
            print_json(&profile)
        }
        Command::Space { space_id } => {
            let space = scraper
                .get_space(&space_id)
                .await
                .context("Unable to load space")?;
            print_json(&space)
        }
        Command::Scheduled => {
            let tweets = scraper
                .fetch_scheduled_tweets()
                .await
                .context("Unable to load scheduled tweets")?;
            tweets.iter().try_for_each(print_json)
        }
    }
}

/// Prints every item as one JSON line. Stops at the first error.
async fn print_stream<T: Serialize>(
    mut stream: BoxStream<'_, twitter_scraper::Result<T>>,
) -> anyhow::Result<()> {
    let mut printed = 0;
    while let Some(item) = stream.next().await {
        let item = item.with_context(|| format!("Failed after {} items", printed))?;
        print_json(&item)?;
        printed += 1;
    }
    log::info!("Printed {} items", printed);
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let line = serde_json::to_string(value).context("Unable to serialize output")?;
    println!("{}", line);
    Ok(())
}
