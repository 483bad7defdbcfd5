use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use songbot::catalog::Catalog;
use songbot::config::Config;
use songbot::reply::{Choice, Reply};
use songbot::SongBot;

const RELOAD_COMMAND: &str = ":reload";
const QUIT_COMMANDS: [&str; 2] = [":quit", ":q"];

#[derive(Parser)]
#[command(name = "songbot")]
#[command(about = "Song title lookup and lyrics quiz bot", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.songbot/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog JSON file, overrides the config
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the catalog titles a query resolves to
    Resolve {
        /// Free-text song query
        query: String,
    },
    /// Answer a single message as the bot would
    Ask {
        /// Message text
        text: String,
    },
    /// Interactive session on stdin
    Chat,
    /// Show catalog statistics
    Catalog,
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so replies stay clean on stdout
    let logs = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    if cli.log_json {
        logs.json().init();
    } else {
        logs.init();
    }

    match cli.command {
        Some(Commands::Version) | None => {
            println!("songbot {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Resolve { query }) => {
            let (bot, _) = open_bot(cli.config, cli.catalog)?;
            let titles = bot.resolve(&query).await;
            if titles.is_empty() {
                println!("(no match)");
            }
            for title in titles {
                println!("{}", title);
            }
        }
        Some(Commands::Ask { text }) => {
            let (bot, config) = open_bot(cli.config, cli.catalog)?;
            let reply = bot.handle_text(&text).await?;
            println!("{}", reply.to_text(config.reply.label_max_chars));
        }
        Some(Commands::Chat) => {
            let (bot, config) = open_bot(cli.config, cli.catalog)?;
            chat(&bot, &config).await?;
        }
        Some(Commands::Catalog) => {
            let (bot, config) = open_bot(cli.config, cli.catalog)?;
            let catalog = bot.catalog().await;
            let with_lyrics = catalog
                .songs()
                .iter()
                .filter(|s| !s.lyrics.trim().is_empty())
                .count();
            println!("Catalog: {}", config.catalog_path.display());
            println!("  songs:        {}", catalog.len());
            println!("  with lyrics:  {}", with_lyrics);
            println!("  index tokens: {}", catalog.index().token_count());
        }
    }

    Ok(())
}

/// Load config and catalog and build the bot.
fn open_bot(
    config_path: Option<PathBuf>,
    catalog_path: Option<PathBuf>,
) -> anyhow::Result<(SongBot, Config)> {
    let config_path = config_path.unwrap_or_else(Config::default_path);
    let mut config = Config::load_from(&config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;
    if let Some(catalog_path) = catalog_path {
        config.catalog_path = catalog_path;
    }

    let catalog = Catalog::load(&config.catalog_path)
        .with_context(|| format!("loading catalog {}", config.catalog_path.display()))?;
    Ok((SongBot::new(&config, catalog), config))
}

/// Line-oriented chat. A number picks an option from the previous reply.
async fn chat(bot: &SongBot, config: &Config) -> anyhow::Result<()> {
    let label_max = config.reply.label_max_chars;
    println!(
        "songbot chat: type a song title, `lyrics <title>`, `{}` to play, {} to re-read the catalog, {} to leave",
        config.quiz.trigger, RELOAD_COMMAND, QUIT_COMMANDS[0]
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut choices: Vec<Choice> = Vec::new();

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if QUIT_COMMANDS.contains(&input) {
            break;
        }
        if input == RELOAD_COMMAND {
            match bot.reload(&config.catalog_path).await {
                Ok(songs) => println!("Reloaded {} songs", songs),
                Err(e) => println!("Reload failed, keeping current catalog: {}", e),
            }
            continue;
        }

        let picked = input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| choices.get(i).cloned());

        let result = match picked {
            Some(Choice::Text(text)) => bot.handle_text(&text).await,
            Some(Choice::Selection { token, title }) => {
                println!("> {}", title);
                bot.handle_selection(&token, Some(&title)).await
            }
            None => bot.handle_text(input).await,
        };

        match result {
            Ok(reply) => {
                print_reply(&reply, label_max);
                choices = reply.choices();
            }
            Err(e) => {
                warn!(error = %e, "Request failed");
                println!("Error: {}", e);
                choices.clear();
            }
        }
    }

    Ok(())
}

fn print_reply(reply: &Reply, label_max: usize) {
    if let Reply::Quiz { restarted: true, .. } = reply {
        println!("(quiz session could not be read, starting over)");
    }
    println!("{}\n", reply.to_text(label_max));
}
