use anyhow::Context;
use browser_shell::{commands, HttpFetcher, ShellConfig, TabWindow, TerminalRenderer};
use clap::{Parser, Subcommand};
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "browser-shell", version, about = "Minimal browser shell")]
struct Cli {
    #[command(flatten)]
    config: ShellConfig,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open a window and read navigation commands from stdin
    Browse {
        /// Address to open instead of the home page
        address: Option<String>,
    },
    /// Inspect or edit browsing history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Manage bookmarks
    Bookmarks {
        #[command(subcommand)]
        action: BookmarkAction,
    },
    /// Read or change options
    Options {
        #[command(subcommand)]
        action: OptionAction,
    },
    /// Print startup state as JSON
    Debug,
}

#[derive(Debug, Subcommand)]
enum HistoryAction {
    List {
        #[arg(long)]
        json: bool,
    },
    Delete {
        key: i64,
    },
    Clear,
}

#[derive(Debug, Subcommand)]
enum BookmarkAction {
    List,
    Add {
        address: String,
        alias: Option<String>,
    },
    Rename {
        address: String,
        alias: String,
    },
    Delete {
        address: String,
    },
}

#[derive(Debug, Subcommand)]
enum OptionAction {
    List,
    Get { key: String },
    Set { key: String, value: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    browser_shell::init_logging();

    let services = browser_shell::start(&cli.config)
        .await
        .context("failed to start browser shell")?;

    match cli.command.unwrap_or(Command::Browse { address: None }) {
        Command::Browse { address } => {
            let fetcher = HttpFetcher::new(cli.config.timeout(), &cli.config.user_agent)?;
            let renderer = TerminalRenderer::new(std::io::stdout(), cli.config.max_body_chars);
            let mut window = TabWindow::new(services.clone(), Arc::new(fetcher), renderer);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            browser_shell::browse::browse(&mut window, &services, stdin, address.as_deref()).await?;
        }
        Command::History { action } => match action {
            HistoryAction::List { json } => {
                let rows = commands::list_history(&services);
                if json {
                    println!("{}", serde_json::to_string_pretty(&rows)?);
                } else {
                    for row in rows {
                        println!("{}\t{}\t{}", row.key, row.visited_at.unwrap_or_default(), row.address);
                    }
                }
            }
            HistoryAction::Delete { key } => {
                let row = commands::delete_history_entry(&services, key)
                    .await
                    .map_err(anyhow::Error::msg)?;
                println!("Deleted {}", row.address);
            }
            HistoryAction::Clear => {
                let removed = commands::clear_history(&services).await.map_err(anyhow::Error::msg)?;
                println!("Removed {} entries", removed);
            }
        },
        Command::Bookmarks { action } => match action {
            BookmarkAction::List => {
                for bookmark in commands::list_bookmarks(&services) {
                    println!("{}\t{}", bookmark.value, bookmark.key);
                }
            }
            BookmarkAction::Add { address, alias } => {
                let bookmark = commands::add_bookmark(&services, &address, alias.as_deref())
                    .await
                    .map_err(anyhow::Error::msg)?;
                println!("Bookmarked {} as {}", bookmark.key, bookmark.value);
            }
            BookmarkAction::Rename { address, alias } => {
                commands::rename_bookmark(&services, &address, &alias)
                    .await
                    .map_err(anyhow::Error::msg)?;
            }
            BookmarkAction::Delete { address } => {
                commands::delete_bookmark(&services, &address)
                    .await
                    .map_err(anyhow::Error::msg)?;
            }
        },
        Command::Options { action } => match action {
            OptionAction::List => {
                for setting in commands::list_options(&services) {
                    println!("{} = {}", setting.key, setting.value);
                }
            }
            OptionAction::Get { key } => {
                println!("{}", commands::get_option(&services, &key).map_err(anyhow::Error::msg)?);
            }
            OptionAction::Set { key, value } => {
                commands::set_option(&services, &key, &value)
                    .await
                    .map_err(anyhow::Error::msg)?;
            }
        },
        Command::Debug => {
            let state = commands::debug_state(&services).await.map_err(anyhow::Error::msg)?;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
    }

    Ok(())
}
