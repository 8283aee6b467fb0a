// browse.rs - Interactive loop driving one tab window

use crate::commands;
use crate::errors::Result;
use crate::fetch::Fetcher;
use crate::render::Render;
use crate::services::BrowserServices;
use crate::window::TabWindow;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Go(String),
    Back,
    Forward,
    Refresh,
    Home,
    Bookmark(Option<String>),
    Bookmarks,
    /// Bookmark position, alias or address
    OpenBookmark(String),
    History,
    /// 1-based position in the newest-first history listing
    OpenHistory(String),
    Quit,
    Unknown(String),
}

impl BrowseCommand {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "go" | "open" => BrowseCommand::Go(rest.to_string()),
            "back" | "b" => BrowseCommand::Back,
            "forward" | "f" => BrowseCommand::Forward,
            "refresh" | "r" => BrowseCommand::Refresh,
            "home" => BrowseCommand::Home,
            "bookmark" => BrowseCommand::Bookmark((!rest.is_empty()).then(|| rest.to_string())),
            "bookmarks" => match rest.split_once(char::is_whitespace) {
                None if rest.is_empty() => BrowseCommand::Bookmarks,
                Some(("open", selector)) => BrowseCommand::OpenBookmark(selector.trim().to_string()),
                _ => BrowseCommand::Unknown(line.to_string()),
            },
            "history" => match rest.split_once(char::is_whitespace) {
                None if rest.is_empty() => BrowseCommand::History,
                Some(("open", position)) => BrowseCommand::OpenHistory(position.trim().to_string()),
                _ => BrowseCommand::Unknown(line.to_string()),
            },
            "quit" | "exit" | "q" => BrowseCommand::Quit,
            _ if word.contains("://") && rest.is_empty() => BrowseCommand::Go(word.to_string()),
            _ => BrowseCommand::Unknown(line.to_string()),
        };
        Some(command)
    }
}

/// Read commands until `quit` or end of input. Navigation failures are
/// already shown by the window, so they do not end the loop.
pub async fn browse<F, R, I>(
    window: &mut TabWindow<F, R>,
    services: &BrowserServices,
    input: I,
    start: Option<&str>,
) -> Result<()>
where
    F: Fetcher,
    R: Render,
    I: AsyncBufRead + Unpin,
{
    let first = match start {
        Some(address) => window.load_url_with_history(address).await.map(|_| ()),
        None => window.show_home_page().await,
    };
    if let Err(e) = first {
        log::debug!("Initial page failed: {}", e);
    }

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.map_err(|e| {
        crate::errors::ShellError::Generic(format!("failed to read input: {}", e))
    })? {
        let Some(command) = BrowseCommand::parse(&line) else {
            continue;
        };

        let outcome = match command {
            BrowseCommand::Go(address) => window.load_url_with_history(&address).await.map(|_| ()),
            BrowseCommand::Back => {
                window.back();
                Ok(())
            }
            BrowseCommand::Forward => {
                window.forward();
                Ok(())
            }
            BrowseCommand::Refresh => window.refresh().await.map(|_| ()),
            BrowseCommand::Home => window.home().await.map(|_| ()),
            BrowseCommand::Bookmark(alias) => bookmark_current(window, services, alias.as_deref()).await,
            BrowseCommand::Bookmarks => {
                let listing = commands::list_bookmarks(services)
                    .into_iter()
                    .enumerate()
                    .map(|(i, bookmark)| format!("{:>3}. {}  {}", i + 1, bookmark.value, bookmark.key))
                    .collect::<Vec<_>>()
                    .join("\n");
                window.show_message(&listing, "Bookmarks");
                Ok(())
            }
            BrowseCommand::OpenBookmark(selector) => match commands::find_bookmark(services, &selector) {
                Ok(bookmark) => window.load_url_with_history(&bookmark.key).await.map(|_| ()),
                Err(e) => {
                    window.show_message(&e, "Bookmarks");
                    Ok(())
                }
            },
            BrowseCommand::History => {
                let listing = commands::list_history(services)
                    .into_iter()
                    .enumerate()
                    .map(|(i, row)| {
                        format!("{:>3}. {}  {}", i + 1, row.visited_at.unwrap_or_default(), row.address)
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                window.show_message(&listing, "History");
                Ok(())
            }
            BrowseCommand::OpenHistory(position) => {
                let visit = position
                    .parse::<usize>()
                    .map_err(|_| format!("Not a history position: {}", position))
                    .and_then(|position| commands::history_entry(services, position));
                match visit {
                    Ok(visit) => window.load_url_with_history(&visit.value).await.map(|_| ()),
                    Err(e) => {
                        window.show_message(&e, "History");
                        Ok(())
                    }
                }
            }
            BrowseCommand::Quit => break,
            BrowseCommand::Unknown(text) => {
                window.show_message(&format!("Unknown command: {}", text), "Help");
                Ok(())
            }
        };

        if let Err(e) = outcome {
            log::debug!("Command failed: {}", e);
        }
    }

    window.close();
    Ok(())
}

async fn bookmark_current<F: Fetcher, R: Render>(
    window: &mut TabWindow<F, R>,
    services: &BrowserServices,
    alias: Option<&str>,
) -> Result<()> {
    let Some(address) = window.stack().current().map(|e| e.visit.address().to_string()) else {
        window.show_message("Nothing to bookmark yet", "Bookmark");
        return Ok(());
    };

    match commands::add_bookmark(services, &address, alias).await {
        Ok(bookmark) => window.show_message(&format!("{} -> {}", bookmark.key, bookmark.value), "Bookmarked"),
        Err(e) => window.show_message(&e, "Bookmark failed"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(BrowseCommand::parse(""), None);
        assert_eq!(
            BrowseCommand::parse("go https://a.test"),
            Some(BrowseCommand::Go("https://a.test".into()))
        );
        assert_eq!(
            BrowseCommand::parse("https://b.test"),
            Some(BrowseCommand::Go("https://b.test".into()))
        );
        assert_eq!(BrowseCommand::parse(" back "), Some(BrowseCommand::Back));
        assert_eq!(BrowseCommand::parse("bookmark"), Some(BrowseCommand::Bookmark(None)));
        assert_eq!(
            BrowseCommand::parse("bookmark My Site"),
            Some(BrowseCommand::Bookmark(Some("My Site".into())))
        );
        assert_eq!(BrowseCommand::parse("history"), Some(BrowseCommand::History));
        assert_eq!(
            BrowseCommand::parse("history open 2"),
            Some(BrowseCommand::OpenHistory("2".into()))
        );
        assert_eq!(BrowseCommand::parse("bookmarks"), Some(BrowseCommand::Bookmarks));
        assert_eq!(
            BrowseCommand::parse("bookmarks open My Site"),
            Some(BrowseCommand::OpenBookmark("My Site".into()))
        );
        assert_eq!(
            BrowseCommand::parse("history wipe"),
            Some(BrowseCommand::Unknown("history wipe".into()))
        );
        assert_eq!(BrowseCommand::parse("q"), Some(BrowseCommand::Quit));
        assert_eq!(
            BrowseCommand::parse("dance"),
            Some(BrowseCommand::Unknown("dance".into()))
        );
    }
}
