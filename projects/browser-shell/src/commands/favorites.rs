// commands/favorites.rs - Bookmark commands

use crate::services::BrowserServices;
use browser_db::Bookmark;

pub fn list_bookmarks(services: &BrowserServices) -> Vec<Bookmark> {
    services.favorites.list()
}

/// Bookmark named by its 1-based position in [`list_bookmarks`], its alias
/// or its address
pub fn find_bookmark(services: &BrowserServices, selector: &str) -> Result<Bookmark, String> {
    let selector = selector.trim();
    if selector.is_empty() {
        return Err("Bookmark cannot be empty".to_string());
    }

    if let Ok(position) = selector.parse::<usize>() {
        return position
            .checked_sub(1)
            .ok_or_else(|| format!("No bookmark {}", position))
            .and_then(|index| {
                services
                    .favorites
                    .get_by_index(index)
                    .map_err(|_| format!("No bookmark {} ({} saved)", position, services.favorites.count()))
            });
    }

    services
        .favorites
        .list()
        .into_iter()
        .find(|bookmark| bookmark.value == selector || bookmark.key == selector)
        .ok_or_else(|| format!("No bookmark named {}", selector))
}

/// Bookmark an address; the alias defaults to the address itself
pub async fn add_bookmark(
    services: &BrowserServices,
    address: &str,
    alias: Option<&str>,
) -> Result<Bookmark, String> {
    let address = address.trim();
    if address.is_empty() {
        return Err("Address cannot be empty".to_string());
    }

    match services.favorites.bookmark(address, alias.unwrap_or(address)).await {
        Ok(bookmark) => {
            log::info!("⭐ Bookmarked {}", address);
            Ok(bookmark)
        }
        Err(e) => {
            log::error!("Failed to bookmark {}: {}", address, e);
            Err(format!("Database error: {}", e))
        }
    }
}

pub async fn rename_bookmark(services: &BrowserServices, address: &str, alias: &str) -> Result<Bookmark, String> {
    services.favorites.rename(address, alias).await.map_err(|e| {
        log::error!("Failed to rename bookmark {}: {}", address, e);
        format!("Database error: {}", e)
    })
}

pub async fn delete_bookmark(services: &BrowserServices, address: &str) -> Result<Bookmark, String> {
    services.favorites.delete(&address.to_string()).await.map_err(|e| {
        log::error!("Failed to delete bookmark {}: {}", address, e);
        format!("Database error: {}", e)
    })
}
