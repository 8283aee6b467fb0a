// commands/history.rs - History listing and deletion

use crate::services::BrowserServices;
use browser_db::VisitedAddress;
use serde::Serialize;

/// History row as shown to the user
#[derive(Debug, Clone, Serialize)]
pub struct HistoryRow {
    pub key: i64,
    pub address: String,
    pub visited_at: Option<String>,
}

impl From<VisitedAddress> for HistoryRow {
    fn from(visit: VisitedAddress) -> Self {
        Self {
            visited_at: visit.visited_at().map(|t| t.to_rfc3339()),
            key: visit.key,
            address: visit.value,
        }
    }
}

/// Newest first
pub fn list_history(services: &BrowserServices) -> Vec<HistoryRow> {
    services.history.recent().into_iter().map(HistoryRow::from).collect()
}

/// Entry `position` of the newest-first listing, counting from 1
pub fn history_entry(services: &BrowserServices, position: usize) -> Result<VisitedAddress, String> {
    let count = services.history.count();
    let index = count
        .checked_sub(position)
        .filter(|_| position > 0)
        .ok_or_else(|| format!("No history entry {} ({} recorded)", position, count))?;

    services.history.get_by_index(index).map_err(|e| {
        log::error!("Failed to read history entry {}: {}", position, e);
        format!("Database error: {}", e)
    })
}

pub async fn delete_history_entry(services: &BrowserServices, key: i64) -> Result<HistoryRow, String> {
    match services.history.delete(&key).await {
        Ok(visit) => {
            log::info!("Deleted history entry {}", key);
            Ok(visit.into())
        }
        Err(e) => {
            log::error!("Failed to delete history entry {}: {}", key, e);
            Err(format!("Database error: {}", e))
        }
    }
}

pub async fn clear_history(services: &BrowserServices) -> Result<usize, String> {
    services.history.clear().await.map_err(|e| {
        log::error!("Failed to clear history: {}", e);
        format!("Database error: {}", e)
    })
}
