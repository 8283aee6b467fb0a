// commands/config.rs - Option and first-run commands

use crate::services::BrowserServices;
use browser_db::Setting;

/// Check if this is the first time the shell is being run
pub async fn is_first_time_install(services: &BrowserServices) -> Result<bool, String> {
    match services.database.is_first_time_install().await {
        Ok(is_first_time) => Ok(is_first_time),
        Err(e) => {
            log::error!("Failed to check first time install status: {}", e);
            Err(format!("Database error: {}", e))
        }
    }
}

/// List every option in name order
pub fn list_options(services: &BrowserServices) -> Vec<Setting> {
    services.options.list()
}

/// Get an option value
pub fn get_option(services: &BrowserServices, key: &str) -> Result<String, String> {
    services.options.get(&key.to_string()).map_err(|e| {
        log::error!("Failed to get option {}: {}", key, e);
        format!("Database error: {}", e)
    })
}

/// Set an option value, creating the option if it does not exist yet
pub async fn set_option(services: &BrowserServices, key: &str, value: &str) -> Result<Setting, String> {
    let result = if services.options.contains(&key.to_string()) {
        services.options.update(&key.to_string(), value.to_string()).await
    } else {
        services
            .options
            .add(Setting::new(key.to_string(), value.to_string()))
            .await
    };

    match result {
        Ok(setting) => {
            log::debug!("✅ Set option {} = {}", key, value);
            Ok(setting)
        }
        Err(e) => {
            log::error!("Failed to set option {} = {}: {}", key, value, e);
            Err(format!("Database error: {}", e))
        }
    }
}

/// Debug command to get the current startup state
pub async fn debug_state(services: &BrowserServices) -> Result<serde_json::Value, String> {
    let first_time = services.database.is_first_time_install().await.unwrap_or(true);

    Ok(serde_json::json!({
        "is_first_time_install": first_time,
        "database": services.database.path().display().to_string(),
        "options": services.options.count(),
        "history": services.history.count(),
        "favorites": services.favorites.count(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use browser_db::options::HOME_PAGE;
    use browser_db::Database;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_set_option_adds_then_updates() {
        let db = Arc::new(Database::new_in_memory().await.unwrap());
        let services = BrowserServices::bootstrap(db).await.unwrap();
        assert!(!is_first_time_install(&services).await.unwrap());

        set_option(&services, "theme", "dark").await.unwrap();
        set_option(&services, HOME_PAGE, "https://example.com").await.unwrap();

        assert_eq!(get_option(&services, "theme").unwrap(), "dark");
        assert_eq!(get_option(&services, HOME_PAGE).unwrap(), "https://example.com");
        assert!(get_option(&services, "missing").is_err());

        let names: Vec<String> = list_options(&services).into_iter().map(|s| s.key).collect();
        assert_eq!(names, vec![HOME_PAGE.to_string(), "theme".to_string()]);

        let state = debug_state(&services).await.unwrap();
        assert_eq!(state["options"], 2);
    }
}
