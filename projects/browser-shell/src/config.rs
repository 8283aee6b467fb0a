// config.rs - Runtime configuration from flags and environment

use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("browser-shell/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Args)]
pub struct ShellConfig {
    /// Database file (defaults to ~/.browser-shell/browser.db)
    #[arg(long, env = "BROWSER_SHELL_DB", global = true)]
    pub database: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10, global = true)]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT, global = true)]
    pub user_agent: String,

    /// Characters of page body printed per page
    #[arg(long, default_value_t = 2000, global = true)]
    pub max_body_chars: usize,
}

impl ShellConfig {
    pub fn database_path(&self) -> PathBuf {
        self.database
            .clone()
            .unwrap_or_else(browser_db::get_database_path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            database: None,
            timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_body_chars: 2000,
        }
    }
}
