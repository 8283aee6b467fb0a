// commands/mod.rs - Command modules used by the CLI

pub mod config;
pub mod favorites;
pub mod history;

// Re-export common commands
pub use config::{debug_state, get_option, is_first_time_install, list_options, set_option};
pub use favorites::{add_bookmark, delete_bookmark, find_bookmark, list_bookmarks, rename_bookmark};
pub use history::{clear_history, delete_history_entry, history_entry, list_history, HistoryRow};
