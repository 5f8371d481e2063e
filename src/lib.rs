// Pokédex Browser - Core Library
// Exposes all modules for use in the browser, the importer, and tests

pub mod config;
pub mod db;
pub mod display;
pub mod error;
pub mod filter;
pub mod loader;
pub mod logging;
pub mod sprite;
pub mod store;

#[cfg(feature = "remote")]
pub mod remote;

// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use config::{BrowseConfig, StoreConfig};
pub use db::{
    Entry,
    setup_database, insert_entries, get_all_entries, load_entries_file, verify_count,
};
pub use error::{LoadError, StoreError};
pub use filter::{distinct_types, filter_entries, FilterState};
pub use loader::{load_entries, LoadStatus, PendingLoad};
pub use sprite::{Sprite, SpriteCache};
pub use store::{open_store, EntryStore, SqliteStore};

#[cfg(feature = "remote")]
pub use remote::RestStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
