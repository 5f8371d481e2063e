//! Resolved runtime configuration for the browser.

use std::path::PathBuf;

/// Default SQLite collection path.
pub const DEFAULT_DB_PATH: &str = "pokedex.db";

/// Default sprite directory; sprites live at `<dir>/<id>.png`.
pub const DEFAULT_SPRITE_DIR: &str = "sprites";

/// Default REST table name.
pub const DEFAULT_REST_TABLE: &str = "pokemon";

/// Where the entry collection lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Sqlite {
        path: PathBuf,
    },
    #[cfg(feature = "remote")]
    Rest {
        url: String,
        api_key: Option<String>,
        table: String,
    },
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::Sqlite {
            path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

/// Everything the browse command needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseConfig {
    pub store: StoreConfig,
    pub sprite_dir: PathBuf,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            sprite_dir: PathBuf::from(DEFAULT_SPRITE_DIR),
        }
    }
}
