//! CLI argument definitions for the Pokédex browser.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pokedex::config::{BrowseConfig, StoreConfig, DEFAULT_DB_PATH, DEFAULT_SPRITE_DIR};
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[command(
    name = "pokedex",
    version,
    about = "Browse a Pokédex collection in the terminal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Directory holding `<id>.png` sprites.
    #[arg(long = "sprites", env = "POKEDEX_SPRITES", value_name = "DIR", default_value = DEFAULT_SPRITE_DIR, global = true)]
    pub sprite_dir: PathBuf,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Errors only.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a file.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Browse the collection (default).
    Browse,

    /// Seed the SQLite collection from a `.json` or `.csv` file.
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct StoreArgs {
    /// SQLite collection path.
    #[arg(long = "db", env = "POKEDEX_DB", value_name = "PATH", default_value = DEFAULT_DB_PATH, global = true)]
    pub db: PathBuf,

    /// Base URL of a PostgREST/Supabase collection; overrides --db when browsing.
    #[cfg(feature = "remote")]
    #[arg(long = "rest-url", env = "POKEDEX_REST_URL", value_name = "URL", global = true)]
    pub rest_url: Option<String>,

    /// API key sent with REST queries.
    #[cfg(feature = "remote")]
    #[arg(long = "rest-key", env = "POKEDEX_REST_KEY", value_name = "KEY", global = true, hide_env_values = true)]
    pub rest_key: Option<String>,

    /// REST table name.
    #[cfg(feature = "remote")]
    #[arg(long = "rest-table", value_name = "TABLE", default_value = pokedex::config::DEFAULT_REST_TABLE, global = true)]
    pub rest_table: String,
}

impl StoreArgs {
    #[cfg(feature = "remote")]
    pub fn store_config(&self) -> StoreConfig {
        match &self.rest_url {
            Some(url) => StoreConfig::Rest {
                url: url.clone(),
                api_key: self.rest_key.clone(),
                table: self.rest_table.clone(),
            },
            None => self.sqlite_config(),
        }
    }

    #[cfg(not(feature = "remote"))]
    pub fn store_config(&self) -> StoreConfig {
        self.sqlite_config()
    }

    fn sqlite_config(&self) -> StoreConfig {
        StoreConfig::Sqlite {
            path: self.db.clone(),
        }
    }
}

impl Cli {
    pub fn level_filter(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::ERROR;
        }
        match self.verbose {
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    pub fn browse_config(&self) -> BrowseConfig {
        BrowseConfig {
            store: self.store.store_config(),
            sprite_dir: self.sprite_dir.clone(),
        }
    }
}
