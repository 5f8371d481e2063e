mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;
use std::path::Path;

use crate::cli::{Cli, Command};
use pokedex::logging::{init_logging, LogConfig};
use pokedex::{insert_entries, load_entries_file, setup_database, verify_count};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Command::Import { file }) => {
            init_logging(&LogConfig::for_import(cli.level_filter(), cli.log_file.clone()))
                .context("Failed to initialize logging")?;
            run_import(file, &cli.store.db)?;
        }
        None | Some(Command::Browse) => {
            init_logging(&LogConfig::for_browse(cli.level_filter(), cli.log_file.clone()))
                .context("Failed to initialize logging")?;
            run_ui_mode(&cli)?;
        }
    }

    Ok(())
}

fn run_import(file: &Path, db_path: &Path) -> Result<()> {
    println!("📥 Import: {} → {}", file.display(), db_path.display());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // 1. Load entries
    println!("\n📂 Loading entries...");
    let entries = load_entries_file(file)
        .with_context(|| format!("Failed to load entries from {}", file.display()))?;
    println!("✓ Loaded {} entries", entries.len());

    // 2. Setup database
    println!("\n🔧 Setting up database...");
    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    setup_database(&conn)?;
    println!("✓ Database initialized with WAL mode");

    // 3. Insert entries
    println!("\n💾 Inserting entries...");
    insert_entries(&conn, &entries)?;

    // 4. Verify count
    let count = verify_count(&conn)?;
    println!("\n✅ Database contains {} entries", count);

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(cli: &Cli) -> Result<()> {
    let config = cli.browse_config();
    pokedex::ui::run_ui(&config)
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_cli: &Cli) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or seed a database with: pokedex import <FILE>");
    std::process::exit(1);
}
