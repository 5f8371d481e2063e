use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// One Pokédex record
/// Immutable once loaded - the browser never writes back
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Entry {
    /// National dex number, unique and the stable sort key
    pub id: i64,

    pub name: String,

    /// Elemental types in display order (compared case-insensitively)
    pub types: Vec<String>,

    pub description: String,
}

impl Entry {
    pub fn new(id: i64, name: &str, types: &[&str], description: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            types: types.iter().map(|t| t.to_string()).collect(),
            description: description.to_string(),
        }
    }

    /// Check the record is displayable: a name and at least one type
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("Entry #{} has a blank name", self.id);
        }
        if self.types.iter().all(|t| t.trim().is_empty()) {
            bail!("Entry #{} ({}) has no types", self.id, self.name);
        }
        Ok(())
    }

    /// Does this entry carry the given type? (case-insensitive, exact token)
    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t.eq_ignore_ascii_case(type_name))
    }
}

/// CSV row shape: `types` is a `|`-separated list
#[derive(Debug, Deserialize)]
struct CsvRow {
    id: i64,
    name: String,
    types: String,
    description: String,
}

impl From<CsvRow> for Entry {
    fn from(row: CsvRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            types: row
                .types
                .split('|')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            description: row.description,
        }
    }
}

pub fn setup_database(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    // ==========================================================================
    // Pokemon Table (types kept as a JSON array column)
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS pokemon (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            types TEXT NOT NULL,
            description TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}

/// Load an import file, picking the format from the extension
pub fn load_entries_file(path: &Path) -> Result<Vec<Entry>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let entries = match extension.as_deref() {
        Some("csv") => load_csv(path)?,
        Some("json") => load_json(path)?,
        _ => bail!("Unsupported import file (expected .csv or .json): {:?}", path),
    };

    for entry in &entries {
        entry.validate()?;
    }

    Ok(entries)
}

pub fn load_csv(csv_path: &Path) -> Result<Vec<Entry>> {
    let mut rdr = csv::Reader::from_path(csv_path).context("Failed to open CSV file")?;

    let mut entries = Vec::new();

    for result in rdr.deserialize() {
        let row: CsvRow = result.context("Failed to deserialize entry")?;
        entries.push(Entry::from(row));
    }

    debug!(count = entries.len(), path = ?csv_path, "parsed CSV import");
    Ok(entries)
}

pub fn load_json(json_path: &Path) -> Result<Vec<Entry>> {
    let content = fs::read_to_string(json_path)
        .with_context(|| format!("Failed to read JSON file: {:?}", json_path))?;

    let entries: Vec<Entry> =
        serde_json::from_str(&content).context("Failed to parse entries JSON")?;

    debug!(count = entries.len(), path = ?json_path, "parsed JSON import");
    Ok(entries)
}

/// Insert entries, skipping ids that are already present
/// Returns the number of rows actually inserted
pub fn insert_entries(conn: &Connection, entries: &[Entry]) -> Result<usize> {
    let mut inserted = 0;
    let mut duplicates = 0;

    for entry in entries {
        let types_json = serde_json::to_string(&entry.types)?;

        let result = conn.execute(
            "INSERT INTO pokemon (id, name, types, description) VALUES (?1, ?2, ?3, ?4)",
            params![entry.id, entry.name, types_json, entry.description],
        );

        match result {
            Ok(_) => inserted += 1,
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                debug!(id = entry.id, "skipping duplicate entry");
                duplicates += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!(inserted, duplicates, "import finished");
    println!("✓ Inserted: {} entries", inserted);
    println!("✓ Skipped duplicates: {}", duplicates);

    Ok(inserted)
}

/// Select every entry, ordered by id ascending
pub fn get_all_entries(conn: &Connection) -> rusqlite::Result<Vec<Entry>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, types, description
         FROM pokemon
         ORDER BY id ASC",
    )?;

    let entries = stmt
        .query_map([], |row| {
            let types_json: String = row.get(2)?;
            let types: Vec<String> = serde_json::from_str(&types_json).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    2,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;

            Ok(Entry {
                id: row.get(0)?,
                name: row.get(1)?,
                types,
                description: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(entries)
}

pub fn verify_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM pokemon", [], |row| row.get(0))?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn starters() -> Vec<Entry> {
        vec![
            Entry::new(4, "Charmander", &["fire"], "Lizard Pokémon."),
            Entry::new(1, "Bulbasaur", &["grass", "poison"], "Seed Pokémon."),
            Entry::new(7, "Squirtle", &["water"], "Tiny Turtle Pokémon."),
        ]
    }

    #[test]
    fn test_entries_come_back_ordered_by_id() {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();

        insert_entries(&conn, &starters()).unwrap();

        let entries = get_all_entries(&conn).unwrap();
        let ids: Vec<i64> = entries.iter().map(|e| e.id).collect();

        assert_eq!(ids, vec![1, 4, 7]);
        assert_eq!(entries[0].types, vec!["grass", "poison"]);
    }

    #[test]
    fn test_duplicate_ids_skipped_on_second_import() {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();

        let inserted1 = insert_entries(&conn, &starters()).unwrap();
        let inserted2 = insert_entries(&conn, &starters()).unwrap();

        assert_eq!(inserted1, 3, "First import should insert 3 entries");
        assert_eq!(inserted2, 0, "Second import should insert nothing");
        assert_eq!(verify_count(&conn).unwrap(), 3);
    }

    #[test]
    fn test_schema_holds_only_entry_columns() {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();

        let mut stmt = conn
            .prepare("SELECT name FROM pragma_table_info('pokemon') ORDER BY cid")
            .unwrap();
        let columns: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<rusqlite::Result<_>>()
            .unwrap();
        assert_eq!(columns, vec!["id", "name", "types", "description"]);

        let indexes: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND tbl_name = 'pokemon'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(indexes, 0);
    }

    #[test]
    fn test_empty_table_returns_empty_list() {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();

        assert!(get_all_entries(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_types_column_is_a_query_error() {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();
        conn.execute(
            "INSERT INTO pokemon (id, name, types, description) VALUES (1, 'Bulbasaur', 'grass', '')",
            [],
        )
        .unwrap();

        assert!(get_all_entries(&conn).is_err());
    }

    #[test]
    fn test_has_type_is_case_insensitive_exact_token() {
        let entry = Entry::new(1, "Bulbasaur", &["Grass", "Poison"], "");

        assert!(entry.has_type("grass"));
        assert!(entry.has_type("POISON"));
        assert!(!entry.has_type("gras"));
        assert!(!entry.has_type("fire"));
    }

    #[test]
    fn test_validate_rejects_missing_types() {
        let entry = Entry::new(1, "Bulbasaur", &[], "");
        assert!(entry.validate().is_err());

        let blank = Entry::new(2, "  ", &["grass"], "");
        assert!(blank.validate().is_err());

        assert!(Entry::new(3, "Venusaur", &["grass"], "").validate().is_ok());
    }

    #[test]
    fn test_load_csv_splits_types() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "id,name,types,description").unwrap();
        writeln!(file, "1,Bulbasaur,grass|poison,A strange seed.").unwrap();
        writeln!(file, "4,Charmander,fire,Flame on its tail.").unwrap();

        let entries = load_entries_file(file.path()).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].types, vec!["grass", "poison"]);
        assert_eq!(entries[1].name, "Charmander");
    }

    #[test]
    fn test_load_json_entries() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"[{{"id":25,"name":"Pikachu","types":["electric"],"description":"Mouse."}}]"#
        )
        .unwrap();

        let entries = load_entries_file(file.path()).unwrap();

        assert_eq!(entries, vec![Entry::new(25, "Pikachu", &["electric"], "Mouse.")]);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        assert!(load_entries_file(file.path()).is_err());
    }

    #[test]
    fn test_bundled_kanto_seed_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/kanto.json");
        let entries = load_entries_file(&path).unwrap();

        assert_eq!(entries.len(), 151);
        assert!(entries.iter().zip(1..).all(|(e, id)| e.id == id));
        assert_eq!(entries[3].name, "Charmander");
    }

    #[test]
    fn test_invalid_row_aborts_import() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "id,name,types,description").unwrap();
        writeln!(file, "1,Bulbasaur,,No types here.").unwrap();

        let err = load_entries_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("#1"));
    }
}
