//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: a players table keyed on `ID`,
//! a schedule table keyed on `(season, week)`, and a temporary folder for
//! XML documents.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tempfile::TempDir;

use recordkeep_core::Record;
use recordkeep_sql::{Backend, CompositeKeyStore, MemoryBackend, SingleKeyStore, SqliteBackend};
use recordkeep_xml::{XmlConfig, XmlSetup, XmlStore};

pub const PLAYERS_TABLE: &str = "players";
pub const PLAYERS_COLUMNS: [&str; 4] = ["ID", "name", "position", "period"];

pub const SCHEDULE_TABLE: &str = "schedule";
pub const SCHEDULE_COLUMNS: [&str; 3] = ["season", "week", "opponent"];

/// SQLite schema for both fixture tables.
pub const SCHEMA: &str = "
    CREATE TABLE players (
        ID INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        position TEXT,
        period INTEGER
    );
    CREATE TABLE schedule (
        season INTEGER NOT NULL,
        week INTEGER NOT NULL,
        opponent TEXT,
        PRIMARY KEY (season, week)
    );
";

/// The roster document from the usage docs: two players, out of key order.
pub const ROSTER_XML: &str = r#"<roster><player id="7" name="A"/><player id="3" name="B"/></roster>"#;

/// A players row as a typed struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    #[serde(rename = "ID")]
    pub id: i64,
    pub name: String,
    pub position: String,
    pub period: i64,
}

impl Player {
    pub fn new(id: i64, name: &str, position: &str, period: i64) -> Self {
        Self {
            id,
            name: name.to_string(),
            position: position.to_string(),
            period,
        }
    }
}

/// Three players, inserted out of key order.
pub fn sample_players() -> Vec<Player> {
    vec![
        Player::new(7, "A", "QB", 3),
        Player::new(3, "B", "WR", 3),
        Player::new(12, "C", "RB", 9),
    ]
}

/// Two seasons of games, inserted out of key order.
pub fn sample_schedule() -> Vec<Record> {
    [(2024, 2, "CLE"), (2024, 1, "MIA"), (2023, 1, "BUF"), (2024, 3, "NYJ")]
        .into_iter()
        .map(|(season, week, opponent)| {
            Record::new()
                .with("season", season)
                .with("week", week)
                .with("opponent", opponent)
        })
        .collect()
}

/// A relational backend with the fixture tables created and empty.
pub struct SqlFixture<B: Backend> {
    pub backend: Arc<B>,
}

impl SqlFixture<SqliteBackend> {
    /// Fixture tables in an in-memory SQLite database.
    pub fn sqlite() -> Self {
        let backend = SqliteBackend::open_memory().expect("in-memory sqlite opens");
        backend.execute_batch(SCHEMA).expect("fixture schema applies");
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Fixture tables in a SQLite file at `path`.
    pub fn sqlite_file(path: impl AsRef<Path>) -> Self {
        let backend = SqliteBackend::open(path).expect("sqlite file opens");
        backend.execute_batch(SCHEMA).expect("fixture schema applies");
        Self {
            backend: Arc::new(backend),
        }
    }
}

impl SqlFixture<MemoryBackend> {
    /// Fixture tables in the in-memory backend.
    pub fn memory() -> Self {
        let backend = MemoryBackend::new();
        backend
            .create_table(PLAYERS_TABLE, PLAYERS_COLUMNS)
            .expect("players table");
        backend
            .create_table(SCHEDULE_TABLE, SCHEDULE_COLUMNS)
            .expect("schedule table");
        Self {
            backend: Arc::new(backend),
        }
    }
}

impl<B: Backend> SqlFixture<B> {
    pub fn players(&self) -> SingleKeyStore<B> {
        SingleKeyStore::new(Arc::clone(&self.backend), PLAYERS_TABLE)
    }

    pub fn schedule(&self) -> CompositeKeyStore<B> {
        CompositeKeyStore::with_keys(Arc::clone(&self.backend), SCHEDULE_TABLE, "season", "week")
    }

    /// Insert the sample players and schedule.
    pub fn seeded(self) -> Self {
        let players = self.players();
        for player in sample_players() {
            players
                .add(recordkeep_core::Structured(player))
                .expect("sample player inserts");
        }
        let schedule = self.schedule();
        for game in sample_schedule() {
            schedule.add(game).expect("sample game inserts");
        }
        self
    }
}

/// A temporary data folder for XML documents, removed on drop.
pub struct XmlFixture {
    pub dir: TempDir,
    pub config: XmlConfig,
}

impl XmlFixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = XmlConfig::default().with_data_folder(dir.path());
        Self { dir, config }
    }

    pub fn folder(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `file_name` in the data folder.
    pub fn write(&self, file_name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(file_name);
        fs::write(&path, contents).expect("fixture document writes");
        path
    }

    pub fn read(&self, file_name: &str) -> String {
        fs::read_to_string(self.dir.path().join(file_name)).expect("fixture document reads")
    }

    /// Open a store in the data folder.
    pub fn open(&self, setup: XmlSetup) -> XmlStore {
        XmlStore::setup(&self.config, setup).expect("xml store opens")
    }

    /// The sample roster, keyed on `id`.
    pub fn roster(&self) -> XmlStore {
        self.write("roster.xml", ROSTER_XML);
        self.open(XmlSetup::new("roster", "roster.xml", "id"))
    }
}

impl Default for XmlFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_sqlite() {
        let fixture = SqlFixture::sqlite().seeded();
        assert_eq!(fixture.players().size().unwrap(), 3);
        assert_eq!(fixture.schedule().count_some(2024).unwrap(), 3);
    }

    #[test]
    fn test_seeded_memory() {
        let fixture = SqlFixture::memory().seeded();
        let player: Option<Player> = fixture.players().get_as(12).unwrap();
        assert_eq!(player, Some(Player::new(12, "C", "RB", 9)));
    }

    #[test]
    fn test_backends_share_a_fixture_table() {
        let fixture = SqlFixture::sqlite().seeded();
        let a = fixture.players();
        let b = fixture.players();
        a.delete(7).unwrap();
        assert!(!b.exists(7).unwrap());
    }

    #[test]
    fn test_xml_roster() {
        let fixture = XmlFixture::new();
        let roster = fixture.roster();
        assert_eq!(roster.count(), 2);
        assert_eq!(roster.path(), fixture.folder().join("roster.xml"));
    }
}
