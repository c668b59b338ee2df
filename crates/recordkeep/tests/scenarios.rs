//! End-to-end scenarios across the three store kinds.

use anyhow::Result;

use recordkeep::core::CoreError;
use recordkeep::sql::SqlError;
use recordkeep::xml::XmlError;
use recordkeep::{Element, Error, KeyedStore, Record, Value, XmlKey, XmlSetup, XmlStore};
use recordkeep_testkit::fixtures::{Player, SqlFixture, XmlFixture};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn ids(records: &[Record], field: &str) -> Vec<i64> {
    records
        .iter()
        .filter_map(|r| r.get(field).and_then(Value::as_integer))
        .collect()
}

#[test]
fn test_inventory_document_absent() -> Result<()> {
    init_tracing();
    let fixture = XmlFixture::new();

    let inventory = XmlStore::setup(
        &fixture.config,
        XmlSetup::new("inventory", "inventory.xml", "code"),
    )?;

    assert_eq!(inventory.root().name(), "inventory");
    assert_eq!(inventory.count(), 0);
    assert!(!fixture.folder().join("inventory.xml").exists());
    Ok(())
}

#[test]
fn test_roster_first_and_last() -> Result<()> {
    init_tracing();
    let fixture = XmlFixture::new();
    let roster = fixture.roster();

    assert_eq!(roster.first().and_then(|p| p.attribute("id")), Some("3"));
    assert_eq!(roster.last().and_then(|p| p.attribute("id")), Some("7"));

    let mut cursor = roster.cursor();
    assert_eq!(cursor.key(), Some("3"));
    assert_eq!(cursor.next().and_then(|p| p.attribute("name")), Some("A"));
    assert!(cursor.next().is_none());
    Ok(())
}

#[test]
fn test_schedule_get_some_by_season() -> Result<()> {
    init_tracing();
    let fixture = SqlFixture::sqlite().seeded();
    let schedule = fixture.schedule();

    let games = schedule.get_some(2024)?;
    assert_eq!(ids(&games, "season"), vec![2024, 2024, 2024]);
    assert_eq!(ids(&games, "week"), vec![1, 2, 3]);

    assert_eq!(schedule.delete_some(2024)?, 3);
    assert!(schedule.get_some(2024)?.is_empty());
    assert_eq!(schedule.size()?, 1);
    Ok(())
}

#[test]
fn test_players_crud_on_both_backends() -> Result<()> {
    init_tracing();

    fn exercise<B: recordkeep::Backend>(fixture: SqlFixture<B>) -> Result<()> {
        let players = fixture.seeded().players();

        assert_eq!(ids(&players.get_all()?, "ID"), vec![3, 7, 12]);
        assert_eq!(players.count_which("period", 3)?, 2);
        assert_eq!(ids(&players.query_some("period", 3)?, "ID"), vec![3, 7]);

        players.update(
            Record::new()
                .with("ID", 3)
                .with("name", "B2")
                .with("position", "TE")
                .with("period", 4),
        )?;
        let updated: Option<Player> = players.get_as(3)?;
        assert_eq!(updated, Some(Player::new(3, "B2", "TE", 4)));

        assert_eq!(players.delete(12)?, 1);
        assert!(!players.exists(12)?);
        assert_eq!(players.size()?, 2);
        Ok(())
    }

    exercise(SqlFixture::sqlite())?;
    exercise(SqlFixture::memory())?;
    Ok(())
}

#[test]
fn test_sqlite_file_survives_reopen() -> Result<()> {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("league.db");

    SqlFixture::sqlite_file(&path).seeded();

    let backend = std::sync::Arc::new(recordkeep::SqliteBackend::open(&path)?);
    let players = recordkeep::SingleKeyStore::new(backend, "players");
    assert_eq!(players.size()?, 3);
    assert_eq!(
        players.get(7)?.and_then(|r| r.get("name").cloned()),
        Some(Value::from("A"))
    );
    Ok(())
}

#[test]
fn test_malformed_records_surface_through_facade_error() {
    init_tracing();
    let fixture = SqlFixture::memory();

    let err: Error = fixture
        .players()
        .add(Record::new().with("name", "no key"))
        .unwrap_err()
        .into();
    assert!(matches!(
        err,
        Error::Sql(SqlError::Record(CoreError::MissingKeyField(ref field))) if field == "ID"
    ));

    let xml = XmlFixture::new();
    xml.write("roster.xml", r#"<roster><player name="no id"/></roster>"#);
    let err: Error = XmlStore::setup(&xml.config, XmlSetup::new("roster", "roster.xml", "id"))
        .unwrap_err()
        .into();
    assert!(matches!(err, Error::Xml(XmlError::MissingKeyAttribute { .. })));
}

#[test]
fn test_xml_edits_persist_only_on_store() -> Result<()> {
    init_tracing();
    let fixture = XmlFixture::new();
    let mut roster = fixture.roster();

    roster.insert(Element::new("player").with_attribute("id", "12").with_attribute("name", "C"))?;
    roster.modify("7", None, |p| {
        p.set_attribute("name", "A2");
    })?;
    assert!(roster.is_dirty());
    assert!(!fixture.read("roster.xml").contains("A2"));

    roster.store()?;
    assert_eq!(
        fixture.read("roster.xml"),
        "<?xml version=\"1.0\"?>\n\
         <roster>\n  \
         <player id=\"7\" name=\"A2\"/>\n  \
         <player id=\"3\" name=\"B\"/>\n  \
         <player id=\"12\" name=\"C\"/>\n\
         </roster>\n"
    );

    let reopened = fixture.open(XmlSetup::new("roster", "roster.xml", "id"));
    assert_eq!(reopened.keys().collect::<Vec<_>>(), vec!["12", "3", "7"]);
    Ok(())
}

#[test]
fn test_stores_share_the_keyed_contract() -> Result<()> {
    init_tracing();

    fn count<S: KeyedStore>(store: &S) -> Result<usize> {
        Ok(store.record_count()?)
    }

    let sql = SqlFixture::memory().seeded();
    let xml = XmlFixture::new();
    let roster = xml.roster();

    assert_eq!(count(&sql.players())?, 3);
    assert_eq!(count(&sql.schedule())?, 4);
    assert_eq!(count(&roster)?, 2);

    assert!(sql.schedule().contains_key(&(Value::from(2023), Value::from(1)))?);
    assert!(roster.contains_key(&XmlKey::new("7"))?);
    Ok(())
}
