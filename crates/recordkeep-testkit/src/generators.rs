//! Proptest generators for property-based testing.

use std::collections::BTreeSet;

use proptest::prelude::*;

use recordkeep_core::Record;
use recordkeep_xml::Element;

/// Generate a player key.
pub fn player_id() -> impl Strategy<Value = i64> {
    1i64..=100_000
}

/// Generate a player name.
pub fn player_name() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,11}".prop_map(String::from)
}

/// Generate a roster position.
pub fn position() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("QB"), Just("RB"), Just("WR"), Just("TE"), Just("K")]
}

/// Generate a full players row for `id`.
pub fn player_record(id: i64) -> impl Strategy<Value = Record> {
    (player_name(), position(), 0i64..12).prop_map(move |(name, position, period)| {
        Record::new()
            .with("ID", id)
            .with("name", name)
            .with("position", position)
            .with("period", period)
    })
}

/// Generate up to `max` players rows with distinct keys.
pub fn players(max: usize) -> impl Strategy<Value = Vec<Record>> {
    prop::collection::btree_set(player_id(), 0..=max).prop_flat_map(|ids: BTreeSet<i64>| {
        ids.into_iter().map(player_record).collect::<Vec<_>>()
    })
}

/// Generate schedule rows with distinct `(season, week)` pairs.
pub fn games(max: usize) -> impl Strategy<Value = Vec<Record>> {
    prop::collection::btree_set((2020i64..2026, 1i64..18), 0..=max).prop_map(|keys| {
        keys.into_iter()
            .map(|(season, week)| {
                Record::new()
                    .with("season", season)
                    .with("week", week)
                    .with("opponent", "TBD")
            })
            .collect()
    })
}

/// Generate an XML key attribute value.
pub fn xml_key() -> impl Strategy<Value = String> {
    "[0-9a-z]{1,6}".prop_map(String::from)
}

/// Generate a roster root with up to `max` players, keys distinct, in
/// arbitrary document order.
pub fn roster(max: usize) -> impl Strategy<Value = Element> {
    prop::collection::btree_set(xml_key(), 0..=max)
        .prop_flat_map(|keys| {
            let keys: Vec<String> = keys.into_iter().collect();
            Just(keys).prop_shuffle()
        })
        .prop_map(|keys| {
            keys.into_iter().fold(Element::new("roster"), |root, key| {
                root.with_child(
                    Element::new("player")
                        .with_attribute("id", key.as_str())
                        .with_attribute("name", format!("player {key}")),
                )
            })
        })
}
