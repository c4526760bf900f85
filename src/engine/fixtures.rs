//! Preset fixture store.
//!
//! One static JSON file maps endpoint names to ordered lists of override
//! records. Loaded once at startup and read-only afterwards. A missing file
//! or endpoint means "no fixtures", never an error; rows of the wrong shape
//! are skipped with a warning and otherwise behave as if absent.

use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

use crate::domain::Record;
use crate::engine::filter::loose_eq;

#[derive(Debug, Default)]
pub struct FixtureStore {
    presets: HashMap<String, Vec<Record>>,
}

impl FixtureStore {
    /// Load fixtures from `path`. Degrades to an empty store when the file
    /// is absent or unparsable.
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => {
                tracing::debug!("No fixtures file at {}", path.display());
                return Self::default();
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(value) => Self::from_value(value),
            Err(e) => {
                tracing::warn!("Ignoring malformed fixtures file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Build a store from an already-parsed JSON document. The expected
    /// shape is `{endpoint: [record, ...]}`.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(map) = value else {
            tracing::warn!("Fixtures document is not a JSON object; ignoring");
            return Self::default();
        };

        let mut presets = HashMap::new();
        for (endpoint, rows) in map {
            let Value::Array(rows) = rows else {
                tracing::warn!("Fixtures for '{}' are not a list; skipping", endpoint);
                continue;
            };
            let records: Vec<Record> = rows
                .into_iter()
                .filter_map(|row| match row {
                    Value::Object(record) => Some(record),
                    other => {
                        tracing::warn!(
                            "Skipping non-object fixture row for '{}': {}",
                            endpoint,
                            other
                        );
                        None
                    }
                })
                .collect();
            presets.insert(endpoint, records);
        }

        Self { presets }
    }

    /// Fixture at a zero-based batch position, if one exists.
    pub fn by_position(&self, endpoint: &str, index: usize) -> Option<&Record> {
        self.presets.get(endpoint).and_then(|rows| rows.get(index))
    }

    /// First fixture whose identifiable field loosely equals `value`.
    pub fn by_identifiable(&self, endpoint: &str, value: &str, field: &str) -> Option<&Record> {
        self.presets.get(endpoint)?.iter().find(|row| {
            row.get(field)
                .map(|candidate| loose_eq(candidate, value))
                .unwrap_or(false)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn endpoint_count(&self) -> usize {
        self.presets.len()
    }
}
