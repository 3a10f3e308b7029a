//! Vehicle data models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A point-in-time snapshot of vehicle state.
///
/// The schema is open: each adapter decides which fields it reports. Keys are
/// kept sorted, so serializing the same snapshot twice yields identical bytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleStats(Map<String, Value>);

impl VehicleStats {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Set a field, replacing any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for VehicleStats {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
