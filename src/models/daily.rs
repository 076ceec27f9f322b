use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::VariableKey;

/// Readings recorded for one mesh cell on one date, keyed by variable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    values: BTreeMap<VariableKey, f64>,
}

impl DailyRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: VariableKey, value: f64) -> Self {
        let mut record = Self::new();
        record.values.insert(key, value);
        record
    }

    /// Replace the reading for `key`. Used while a single block is being assembled.
    pub fn set(&mut self, key: VariableKey, value: f64) {
        self.values.insert(key, value);
    }

    pub fn get(&self, key: VariableKey) -> Option<f64> {
        self.values.get(&key).copied()
    }

    /// Add every variable from `other` that this record does not hold yet.
    /// Existing readings are kept as they are.
    pub fn merge_from(&mut self, other: DailyRecord) {
        for (key, value) in other.values {
            self.values.entry(key).or_insert(value);
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableKey, f64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }
}
