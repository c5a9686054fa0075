//! Caller-owned stat snapshot

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::criteria::{StatId, StatValue};

/// Current stat values of an actor. Absent stats read as `0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatSnapshot {
    values: AHashMap<StatId, StatValue>,
}

impl StatSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: AHashMap::with_capacity(capacity),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, stat: StatId, value: StatValue) -> Self {
        self.values.insert(stat, value);
        self
    }

    pub fn insert(&mut self, stat: StatId, value: StatValue) -> Option<StatValue> {
        self.values.insert(stat, value)
    }

    /// Current value of `stat`, `0` when absent
    #[inline]
    pub fn lookup(&self, stat: StatId) -> StatValue {
        lookup(self, stat)
    }

    #[inline]
    pub fn get(&self, stat: StatId) -> Option<StatValue> {
        self.values.get(&stat).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Total stat lookup: a missing entry is `0`, never an error
#[inline]
pub fn lookup(snapshot: &StatSnapshot, stat: StatId) -> StatValue {
    snapshot.values.get(&stat).copied().unwrap_or(0)
}

impl FromIterator<(StatId, StatValue)> for StatSnapshot {
    fn from_iter<T: IntoIterator<Item = (StatId, StatValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl Extend<(StatId, StatValue)> for StatSnapshot {
    fn extend<T: IntoIterator<Item = (StatId, StatValue)>>(&mut self, iter: T) {
        self.values.extend(iter);
    }
}

impl<const N: usize> From<[(StatId, StatValue); N]> for StatSnapshot {
    fn from(values: [(StatId, StatValue); N]) -> Self {
        values.into_iter().collect()
    }
}

impl From<HashMap<StatId, StatValue>> for StatSnapshot {
    fn from(values: HashMap<StatId, StatValue>) -> Self {
        values.into_iter().collect()
    }
}
