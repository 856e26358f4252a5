//! Grouped aggregation index

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::accumulator::{AccumulatorSnapshot, OffsetAccumulator};

/// Grouping dimension of the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    /// Device type (monitor, pump, ...)
    DeviceType,
    /// Networked / standalone
    Connection,
    /// Threshold bucket label
    ThresholdBucket,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Self::DeviceType, Self::Connection, Self::ThresholdBucket];

    pub fn name(&self) -> &'static str {
        match self {
            Self::DeviceType => "device_type",
            Self::Connection => "connection",
            Self::ThresholdBucket => "threshold_bucket",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Three independent key -> accumulator tables.
///
/// The index owns every accumulator; callers only see snapshots. Keys are
/// created on first observation and never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedIndex {
    by_device_type: HashMap<String, OffsetAccumulator>,
    by_connection: HashMap<String, OffsetAccumulator>,
    by_threshold: HashMap<String, OffsetAccumulator>,
}

impl GroupedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, dimension: Dimension) -> &HashMap<String, OffsetAccumulator> {
        match dimension {
            Dimension::DeviceType => &self.by_device_type,
            Dimension::Connection => &self.by_connection,
            Dimension::ThresholdBucket => &self.by_threshold,
        }
    }

    fn table_mut(&mut self, dimension: Dimension) -> &mut HashMap<String, OffsetAccumulator> {
        match dimension {
            Dimension::DeviceType => &mut self.by_device_type,
            Dimension::Connection => &mut self.by_connection,
            Dimension::ThresholdBucket => &mut self.by_threshold,
        }
    }

    /// Record `value` under `key`, creating the accumulator on first sight
    pub fn observe(&mut self, dimension: Dimension, key: &str, value: u64) {
        let table = self.table_mut(dimension);
        match table.get_mut(key) {
            Some(acc) => acc.observe(value),
            None => {
                let mut acc = OffsetAccumulator::new();
                acc.observe(value);
                table.insert(key.to_string(), acc);
            }
        }
    }

    /// Accumulator for one key
    pub fn get(&self, dimension: Dimension, key: &str) -> Option<&OffsetAccumulator> {
        self.table(dimension).get(key)
    }

    /// Snapshot view of one dimension, order unspecified
    pub fn entries(
        &self,
        dimension: Dimension,
    ) -> impl Iterator<Item = (&str, AccumulatorSnapshot)> + '_ {
        self.table(dimension)
            .iter()
            .map(|(key, acc)| (key.as_str(), acc.snapshot()))
    }

    /// Snapshot view of one dimension ordered by key
    pub fn sorted_entries(&self, dimension: Dimension) -> Vec<(String, AccumulatorSnapshot)> {
        let mut entries: Vec<_> = self
            .entries(dimension)
            .map(|(key, snapshot)| (key.to_string(), snapshot))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Number of distinct keys in a dimension
    pub fn key_count(&self, dimension: Dimension) -> usize {
        self.table(dimension).len()
    }

    /// Sum of counts across all keys of a dimension
    pub fn total_count(&self, dimension: Dimension) -> u64 {
        self.table(dimension).values().map(|acc| acc.count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        Dimension::ALL.iter().all(|d| self.table(*d).is_empty())
    }

    /// Fold another index into this one, key by key
    pub fn merge(&mut self, other: &GroupedIndex) {
        for dimension in Dimension::ALL {
            let table = self.table_mut(dimension);
            for (key, acc) in other.table(dimension) {
                table.entry(key.clone()).or_default().merge(acc);
            }
        }
    }

    fn sorted_table(&self, dimension: Dimension) -> BTreeMap<&str, AccumulatorSnapshot> {
        self.entries(dimension).collect()
    }
}

impl Serialize for GroupedIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("GroupedIndex", 3)?;
        state.serialize_field("device_type", &self.sorted_table(Dimension::DeviceType))?;
        state.serialize_field("connection", &self.sorted_table(Dimension::Connection))?;
        state.serialize_field(
            "threshold_bucket",
            &self.sorted_table(Dimension::ThresholdBucket),
        )?;
        state.end()
    }
}
