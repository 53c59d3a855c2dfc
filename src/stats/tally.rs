// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Insertion-ordered keyed accumulators.
//!
//! Grouping and tie-breaking downstream depend on the order in which keys
//! were first seen, so these keep that order and serialize as JSON objects
//! in it.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::ops::AddAssign;

/// Map from string key to an accumulated value, iterated in first-seen order
#[derive(Debug, Clone, PartialEq)]
pub struct Tally<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

/// Occurrence counts per title
pub type PeriodCounts = Tally<u32>;

/// Cumulative distance in meters per city
pub type CityDistances = Tally<f64>;

impl<V> Tally<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

impl<V: Copy + Default + AddAssign> Tally<V> {
    /// Add `amount` to `key`, inserting it at the end if unseen
    pub fn add(&mut self, key: &str, amount: V) {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                self.entries.push((key.to_string(), V::default()));
                self.index.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        self.entries[slot].1 += amount;
    }
}

impl Tally<u32> {
    pub fn increment(&mut self, key: &str) {
        self.add(key, 1);
    }
}

impl<V> Default for Tally<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: AsRef<str>, V: Copy + Default + AddAssign> FromIterator<(K, V)> for Tally<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for (key, value) in iter {
            tally.add(key.as_ref(), value);
        }
        tally
    }
}

impl<V: Serialize> Serialize for Tally<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
