//! Partitioning records into groups keyed by a derived value.
//!
//! Grouping runs in two explicit steps: an unordered accumulation pass into a
//! hash map, then a sort-and-rebuild pass into [`Grouped`], whose enumeration
//! order is ascending by key.

use std::{collections::HashMap, fmt, hash::Hash};

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Named-field access used by [`Selector::Field`].
pub trait Fields<K> {
    fn field(&self, name: &str) -> K;
}

impl<K, T> Fields<K> for &T
where
    T: Fields<K> + ?Sized,
{
    fn field(&self, name: &str) -> K {
        (**self).field(name)
    }
}

/// How to derive a group key from a record.
pub enum Selector<'a, R, K> {
    /// Read the named field through [`Fields`].
    Field(String),
    /// Compute the key with a function. It is called once per record.
    ///
    /// [`group_by`] still requires `R: Fields<K>` for this form; records
    /// without named fields go through [`group_by_key`] instead.
    Key(Box<dyn Fn(&R) -> K + 'a>),
}

impl<'a, R, K> Selector<'a, R, K> {
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    pub fn key(key_fn: impl Fn(&R) -> K + 'a) -> Self {
        Self::Key(Box::new(key_fn))
    }

    /// Collapses both selector forms into one key-derivation function.
    pub fn into_key_fn(self) -> Box<dyn Fn(&R) -> K + 'a>
    where
        R: Fields<K> + 'a,
        K: 'a,
    {
        match self {
            Self::Field(name) => Box::new(move |record: &R| record.field(&name)),
            Self::Key(key_fn) => key_fn,
        }
    }
}

impl<R, K> fmt::Debug for Selector<'_, R, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Self::Key(_) => f.write_str("Key(..)"),
        }
    }
}

impl<R, K> From<&str> for Selector<'_, R, K> {
    fn from(name: &str) -> Self {
        Self::field(name)
    }
}

impl<R, K> From<String> for Selector<'_, R, K> {
    fn from(name: String) -> Self {
        Self::Field(name)
    }
}

/// Groups in ascending key order. Each group keeps its records in input order
/// and is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouped<K, R> {
    groups: Vec<(K, Vec<R>)>,
}

impl<K, R> Default for Grouped<K, R> {
    fn default() -> Self {
        Self { groups: Vec::new() }
    }
}

impl<K, R> Grouped<K, R> {
    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of records across all groups.
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|(_, records)| records.len()).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.iter().map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &[R])> {
        self.groups
            .iter()
            .map(|(key, records)| (key, records.as_slice()))
    }

    pub fn into_inner(self) -> Vec<(K, Vec<R>)> {
        self.groups
    }
}

impl<K: Ord, R> Grouped<K, R> {
    pub fn get(&self, key: &K) -> Option<&[R]> {
        self.groups
            .binary_search_by(|(candidate, _)| candidate.cmp(key))
            .ok()
            .map(|idx| self.groups[idx].1.as_slice())
    }
}

impl<K, R> IntoIterator for Grouped<K, R> {
    type Item = (K, Vec<R>);
    type IntoIter = std::vec::IntoIter<(K, Vec<R>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Serializes as an object keyed by each key's display form, in key order.
/// Distinct keys with the same display form produce repeated object keys.
impl<K, R> Serialize for Grouped<K, R>
where
    K: fmt::Display,
    R: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (key, records) in &self.groups {
            map.serialize_entry(&key.to_string(), records)?;
        }
        map.end()
    }
}

/// Groups `records` using either selector form.
///
/// `R` must implement [`Fields`] whichever selector form is passed.
/// A missing field never fails; it produces whatever key the record's
/// [`Fields`] implementation returns for absent names.
pub fn group_by<'a, R, K, I>(records: I, selector: Selector<'a, R, K>) -> Grouped<K, R>
where
    I: IntoIterator<Item = R>,
    R: Fields<K> + 'a,
    K: Ord + Hash + 'a,
{
    let key_fn = selector.into_key_fn();
    group_by_key(records, |record| key_fn(record))
}

/// Groups `records` by the key computed with `key_fn`.
pub fn group_by_key<R, K, I, F>(records: I, mut key_fn: F) -> Grouped<K, R>
where
    I: IntoIterator<Item = R>,
    K: Ord + Hash,
    F: FnMut(&R) -> K,
{
    let mut buckets: HashMap<K, Vec<R>> = HashMap::new();
    for record in records {
        let key = key_fn(&record);
        buckets.entry(key).or_default().push(record);
    }

    let mut groups: Vec<(K, Vec<R>)> = buckets.into_iter().collect();
    // Keys are distinct after accumulation.
    groups.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));

    Grouped { groups }
}

#[cfg(test)]
#[path = "tests/grouping_tests.rs"]
mod tests;
