//! Ordered, name-keyed token groups

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A group of named tokens in document order.
///
/// Names are case-sensitive. The group is a sequence rather than a map so
/// that directly constructed documents can carry duplicate names for the
/// validator to report; [`TokenGroup::insert`] is the deduplicating path
/// parsers use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenGroup<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for TokenGroup<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> TokenGroup<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a token, keeping the position of an existing entry.
    pub fn insert(&mut self, name: impl Into<String>, value: T) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Append a token without checking for an existing name.
    pub fn push(&mut self, name: impl Into<String>, value: T) {
        self.entries.push((name.into(), value));
    }

    /// Remove every token with the given name, returning the first.
    pub fn remove(&mut self, name: &str) -> Option<T> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        let (_, value) = self.entries.remove(index);
        self.entries.retain(|(n, _)| n != name);
        Some(value)
    }

    /// Builder form of [`TokenGroup::insert`]
    pub fn with(mut self, name: impl Into<String>, value: T) -> Self {
        self.insert(name, value);
        self
    }

    /// First token with the given name
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}

impl<T: Clone> TokenGroup<T> {
    /// Leaf-level overlay: entries of `other` replace or extend `self`.
    pub fn overlaid(&self, other: &TokenGroup<T>) -> TokenGroup<T> {
        let mut merged = self.clone();
        for (name, value) in other.iter() {
            merged.insert(name, value.clone());
        }
        merged
    }
}

impl<N: Into<String>, T> FromIterator<(N, T)> for TokenGroup<T> {
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        let mut group = Self::new();
        for (name, value) in iter {
            group.insert(name, value);
        }
        group
    }
}

impl<'a, T> IntoIterator for &'a TokenGroup<T> {
    type Item = (&'a str, &'a T);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a T)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl<T: Serialize> Serialize for TokenGroup<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
