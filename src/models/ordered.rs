//! Insertion-ordered string-keyed map decoded from JSON objects.
//!
//! The chart legend and the budget list both follow the key order the
//! backend emitted, so these payloads are kept as ordered pairs instead of
//! a hash map.

use core::fmt;
use core::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A JSON object decoded as `(key, value)` pairs in document order.
///
/// A repeated key keeps its first position and takes the last value.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    /// Entries in insertion order.
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedMap<V> {
    #[inline]
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    /// Creates an empty map.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the value for `key`, keeping the original
    /// position of an existing key. Returns the replaced value.
    #[inline]
    pub fn insert<K: Into<String>>(&mut self, key: K, value: V) -> Option<V> {
        let key = key.into();
        match self.entries.iter_mut().find(|entry| entry.0 == key) {
            Some(entry) => Some(core::mem::replace(&mut entry.1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Returns the value stored under `key`.
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|entry| entry.0 == key)
            .map(|entry| &entry.1)
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the map has no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|entry| (entry.0.as_str(), &entry.1))
    }

    /// Iterates keys in insertion order.
    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.0.as_str())
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            let _replaced = map.insert(key, value);
        }
        map
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Serde visitor collecting map entries in the order they arrive.
struct OrderedMapVisitor<V> {
    /// Marker for the value type.
    marker: PhantomData<V>,
}

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = OrderedMap {
            entries: Vec::with_capacity(access.size_hint().unwrap_or(0)),
        };
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            let _replaced = map.insert(key, value);
        }
        Ok(map)
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(OrderedMap::new())
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    #[inline]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(OrderedMapVisitor {
            marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_document_order() {
        let map: OrderedMap<f64> =
            serde_json::from_str(r#"{"Transport": 10.0, "Food/Groceries": 5.5, "Bills/Utilities": 1}"#)
                .unwrap();
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, ["Transport", "Food/Groceries", "Bills/Utilities"]);
        assert_eq!(map.get("Bills/Utilities"), Some(&1.0));
    }

    #[test]
    fn null_decodes_as_empty() {
        let map: OrderedMap<f64> = serde_json::from_str("null").unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut map: OrderedMap<i32> = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(map.insert("a", 3), Some(1));
        let entries: Vec<(&str, &i32)> = map.iter().collect();
        assert_eq!(entries, [("a", &3), ("b", &2)]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn serializes_as_object_in_order() {
        let map: OrderedMap<i32> = [("z", 1), ("a", 2)].into_iter().collect();
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"z":1,"a":2}"#);
    }
}
