/// Insertion-ordered string-keyed table
///
/// Backs the route table, the token registry and descriptor arguments.
/// Registration order decides which route wins when several match, so the
/// table must iterate in the order keys were first inserted. Overwriting a key
/// replaces its value in place and keeps the original position.
///
/// Lookups are linear. Route tables are small and scanned front to back on
/// every match anyway.

use std::fmt;
use std::marker::PhantomData;
use std::ops::Index;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts or overwrites, returning the previous value if there was one
    ///
    /// # Examples
    ///
    /// ```
    /// use mvc_router::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("b", 1);
    /// map.insert("a", 2);
    /// assert_eq!(map.insert("b", 3), Some(1));
    ///
    /// let keys: Vec<&str> = map.keys().collect();
    /// assert_eq!(keys, vec!["b", "a"]);
    /// ```
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Index<&str> for OrderedMap<V> {
    type Output = V;

    fn index(&self, key: &str) -> &V {
        self.get(key)
            .unwrap_or_else(|| panic!("no entry for key `{key}`"))
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V> Extend<(K, V)> for OrderedMap<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<V> IntoIterator for OrderedMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

// Entries are kept in the order the deserializer yields them, which for TOML
// and JSON is document order.
impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of string keys")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = OrderedMap::new();
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrite_keeps_position() {
        let mut map: OrderedMap<&str> = OrderedMap::new();
        map.insert("/a", "A->one");
        map.insert("/b", "B->two");
        map.insert("/a", "A->three");

        let entries: Vec<_> = map.iter().collect();
        assert_eq!(entries, vec![("/a", &"A->three"), ("/b", &"B->two")]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_missing_key() {
        let map: OrderedMap<String> = OrderedMap::new();
        assert!(map.get("nope").is_none());
        assert!(!map.contains_key("nope"));
        assert!(map.is_empty());
    }

    #[test]
    fn test_deserialize_keeps_document_order() {
        let map: OrderedMap<String> =
            serde_json::from_str(r#"{"z": "1", "a": "2", "m": "3"}"#).unwrap();
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_serialize_as_map() {
        let map: OrderedMap<&str> = [("id", "5"), ("slug", "none")].into_iter().collect();
        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"id":"5","slug":"none"}"#
        );
    }
}
