//! Case-insensitive identifiers and the directories keyed by them.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier as typed by the user.
///
/// Equality, ordering and hashing use the lower-cased form; `as_str()` and
/// `Display` return the original casing.
#[derive(Clone)]
pub struct Key {
    original: String,
    folded: String,
}

impl Key {
    pub fn new(id: impl Into<String>) -> Self {
        let original = id.into();
        let folded = fold(&original);
        Self { original, folded }
    }

    /// Original casing, for display.
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Lower-cased form used for lookups.
    pub fn folded(&self) -> &str {
        &self.folded
    }

    pub fn matches(&self, id: &str) -> bool {
        self.folded == fold(id)
    }
}

fn fold(id: &str) -> String {
    id.to_lowercase()
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded
    }
}

impl Eq for Key {}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded.cmp(&other.folded)
    }
}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.folded.hash(state);
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.original)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl From<&str> for Key {
    fn from(id: &str) -> Self {
        Key::new(id)
    }
}

impl From<String> for Key {
    fn from(id: String) -> Self {
        Key::new(id)
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Key::new)
    }
}

/// Borrows the folded form, so `BTreeMap<Key, _>` can be queried with an
/// already lower-cased `&str`. Consistent with `Eq`/`Ord`/`Hash` above.
impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.folded
    }
}

/// Entity store keyed by case-insensitive identifiers.
///
/// Iteration order is the folded identifier order, which keeps listings and
/// snapshots deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Directory<V> {
    entries: BTreeMap<Key, V>,
}

impl<V> Default for Directory<V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<V> Directory<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `id`, returning any value it replaced.
    pub fn put(&mut self, id: impl Into<Key>, value: V) -> Option<V> {
        let key = id.into();
        // Remove first so the stored key carries the latest casing.
        let previous = self.entries.remove(&key);
        self.entries.insert(key, value);
        previous
    }

    pub fn get(&self, id: &str) -> Option<&V> {
        self.entries.get(fold(id).as_str())
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut V> {
        self.entries.get_mut(fold(id).as_str())
    }

    pub fn remove(&mut self, id: &str) -> Option<V> {
        self.entries.remove(fold(id).as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, Key, V> {
        self.entries.keys()
    }

    pub fn values(&self) -> btree_map::Values<'_, Key, V> {
        self.entries.values()
    }

    pub fn values_mut(&mut self) -> btree_map::ValuesMut<'_, Key, V> {
        self.entries.values_mut()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Key, V> {
        self.entries.iter()
    }
}

impl<'a, V> IntoIterator for &'a Directory<V> {
    type Item = (&'a Key, &'a V);
    type IntoIter = btree_map::Iter<'a, Key, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
