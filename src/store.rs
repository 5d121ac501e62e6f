use crate::key::Key;
use indexmap::IndexMap;
use std::fmt::Display;

/// Raw values grouped by the switch they were supplied behind.
///
/// Keys keep the order in which the tokenizer first saw them, so anything
/// derived from iterating the store (such as unknown-argument reports) is
/// stable from run to run.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Store {
    values: IndexMap<Key, Vec<String>>,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            values: IndexMap::new(),
        }
    }

    /// Returns the values stored behind `key`.
    ///
    /// A key that was never stored yields an empty slice. Lookups never insert.
    pub fn get(&self, key: &Key) -> &[String] {
        match self.values.get(key) {
            Some(v) => v.as_slice(),
            None => &[],
        }
    }

    /// Checks if `key` was supplied, regardless of whether it carries values.
    pub fn contains(&self, key: &Key) -> bool {
        self.values.contains_key(key)
    }

    /// Iterates the stored keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.values.keys()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Makes sure `key` has an entry, leaving existing values untouched.
    pub(crate) fn touch(&mut self, key: Key) {
        self.values.entry(key).or_default();
    }

    /// Appends `value` to the group behind `key`, creating the group if needed.
    pub(crate) fn push(&mut self, key: Key, value: String) {
        self.values.entry(key).or_default().push(value);
    }
}

impl<K: Into<Key>, V: Into<String>> FromIterator<(K, Vec<V>)> for Store {
    fn from_iter<I: IntoIterator<Item = (K, Vec<V>)>>(iter: I) -> Self {
        let mut store = Store::new();
        for (k, vals) in iter {
            let k = k.into();
            store.touch(k.clone());
            for v in vals {
                store.push(k.clone(), v.into());
            }
        }
        store
    }
}

impl Display for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ ")?;
        for (i, (k, v)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {:?}", k, v)?;
        }
        write!(f, " }}")
    }
}
