use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::domain::classification::{ports::ClassificationCache, value_objects::Fingerprint};

/// Process-lifetime cache; entries are never evicted.
#[derive(Debug)]
pub struct InMemoryCache<T> {
    entries: RwLock<HashMap<Fingerprint, T>>,
}

impl<T> InMemoryCache<T> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> Default for InMemoryCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ClassificationCache<T> for InMemoryCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &Fingerprint) -> Option<T> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn put(&self, key: Fingerprint, value: T) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value);
    }

    fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
