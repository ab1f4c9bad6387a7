use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// First identifier handed out by a fresh store.
pub const FIRST_ID: i64 = 1;

struct Inner<T> {
    records: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T: Clone> Inner<T> {
    fn insert_next<F>(&mut self, build: F) -> T
    where
        F: FnOnce(i64, DateTime<Utc>) -> T,
    {
        let id = self.next_id;
        let record = build(id, Utc::now());
        self.records.insert(id, record.clone());
        self.next_id += 1;
        record
    }
}

/// Generic in-memory keyed collection with auto-incrementing ids.
///
/// The record map and the id counter live behind a single `RwLock`, so an id is
/// allocated and its record becomes visible in one critical section. Reads take
/// the shared lock; `create` and `update` take the exclusive one. Nothing awaits
/// while a guard is held.
pub struct ResourceStore<T> {
    inner: RwLock<Inner<T>>,
}

impl<T: Clone> Default for ResourceStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> ResourceStore<T> {
    pub fn new() -> Self {
        Self { inner: RwLock::new(Inner { records: BTreeMap::new(), next_id: FIRST_ID }) }
    }

    /// Insert a fixture before the store is shared. Follows the same id
    /// allocation as [`ResourceStore::create`].
    pub fn seed<F>(&mut self, build: F) -> T
    where
        F: FnOnce(i64, DateTime<Utc>) -> T,
    {
        self.inner.get_mut().insert_next(build)
    }

    /// Allocate the next id, stamp the creation time and store the record
    /// produced by `build`. Returns a copy of what was stored.
    pub async fn create<F>(&self, build: F) -> T
    where
        F: FnOnce(i64, DateTime<Utc>) -> T,
    {
        let mut inner = self.inner.write().await;
        inner.insert_next(build)
    }

    pub async fn get_by_id(&self, id: i64) -> Option<T> {
        let inner = self.inner.read().await;
        inner.records.get(&id).cloned()
    }

    /// All records. Currently ascending by id; callers should not rely on it.
    pub async fn list_all(&self) -> Vec<T> {
        let inner = self.inner.read().await;
        inner.records.values().cloned().collect()
    }

    pub async fn list_by_filter<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        let inner = self.inner.read().await;
        inner.records.values().filter(|r| predicate(r)).cloned().collect()
    }

    /// Mutate a stored record in place; `false` if `id` is unknown.
    pub async fn update<F>(&self, id: i64, mutate: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        let mut inner = self.inner.write().await;
        match inner.records.get_mut(&id) {
            Some(record) => {
                mutate(record);
                true
            }
            None => false,
        }
    }

    /// Id the next `create` will assign.
    pub async fn next_id(&self) -> i64 {
        self.inner.read().await.next_id
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }
}
