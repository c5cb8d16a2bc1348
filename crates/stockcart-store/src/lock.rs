//! Per-key async exclusion.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockMap<K> = Arc<Mutex<HashMap<K, Arc<AsyncMutex<()>>>>>;

/// Lazily created async mutex per key.
///
/// Holders of the guard for a key run one at a time; different keys never
/// wait on each other. A key's mutex lives only while someone holds or
/// waits on it: the last guard to drop removes the entry.
#[derive(Debug)]
pub struct KeyedLocks<K> {
    locks: LockMap<K>,
}

impl<K> Default for KeyedLocks<K> {
    fn default() -> Self {
        Self {
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<K: Eq + Hash + Clone> KeyedLocks<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`.
    pub async fn lock(&self, key: &K) -> KeyGuard<K> {
        let guard = self.get(key).lock_owned().await;
        self.wrap(key, guard)
    }

    /// Take exclusive access to `key` if nobody holds it.
    pub fn try_lock(&self, key: &K) -> Option<KeyGuard<K>> {
        let guard = self.get(key).try_lock_owned().ok();
        match guard {
            Some(guard) => Some(self.wrap(key, guard)),
            None => {
                release(&self.locks, key);
                None
            }
        }
    }

    /// Number of keys with a mutex allocated.
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, key: &K) -> Arc<AsyncMutex<()>> {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key.clone())
            .or_default()
            .clone()
    }

    fn wrap(&self, key: &K, guard: OwnedMutexGuard<()>) -> KeyGuard<K> {
        KeyGuard {
            key: key.clone(),
            guard: Some(guard),
            locks: self.locks.clone(),
        }
    }
}

/// Drop the entry for `key` if only the map still references its mutex.
fn release<K: Eq + Hash>(locks: &LockMap<K>, key: &K) {
    let mut map = locks.lock().unwrap_or_else(PoisonError::into_inner);
    if map.get(key).is_some_and(|lock| Arc::strong_count(lock) == 1) {
        map.remove(key);
    }
}

/// Exclusive access to one key of a [`KeyedLocks`].
#[derive(Debug)]
pub struct KeyGuard<K: Eq + Hash> {
    key: K,
    guard: Option<OwnedMutexGuard<()>>,
    locks: LockMap<K>,
}

impl<K: Eq + Hash> Drop for KeyGuard<K> {
    fn drop(&mut self) {
        // Waiters clone the mutex under the map lock, so the count is
        // stable while it is held.
        let mut map = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        drop(self.guard.take());
        if map
            .get(&self.key)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            map.remove(&self.key);
        }
    }
}
