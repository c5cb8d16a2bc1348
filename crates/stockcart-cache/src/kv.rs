//! Key-Value store abstraction with automatic serialization.

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Durable key-value storage for byte snapshots.
///
/// Writes are synchronous and either replace the whole value for a key or
/// fail; a failed write must leave the previous value readable.
pub trait SnapshotStore: Send + Sync {
    /// Read the snapshot stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Replace the snapshot stored under `key`.
    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), CacheError>;

    /// Remove the snapshot stored under `key`.
    ///
    /// Returns `CacheError::NotFound` if nothing is stored there.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check if a key exists in the store.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.read(key)?.is_some())
    }

    /// Get all keys in the store.
    fn keys(&self) -> Result<Vec<String>, CacheError>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Arc<S> {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), CacheError> {
        (**self).write(key, bytes)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        (**self).exists(key)
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        (**self).keys()
    }
}

/// Type-safe cache over a [`SnapshotStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
pub struct Cache<S> {
    store: S,
}

impl<S: SnapshotStore> Cache<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and a
    /// `CacheError::SerializeError` if the stored bytes don't decode as `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Cart> = cache.get("@RocketShoes:cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.read(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("@RocketShoes:cart", &cart)?;
    /// ```
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.write(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
