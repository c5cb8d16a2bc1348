//! Durable key-value snapshot storage for StockCart.
//!
//! A [`SnapshotStore`] maps string keys to opaque byte snapshots. Two
//! backends ship with the crate:
//!
//! - [`MemoryStore`] - process-local, used in tests and dry runs
//! - [`FileStore`] - one file per key under a directory
//!
//! [`Cache`] layers typed JSON access on top of any store.
//!
//! # Example
//!
//! ```rust
//! use stockcart_cache::{Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//!
//! cache.set("cart", &vec![1, 2, 3]).unwrap();
//! let cart: Option<Vec<u32>> = cache.get("cart").unwrap();
//!
//! assert_eq!(cart, Some(vec![1, 2, 3]));
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, SnapshotStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, MemoryStore, SnapshotStore};
}
