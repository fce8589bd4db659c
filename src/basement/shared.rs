//! Shared basement handle
//!
//! Cross-thread access with one writer at a time and many readers.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Result;
use crate::record::OpKind;

use super::Basement;

/// Cloneable handle to a Basement behind a RwLock
///
/// ## Concurrency:
/// - `put`: takes the write lock, so writers are serialized
/// - `with_read`: takes the read lock; any number of readers run together
#[derive(Clone)]
pub struct SharedBasement {
    inner: Arc<RwLock<Basement>>,
}

impl SharedBasement {
    /// Wrap `basement` for sharing across threads
    pub fn new(basement: Basement) -> Self {
        Self {
            inner: Arc::new(RwLock::new(basement)),
        }
    }

    /// Append one record under the write lock
    pub fn put(&self, key: &[u8], value: &[u8], kind: OpKind, txid: u64) -> Result<()> {
        self.inner.write().put(key, value, kind, txid)
    }

    /// `Basement::memory_size` under the read lock
    pub fn memory_size(&self) -> usize {
        self.inner.read().memory_size()
    }

    /// `Basement::record_count` under the read lock
    pub fn record_count(&self) -> usize {
        self.inner.read().record_count()
    }

    /// Run `f` with shared access; iterators created inside cannot escape
    pub fn with_read<R>(&self, f: impl FnOnce(&Basement) -> R) -> R {
        let guard = self.inner.read();
        f(&*guard)
    }

    /// Take the basement back once this is the last handle
    pub fn try_into_inner(self) -> std::result::Result<Basement, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}
