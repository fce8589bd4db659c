//! Basement implementation
//!
//! Facade owning one Arena and one SkipList.

use tracing::{debug, trace};

use crate::arena::Arena;
use crate::config::BasementConfig;
use crate::error::{BasementError, Result};
use crate::index::{InternalKeyComparator, SkipList};
use crate::record::{self, OpKind, MAX_TXID};

use super::{BasementIter, Records};

/// In-memory sorted write buffer
pub struct Basement {
    // Field order is drop order: the index goes before the arena it points into.
    /// Handles of every encoded record, ordered by (key ASC, txid DESC)
    index: SkipList<InternalKeyComparator>,

    /// Backing memory for every encoded record
    arena: Arena,

    /// Total puts, including duplicate keys and tombstones
    count: usize,

    config: BasementConfig,
}

impl Basement {
    /// Create an empty basement with the default configuration
    pub fn new() -> Self {
        Self::build(BasementConfig::default())
    }

    /// Create an empty basement, validating `config` first
    pub fn with_config(config: BasementConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: BasementConfig) -> Self {
        let mut arena = Arena::new(config.arena_block_size, config.arena_alignment);
        if let Some(limit) = config.arena_capacity {
            arena = arena.with_capacity_limit(limit);
        }
        let index = SkipList::new(
            InternalKeyComparator,
            config.max_height,
            config.branching_factor,
            config.seed,
        );
        debug!(
            block_size = config.arena_block_size,
            max_height = config.max_height,
            "basement created"
        );
        Self {
            index,
            arena,
            count: 0,
            config,
        }
    }

    /// Append one record
    ///
    /// The value of a tombstone is never stored. Every call grows
    /// `memory_size()` and `record_count()`, even for a key already present.
    ///
    /// Returns `ResourceExhausted` when the arena cannot grow; the engine
    /// must treat that as fatal. A failed put leaves the basement unchanged.
    pub fn put(&mut self, key: &[u8], value: &[u8], kind: OpKind, txid: u64) -> Result<()> {
        Self::check_record(key, value, kind, txid)?;

        let size = record::encoded_len(key, value, kind);
        let handle = self.arena.allocate(size)?;
        record::encode_into(self.arena.get_mut(handle), key, value, kind, txid);
        self.index.insert(&self.arena, handle);
        self.count += 1;

        trace!(key_len = key.len(), size, ?kind, txid, "put");
        Ok(())
    }

    /// Reject records whose lengths or txid would be truncated by the layout
    fn check_record(key: &[u8], value: &[u8], kind: OpKind, txid: u64) -> Result<()> {
        record::checked_len("key", key.len())?;
        if !kind.is_tombstone() {
            record::checked_len("value", value.len())?;
        }
        if txid > MAX_TXID {
            return Err(BasementError::InvalidRecord(format!(
                "txid {} exceeds {}",
                txid, MAX_TXID
            )));
        }
        Ok(())
    }

    /// Bytes granted by the arena (allocated, not live)
    pub fn memory_size(&self) -> usize {
        self.arena.memory_used()
    }

    /// Number of puts performed
    pub fn record_count(&self) -> usize {
        self.count
    }

    /// Whether no put has happened yet
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Configuration this basement was built with
    pub fn config(&self) -> &BasementConfig {
        &self.config
    }

    /// A fresh, unpositioned cursor
    pub fn cursor(&self) -> BasementIter<'_> {
        BasementIter::new(self)
    }

    /// Every record in index order (for flush)
    pub fn iter(&self) -> Records<'_> {
        Records::new(self)
    }

    /// Release the index, then the arena
    pub fn destroy(self) {
        debug!(
            records = self.count,
            memory = self.arena.memory_used(),
            chunks = self.arena.chunk_count(),
            "basement destroyed"
        );
        drop(self);
    }

    /// `destroy` for an optional basement; `None` is a no-op
    pub fn destroy_opt(basement: Option<Self>) {
        if let Some(basement) = basement {
            basement.destroy();
        }
    }

    pub(super) fn index(&self) -> &SkipList<InternalKeyComparator> {
        &self.index
    }

    pub(super) fn arena(&self) -> &Arena {
        &self.arena
    }
}

impl Default for Basement {
    fn default() -> Self {
        Self::new()
    }
}
