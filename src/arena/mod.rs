//! Arena Module
//!
//! Monotonic bump allocator backing every record buffer.
//!
//! ## Responsibilities
//! - Hand out aligned byte ranges in O(1) amortized time
//! - Track cumulative granted bytes (`memory_used`) for flush decisions
//! - Never free a single allocation; everything goes at once on drop
//!
//! ## Layout
//! ```text
//!   chunks[0]  ┌────────┬──┬──────────┬─┬───────┬────────────┐
//!              │ rec A  │p │  rec B   │p│ rec C │  (unused)  │  block_size
//!              └────────┴──┴──────────┴─┴───────┴────────────┘
//!   chunks[1]  ┌────────────────────────────────┐
//!              │ rec D (large, dedicated chunk) │               exact size
//!              └────────────────────────────────┘
//! ```
//!
//! Chunks are reserved up front and never reallocated, so a granted range
//! never moves. Alignment is applied to offsets within a chunk; the chunk
//! itself is a plain `Vec<u8>`, so it only shapes accounting and layout,
//! not the real address. Records are read through byte-level getters and
//! never cast. Handles are (chunk, offset, len) triples rather than raw
//! addresses; borrowing them through `&Arena` ties every view to the
//! arena's lifetime.
//!
//! ## Concurrency
//! Single writer: `allocate` takes `&mut self`.

use tracing::{debug, error};

use crate::error::{BasementError, Result};

/// Location of one granted byte range inside an Arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaHandle {
    chunk: usize,
    offset: usize,
    len: usize,
}

impl ArenaHandle {
    /// Length of the granted range in bytes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the range is zero bytes long
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Chunked bump allocator
pub struct Arena {
    /// Owned chunks, each reserved once at its final capacity
    chunks: Vec<Vec<u8>>,

    /// Chunk that small allocations are currently bumped from
    current: Option<usize>,

    /// Capacity of a regular chunk
    block_size: usize,

    /// Alignment of every grant, relative to its chunk start
    alignment: usize,

    /// Granted bytes, including alignment padding
    memory_used: usize,

    /// Hard cap on `memory_used`; grants past it fail
    capacity_limit: Option<usize>,
}

impl Arena {
    /// Create an empty arena. Nothing is reserved until the first grant.
    ///
    /// `alignment` must be a power of two (checked by `BasementConfig::validate`).
    pub fn new(block_size: usize, alignment: usize) -> Self {
        debug_assert!(alignment.is_power_of_two());
        Self {
            chunks: Vec::new(),
            current: None,
            block_size: block_size.max(1),
            alignment,
            memory_used: 0,
            capacity_limit: None,
        }
    }

    /// Refuse any grant that would push `memory_used` past `limit`
    pub fn with_capacity_limit(mut self, limit: usize) -> Self {
        self.capacity_limit = Some(limit);
        self
    }

    /// Grant `size` bytes, zero-filled
    ///
    /// `memory_used` grows by `size` plus any padding needed to align the
    /// range. Allocations over a quarter block get a dedicated chunk so a
    /// large record does not waste the tail of the current one.
    ///
    /// On `ResourceExhausted` nothing is granted and `memory_used` is unchanged.
    pub fn allocate(&mut self, size: usize) -> Result<ArenaHandle> {
        if let Some(idx) = self.current {
            let offset = self.chunks[idx].len();
            let start = align_up(offset, self.alignment);
            if let Some(end) = start.checked_add(size).filter(|&end| end <= self.block_size) {
                self.check_budget(end - offset, size)?;
                self.chunks[idx].resize(end, 0);
                self.memory_used += end - offset;
                return Ok(ArenaHandle {
                    chunk: idx,
                    offset: start,
                    len: size,
                });
            }
        }

        self.check_budget(size, size)?;
        if size > self.block_size / 4 {
            let idx = self.push_chunk(size, size)?;
            self.memory_used += size;
            return Ok(ArenaHandle {
                chunk: idx,
                offset: 0,
                len: size,
            });
        }

        let idx = self.push_chunk(self.block_size, size)?;
        self.current = Some(idx);
        self.memory_used += size;
        Ok(ArenaHandle {
            chunk: idx,
            offset: 0,
            len: size,
        })
    }

    /// Fail if granting `granted` more bytes would exceed the capacity limit
    fn check_budget(&self, granted: usize, size: usize) -> Result<()> {
        let Some(limit) = self.capacity_limit else {
            return Ok(());
        };
        match self.memory_used.checked_add(granted) {
            Some(total) if total <= limit => Ok(()),
            _ => {
                error!(limit, used = self.memory_used, size, "arena capacity limit reached");
                Err(BasementError::ResourceExhausted { requested: size })
            }
        }
    }

    /// Reserve a new chunk of `capacity` with the first `size` bytes in use
    fn push_chunk(&mut self, capacity: usize, size: usize) -> Result<usize> {
        let mut chunk = Vec::new();
        if chunk.try_reserve_exact(capacity).is_err() {
            error!(capacity, used = self.memory_used, "arena chunk reservation failed");
            return Err(BasementError::ResourceExhausted { requested: size });
        }
        chunk.resize(size, 0);
        self.chunks.push(chunk);

        debug!(
            chunk = self.chunks.len() - 1,
            capacity,
            used = self.memory_used,
            "arena grew"
        );
        Ok(self.chunks.len() - 1)
    }

    /// Read-only bytes of a granted range
    pub fn get(&self, handle: ArenaHandle) -> &[u8] {
        &self.chunks[handle.chunk][handle.offset..handle.offset + handle.len]
    }

    /// Writable bytes of a granted range
    pub fn get_mut(&mut self, handle: ArenaHandle) -> &mut [u8] {
        &mut self.chunks[handle.chunk][handle.offset..handle.offset + handle.len]
    }

    /// Total bytes granted so far (not logically live bytes)
    pub fn memory_used(&self) -> usize {
        self.memory_used
    }

    /// Number of chunks reserved so far
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }
}

/// Round `offset` up to the next multiple of `align` (a power of two)
fn align_up(offset: usize, align: usize) -> usize {
    (offset + align - 1) & !(align - 1)
}
