//! Basement Module
//!
//! In-memory sorted write buffer (memtable) for recent writes.
//!
//! ## Responsibilities
//! - Encode every write into arena memory and index it in key order
//! - Keep every version of a key (duplicates and tombstones included)
//! - Report granted memory and write count for flush decisions
//! - Seekable, bidirectional cursors that decode in place
//!
//! ## Write Path
//! ```text
//!   put(key, value, kind, txid)
//!        │
//!        ▼
//!   ┌──────────┐  allocate   ┌─────────┐
//!   │  codec   │◄────────────│  Arena  │
//!   └────┬─────┘             └─────────┘
//!        │ handle
//!        ▼
//!   ┌──────────┐
//!   │ SkipList │  (key ASC, txid DESC)
//!   └──────────┘
//! ```
//!
//! ## Concurrency
//! `put` takes `&mut self` and iterators borrow `&self`, so the borrow
//! checker enforces single-writer / multi-reader. `SharedBasement` moves
//! that discipline behind a `parking_lot::RwLock` for cross-thread use.

mod iterator;
mod shared;
mod table;

pub use iterator::{BasementIter, Records};
pub use shared::SharedBasement;
pub use table::Basement;
