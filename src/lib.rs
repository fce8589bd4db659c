//! # Basement
//!
//! The in-memory sorted write buffer of an LSM-tree storage engine:
//! - Compact fixed-header record encoding (bit-exact, little-endian)
//! - Arena-backed storage with no per-record free
//! - Multi-version keys ordered newest-first
//! - Seekable, bidirectional cursors that decode in place
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Storage Engine (caller)                     │
//! │            flush / compaction / query layers                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ put / memory_size / record_count / iter
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Basement                              │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────┐                ┌─────────────────┐
//!   │    SkipList     │── handles ────►│      Arena      │
//!   │ (key ASC, txid  │                │ (bump, chunked) │
//!   │      DESC)      │                └────────┬────────┘
//!   └─────────────────┘                         │ bytes
//!                                      ┌────────▼────────┐
//!                                      │  Record codec   │
//!                                      └─────────────────┘
//! ```
//!
//! Arena alignment is measured from each chunk's start and only shapes
//! layout and `memory_size`. Records are read through byte getters, so no
//! code relies on the real address of a grant being aligned.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod arena;
pub mod index;
pub mod basement;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BasementError, Result};
pub use config::BasementConfig;
pub use record::{OpKind, Record, RecordView, FIXKEY_SIZE, MAX_TXID};
pub use basement::{Basement, BasementIter, Records, SharedBasement};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
