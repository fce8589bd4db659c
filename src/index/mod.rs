//! Ordered Index Module
//!
//! Sorted, seekable container of encoded record buffers.
//!
//! ## Responsibilities
//! - Keep arena-resident buffers ordered by a caller-supplied comparator
//! - Never merge or reject duplicates (multi-version storage)
//! - Lower-bound seek, first/last, forward/backward stepping
//!
//! The index stores `ArenaHandle`s, not bytes. Every operation that needs
//! to compare receives the owning `Arena` by reference.

mod skiplist;

pub use skiplist::{Cursor, SkipList};

use std::cmp::Ordering;

use bytes::Buf;

use crate::record::FIXKEY_SIZE;

/// Strict total order over two encoded buffers
pub trait Comparator {
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering;
}

impl<F> Comparator for F
where
    F: Fn(&[u8], &[u8]) -> Ordering,
{
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
        self(a, b)
    }
}

/// Orders encoded records by (key ASC, txid DESC)
///
/// Newest version of a key comes first. Buffers with equal key and txid
/// compare Equal; the skip list keeps them in insertion order.
///
/// Both inputs must be well-formed encoded buffers (header + key at least).
#[derive(Debug, Clone, Copy, Default)]
pub struct InternalKeyComparator;

impl InternalKeyComparator {
    /// Key bytes and txid of an encoded buffer, without decoding the value
    fn split(buf: &[u8]) -> (&[u8], u64) {
        let mut header = &buf[..FIXKEY_SIZE];
        let key_len = header.get_u32_le() as usize;
        let _value_len = header.get_u32_le();
        let txid = header.get_u64_le() >> 8;
        (&buf[FIXKEY_SIZE..FIXKEY_SIZE + key_len], txid)
    }
}

impl Comparator for InternalKeyComparator {
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
        let (a_key, a_txid) = Self::split(a);
        let (b_key, b_txid) = Self::split(b);
        a_key.cmp(b_key).then_with(|| b_txid.cmp(&a_txid))
    }
}
