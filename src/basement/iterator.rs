//! Basement iterator
//!
//! Cursor over the index that decodes the record under it in place.

use tracing::{trace, warn};

use crate::index::{Cursor, InternalKeyComparator};
use crate::record::{self, OpKind, RecordView};

use super::Basement;

/// Independently positioned cursor over a Basement
///
/// ## States
/// - unpositioned: just created, invalid
/// - valid: the last positioning call landed on a record
/// - invalid: the last positioning call ran off an end (or the basement is empty)
///
/// Decoded views borrow the basement's arena, so they cannot outlive it.
pub struct BasementIter<'a> {
    cursor: Cursor<'a, InternalKeyComparator>,
    current: Option<RecordView<'a>>,
}

impl<'a> BasementIter<'a> {
    /// Bind a fresh cursor to `basement`; starts invalid
    pub fn new(basement: &'a Basement) -> Self {
        Self {
            cursor: basement.index().cursor(basement.arena()),
            current: None,
        }
    }

    /// True iff the last positioning call landed on a record
    pub fn is_valid(&self) -> bool {
        self.current.is_some()
    }

    // =========================================================================
    // Positioning
    // =========================================================================

    /// Position at the smallest key (its newest version)
    pub fn seek_to_first(&mut self) {
        self.cursor.seek_to_first();
        self.decode_current();
    }

    /// Position at the largest key (its oldest version)
    pub fn seek_to_last(&mut self) {
        self.cursor.seek_to_last();
        self.decode_current();
    }

    /// Step to the next record; stays invalid once off the end
    pub fn advance_forward(&mut self) {
        self.cursor.advance_forward();
        self.decode_current();
    }

    /// Step to the previous record; stays invalid once off the front
    pub fn advance_backward(&mut self) {
        self.cursor.advance_backward();
        self.decode_current();
    }

    /// Position at the first record whose key is not less than `key`
    ///
    /// Lands on the newest version when `key` is present. Invalid if every
    /// stored key is smaller, or if `key` is too long to ever be stored.
    pub fn seek(&mut self, key: &[u8]) {
        // The probe lives only for this call and never enters the arena
        let probe = match record::encode_probe(key) {
            Ok(probe) => probe,
            Err(e) => {
                warn!("Unseekable key: {}", e);
                self.cursor.reset();
                self.current = None;
                return;
            }
        };
        self.cursor.seek(&probe);
        drop(probe);

        trace!(key_len = key.len(), found = self.cursor.is_valid(), "seek");
        self.decode_current();
    }

    /// `seek` for an optional key; `None` leaves the position unchanged
    pub fn seek_opt(&mut self, key: Option<&[u8]>) {
        if let Some(key) = key {
            self.seek(key);
        }
    }

    fn decode_current(&mut self) {
        self.current = match self.cursor.current() {
            Some(buf) => match record::decode(buf) {
                Ok(view) => Some(view),
                Err(e) => {
                    warn!("Undecodable record in basement: {}", e);
                    None
                }
            },
            None => None,
        };
    }

    // =========================================================================
    // Decoded View
    // =========================================================================

    /// The decoded record at the cursor
    pub fn record(&self) -> Option<RecordView<'a>> {
        self.current
    }

    /// Key bytes at the cursor
    pub fn key(&self) -> Option<&'a [u8]> {
        self.current.map(|view| view.key)
    }

    /// Value bytes; empty for a tombstone
    pub fn value(&self) -> Option<&'a [u8]> {
        self.current.map(|view| view.value)
    }

    pub fn kind(&self) -> Option<OpKind> {
        self.current.map(|view| view.kind)
    }

    pub fn txid(&self) -> Option<u64> {
        self.current.map(|view| view.txid)
    }
}

/// `Iterator` over every record of a Basement in index order
pub struct Records<'a> {
    iter: BasementIter<'a>,
    started: bool,
}

impl<'a> Records<'a> {
    pub(super) fn new(basement: &'a Basement) -> Self {
        Self {
            iter: BasementIter::new(basement),
            started: false,
        }
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = RecordView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.started {
            self.iter.advance_forward();
        } else {
            self.iter.seek_to_first();
            self.started = true;
        }
        self.iter.record()
    }
}
