//! Record Module
//!
//! The unit stored in the basement and its binary layout.
//!
//! ## Encoded Buffer Layout
//! ```text
//! ┌──────────────┬──────────────┬──────────────────────┬─────────┬───────────┐
//! │ KeyLen (4)   │ ValLen (4)   │ (TxId << 8) | Kind   │   Key   │   Value   │
//! │ u32 LE       │ u32 LE       │ u64 LE (8)           │         │ (omitted  │
//! │              │ 0 for Delete │                      │         │ on Delete)│
//! └──────────────┴──────────────┴──────────────────────┴─────────┴───────────┘
//!  offset 0       offset 4       offset 8               offset 16
//! ```
//!
//! The packing of transaction id and kind happens only at this edge. In
//! memory they are always an explicit `u64` and an `OpKind`.

mod codec;

pub use codec::{checked_len, decode, encode_into, encode_probe, encoded_len, pack_txid_kind, unpack_txid_kind};

use crate::error::BasementError;

/// Fixed header size: key length (4) + value length (4) + packed txid/kind (8)
pub const FIXKEY_SIZE: usize = 16;

/// Largest transaction id that survives packing next to an 8-bit kind
pub const MAX_TXID: u64 = u64::MAX >> 8;

/// Operation kind tag, stored in the low byte of the packed field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpKind {
    /// A normal write of a fresh key
    Insert = 0x01,

    /// A delete (tombstone marker, carries no value)
    Delete = 0x02,

    /// A normal write superseding an earlier value
    Update = 0x03,
}

impl OpKind {
    /// Only deletes are tombstones
    pub fn is_tombstone(self) -> bool {
        self == OpKind::Delete
    }

    /// Raw 8-bit tag stored in the packed field
    pub fn tag(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for OpKind {
    type Error = BasementError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0x01 => Ok(OpKind::Insert),
            0x02 => Ok(OpKind::Delete),
            0x03 => Ok(OpKind::Update),
            _ => Err(BasementError::Corruption(format!(
                "Unknown operation kind tag: 0x{:02x}",
                tag
            ))),
        }
    }
}

/// Decoded view over an encoded buffer
///
/// Key and value borrow the buffer they were decoded from, so a view
/// cannot outlive the arena that holds it. For tombstones `value` is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordView<'a> {
    pub key: &'a [u8],
    pub value: &'a [u8],
    pub kind: OpKind,
    pub txid: u64,
}

impl<'a> RecordView<'a> {
    /// Value bytes, or None for a tombstone
    pub fn value_opt(&self) -> Option<&'a [u8]> {
        if self.kind.is_tombstone() {
            None
        } else {
            Some(self.value)
        }
    }

    /// Copy the view out of the arena
    pub fn to_record(&self) -> Record {
        Record {
            key: self.key.to_vec(),
            value: self.value_opt().map(<[u8]>::to_vec),
            kind: self.kind,
            txid: self.txid,
        }
    }
}

/// An owned record, detached from any arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: Vec<u8>,
    /// None for tombstones
    pub value: Option<Vec<u8>>,
    pub kind: OpKind,
    pub txid: u64,
}
