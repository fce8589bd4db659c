//! Record codec
//!
//! Encoding into caller-provided memory and zero-copy decoding.

use bytes::{Buf, BufMut};

use crate::error::{BasementError, Result};

use super::{OpKind, RecordView, FIXKEY_SIZE, MAX_TXID};

// =============================================================================
// Packed Field
// =============================================================================

/// Combine txid and kind into the on-disk `(txid << 8) | kind` field
///
/// Bits of `txid` above `MAX_TXID` are lost; callers validate first.
pub fn pack_txid_kind(txid: u64, kind: OpKind) -> u64 {
    (txid << 8) | kind.tag() as u64
}

/// Split a packed field into (txid, raw kind tag)
pub fn unpack_txid_kind(packed: u64) -> (u64, u8) {
    (packed >> 8, (packed & 0xff) as u8)
}

// =============================================================================
// Encoding
// =============================================================================

/// Length of a key or value as stored in the header
///
/// Fails with `InvalidRecord` instead of truncating when `len` exceeds u32.
pub fn checked_len(what: &str, len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| {
        BasementError::InvalidRecord(format!("{} length {} exceeds u32", what, len))
    })
}

/// Exact number of bytes `encode_into` writes for this record
pub fn encoded_len(key: &[u8], value: &[u8], kind: OpKind) -> usize {
    let value_len = if kind.is_tombstone() { 0 } else { value.len() };
    FIXKEY_SIZE + key.len() + value_len
}

/// Encode a record into `dst`
///
/// `dst` must be exactly `encoded_len(key, value, kind)` bytes. The value
/// of a tombstone is never written. Lengths must fit in u32 and `txid`
/// must not exceed `MAX_TXID`; `Basement::put` checks both.
pub fn encode_into(dst: &mut [u8], key: &[u8], value: &[u8], kind: OpKind, txid: u64) {
    debug_assert_eq!(dst.len(), encoded_len(key, value, kind));
    debug_assert!(txid <= MAX_TXID);

    let value = if kind.is_tombstone() { &[][..] } else { value };

    let mut buf = dst;
    buf.put_u32_le(key.len() as u32);
    buf.put_u32_le(value.len() as u32);
    buf.put_u64_le(pack_txid_kind(txid, kind));
    buf.put_slice(key);
    buf.put_slice(value);
}

/// Build a transient seek probe for `key`
///
/// Header + key only. The probe carries `MAX_TXID` so that it orders at or
/// before every stored version of the same key. Its kind bits are zero and
/// never decoded. Keys longer than u32 cannot be stored, so they are
/// rejected here too.
pub fn encode_probe(key: &[u8]) -> Result<Vec<u8>> {
    let key_len = checked_len("key", key.len())?;
    let mut probe = Vec::with_capacity(FIXKEY_SIZE + key.len());
    probe.put_u32_le(key_len);
    probe.put_u32_le(0);
    probe.put_u64_le(MAX_TXID << 8);
    probe.put_slice(key);
    Ok(probe)
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode an encoded buffer into borrowed views
///
/// Never copies. Buffers produced by `encode_into` always decode; the
/// checks here only turn a foreign or truncated buffer into an error
/// instead of a panic.
pub fn decode(buf: &[u8]) -> Result<RecordView<'_>> {
    if buf.len() < FIXKEY_SIZE {
        return Err(BasementError::Corruption(format!(
            "Incomplete header: expected {} bytes, got {}",
            FIXKEY_SIZE,
            buf.len()
        )));
    }

    let mut header = &buf[..FIXKEY_SIZE];
    let key_len = header.get_u32_le() as usize;
    let value_len = header.get_u32_le() as usize;
    let (txid, tag) = unpack_txid_kind(header.get_u64_le());
    let kind = OpKind::try_from(tag)?;

    let body = &buf[FIXKEY_SIZE..];
    if body.len() < key_len {
        return Err(BasementError::Corruption(format!(
            "Incomplete key: expected {} bytes, got {}",
            key_len,
            body.len()
        )));
    }
    let (key, rest) = body.split_at(key_len);

    let value = if kind.is_tombstone() {
        &[][..]
    } else {
        if rest.len() < value_len {
            return Err(BasementError::Corruption(format!(
                "Incomplete value: expected {} bytes, got {}",
                value_len,
                rest.len()
            )));
        }
        &rest[..value_len]
    };

    Ok(RecordView {
        key,
        value,
        kind,
        txid,
    })
}
