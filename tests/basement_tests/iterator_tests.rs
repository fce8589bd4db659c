//! Basement Iterator Tests
//!
//! Tests verify:
//! - Newest-first ordering among versions of one key
//! - Full forward/backward scan coverage
//! - Lower-bound seek semantics
//! - Tombstone views
//! - Ordering against a sorted model on random input

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use basement::{Basement, BasementConfig, OpKind, Record};

// =============================================================================
// Helper Functions
// =============================================================================

/// a@1 = "1", a@2 = "2", b@1 = "3"
fn three_record_basement() -> Basement {
    let mut basement = Basement::new();
    basement.put(b"a", b"1", OpKind::Insert, 1).unwrap();
    basement.put(b"a", b"2", OpKind::Update, 2).unwrap();
    basement.put(b"b", b"3", OpKind::Insert, 1).unwrap();
    basement
}

// =============================================================================
// Scenario Tests
// =============================================================================

#[test]
fn test_forward_scenario() {
    let basement = three_record_basement();
    assert_eq!(basement.record_count(), 3);

    let mut iter = basement.cursor();
    assert!(!iter.is_valid());

    iter.seek_to_first();
    assert!(iter.is_valid());
    assert_eq!(iter.key(), Some(&b"a"[..]));
    assert_eq!(iter.value(), Some(&b"2"[..]));
    assert_eq!(iter.txid(), Some(2));
    assert_eq!(iter.kind(), Some(OpKind::Update));

    iter.advance_forward();
    assert_eq!(iter.key(), Some(&b"a"[..]));
    assert_eq!(iter.value(), Some(&b"1"[..]));
    assert_eq!(iter.txid(), Some(1));

    iter.advance_forward();
    assert_eq!(iter.key(), Some(&b"b"[..]));
    assert_eq!(iter.value(), Some(&b"3"[..]));

    iter.advance_forward();
    assert!(!iter.is_valid());
    assert_eq!(iter.record(), None);
}

#[test]
fn test_backward_scenario() {
    let basement = three_record_basement();
    let mut iter = basement.cursor();

    iter.seek_to_last();
    assert_eq!(iter.key(), Some(&b"b"[..]));

    iter.advance_backward();
    assert_eq!(iter.txid(), Some(1));
    assert_eq!(iter.key(), Some(&b"a"[..]));

    iter.advance_backward();
    assert_eq!(iter.txid(), Some(2));

    iter.advance_backward();
    assert!(!iter.is_valid());
}

#[test]
fn test_direction_change_mid_scan() {
    let basement = three_record_basement();
    let mut iter = basement.cursor();

    iter.seek(b"b");
    iter.advance_backward();
    iter.advance_forward();
    assert_eq!(iter.key(), Some(&b"b"[..]));
}

#[test]
fn test_empty_basement_iterator() {
    let basement = Basement::new();
    let mut iter = basement.cursor();

    iter.seek_to_first();
    assert!(!iter.is_valid());
    iter.seek_to_last();
    assert!(!iter.is_valid());
    iter.seek(b"anything");
    assert!(!iter.is_valid());
}

// =============================================================================
// Seek Tests
// =============================================================================

#[test]
fn test_seek_present_key_lands_on_newest() {
    let basement = three_record_basement();
    let mut iter = basement.cursor();

    iter.seek(b"a");
    assert_eq!(iter.key(), Some(&b"a"[..]));
    assert_eq!(iter.txid(), Some(2));
}

#[test]
fn test_seek_between_keys() {
    let basement = three_record_basement();
    let mut iter = basement.cursor();

    iter.seek(b"aa");
    assert_eq!(iter.key(), Some(&b"b"[..]));
}

#[test]
fn test_seek_past_end_is_invalid() {
    let basement = three_record_basement();
    let mut iter = basement.cursor();

    iter.seek(b"c");
    assert!(!iter.is_valid());
}

#[test]
fn test_seek_before_start_matches_seek_to_first() {
    let basement = three_record_basement();
    let mut sought = basement.cursor();
    let mut first = basement.cursor();

    sought.seek(b"");
    first.seek_to_first();
    assert_eq!(sought.record(), first.record());
}

#[test]
fn test_seek_none_keeps_position() {
    let basement = three_record_basement();
    let mut iter = basement.cursor();

    iter.seek(b"b");
    iter.seek_opt(None);
    assert_eq!(iter.key(), Some(&b"b"[..]));

    iter.seek_opt(Some(&b"a"[..]));
    assert_eq!(iter.key(), Some(&b"a"[..]));
}

#[test]
fn test_seek_does_not_grow_basement() {
    let basement = three_record_basement();
    let before = basement.memory_size();

    let mut iter = basement.cursor();
    for key in [&b"a"[..], &b"zz"[..], &b""[..]] {
        iter.seek(key);
    }

    assert_eq!(basement.memory_size(), before);
    assert_eq!(basement.record_count(), 3);
}

// =============================================================================
// Tombstone Tests
// =============================================================================

#[test]
fn test_tombstone_view_has_empty_value() {
    let mut basement = Basement::new();
    basement.put(b"k", b"v", OpKind::Insert, 1).unwrap();
    basement.put(b"k", b"should not persist", OpKind::Delete, 2).unwrap();

    let mut iter = basement.cursor();
    iter.seek(b"k");
    assert_eq!(iter.kind(), Some(OpKind::Delete));
    assert_eq!(iter.value(), Some(&b""[..]));
    assert_eq!(iter.record().unwrap().value_opt(), None);

    iter.advance_forward();
    assert_eq!(iter.kind(), Some(OpKind::Insert));
    assert_eq!(iter.value(), Some(&b"v"[..]));
}

// =============================================================================
// Coverage Tests
// =============================================================================

#[test]
fn test_full_scan_visits_every_record() {
    let mut basement = Basement::new();
    for i in 0..300u64 {
        let key = format!("k{}", i % 37);
        basement.put(key.as_bytes(), b"v", OpKind::Insert, i).unwrap();
    }

    let mut iter = basement.cursor();
    let mut visited = 0;
    iter.seek_to_first();
    while iter.is_valid() {
        visited += 1;
        iter.advance_forward();
    }

    assert_eq!(visited, basement.record_count());
    assert_eq!(basement.iter().count(), basement.record_count());
}

#[test]
fn test_iterators_are_independent() {
    let basement = three_record_basement();
    let mut forward = basement.cursor();
    let mut backward = basement.cursor();

    forward.seek_to_first();
    backward.seek_to_last();
    forward.advance_forward();

    assert_eq!(forward.txid(), Some(1));
    assert_eq!(forward.key(), Some(&b"a"[..]));
    assert_eq!(backward.key(), Some(&b"b"[..]));
}

#[test]
fn test_records_adapter() {
    let basement = three_record_basement();
    let records: Vec<Record> = basement.iter().map(|view| view.to_record()).collect();

    assert_eq!(
        records,
        vec![
            Record { key: b"a".to_vec(), value: Some(b"2".to_vec()), kind: OpKind::Update, txid: 2 },
            Record { key: b"a".to_vec(), value: Some(b"1".to_vec()), kind: OpKind::Insert, txid: 1 },
            Record { key: b"b".to_vec(), value: Some(b"3".to_vec()), kind: OpKind::Insert, txid: 1 },
        ]
    );
}

#[test]
fn test_same_key_same_txid_keeps_insertion_order() {
    let mut basement = Basement::new();
    basement.put(b"k", b"first", OpKind::Insert, 7).unwrap();
    basement.put(b"k", b"second", OpKind::Update, 7).unwrap();

    let values: Vec<&[u8]> = basement.iter().map(|view| view.value).collect();
    assert_eq!(values, vec![&b"first"[..], &b"second"[..]]);
}

// =============================================================================
// Model Tests
// =============================================================================

#[test]
fn test_random_puts_match_sorted_model() {
    let config = BasementConfig::builder()
        .arena_block_size(512)
        .seed(99)
        .build();
    let mut basement = Basement::with_config(config).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);
    let mut model: Vec<(Vec<u8>, u64, Record)> = Vec::new();

    for _ in 0..2000 {
        let key_len = rng.gen_range(0..6);
        let key: Vec<u8> = (0..key_len).map(|_| rng.gen_range(b'a'..=b'd')).collect();
        let value: Vec<u8> = (0..rng.gen_range(0..200)).map(|_| rng.gen()).collect();
        let txid = rng.gen_range(0..50);
        let kind = match rng.gen_range(0..3) {
            0 => OpKind::Insert,
            1 => OpKind::Update,
            _ => OpKind::Delete,
        };

        basement.put(&key, &value, kind, txid).unwrap();
        model.push((
            key.clone(),
            txid,
            Record {
                key,
                value: (!kind.is_tombstone()).then_some(value),
                kind,
                txid,
            },
        ));
    }

    // Stable sort keeps insertion order among equal (key, txid)
    model.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.cmp(&a.1)));
    let expected: Vec<Record> = model.into_iter().map(|(_, _, record)| record).collect();

    let forward: Vec<Record> = basement.iter().map(|view| view.to_record()).collect();
    assert_eq!(forward, expected);

    let mut backward = Vec::new();
    let mut iter = basement.cursor();
    iter.seek_to_last();
    while let Some(view) = iter.record() {
        backward.push(view.to_record());
        iter.advance_backward();
    }
    backward.reverse();
    assert_eq!(backward, expected);

    // Every seek lands on the first record with key >= target
    for target in [&b""[..], &b"a"[..], &b"b"[..], &b"bc"[..], &b"ddddd"[..], &b"e"[..]] {
        let mut iter = basement.cursor();
        iter.seek(target);
        let want = expected.iter().find(|record| record.key.as_slice() >= target);
        assert_eq!(iter.record().map(|view| view.to_record()).as_ref(), want);
    }
}
