use super::*;

#[test]
fn test_record_new_tokens() {
    let table = UniqueWordTable::default();
    table.record(b"apple").unwrap();
    table.record(b"banana").unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.occurrences(b"apple"), Some(1));
}

#[test]
fn test_record_repeated_token_increments_not_duplicates() {
    let table = UniqueWordTable::default();
    for _ in 0..5 {
        table.record(b"apple").unwrap();
    }
    assert_eq!(table.len(), 1);
    assert_eq!(table.occurrences(b"apple"), Some(5));
}

#[test]
fn test_empty_table() {
    let table = UniqueWordTable::default();
    assert_eq!(table.len(), 0);
    assert_eq!(table.occurrences(b"missing"), None);
}

#[test]
fn test_overflow_on_new_token_at_capacity() {
    let table = UniqueWordTable::with_capacity(2);
    table.record(b"a").unwrap();
    table.record(b"b").unwrap();
    let err = table.record(b"c").unwrap_err();
    assert_eq!(err, TableOverflow { capacity: 2 });
    // The failed insert must not have left a partial entry.
    assert_eq!(table.len(), 2);
}

#[test]
fn test_existing_token_still_recorded_at_capacity() {
    let table = UniqueWordTable::with_capacity(2);
    table.record(b"a").unwrap();
    table.record(b"b").unwrap();
    // "a" is already present: no new entry needed, so no overflow.
    table.record(b"a").unwrap();
    assert_eq!(table.occurrences(b"a"), Some(2));
}

#[test]
fn test_concurrent_record_same_token_counts_once() {
    // The same token recorded from many threads must end up as exactly
    // one entry with an exact total, across repeated trials.
    const THREADS: usize = 8;
    const PER_THREAD: u64 = 1_000;
    for _trial in 0..10 {
        let table = UniqueWordTable::default();
        std::thread::scope(|s| {
            for _ in 0..THREADS {
                s.spawn(|| {
                    for _ in 0..PER_THREAD {
                        table.record(b"apple").unwrap();
                    }
                });
            }
        });
        assert_eq!(table.len(), 1);
        assert_eq!(table.occurrences(b"apple"), Some(THREADS as u64 * PER_THREAD));
    }
}

#[test]
fn test_concurrent_record_disjoint_and_shared_tokens() {
    // Each thread records a private token plus a shared one; cardinality
    // must always be THREADS + 1.
    const THREADS: usize = 8;
    for _trial in 0..10 {
        let table = UniqueWordTable::default();
        std::thread::scope(|s| {
            for i in 0..THREADS {
                let table = &table;
                s.spawn(move || {
                    let private = format!("word-{}", i);
                    for _ in 0..500 {
                        table.record(private.as_bytes()).unwrap();
                        table.record(b"shared").unwrap();
                    }
                });
            }
        });
        assert_eq!(table.len(), THREADS + 1);
        assert_eq!(table.occurrences(b"shared"), Some(THREADS as u64 * 500));
    }
}
