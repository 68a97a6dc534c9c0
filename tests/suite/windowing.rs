//! Window engine properties exercised through the public `fx_core` API.

use std::collections::VecDeque;
use std::time::Duration;

use fx_core::{
    DiffRecord, SortedIterExt, WindowSpec, WindowSpecError, count_while, window_diffs, windows,
};

use crate::common::{READINGS, scattered_keys, snapshots};

#[derive(Debug, Clone, PartialEq)]
struct Event {
    at: Duration,
    name: &'static str,
}

fn event(millis: u64, name: &'static str) -> Event {
    Event {
        at: Duration::from_millis(millis),
        name,
    }
}

#[test]
fn replaying_diffs_reproduces_every_window() {
    let spec = WindowSpec::sliding(2.0, 0.5).unwrap();
    let mut buffer = VecDeque::new();
    let replayed: Vec<Vec<f64>> = window_diffs(READINGS, |v| *v, spec)
        .map(|record| {
            record.apply(&mut buffer);
            buffer.iter().copied().collect()
        })
        .collect();
    let materialized: Vec<Vec<f64>> = windows(READINGS, |v| *v, spec)
        .map(|snapshot| snapshot.items)
        .collect();
    assert_eq!(replayed, materialized);
    assert!(!materialized.is_empty());
}

#[test]
fn tumbling_windows_partition_the_input() {
    let keys = scattered_keys(500, 97);
    let spec = WindowSpec::new(10).unwrap();
    let concatenated: Vec<u64> = snapshots(&keys, |k| *k, spec)
        .into_iter()
        .flat_map(|snapshot| snapshot.items)
        .collect();
    assert_eq!(concatenated, keys);
}

#[test]
fn overlapping_windows_hold_exactly_their_keys() {
    let keys = scattered_keys(300, 61);
    let spec = WindowSpec::sliding(9, 4).unwrap();
    for snapshot in snapshots(&keys, |k| *k, spec) {
        let expected: Vec<u64> = keys
            .iter()
            .copied()
            .filter(|k| (snapshot.window_start..snapshot.window_end).contains(k))
            .collect();
        assert_eq!(snapshot.items, expected, "window {}", snapshot.window_start);
    }
}

#[test]
fn evictions_balance_additions() {
    let keys = scattered_keys(400, 151);
    let spec = WindowSpec::sliding(20, 7).unwrap();
    let records: Vec<DiffRecord<u64, u64>> =
        keys.iter().copied().window_diffs(|k| *k, spec).collect();

    let added: usize = records.iter().map(|r| r.added.len()).sum();
    let evicted: usize = records.iter().map(|r| r.evict_count).sum();
    let mut buffer = VecDeque::new();
    for record in records {
        record.apply(&mut buffer);
    }
    assert_eq!(added, keys.len());
    assert_eq!(evicted, added - buffer.len());
}

#[test]
fn window_starts_advance_by_step_from_explicit_start() {
    let spec = WindowSpec::sliding(3, 2).unwrap().starting_at(1);
    let bounds: Vec<(i32, i32)> = window_diffs([4, 5, 9], |v| *v, spec)
        .map(|record| record.bounds())
        .collect();
    assert_eq!(bounds, vec![(1, 4), (3, 6), (5, 8), (7, 10)]);
}

#[test]
fn duration_keyed_events() {
    let events = vec![
        event(0, "boot"),
        event(250, "connect"),
        event(900, "request"),
        event(1_100, "response"),
        event(2_400, "close"),
    ];
    let spec = WindowSpec::new(Duration::from_secs(1)).unwrap();
    let names: Vec<Vec<&str>> = windows(events, |e| e.at, spec)
        .map(|snapshot| snapshot.items.iter().map(|e| e.name).collect())
        .collect();
    assert_eq!(
        names,
        vec![
            vec!["boot", "connect", "request"],
            vec!["response"],
            vec!["close"],
        ]
    );
}

#[test]
fn unbounded_input_is_windowed_lazily() {
    let spec = WindowSpec::sliding(100_u64, 50).unwrap();
    let sizes: Vec<usize> = (0_u64..)
        .windows(|v| *v, spec)
        .skip(1)
        .take(3)
        .map(|snapshot| snapshot.len())
        .collect();
    assert_eq!(sizes, vec![100, 100, 100]);
}

#[test]
fn gapped_windows_carry_skipped_values() {
    let spec = WindowSpec::sliding(1, 3).unwrap();
    let snapshots: Vec<(u32, Vec<u32>)> = windows([0, 1, 2, 3, 7], |v| *v, spec)
        .map(|snapshot| (snapshot.window_start, snapshot.items))
        .collect();
    assert_eq!(
        snapshots,
        vec![
            (0, vec![0]),
            (3, vec![1, 2, 3]),
            (6, vec![]),
            (9, vec![7]),
        ]
    );
}

#[test]
fn invalid_specs_fail_before_iteration() {
    assert_eq!(
        WindowSpec::new(0_i64).unwrap_err(),
        WindowSpecError::NonPositiveSize("0".to_string())
    );
    assert!(matches!(
        WindowSpec::sliding(1.0, f64::NAN),
        Err(WindowSpecError::NonPositiveStep(_))
    ));
}

#[test]
fn count_while_measures_expired_prefix() {
    let history = [1.0, 1.0, 2.0, 2.0, 2.4, 2.9];
    assert_eq!(count_while(history, |k| *k < 2.0), 2);
    assert_eq!(count_while(history, |k| *k < 10.0), 6);
    assert_eq!(count_while(Vec::<f64>::new(), |_| true), 0);
}
