//! Adapters composed with each other and with the window engine.

use std::collections::HashMap;

use fx_core::{
    CountSemigroup, ListSemigroup, SlidingSpec, SortedIterExt, SumSemigroup, UniqMode, WindowSpec,
    concat, drop_last, every_nth, group_by, iterate, merge_many, peek, sliding, take_first,
    take_last, throttle, throttle_threads, uniq,
};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Reading {
    at: u32,
    sensor: &'static str,
    value: i64,
}

fn reading(at: u32, sensor: &'static str, value: i64) -> Reading {
    Reading { at, sensor, value }
}

fn sensor_streams() -> Vec<Vec<Reading>> {
    vec![
        vec![
            reading(0, "north", 3),
            reading(4, "north", 5),
            reading(9, "north", 1),
        ],
        vec![
            reading(1, "south", 2),
            reading(4, "south", 7),
            reading(12, "south", 4),
        ],
    ]
}

#[test]
fn merged_streams_can_be_windowed() {
    let spec = WindowSpec::new(5).unwrap();
    let totals: Vec<(u32, i64)> = merge_many(sensor_streams(), |r| r.at)
        .windows(|r| r.at, spec)
        .map(|w| (w.window_start, w.items.iter().map(|r| r.value).sum()))
        .collect();
    assert_eq!(totals, vec![(0, 17), (5, 1), (10, 4)]);
}

#[test]
fn group_readings_per_window() {
    let spec = WindowSpec::new(10).unwrap();
    let per_window: Vec<HashMap<&str, i64>> = merge_many(sensor_streams(), |r| r.at)
        .windows(|r| r.at, spec)
        .map(|w| group_by(w.items, |r| r.sensor, |r| r.value, &SumSemigroup))
        .collect();
    assert_eq!(per_window.len(), 2);
    assert_eq!(per_window[0]["north"], 9);
    assert_eq!(per_window[0]["south"], 9);
    assert_eq!(per_window[1]["south"], 4);
    assert!(!per_window[1].contains_key("north"));
}

#[test]
fn throttle_before_windowing() {
    let spec = WindowSpec::new(10).unwrap();
    let counts: Vec<usize> = throttle(0_u32..40, |v| *v, 3)
        .windows(|v| *v, spec)
        .map(|w| w.len())
        .collect();
    // kept: 0 3 6 9 | 12 15 18 | 21 24 27 | 30 33 36 39
    assert_eq!(counts, vec![4, 3, 3, 4]);
}

#[test]
fn per_sensor_throttle_keeps_both_sensors() {
    let merged = merge_many(sensor_streams(), |r| r.at);
    let kept: Vec<(u32, &str)> = throttle_threads(merged, |r| r.sensor, |r| r.at, 5)
        .map(|r| (r.at, r.sensor))
        .collect();
    assert_eq!(
        kept,
        vec![(0, "north"), (1, "south"), (9, "north"), (12, "south")]
    );
}

#[test]
fn uniq_modes_differ_on_repeats() {
    let values = [1, 1, 2, 1, 3, 3, 2];
    let adjacent: Vec<i32> = uniq(values, |v| *v, UniqMode::Adjacent).collect();
    let global: Vec<i32> = uniq(values, |v| *v, UniqMode::Global).collect();
    assert_eq!(adjacent, vec![1, 2, 1, 3, 2]);
    assert_eq!(global, vec![1, 2, 3]);
}

#[test]
fn slices_of_an_unfolded_sequence() {
    let powers = iterate(|v: &u64| v * 2, 1);
    assert_eq!(
        take_first(5, powers.clone()).collect::<Vec<_>>(),
        vec![1, 2, 4, 8, 16]
    );
    let tail: Vec<u64> = take_last(2, take_first(10, powers.clone())).collect();
    assert_eq!(tail, vec![256, 512]);
    let trimmed: Vec<u64> = drop_last(7, take_first(10, powers)).collect();
    assert_eq!(trimmed, vec![1, 2, 4]);
}

#[test]
fn peek_then_resume() {
    let (head, rest) = peek(concat([vec![1, 2], vec![3], vec![], vec![4, 5]]), 2);
    assert_eq!(head, vec![1, 2]);
    assert_eq!(rest.collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
}

#[test]
fn count_based_sliding_over_sampled_input() {
    let sampled = every_nth(0..10, 2).unwrap();
    let windows: Vec<Vec<i32>> = sliding(sampled, SlidingSpec::new(3, 2).unwrap()).collect();
    assert_eq!(windows, vec![vec![0, 2, 4], vec![4, 6, 8]]);
}

#[test]
fn grouping_semigroups() {
    let words = ["apple", "avocado", "banana", "blueberry", "cherry", "apricot"];
    let by_letter = group_by(words, |w| w.as_bytes()[0], |w| w, &ListSemigroup);
    assert_eq!(by_letter[&b'a'], vec!["apple", "avocado", "apricot"]);
    let counts = group_by(words, |w| w.len(), |w| w, &CountSemigroup);
    assert_eq!(counts[&6], 2);
    assert_eq!(counts[&7], 2);
}
