//! Grouping, counting and frequency helpers.
//!
//! [`group_by`] folds the values that share a key with a [`Semigroup`]: the
//! first value of a group becomes `unit(value)`, every later one is folded in
//! with `append`.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::ops::AddAssign;

pub trait Semigroup<V> {
    type Output;

    fn unit(&self, value: V) -> Self::Output;
    fn append(&self, acc: &mut Self::Output, value: V);
}

/// Collect every value of a group, in input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListSemigroup;

impl<V> Semigroup<V> for ListSemigroup {
    type Output = Vec<V>;

    fn unit(&self, value: V) -> Vec<V> {
        vec![value]
    }

    fn append(&self, acc: &mut Vec<V>, value: V) {
        acc.push(value);
    }
}

/// Count the values of a group.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountSemigroup;

impl<V> Semigroup<V> for CountSemigroup {
    type Output = usize;

    fn unit(&self, _value: V) -> usize {
        1
    }

    fn append(&self, acc: &mut usize, _value: V) {
        *acc += 1;
    }
}

/// Sum the values of a group.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumSemigroup;

impl<V: AddAssign> Semigroup<V> for SumSemigroup {
    type Output = V;

    fn unit(&self, value: V) -> V {
        value
    }

    fn append(&self, acc: &mut V, value: V) {
        *acc += value;
    }
}

/// Distinct values of a group.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetSemigroup;

impl<V: Eq + Hash> Semigroup<V> for SetSemigroup {
    type Output = HashSet<V>;

    fn unit(&self, value: V) -> HashSet<V> {
        HashSet::from([value])
    }

    fn append(&self, acc: &mut HashSet<V>, value: V) {
        acc.insert(value);
    }
}

/// Group `values` by `key_fn`, transform each with `map_fn`, fold with `semigroup`.
pub fn group_by<I, K, V, S, KF, MF>(
    values: I,
    mut key_fn: KF,
    mut map_fn: MF,
    semigroup: &S,
) -> HashMap<K, S::Output>
where
    I: IntoIterator,
    K: Eq + Hash,
    S: Semigroup<V>,
    KF: FnMut(&I::Item) -> K,
    MF: FnMut(I::Item) -> V,
{
    let mut groups: HashMap<K, S::Output> = HashMap::new();
    for value in values {
        let key = key_fn(&value);
        let mapped = map_fn(value);
        match groups.get_mut(&key) {
            Some(acc) => semigroup.append(acc, mapped),
            None => {
                groups.insert(key, semigroup.unit(mapped));
            }
        }
    }
    groups
}

/// Occurrence count of each distinct value.
pub fn bag<I>(values: I) -> HashMap<I::Item, usize>
where
    I: IntoIterator,
    I::Item: Eq + Hash,
{
    let mut counts = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

/// Index of the first occurrence of each distinct value.
pub fn item_indices<I>(values: I) -> HashMap<I::Item, usize>
where
    I: IntoIterator,
    I::Item: Eq + Hash,
{
    let mut indices = HashMap::new();
    for (index, value) in values.into_iter().enumerate() {
        indices.entry(value).or_insert(index);
    }
    indices
}

/// The item with the greatest key; the first one wins on ties.
///
/// Unlike [`Iterator::max_by_key`], keys only need `PartialOrd`, so floating
/// point keys work. A key that compares unordered never replaces the current
/// maximum.
pub fn max_by_key_first<I, K, F>(values: I, mut key_fn: F) -> Option<I::Item>
where
    I: IntoIterator,
    K: PartialOrd,
    F: FnMut(&I::Item) -> K,
{
    let mut best: Option<(K, I::Item)> = None;
    for value in values {
        let key = key_fn(&value);
        let improves = match &best {
            Some((best_key, _)) => *best_key < key,
            None => true,
        };
        if improves {
            best = Some((key, value));
        }
    }
    best.map(|(_, value)| value)
}

/// Keys that occur at least `min_count` times.
pub fn filter_by_min_freq<I, K, F>(values: I, min_count: usize, mut key_fn: F) -> HashSet<K>
where
    I: IntoIterator,
    K: Eq + Hash,
    F: FnMut(&I::Item) -> K,
{
    let mut frequent = HashSet::new();
    let mut candidates: HashMap<K, usize> = HashMap::new();
    for value in values {
        let key = key_fn(&value);
        if frequent.contains(&key) {
            continue;
        }
        let seen = candidates.get(&key).copied().unwrap_or(0) + 1;
        if seen >= min_count {
            candidates.remove(&key);
            frequent.insert(key);
        } else {
            candidates.insert(key, seen);
        }
    }
    frequent
}
