//! Duplicate suppression, in the spirit of the unix `uniq` command.

use std::collections::HashSet;
use std::hash::Hash;
use std::iter::FusedIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UniqMode {
    /// Drop an item whose key equals the previous item's key.
    #[default]
    Adjacent,
    /// Drop an item whose key was seen anywhere earlier.
    Global,
}

#[derive(Debug, Clone)]
enum Seen<K> {
    Last(Option<K>),
    All(HashSet<K>),
}

/// Adapter behind [`uniq`].
#[derive(Clone)]
pub struct Uniq<I, K, F> {
    values: I,
    key_fn: F,
    seen: Seen<K>,
}

/// Keep the first item of each key, per `mode`.
pub fn uniq<I, K, F>(values: I, key_fn: F, mode: UniqMode) -> Uniq<I::IntoIter, K, F>
where
    I: IntoIterator,
    K: Eq + Hash,
    F: FnMut(&I::Item) -> K,
{
    let seen = match mode {
        UniqMode::Adjacent => Seen::Last(None),
        UniqMode::Global => Seen::All(HashSet::new()),
    };
    Uniq {
        values: values.into_iter(),
        key_fn,
        seen,
    }
}

impl<I, K, F> Iterator for Uniq<I, K, F>
where
    I: Iterator,
    K: Eq + Hash,
    F: FnMut(&I::Item) -> K,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let value = self.values.next()?;
            let key = (self.key_fn)(&value);
            let fresh = match &mut self.seen {
                Seen::Last(last) => {
                    if last.as_ref() == Some(&key) {
                        false
                    } else {
                        *last = Some(key);
                        true
                    }
                }
                Seen::All(keys) => keys.insert(key),
            };
            if fresh {
                return Some(value);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.values.size_hint();
        (lower.min(1), upper)
    }
}

impl<I, K, F> FusedIterator for Uniq<I, K, F>
where
    I: FusedIterator,
    K: Eq + Hash,
    F: FnMut(&I::Item) -> K,
{
}
