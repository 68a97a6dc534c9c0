//! Rate limiting over keyed streams.
//!
//! An item is kept when nothing has been kept yet, or when its key is at least
//! `delay` past the key of the last kept item. Dropped items never reset the
//! clock.

use std::collections::HashMap;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::ops::Add;

fn admits<K>(last: Option<K>, key: K, delay: K) -> bool
where
    K: Copy + PartialOrd + Add<Output = K>,
{
    last.is_none_or(|last| last + delay <= key)
}

pub fn throttle<I, K, F>(values: I, key_fn: F, delay: K) -> Throttle<I::IntoIter, K, F>
where
    I: IntoIterator,
    K: Copy + PartialOrd + Add<Output = K>,
    F: FnMut(&I::Item) -> K,
{
    Throttle {
        values: values.into_iter(),
        key_fn,
        delay,
        last: None,
    }
}

/// Adapter behind [`throttle`].
#[derive(Clone)]
pub struct Throttle<I, K, F> {
    values: I,
    key_fn: F,
    delay: K,
    last: Option<K>,
}

impl<I, K, F> Iterator for Throttle<I, K, F>
where
    I: Iterator,
    K: Copy + PartialOrd + Add<Output = K>,
    F: FnMut(&I::Item) -> K,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let value = self.values.next()?;
            let key = (self.key_fn)(&value);
            if admits(self.last, key, self.delay) {
                self.last = Some(key);
                return Some(value);
            }
        }
    }
}

impl<I, K, F> FusedIterator for Throttle<I, K, F>
where
    I: FusedIterator,
    K: Copy + PartialOrd + Add<Output = K>,
    F: FnMut(&I::Item) -> K,
{
}

/// [`throttle`] applied independently per `thread_fn` key.
pub fn throttle_threads<I, T, K, TF, KF>(
    values: I,
    thread_fn: TF,
    time_fn: KF,
    delay: K,
) -> ThrottleThreads<I::IntoIter, T, K, TF, KF>
where
    I: IntoIterator,
    T: Eq + Hash,
    K: Copy + PartialOrd + Add<Output = K>,
    TF: FnMut(&I::Item) -> T,
    KF: FnMut(&I::Item) -> K,
{
    ThrottleThreads {
        values: values.into_iter(),
        thread_fn,
        time_fn,
        delay,
        last: HashMap::new(),
    }
}

/// Adapter behind [`throttle_threads`].
#[derive(Clone)]
pub struct ThrottleThreads<I, T, K, TF, KF> {
    values: I,
    thread_fn: TF,
    time_fn: KF,
    delay: K,
    last: HashMap<T, K>,
}

impl<I, T, K, TF, KF> Iterator for ThrottleThreads<I, T, K, TF, KF>
where
    I: Iterator,
    T: Eq + Hash,
    K: Copy + PartialOrd + Add<Output = K>,
    TF: FnMut(&I::Item) -> T,
    KF: FnMut(&I::Item) -> K,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let value = self.values.next()?;
            let thread = (self.thread_fn)(&value);
            let time = (self.time_fn)(&value);
            if admits(self.last.get(&thread).copied(), time, self.delay) {
                self.last.insert(thread, time);
                return Some(value);
            }
        }
    }
}
