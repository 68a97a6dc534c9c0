//! Key-based windowing over a sorted stream.
//!
//! [`WindowDiffs`] partitions a stream whose keys are non-decreasing into
//! fixed-size key windows and emits, per window, a [`DiffRecord`]: how many
//! items to evict from the front of the previous window and which values to
//! append. Nothing already seen is rescanned; the engine keeps only the values
//! not yet assigned to a window and the keys of emitted values that may still
//! be evicted.
//!
//! [`Windows`] applies those records to a single owned buffer and yields a
//! [`WindowSnapshot`] per window.
//!
//! ```text
//! sorted values ──► WindowDiffs ──► DiffRecord ──► Windows ──► WindowSnapshot
//!                    pending                        buffer
//!                    history
//! ```
//!
//! # Preconditions
//!
//! Keys must be non-decreasing. This is never checked: out-of-order input
//! produces wrong eviction counts and window membership, not an error.
//!
//! With `step > size` the windows leave gaps. Values whose key falls in a gap
//! are carried into the next window's `added` set, so gapped snapshots may
//! hold keys below their `window_start`.

use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;
use std::mem;

use fx_types::{DiffRecord, WindowKey, WindowSnapshot, WindowSpec};
use tracing::{debug, trace};

use crate::prefix::count_while;

#[derive(Debug, Clone, Copy)]
enum Phase<K> {
    /// No window opened yet. `start` pins the first window when set; otherwise
    /// the first value's key does.
    Unseeded { start: Option<K> },
    Open { window_start: K },
    Exhausted,
}

/// Lazy producer of [`DiffRecord`]s for a key-sorted stream.
///
/// Every `next()` call pulls input only until one window can be closed. A
/// single value that jumps several windows ahead is parked while the windows
/// it skips are emitted one call at a time.
pub struct WindowDiffs<I: Iterator, K, F> {
    values: I,
    key_fn: F,
    size: K,
    step: K,
    phase: Phase<K>,
    pending_keys: Vec<K>,
    pending_values: Vec<I::Item>,
    /// Keys of already emitted values, oldest first, trimmed to the current
    /// window on every close. Mirrors the consumer's buffer without sharing it.
    history: VecDeque<K>,
    parked: Option<(K, I::Item)>,
    emitted: usize,
}

impl<I, K, F> WindowDiffs<I, K, F>
where
    I: Iterator,
    K: WindowKey,
    F: FnMut(&I::Item) -> K,
{
    pub fn new(values: I, key_fn: F, spec: WindowSpec<K>) -> Self {
        debug!(
            size = ?spec.size(),
            step = ?spec.step(),
            start = ?spec.start(),
            gaps = spec.has_gaps(),
            "Window diffs created"
        );
        Self {
            values,
            key_fn,
            size: spec.size(),
            step: spec.step(),
            phase: Phase::Unseeded {
                start: spec.start(),
            },
            pending_keys: Vec::new(),
            pending_values: Vec::new(),
            history: VecDeque::new(),
            parked: None,
            emitted: 0,
        }
    }

    /// Records emitted so far.
    #[must_use]
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    fn push_pending(&mut self, key: K, value: I::Item) {
        self.pending_keys.push(key);
        self.pending_values.push(value);
    }

    /// Resolve the current window start, seeding it on the first call.
    ///
    /// Returns `None` only when there is no explicit start and the input is
    /// empty.
    fn current_window_start(&mut self) -> Option<K> {
        match self.phase {
            Phase::Exhausted => None,
            Phase::Open { window_start } => Some(window_start),
            Phase::Unseeded { start } => {
                let window_start = match start {
                    Some(start) => start,
                    None => {
                        let Some(value) = self.values.next() else {
                            debug!("Empty input without explicit start");
                            self.phase = Phase::Exhausted;
                            return None;
                        };
                        let key = (self.key_fn)(&value);
                        self.push_pending(key, value);
                        key
                    }
                };
                self.phase = Phase::Open { window_start };
                Some(window_start)
            }
        }
    }

    /// `window_start + size`, and whether that end bounds the window.
    ///
    /// When the sum overflows the key type the window runs to the end of the
    /// key domain: it admits every remaining value and reports a saturated end.
    fn window_end(&self, window_start: K) -> (K, bool) {
        match window_start.checked_add(self.size) {
            Some(end) => (end, true),
            None => (window_start.saturating_add(self.size), false),
        }
    }

    /// Close the current window and move `window_start` forward by `step`.
    ///
    /// Only called for bounded windows. A gapped step that overflows the key
    /// type lands on the current end instead.
    fn advance(&mut self, window_start: K, window_end: K) -> DiffRecord<K, I::Item> {
        let record = self.close_window(window_start, window_end);
        self.phase = Phase::Open {
            window_start: window_start.checked_add(self.step).unwrap_or(window_end),
        };
        record
    }

    fn close_window(&mut self, window_start: K, window_end: K) -> DiffRecord<K, I::Item> {
        let evict_count = count_while(&self.history, |key| **key < window_start);
        self.history.drain(..evict_count);
        self.history.extend(self.pending_keys.drain(..));
        let added = mem::take(&mut self.pending_values);
        self.emitted += 1;

        trace!(
            window_start = ?window_start,
            evict_count,
            added = added.len(),
            "Window closed"
        );

        DiffRecord {
            window_start,
            window_end,
            evict_count,
            added,
        }
    }
}

impl<I, K, F> Iterator for WindowDiffs<I, K, F>
where
    I: Iterator,
    K: WindowKey,
    F: FnMut(&I::Item) -> K,
{
    type Item = DiffRecord<K, I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let window_start = self.current_window_start()?;
        let (window_end, bounded) = self.window_end(window_start);
        let beyond = |key: &K| bounded && *key >= window_end;

        if let Some((key, value)) = self.parked.take() {
            if beyond(&key) {
                self.parked = Some((key, value));
                return Some(self.advance(window_start, window_end));
            }
            self.push_pending(key, value);
        }

        loop {
            let Some(value) = self.values.next() else {
                let record = self.close_window(window_start, window_end);
                self.phase = Phase::Exhausted;
                debug!(records = self.emitted, "Window diffs exhausted");
                return Some(record);
            };

            // Unordered keys (NaN) never compare `>=`, so they stay pending.
            let key = (self.key_fn)(&value);
            if !beyond(&key) {
                self.push_pending(key, value);
                continue;
            }

            // The value belongs to a later window: park it until a window
            // admits it.
            self.parked = Some((key, value));
            return Some(self.advance(window_start, window_end));
        }
    }
}

impl<I, K, F> FusedIterator for WindowDiffs<I, K, F>
where
    I: Iterator,
    K: WindowKey,
    F: FnMut(&I::Item) -> K,
{
}

impl<I: Iterator, K: fmt::Debug, F> fmt::Debug for WindowDiffs<I, K, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowDiffs")
            .field("size", &self.size)
            .field("step", &self.step)
            .field("phase", &self.phase)
            .field("pending", &self.pending_keys.len())
            .field("history", &self.history.len())
            .field("emitted", &self.emitted)
            .finish_non_exhaustive()
    }
}

/// Materialized windows: one [`WindowSnapshot`] per [`DiffRecord`].
///
/// Owns the only buffer that records are applied to; each snapshot is a copy
/// of that buffer.
pub struct Windows<I: Iterator, K, F> {
    diffs: WindowDiffs<I, K, F>,
    buffer: VecDeque<I::Item>,
}

impl<I, K, F> Windows<I, K, F>
where
    I: Iterator,
    I::Item: Clone,
    K: WindowKey,
    F: FnMut(&I::Item) -> K,
{
    pub fn new(values: I, key_fn: F, spec: WindowSpec<K>) -> Self {
        Self::from_diffs(WindowDiffs::new(values, key_fn, spec))
    }

    /// Materialize a diff stream that has not been advanced yet.
    pub fn from_diffs(diffs: WindowDiffs<I, K, F>) -> Self {
        debug_assert_eq!(diffs.emitted(), 0, "diff stream already advanced");
        Self {
            diffs,
            buffer: VecDeque::new(),
        }
    }
}

impl<I, K, F> Iterator for Windows<I, K, F>
where
    I: Iterator,
    I::Item: Clone,
    K: WindowKey,
    F: FnMut(&I::Item) -> K,
{
    type Item = WindowSnapshot<K, I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.diffs.next()?;
        let (window_start, window_end) = record.apply(&mut self.buffer);
        Some(WindowSnapshot {
            window_start,
            window_end,
            items: self.buffer.iter().cloned().collect(),
        })
    }
}

impl<I, K, F> FusedIterator for Windows<I, K, F>
where
    I: Iterator,
    I::Item: Clone,
    K: WindowKey,
    F: FnMut(&I::Item) -> K,
{
}

impl<I: Iterator, K: fmt::Debug, F> fmt::Debug for Windows<I, K, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Windows")
            .field("diffs", &self.diffs)
            .field("buffered", &self.buffer.len())
            .finish()
    }
}

/// Diff records for `values`, which must be sorted by `key_fn`.
pub fn window_diffs<V, K, F>(
    values: V,
    key_fn: F,
    spec: WindowSpec<K>,
) -> WindowDiffs<V::IntoIter, K, F>
where
    V: IntoIterator,
    K: WindowKey,
    F: FnMut(&V::Item) -> K,
{
    WindowDiffs::new(values.into_iter(), key_fn, spec)
}

/// Window snapshots for `values`, which must be sorted by `key_fn`.
pub fn windows<V, K, F>(values: V, key_fn: F, spec: WindowSpec<K>) -> Windows<V::IntoIter, K, F>
where
    V: IntoIterator,
    V::Item: Clone,
    K: WindowKey,
    F: FnMut(&V::Item) -> K,
{
    Windows::new(values.into_iter(), key_fn, spec)
}

/// Method-call form of [`window_diffs`] and [`windows`].
pub trait SortedIterExt: Iterator + Sized {
    fn window_diffs<K, F>(self, key_fn: F, spec: WindowSpec<K>) -> WindowDiffs<Self, K, F>
    where
        K: WindowKey,
        F: FnMut(&Self::Item) -> K,
    {
        WindowDiffs::new(self, key_fn, spec)
    }

    fn windows<K, F>(self, key_fn: F, spec: WindowSpec<K>) -> Windows<Self, K, F>
    where
        Self::Item: Clone,
        K: WindowKey,
        F: FnMut(&Self::Item) -> K,
    {
        Windows::new(self, key_fn, spec)
    }
}

impl<I: Iterator> SortedIterExt for I {}
