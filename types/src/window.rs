//! Window geometry and the records produced while windowing a sorted stream.
//!
//! [`WindowSpec`] is valid by construction: a zero, negative or NaN size or
//! step cannot be represented, so consumers never need to re-check it.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::key::WindowKey;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowSpecError {
    #[error("window size must be positive, got {0}")]
    NonPositiveSize(String),
    #[error("window step must be positive, got {0}")]
    NonPositiveStep(String),
}

/// Key-based window geometry: `size`, `step` and an optional fixed `start`.
///
/// - `step` defaults to `size` (tumbling windows).
/// - `start` defaults to the key of the first observed value.
/// - `step > size` is allowed and leaves gaps between windows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSpec<K> {
    size: K,
    step: K,
    start: Option<K>,
}

impl<K: WindowKey> WindowSpec<K> {
    /// Tumbling windows of `size`.
    pub fn new(size: K) -> Result<Self, WindowSpecError> {
        if !size.is_positive() {
            return Err(WindowSpecError::NonPositiveSize(format!("{size:?}")));
        }
        Ok(Self {
            size,
            step: size,
            start: None,
        })
    }

    /// Windows of `size` advancing by `step`.
    pub fn sliding(size: K, step: K) -> Result<Self, WindowSpecError> {
        Self::new(size)?.with_step(step)
    }

    pub fn with_step(self, step: K) -> Result<Self, WindowSpecError> {
        if !step.is_positive() {
            return Err(WindowSpecError::NonPositiveStep(format!("{step:?}")));
        }
        Ok(Self { step, ..self })
    }

    /// Pin the first window to `start` instead of the first observed key.
    #[must_use]
    pub fn starting_at(self, start: K) -> Self {
        Self {
            start: Some(start),
            ..self
        }
    }

    #[must_use]
    pub fn size(&self) -> K {
        self.size
    }

    #[must_use]
    pub fn step(&self) -> K {
        self.step
    }

    #[must_use]
    pub fn start(&self) -> Option<K> {
        self.start
    }

    /// `true` when consecutive windows leave keys uncovered.
    #[must_use]
    pub fn has_gaps(&self) -> bool {
        self.step > self.size
    }

    #[must_use]
    pub fn overlaps(&self) -> bool {
        self.step < self.size
    }
}

/// Incremental buffer mutation for one window.
///
/// Applying records in emission order to an initially empty buffer yields the
/// contents of each window in turn. A record applied out of order, or after a
/// skipped one, leaves the buffer meaningless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffRecord<K, T> {
    pub window_start: K,
    pub window_end: K,
    /// Leading buffered items to drop before appending `added`.
    pub evict_count: usize,
    pub added: Vec<T>,
}

impl<K: Copy, T> DiffRecord<K, T> {
    #[must_use]
    pub fn bounds(&self) -> (K, K) {
        (self.window_start, self.window_end)
    }

    /// Evict from the front of `buffer`, then append the added values.
    ///
    /// Returns the window bounds so callers can build a snapshot after the
    /// record has been consumed.
    pub fn apply(self, buffer: &mut VecDeque<T>) -> (K, K) {
        debug_assert!(
            self.evict_count <= buffer.len(),
            "evict_count {} exceeds buffer length {}; records applied out of order",
            self.evict_count,
            buffer.len()
        );
        let evict = self.evict_count.min(buffer.len());
        buffer.drain(..evict);
        buffer.extend(self.added);
        (self.window_start, self.window_end)
    }
}

impl<K: fmt::Display, T: fmt::Display> fmt::Display for DiffRecord<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}) -{}",
            self.window_start, self.window_end, self.evict_count
        )?;
        for value in &self.added {
            write!(f, " +{value}")?;
        }
        Ok(())
    }
}

/// Full contents of one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSnapshot<K, T> {
    pub window_start: K,
    pub window_end: K,
    pub items: Vec<T>,
}

impl<K, T> WindowSnapshot<K, T> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<K: fmt::Display, T: fmt::Display> fmt::Display for WindowSnapshot<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.window_start, self.window_end)?;
        for item in &self.items {
            write!(f, " {item}")?;
        }
        Ok(())
    }
}
