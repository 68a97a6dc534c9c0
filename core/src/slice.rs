//! Leading and trailing slices of a stream.

use std::collections::VecDeque;
use std::collections::vec_deque;
use std::iter::{FusedIterator, Skip, Take};

pub fn take_first<I: IntoIterator>(limit: usize, values: I) -> Take<I::IntoIter> {
    values.into_iter().take(limit)
}

pub fn drop_first<I: IntoIterator>(limit: usize, values: I) -> Skip<I::IntoIter> {
    values.into_iter().skip(limit)
}

/// The last `limit` items of `values`.
///
/// Consumes the whole input before yielding; memory is bounded by `limit`.
pub fn take_last<I: IntoIterator>(limit: usize, values: I) -> vec_deque::IntoIter<I::Item> {
    let mut tail = VecDeque::with_capacity(limit);
    if limit > 0 {
        for value in values {
            if tail.len() == limit {
                tail.pop_front();
            }
            tail.push_back(value);
        }
    }
    tail.into_iter()
}

/// Every item of `values` except the last `limit`.
pub fn drop_last<I: IntoIterator>(limit: usize, values: I) -> DropLast<I::IntoIter> {
    DropLast {
        values: values.into_iter(),
        limit,
        lookahead: VecDeque::with_capacity(limit + 1),
    }
}

/// Lazy adapter behind [`drop_last`]: an item is released once `limit` newer
/// items have been seen.
#[derive(Debug, Clone)]
pub struct DropLast<I: Iterator> {
    values: I,
    limit: usize,
    lookahead: VecDeque<I::Item>,
}

impl<I: Iterator> Iterator for DropLast<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        while self.lookahead.len() <= self.limit {
            let value = self.values.next()?;
            self.lookahead.push_back(value);
        }
        self.lookahead.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.values.size_hint();
        let held = self.lookahead.len();
        (
            (lower + held).saturating_sub(self.limit),
            upper.map(|u| (u + held).saturating_sub(self.limit)),
        )
    }
}

impl<I: FusedIterator> FusedIterator for DropLast<I> {}

/// The `n`th item (zero-based), or `default` when the input is shorter.
pub fn nth_or<I: IntoIterator>(values: I, n: usize, default: I::Item) -> I::Item {
    values.into_iter().nth(n).unwrap_or(default)
}
