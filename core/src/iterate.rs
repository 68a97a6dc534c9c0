//! Repeated application of a function.

use std::iter::FusedIterator;
use std::mem;

/// Infinite sequence `x, f(x), f(f(x)), ...`.
pub fn iterate<T, F>(f: F, x: T) -> Iterate<T, F>
where
    T: Clone,
    F: FnMut(&T) -> T,
{
    Iterate { f, current: x }
}

/// Adapter behind [`iterate`].
#[derive(Debug, Clone)]
pub struct Iterate<T, F> {
    f: F,
    current: T,
}

impl<T, F> Iterator for Iterate<T, F>
where
    T: Clone,
    F: FnMut(&T) -> T,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let next = (self.f)(&self.current);
        Some(mem::replace(&mut self.current, next))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<T, F> FusedIterator for Iterate<T, F>
where
    T: Clone,
    F: FnMut(&T) -> T,
{
}
