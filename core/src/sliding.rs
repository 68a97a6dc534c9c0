//! Count-based sliding windows.

use std::iter::FusedIterator;
use std::mem;

use fx_types::SlidingSpec;

/// Windows of `spec.length()` consecutive items, advancing `spec.step()` items.
///
/// Full windows are yielded as they complete. If input ends while a window is
/// only partly filled with items not yet yielded, that partial window is
/// yielded last. Empty input yields nothing.
pub fn sliding<I: IntoIterator>(values: I, spec: SlidingSpec) -> Sliding<I::IntoIter>
where
    I::Item: Clone,
{
    Sliding {
        values: values.into_iter(),
        length: spec.length(),
        step: spec.step(),
        window: Vec::with_capacity(spec.length()),
        yielded_last: true,
        done: false,
    }
}

/// Adapter behind [`sliding`].
#[derive(Debug, Clone)]
pub struct Sliding<I: Iterator> {
    values: I,
    length: usize,
    step: usize,
    window: Vec<I::Item>,
    /// Whether the most recent push completed a window.
    yielded_last: bool,
    done: bool,
}

impl<I> Iterator for Sliding<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        for value in self.values.by_ref() {
            self.window.push(value);
            if self.window.len() == self.length {
                let full = self.window.clone();
                self.window.drain(..self.step);
                self.yielded_last = true;
                return Some(full);
            }
            self.yielded_last = false;
        }
        self.done = true;
        if self.yielded_last {
            None
        } else {
            Some(mem::take(&mut self.window))
        }
    }
}

impl<I> FusedIterator for Sliding<I>
where
    I: Iterator,
    I::Item: Clone,
{
}
