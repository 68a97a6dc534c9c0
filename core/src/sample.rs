//! Sampling and shuffling.
//!
//! Random choices take any `rand::Rng`, so callers pass `rand::rng()` in
//! production and a seeded `StdRng` where results must be reproducible.

use std::hash::{DefaultHasher, Hash, Hasher};
use std::iter::FusedIterator;
use std::num::NonZeroUsize;

use rand::Rng;
use rand::seq::{IteratorRandom, SliceRandom};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SampleError {
    #[error("sampling rate must be at least 1")]
    ZeroRate,
}

fn nonzero_rate(rate: usize) -> Result<NonZeroUsize, SampleError> {
    NonZeroUsize::new(rate).ok_or(SampleError::ZeroRate)
}

/// Items at positions `0, rate, 2 * rate, ...`.
pub fn every_nth<I: IntoIterator>(
    values: I,
    rate: usize,
) -> Result<EveryNth<I::IntoIter>, SampleError> {
    Ok(EveryNth {
        values: values.into_iter(),
        rate: nonzero_rate(rate)?,
        position: 0,
    })
}

/// Adapter behind [`every_nth`].
#[derive(Debug, Clone)]
pub struct EveryNth<I> {
    values: I,
    rate: NonZeroUsize,
    position: usize,
}

impl<I: Iterator> Iterator for EveryNth<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let value = self.values.next()?;
            let keep = self.position == 0;
            self.position = (self.position + 1) % self.rate.get();
            if keep {
                return Some(value);
            }
        }
    }
}

impl<I: FusedIterator> FusedIterator for EveryNth<I> {}

/// Items whose key hashes to zero modulo `rate`.
///
/// The same key is always kept or always dropped within one build, so related
/// items (same user, same session) are sampled together.
pub fn hash_sample<I, K, F>(
    values: I,
    key_fn: F,
    rate: usize,
) -> Result<HashSample<I::IntoIter, F>, SampleError>
where
    I: IntoIterator,
    K: Hash,
    F: FnMut(&I::Item) -> K,
{
    Ok(HashSample {
        values: values.into_iter(),
        key_fn,
        rate: nonzero_rate(rate)?,
    })
}

/// Adapter behind [`hash_sample`].
#[derive(Clone)]
pub struct HashSample<I, F> {
    values: I,
    key_fn: F,
    rate: NonZeroUsize,
}

fn hash_of<K: Hash>(key: &K) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

impl<I, K, F> Iterator for HashSample<I, F>
where
    I: Iterator,
    K: Hash,
    F: FnMut(&I::Item) -> K,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let rate = self.rate.get() as u64;
        loop {
            let value = self.values.next()?;
            if hash_of(&(self.key_fn)(&value)) % rate == 0 {
                return Some(value);
            }
        }
    }
}

/// Uniform sample of `n` items from a stream of unknown length.
///
/// Returns every item when the stream holds at most `n`. The order of the
/// selected items is unspecified; shuffle them if it matters.
pub fn reservoir_sample<I, R>(values: I, n: usize, rng: &mut R) -> Vec<I::Item>
where
    I: IntoIterator,
    R: Rng + ?Sized,
{
    if n == 0 {
        return Vec::new();
    }
    values.into_iter().sample(rng, n)
}

/// Every item of `values` in a uniformly random order.
pub fn shuffle<I, R>(values: I, rng: &mut R) -> Vec<I::Item>
where
    I: IntoIterator,
    R: Rng + ?Sized,
{
    let mut items: Vec<I::Item> = values.into_iter().collect();
    items.shuffle(rng);
    items
}
