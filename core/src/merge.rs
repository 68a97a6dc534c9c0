//! K-way merge of already sorted streams.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::iter::FusedIterator;

/// Heap entry: the current head of one source.
///
/// Ordered so that `BinaryHeap` (a max-heap) pops the smallest key first, and
/// among equal keys the lowest source index.
struct Head<K> {
    key: K,
    source: usize,
}

impl<K: PartialOrd> PartialEq for Head<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: PartialOrd> Eq for Head<K> {}

impl<K: PartialOrd> PartialOrd for Head<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: PartialOrd> Ord for Head<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Unordered keys (NaN) compare equal so the heap stays consistent.
        other
            .key
            .partial_cmp(&self.key)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.source.cmp(&self.source))
    }
}

/// Lazy merge of sorted `inputs` into one sorted stream.
///
/// Each input must already be sorted by `key_fn`. Ties are broken by input
/// position, so the merge is stable.
pub fn merge_many<P, K, F>(
    inputs: P,
    key_fn: F,
) -> MergeMany<<P::Item as IntoIterator>::IntoIter, K, F>
where
    P: IntoIterator,
    P::Item: IntoIterator,
    K: PartialOrd,
    F: FnMut(&<P::Item as IntoIterator>::Item) -> K,
{
    let mut merge = MergeMany {
        sources: Vec::new(),
        heads: Vec::new(),
        heap: BinaryHeap::new(),
        key_fn,
    };
    for input in inputs {
        let mut source = input.into_iter();
        let index = merge.sources.len();
        let head = source.next();
        if let Some(value) = &head {
            let key = (merge.key_fn)(value);
            merge.heap.push(Head { key, source: index });
        }
        merge.sources.push(source);
        merge.heads.push(head);
    }
    merge
}

/// Adapter behind [`merge_many`].
pub struct MergeMany<I: Iterator, K, F> {
    sources: Vec<I>,
    /// Pending head value of each source, aligned with `sources`.
    heads: Vec<Option<I::Item>>,
    heap: BinaryHeap<Head<K>>,
    key_fn: F,
}

impl<I, K, F> Iterator for MergeMany<I, K, F>
where
    I: Iterator,
    K: PartialOrd,
    F: FnMut(&I::Item) -> K,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let Head { source, .. } = self.heap.pop()?;
        let value = self.heads[source].take();
        if let Some(next) = self.sources[source].next() {
            let key = (self.key_fn)(&next);
            self.heads[source] = Some(next);
            self.heap.push(Head { key, source });
        }
        value
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let buffered = self.heap.len();
        self.sources
            .iter()
            .map(Iterator::size_hint)
            .fold((buffered, Some(buffered)), |(lo, hi), (l, h)| {
                (
                    lo.saturating_add(l),
                    hi.and_then(|hi| h.and_then(|h| hi.checked_add(h))),
                )
            })
    }
}

impl<I, K, F> FusedIterator for MergeMany<I, K, F>
where
    I: Iterator,
    K: PartialOrd,
    F: FnMut(&I::Item) -> K,
{
}

impl<I: Iterator, K, F> fmt::Debug for MergeMany<I, K, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergeMany")
            .field("sources", &self.sources.len())
            .field("live", &self.heap.len())
            .finish_non_exhaustive()
    }
}
