//! Prefix counting.

/// Count the leading elements of `items` that satisfy `predicate`.
///
/// `predicate` must be monotone over the sequence (true on a prefix, false
/// afterwards). Iteration stops at the first failing element, so the cost is
/// proportional to the returned count rather than the sequence length.
pub fn count_while<I, P>(items: I, mut predicate: P) -> usize
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
{
    let mut count = 0;
    for item in items {
        if !predicate(&item) {
            break;
        }
        count += 1;
    }
    count
}

/// Count every element of `items`.
pub fn count<I: IntoIterator>(items: I) -> usize {
    items.into_iter().count()
}
