//! Filtering that remembers where kept items moved.

/// Keep the items for which `predicate(index, &item)` holds.
///
/// Returns the kept items and, for every input position, the item's index in
/// the kept list (`None` when it was dropped).
pub fn remap<I, P>(values: I, mut predicate: P) -> (Vec<I::Item>, Vec<Option<usize>>)
where
    I: IntoIterator,
    P: FnMut(usize, &I::Item) -> bool,
{
    let mut kept = Vec::new();
    let mut mapping = Vec::new();
    for (index, value) in values.into_iter().enumerate() {
        if predicate(index, &value) {
            mapping.push(Some(kept.len()));
            kept.push(value);
        } else {
            mapping.push(None);
        }
    }
    (kept, mapping)
}
