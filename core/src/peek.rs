//! Looking ahead without losing items, and joining streams end to end.

use std::iter::{Chain, Flatten};
use std::vec;

/// Pull up to `n` items from `values` without losing them.
///
/// Returns the pulled items and an iterator that replays them before the rest
/// of the input. With `n == 0` nothing is pulled.
pub fn peek<I: IntoIterator>(
    values: I,
    n: usize,
) -> (Vec<I::Item>, Chain<vec::IntoIter<I::Item>, I::IntoIter>)
where
    I::Item: Clone,
{
    let mut rest = values.into_iter();
    let head: Vec<I::Item> = rest.by_ref().take(n).collect();
    (head.clone(), head.into_iter().chain(rest))
}

/// Every item of every part, part by part.
pub fn concat<P>(parts: P) -> Flatten<P::IntoIter>
where
    P: IntoIterator,
    P::Item: IntoIterator,
{
    parts.into_iter().flatten()
}
