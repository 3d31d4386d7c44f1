//! Small sequence helpers shared by the data and api crates.

use std::collections::HashMap;
use std::hash::Hash;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeqError {
    #[error("no items match the condition")]
    NoMatch,
    #[error("multiple items match the condition")]
    MultipleMatches,
}

/// Apply `f` to every item, keeping order.
pub fn transform<T, U>(items: &[T], f: impl FnMut(&T) -> U) -> Vec<U> {
    items.iter().map(f).collect()
}

/// Items for which `condition` holds, in input order.
pub fn filter<T: Clone>(items: &[T], mut condition: impl FnMut(&T) -> bool) -> Vec<T> {
    items.iter().filter(|item| condition(*item)).cloned().collect()
}

/// Map values sorted by key. Iteration order of the map itself is never relied on.
pub fn ordered_values<K: Ord + Hash, V: Clone>(map: &HashMap<K, V>) -> Vec<V> {
    let mut keys: Vec<&K> = map.keys().collect();
    keys.sort();
    keys.into_iter().map(|k| map[k].clone()).collect()
}

pub fn transform_values<K: Ord + Hash, V: Clone, U>(
    map: &HashMap<K, V>,
    f: impl FnMut(&V) -> U,
) -> Vec<U> {
    transform(&ordered_values(map), f)
}

pub fn values_where<K: Ord + Hash, V: Clone>(
    map: &HashMap<K, V>,
    condition: impl FnMut(&V) -> bool,
) -> Vec<V> {
    filter(&ordered_values(map), condition)
}

/// The one item matching `condition`.
pub fn single<T>(items: &[T], mut condition: impl FnMut(&T) -> bool) -> Result<&T, SeqError> {
    let mut matches = items.iter().filter(|item| condition(*item));
    match (matches.next(), matches.next()) {
        (Some(item), None) => Ok(item),
        (None, _) => Err(SeqError::NoMatch),
        (Some(_), Some(_)) => Err(SeqError::MultipleMatches),
    }
}
