use std::hash::Hash;

use indexmap::IndexSet;

/// Duplicate-free collection that iterates in first-insertion order.
///
/// `IndexSet` already provides constant-time membership, positional indexing (`set[i]`,
/// `get_index`) and an order-insensitive `==`, which is everything grammars need.
pub type OrderedSet<T> = IndexSet<T>;

pub trait PowerSet<T> {
    /// All subsets, each one keeping the iteration order of `self`.
    ///
    /// Subsets are enumerated by bitmask, so the empty set comes first and the full set last.
    fn power_set(&self) -> Vec<OrderedSet<T>>;
}

impl<T: Hash + Eq + Clone> PowerSet<T> for OrderedSet<T> {
    fn power_set(&self) -> Vec<OrderedSet<T>> {
        let n = self.len();
        assert!(n < usize::BITS as usize, "power set of {n} elements is not enumerable");

        (0..1usize << n)
            .map(|mask| {
                self.iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, item)| item.clone())
                    .collect()
            })
            .collect()
    }
}
