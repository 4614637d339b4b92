/*!
An ordered-set adapter over [`BTreeSet`] carrying the crate's
destructor convention.

The tree stores each element once, ordered by its `Ord` impl.
Removing an element destroys it through the hook; inserting an
element equal to a stored one displaces the old element and hands it
back to the caller instead.
*/

use alloc::collections::BTreeSet;
use alloc::collections::btree_set;

use crate::DestroyFn;

/// A sorted set of elements with an optional destructor hook.
pub struct SortedTree<T> {
    items: BTreeSet<T>,
    destroy: Option<DestroyFn<T>>,
}

impl<T> SortedTree<T> {
    /// Creates an empty tree without a destructor hook.
    #[inline]
    pub const fn new() -> Self {
        Self {
            items: BTreeSet::new(),
            destroy: None,
        }
    }

    /// Creates an empty tree whose discarded elements are handed to
    /// `destroy`.
    pub fn with_destructor(destroy: DestroyFn<T>) -> Self {
        Self {
            items: BTreeSet::new(),
            destroy: Some(destroy),
        }
    }

    /// Returns the number of elements in the tree.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the tree contains no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Discards an element the tree owns: through the destructor hook
    /// when one is installed, otherwise by dropping it in place.
    #[inline]
    fn destroy_item(&mut self, item: T) {
        match self.destroy.as_mut() {
            Some(destroy) => destroy(item),
            None => drop(item),
        }
    }
}

impl<T: Ord> SortedTree<T> {
    /// Inserts an element. When the tree already holds an element
    /// equal to `item`, the stored one is displaced and returned to
    /// the caller; it does not go through the destructor hook.
    pub fn insert(&mut self, item: T) -> Option<T> {
        self.items.replace(item)
    }

    /// Returns a borrow of the stored element equal to `probe`.
    pub fn get(&self, probe: &T) -> Option<&T> {
        self.items.get(probe)
    }

    /// Takes the element equal to `probe` out of the tree and destroys
    /// it through the hook. Returns `false` when no element matched.
    pub fn remove(&mut self, probe: &T) -> bool {
        match self.items.take(probe) {
            Some(item) => {
                self.destroy_item(item);
                true
            }
            None => false,
        }
    }

    /// Returns an iterator over the elements in ascending order.
    pub fn iter(&self) -> btree_set::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for SortedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for SortedTree<T> {
    /// Destroys every stored element in ascending order through the
    /// destructor hook when one is installed.
    fn drop(&mut self) {
        let items = core::mem::replace(&mut self.items, BTreeSet::new());
        for item in items {
            self.destroy_item(item);
        }
    }
}

impl<'a, T: Ord> IntoIterator for &'a SortedTree<T> {
    type Item = &'a T;
    type IntoIter = btree_set::Iter<'a, T>;

    fn into_iter(self) -> btree_set::Iter<'a, T> {
        self.iter()
    }
}
