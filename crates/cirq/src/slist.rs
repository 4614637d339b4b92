/*!
A singly linked list with the crate's destructor convention.

Appending walks the whole chain, so bulk loads are better served by
[`SList::push_front`] followed by a single [`SList::reverse`]. Removal
unlinks the first element equal to the probe and destroys it through
the hook; everything still linked when the list is dropped goes
through the hook as well, front to back.
*/

use alloc::boxed::Box;

use crate::DestroyFn;

struct Node<T> {
    data: T,
    next: Option<Box<Node<T>>>,
}

/// A singly linked list with an optional destructor hook.
pub struct SList<T> {
    head: Option<Box<Node<T>>>,
    len: usize,
    destroy: Option<DestroyFn<T>>,
}

impl<T> SList<T> {
    /// Creates an empty list without a destructor hook.
    #[inline]
    pub const fn new() -> Self {
        Self {
            head: None,
            len: 0,
            destroy: None,
        }
    }

    /// Creates an empty list whose discarded elements are handed to
    /// `destroy`.
    pub fn with_destructor(destroy: DestroyFn<T>) -> Self {
        Self {
            head: None,
            len: 0,
            destroy: Some(destroy),
        }
    }

    /// Returns the number of elements in the list.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list contains no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Appends an element at the end of the list. Walks the whole
    /// chain; loading many elements is cheaper through
    /// [`push_front`](Self::push_front) plus one
    /// [`reverse`](Self::reverse).
    pub fn push_back(&mut self, item: T) {
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(Node {
            data: item,
            next: None,
        }));
        self.len += 1;
    }

    /// Prepends an element at the front of the list in constant time.
    pub fn push_front(&mut self, item: T) {
        self.head = Some(Box::new(Node {
            data: item,
            next: self.head.take(),
        }));
        self.len += 1;
    }

    /// Unlinks the first element equal to `item` and destroys it
    /// through the hook. Returns `false` when no element matched.
    pub fn remove(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        // Walk to the link holding the first match; stops at the tail
        // link when nothing matches.
        let mut cursor = &mut self.head;
        while cursor.as_ref().is_some_and(|node| node.data != *item) {
            cursor = &mut cursor.as_mut().unwrap().next;
        }

        match cursor.take() {
            Some(boxed) => {
                let Node { data, next } = *boxed;
                *cursor = next;
                self.len -= 1;
                self.destroy_item(data);
                true
            }
            None => false,
        }
    }

    /// Reverses the list in place.
    pub fn reverse(&mut self) {
        let mut reversed = None;
        let mut current = self.head.take();
        while let Some(mut node) = current {
            current = node.next.take();
            node.next = reversed;
            reversed = Some(node);
        }
        self.head = reversed;
    }

    /// Returns a borrow of the first element equal to `item`, or
    /// `None` when no element matches.
    pub fn find(&self, item: &T) -> Option<&T>
    where
        T: PartialEq,
    {
        self.iter().find(|&candidate| candidate == item)
    }

    /// Returns an iterator over the elements, front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Discards an element the list owns: through the destructor hook
    /// when one is installed, otherwise by dropping it in place.
    #[inline]
    fn destroy_item(&mut self, item: T) {
        match self.destroy.as_mut() {
            Some(destroy) => destroy(item),
            None => drop(item),
        }
    }
}

impl<T> Default for SList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for SList<T> {
    /// Destroys every element still linked, front to back. The chain
    /// is unlinked iteratively so a long list cannot overflow the
    /// stack through nested node drops.
    fn drop(&mut self) {
        let mut current = self.head.take();
        while let Some(boxed) = current {
            let Node { data, next } = *boxed;
            current = next;
            self.destroy_item(data);
        }
    }
}

/// Iterator over the elements of an [`SList`], front to back.
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.data
        })
    }
}

impl<'a, T> IntoIterator for &'a SList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
