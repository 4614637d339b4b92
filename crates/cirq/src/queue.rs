/*!
A FIFO queue over flat storage with wraparound.

The queue keeps its elements in a boxed slot array of fixed length.
Two cursors walk the array modulo its length: `front` is the oldest
element (the next pop) and `rear` is the next write position. A slot
holding `None` is the empty sentinel; every slot outside the live
range is kept at the sentinel so an element whose ownership already
left the queue can never be touched again.

```text
            front                     rear
              v                         v
  +------+------+------+------+------+------+------+
  | None | old  | ...  | ...  | new  | None | None |
  +------+------+------+------+------+------+------+
   0                                              cap
```

A queue constructed with a capacity of zero grows instead of filling
up: whenever it is full, the next push extends the storage by
[`CircularQueue::GROWTH_CHUNK`] slots and relocates the live elements
to the start of the array. A fixed-capacity queue constructed with
[`QueueFlags::OVERWRITE`] destroys its oldest element to make room
instead. Without either, pushing into a full queue fails and hands
the item back.
*/

use alloc::collections::TryReserveError;
use alloc::vec::Vec;
use core::fmt;
use core::slice;

use bitflags::bitflags;

use crate::{DestroyFn, dev_debug, dev_trace};

bitflags! {
    /// Construction flags for [`CircularQueue`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct QueueFlags: u32 {
        /// When the queue is full, destroy the oldest element to make
        /// room instead of failing the push. Only meaningful for
        /// fixed-capacity queues; a growable queue grows first and
        /// never evicts.
        const OVERWRITE = 1 << 0;
    }
}

/// Error returned by [`CircularQueue::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// Unrecognized bits were set in the construction flags.
    InvalidFlags,
    /// The allocator could not provide the backing storage.
    OutOfMemory,
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::InvalidFlags => f.write_str("unrecognized queue flags"),
            QueueError::OutOfMemory => f.write_str("backing storage allocation failed"),
        }
    }
}

impl core::error::Error for QueueError {}

/// Error returned by [`CircularQueue::push`].
///
/// Both variants carry the rejected item, so a failed push never costs
/// the caller the element it tried to store.
#[derive(Debug, PartialEq, Eq)]
pub enum PushError<T> {
    /// The queue is full and neither grows nor overwrites.
    Full(T),
    /// The queue is growable but the storage extension failed. The
    /// queue itself is left exactly as it was.
    OutOfMemory(T),
}

impl<T> PushError<T> {
    /// Recovers the item the failed push rejected.
    #[inline]
    pub fn into_inner(self) -> T {
        match self {
            PushError::Full(item) | PushError::OutOfMemory(item) => item,
        }
    }
}

impl<T> fmt::Display for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PushError::Full(_) => f.write_str("queue is full"),
            PushError::OutOfMemory(_) => f.write_str("queue storage could not be grown"),
        }
    }
}

impl<T: fmt::Debug> core::error::Error for PushError<T> {}

/// A circular FIFO queue with an optional destructor hook.
///
/// Elements are destroyed through the hook exactly once when the queue
/// discards them itself, either by overwrite eviction or when the
/// queue is dropped with elements still inside. Elements returned by
/// [`pop`](Self::pop) are the caller's and never reach the hook.
///
/// The slot array length never changes for a fixed-capacity queue. A
/// growable queue (constructed with capacity zero) extends it in
/// [`GROWTH_CHUNK`](Self::GROWTH_CHUNK) steps as pushes demand.
pub struct CircularQueue<T> {
    /// Backing storage; its length is the queue capacity. `None` marks
    /// a slot with no live element.
    slots: Vec<Option<T>>,
    /// Index of the oldest element, the next pop. Meaningless while
    /// `count` is zero.
    front: usize,
    /// Index the next push writes to. Equal to `front` when the queue
    /// is empty or full; `count` breaks the tie.
    rear: usize,
    /// Number of live elements.
    count: usize,
    /// Full pushes extend the storage instead of failing or evicting.
    growable: bool,
    /// Full pushes destroy the oldest element to make room.
    overwrite: bool,
    destroy: Option<DestroyFn<T>>,
}

impl<T> CircularQueue<T> {
    /// Number of slots a growable queue adds on each extension, and
    /// the initial capacity when constructed with capacity zero.
    /// Growth is linear on purpose: the queue favors a predictable
    /// footprint over amortized push cost.
    pub const GROWTH_CHUNK: usize = 16;

    /// Creates a queue.
    ///
    /// A `capacity` of zero selects a growable queue starting at
    /// [`GROWTH_CHUNK`](Self::GROWTH_CHUNK) slots; any other value
    /// fixes the capacity at exactly that many slots.
    ///
    /// `destroy`, when given, receives every element the queue
    /// discards on its own. Fails with [`QueueError::InvalidFlags`] if
    /// `flags` carries bits outside [`QueueFlags`], and with
    /// [`QueueError::OutOfMemory`] if the slot array cannot be
    /// allocated.
    pub fn new(
        capacity: usize,
        destroy: Option<DestroyFn<T>>,
        flags: QueueFlags,
    ) -> Result<Self, QueueError> {
        if flags.bits() & !QueueFlags::all().bits() != 0 {
            return Err(QueueError::InvalidFlags);
        }

        let growable = capacity == 0;
        let capacity = if growable {
            Self::GROWTH_CHUNK
        } else {
            capacity
        };

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| QueueError::OutOfMemory)?;
        slots.resize_with(capacity, || None);

        Ok(Self {
            slots,
            front: 0,
            rear: 0,
            count: 0,
            growable,
            overwrite: flags.contains(QueueFlags::OVERWRITE),
            destroy,
        })
    }

    /// Returns the number of elements currently queued.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the queue contains no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns `true` if every slot holds a live element.
    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    /// Returns the current capacity of the slot array.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if full pushes extend the storage.
    #[inline(always)]
    pub fn is_growable(&self) -> bool {
        self.growable
    }

    /// Returns `true` if full pushes evict the oldest element.
    #[inline(always)]
    pub fn is_overwrite(&self) -> bool {
        self.overwrite
    }

    /// Pushes an element onto the back of the queue.
    ///
    /// When the queue is full, the outcome depends on how it was
    /// constructed: a growable queue extends its storage first, an
    /// overwrite queue destroys its oldest element to make room, and
    /// any other queue fails with [`PushError::Full`] carrying `item`
    /// back. A growable queue whose extension fails hands `item` back
    /// inside [`PushError::OutOfMemory`] and is left untouched.
    pub fn push(&mut self, item: T) -> Result<(), PushError<T>> {
        if self.is_full() {
            if self.growable {
                if self.grow().is_err() {
                    return Err(PushError::OutOfMemory(item));
                }
            } else if self.overwrite {
                self.evict_oldest();
            } else {
                return Err(PushError::Full(item));
            }
        }

        debug_assert!(self.slots[self.rear].is_none());
        self.slots[self.rear] = Some(item);
        self.rear = (self.rear + 1) % self.slots.len();
        self.count += 1;
        Ok(())
    }

    /// Removes and returns the oldest element, or `None` if empty.
    ///
    /// Ownership transfers to the caller; the destructor hook is never
    /// invoked on popped elements. The vacated slot is reset to the
    /// empty sentinel.
    pub fn pop(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }

        let item = self.slots[self.front].take();
        debug_assert!(item.is_some());
        self.front = (self.front + 1) % self.slots.len();
        self.count -= 1;
        item
    }

    /// Returns an iterator over the queued elements, oldest first,
    /// without removing them. An empty queue yields nothing.
    pub fn iter(&self) -> Iter<'_, T> {
        let (head, tail) = self.live_ranges();
        Iter {
            head: self.slots[head].iter(),
            tail: self.slots[tail].iter(),
        }
    }

    /// Splits the live region into up to two index ranges in logical
    /// order. The raw cursor positions decide the shape: `front` below
    /// `rear` is one contiguous run, anything else wraps and is walked
    /// `[front, capacity)` then `[0, rear)`.
    fn live_ranges(&self) -> (core::ops::Range<usize>, core::ops::Range<usize>) {
        if self.count == 0 {
            (0..0, 0..0)
        } else if self.front < self.rear {
            (self.front..self.rear, 0..0)
        } else {
            (self.front..self.slots.len(), 0..self.rear)
        }
    }

    /// Extends a full growable queue by one growth chunk.
    ///
    /// The live elements are relocated to the start of the array, so
    /// afterwards `front` is zero and `rear` is the old capacity. On
    /// reservation failure nothing has been touched.
    fn grow(&mut self) -> Result<(), TryReserveError> {
        debug_assert!(self.is_full());
        let old_capacity = self.slots.len();

        self.slots.try_reserve_exact(Self::GROWTH_CHUNK)?;
        // The queue is full, so rotating the oldest element to index
        // zero lines the whole array up in logical order.
        self.slots.rotate_left(self.front);
        self.slots
            .resize_with(old_capacity + Self::GROWTH_CHUNK, || None);
        self.front = 0;
        self.rear = old_capacity;

        dev_debug!(
            "queue grown from {} to {} slots",
            old_capacity,
            self.slots.len()
        );
        Ok(())
    }

    /// Destroys the oldest element of a full queue to vacate its slot.
    /// `front` advances only here, which keeps a not-yet-full
    /// overwrite queue behaving like a plain FIFO.
    fn evict_oldest(&mut self) {
        dev_trace!("queue full, evicting oldest element at slot {}", self.front);
        if let Some(evicted) = self.slots[self.front].take() {
            self.destroy_item(evicted);
        }
        self.front = (self.front + 1) % self.slots.len();
        self.count -= 1;
    }

    /// Discards an element the queue owns: through the destructor hook
    /// when one is installed, otherwise by dropping it in place.
    #[inline]
    fn destroy_item(&mut self, item: T) {
        match self.destroy.as_mut() {
            Some(destroy) => destroy(item),
            None => drop(item),
        }
    }
}

impl<T> Drop for CircularQueue<T> {
    /// Destroys every element still queued, oldest first, through the
    /// destructor hook when one is installed. An empty queue makes no
    /// hook calls at all.
    fn drop(&mut self) {
        if self.count == 0 {
            return;
        }
        let (head, tail) = self.live_ranges();
        for idx in head.chain(tail) {
            if let Some(item) = self.slots[idx].take() {
                self.destroy_item(item);
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for CircularQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircularQueue")
            .field("len", &self.count)
            .field("capacity", &self.slots.len())
            .field("growable", &self.growable)
            .field("overwrite", &self.overwrite)
            .finish_non_exhaustive()
    }
}

/// Iterator over the elements of a [`CircularQueue`], oldest first.
pub struct Iter<'a, T> {
    head: slice::Iter<'a, Option<T>>,
    tail: slice::Iter<'a, Option<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        // Every slot inside the live ranges holds an element.
        self.head
            .next()
            .or_else(|| self.tail.next())
            .and_then(Option::as_ref)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.head.len() + self.tail.len();
        (len, Some(len))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a CircularQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
