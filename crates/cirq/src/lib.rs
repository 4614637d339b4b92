/*!
Self-owned collection containers built around a single ownership rule:
an element the container discards by itself (eviction, removal, drop of
the container) is handed exactly once to the destructor hook installed
at construction, while an element returned to the caller is the
caller's alone and is never touched by the hook.

The containers:

- [`CircularQueue`]: a FIFO queue over flat storage with wraparound.
  Fixed capacity by default, with two opt-in full-queue policies:
  linear chunked growth, or destroy-the-oldest overwrite.
- [`SList`]: a singly linked list with prepend/append, removal by
  equality and in-place reversal.
- [`SortedTree`]: an ordered set adapter over
  [`BTreeSet`](alloc::collections::BTreeSet) carrying the same
  destructor convention.

The crate is `no_std` and only requires `alloc`. Nothing here locks:
sharing a container across threads is the caller's synchronization
problem.
*/
#![no_std]

extern crate alloc;

mod devlog;
pub mod queue;
pub mod slist;
pub mod tree;

pub use queue::{CircularQueue, PushError, QueueError, QueueFlags};
pub use slist::SList;
pub use tree::SortedTree;

pub use log as __log;

use alloc::boxed::Box;

/// Destructor hook shared by every container in this crate.
///
/// The hook receives full ownership of each element the owning
/// container discards and is invoked exactly once per element. Items a
/// container hands back to the caller (for example
/// [`CircularQueue::pop`]) never reach the hook.
pub type DestroyFn<T> = Box<dyn FnMut(T)>;
