//! This crate provides a string [`Queue`] backed by a doubly-linked list with
//! owned nodes, implemented as a cyclic list, together with in-place
//! algorithms that rearrange the queue by relinking its nodes.
//!
//! The underlying [`List`] is generic and allows inserting, removing elements
//! at both ends and splicing whole lists in constant time. In compromise,
//! accessing or mutating elements at any position take *O*(*n*) time.
//!
//! Here is a quick example showing how the queue works.
//!
//! ```
//! use cyclic_queue::Queue;
//!
//! let mut queue = Queue::new();
//! queue.insert_tail("gerbil").unwrap();
//! queue.insert_head("bear").unwrap();
//! queue.insert_tail("dolphin").unwrap();
//! queue.insert_tail("bear").unwrap();
//!
//! queue.sort(false);
//! assert_eq!(Vec::from_iter(queue.iter()), ["bear", "bear", "dolphin", "gerbil"]);
//!
//! queue.delete_duplicates().unwrap();
//! assert_eq!(Vec::from_iter(queue.iter()), ["dolphin", "gerbil"]);
//!
//! let mut buf = [0u8; 4];
//! let removed = queue.remove_tail(Some(&mut buf[..])).unwrap();
//! assert_eq!(removed.value(), "gerbil");
//! assert_eq!(&buf, b"ger\0");
//! ```
//!
//! # Ring Layout
//!
//! Every node is a heap allocation holding `next`, `prev` and one payload.
//! The ring is closed by a ghost node that has the same two links and no
//! payload, so the first and last elements are simply `ghost.next` and
//! `ghost.prev`:
//! ```text
//!        ┌──────────────────────────────────────────────┐
//!        ↓                                              │
//!   ┌─────────┐ next ┌─────────┐ next      ┌─────────┐  │ next
//!   │  ghost  │ ───→ │ "bear"  │ ───→ ┄┄ → │ "gerbil"│ ─┘
//!   │ (none)  │ ←─── │         │ ←─── ┄┄ ← │         │
//!   └─────────┘ prev └─────────┘ prev      └─────────┘
//!        │                                      ↑
//!        └──────────────── prev ────────────────┘
//! ```
//! An empty list is a ghost whose links both point at itself. Positions are
//! numbered 0 to *n* - 1 from the front; the ghost takes position *n*.
//!
//! The [`List`] itself stores a pointer to its ghost and, with the default
//! `length` feature, a cached length. Turning it off makes `len` a walk:
//! ```text
//! [dependencies]
//! cyclic_queue = { default-features = false }
//! ```
//!
//! # Iteration
//!
//! [`Iter`] and [`IterMut`] walk the ring from both ends at once and stop
//! where they meet; the ghost is never yielded.
//!
//! ```
//! use cyclic_queue::List;
//!
//! let mut list = List::from_iter([1, 2, 3]);
//! let mut iter = list.iter();
//! assert_eq!(iter.next_back(), Some(&3));
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next_back(), Some(&2));
//! assert_eq!(iter.next(), None);
//!
//! list.iter_mut().for_each(|item| *item += 10);
//! assert_eq!(Vec::from_iter(list), [11, 12, 13]);
//! ```
//!
//! # Cursor Mutations
//!
//! [`CursorMut`] provides the positional editing the algorithms are built on.
//! - [`insert`]: insert a new item before the cursor;
//! - [`remove`]: remove the item at the cursor;
//! - [`backspace`]: remove the item before the cursor;
//! - [`cut`]: cut a run of items starting at the cursor into a new list;
//! - [`splice`]: splice another list before the cursor position;
//!
//! ```
//! use cyclic_queue::List;
//!
//! let mut list = List::from_iter([1, 2, 3, 4, 5]);
//! let mut cursor = list.cursor_start_mut();
//! assert!(cursor.seek_forward(1).is_ok());
//!
//! let mut run = cursor.cut(3).unwrap(); // [2, 3, 4], cursor points to 5
//! assert_eq!(cursor.current(), Some(&5));
//! run.reverse();
//! cursor.splice(run);
//!
//! assert_eq!(Vec::from_iter(list), vec![1, 4, 3, 2, 5]);
//! ```
//!
//! # Merging
//!
//! Several queues chained in a `List<QueueContext>` are merged into the first
//! one with [`merge`], which splices them all and sorts once.
//!
//! [`CursorMut`]: crate::list::cursor::CursorMut
//! [`insert`]: crate::list::cursor::CursorMut::insert
//! [`remove`]: crate::list::cursor::CursorMut::remove
//! [`backspace`]: crate::list::cursor::CursorMut::backspace
//! [`cut`]: crate::list::cursor::CursorMut::cut
//! [`splice`]: crate::list::cursor::CursorMut::splice

#[doc(inline)]
pub use error::QueueError;
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::List;
#[doc(inline)]
pub use queue::{merge, Element, Queue, QueueContext};

pub mod list;
pub mod queue;

mod error;
