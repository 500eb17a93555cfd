use crate::list::{next_of, prev_of, List, Node};
use std::ptr::NonNull;

/// A read-only cursor over a `List`.
///
/// A list of length *n* has *n* + 1 cursor positions, indexed 0 to *n*; the
/// last one is the ghost node. Moves either stop at the ghost boundary or
/// wrap across it cyclically.
///
/// # Examples
///
/// The ghost node is written `#`.
/// ```
/// use cyclic_queue::List;
///
/// let list = List::from_iter(['A', 'B', 'C']);
///
/// // [|A B C #]
/// let mut cursor = list.cursor_start();
/// assert!(cursor.move_prev().is_err());
///
/// // [ A|B C #]
/// assert!(cursor.move_next().is_ok());
/// assert_eq!(cursor.current(), Some(&'B'));
/// assert_eq!(cursor.previous(), Some(&'A'));
/// assert_eq!(cursor.peek_next(), Some(&'C'));
///
/// // [ A B C|#], then across the ghost to [|A B C #]
/// assert_eq!(cursor.seek_forward(5), Err(2));
/// assert_eq!(cursor.current(), None);
/// cursor.move_next_cyclic();
/// assert_eq!(cursor.current(), Some(&'A'));
/// ```
pub struct Cursor<'a, T: 'a> {
    #[cfg(feature = "length")]
    index: usize,
    pub(crate) current: NonNull<Node<T>>,
    pub(crate) list: &'a List<T>,
}

/// A cursor over a `List` that can relink it.
///
/// Elements it yields borrow the cursor, not the list, so the list may be
/// edited between two reads. Insertion happens before the current node;
/// removal takes the current node and leaves the cursor on its successor.
pub struct CursorMut<'a, T: 'a> {
    #[cfg(feature = "length")]
    index: usize,
    pub(crate) current: NonNull<Node<T>>,
    pub(crate) list: &'a mut List<T>,
}

macro_rules! impl_cursor {
    ($CURSOR:ident) => {
        // Private methods
        impl<'a, T: 'a> $CURSOR<'a, T> {
            pub(crate) fn is_ghost_node(&self) -> bool {
                self.current == self.list.ghost_node()
            }
            pub(crate) fn is_front_node(&self) -> bool {
                self.prev_node() == self.list.ghost_node()
            }
            pub(crate) fn next_node(&self) -> NonNull<Node<T>> {
                // SAFETY: every node of the ring has a live successor.
                unsafe { next_of(self.current) }
            }
            pub(crate) fn prev_node(&self) -> NonNull<Node<T>> {
                // SAFETY: every node of the ring has a live predecessor.
                unsafe { prev_of(self.current) }
            }
        }

        impl<'a, T: 'a> $CURSOR<'a, T> {
            /// The position of the cursor; the ghost node sits at the length
            /// of the list.
            #[cfg(feature = "length")]
            pub fn index(&self) -> usize {
                self.index
            }

            pub fn is_empty(&self) -> bool {
                self.list.is_empty()
            }

            /// Steps forward, from the ghost node onto the front. Does
            /// nothing on an empty list.
            pub fn move_next_cyclic(&mut self) {
                if self.is_empty() {
                    return;
                }
                #[cfg(feature = "length")]
                {
                    self.index = if self.is_ghost_node() { 0 } else { self.index + 1 };
                }
                self.current = self.next_node();
            }

            /// Steps backward, from the front onto the ghost node. Does
            /// nothing on an empty list.
            pub fn move_prev_cyclic(&mut self) {
                if self.is_empty() {
                    return;
                }
                #[cfg(feature = "length")]
                {
                    self.index = if self.is_front_node() {
                        self.list.len()
                    } else {
                        self.index - 1
                    };
                }
                self.current = self.prev_node();
            }

            /// Steps forward, failing at the ghost node.
            pub fn move_next(&mut self) -> Result<(), &'static str> {
                if self.is_ghost_node() {
                    return Err("`move_next` across ghost boundary");
                }
                self.move_next_cyclic();
                Ok(())
            }

            /// Steps backward, failing at the front node.
            pub fn move_prev(&mut self) -> Result<(), &'static str> {
                if self.is_front_node() {
                    return Err("`move_prev` across ghost boundary");
                }
                self.move_prev_cyclic();
                Ok(())
            }

            /// Moves `steps` nodes forward. On failure, returns how many
            /// steps were taken before reaching the ghost node.
            pub fn seek_forward(&mut self, steps: usize) -> Result<(), usize> {
                (0..steps).try_for_each(|i| self.move_next().map_err(|_| i))
            }
        }
    };
}

impl_cursor!(CursorMut);
impl_cursor!(Cursor);

impl<'a, T: 'a> Cursor<'a, T> {
    pub(crate) fn new(
        list: &'a List<T>,
        current: NonNull<Node<T>>,
        #[cfg(feature = "length")] index: usize,
    ) -> Self {
        Self {
            #[cfg(feature = "length")]
            index,
            current,
            list,
        }
    }

    /// The element at the cursor, or `None` at the ghost node.
    pub fn current(&self) -> Option<&'a T> {
        if self.is_ghost_node() {
            return None;
        }
        // SAFETY: non-ghost nodes hold an element.
        Some(unsafe { &(*self.current.as_ptr()).element })
    }

    /// The element before the cursor, or `None` at the front node.
    pub fn previous(&self) -> Option<&'a T> {
        if self.is_front_node() {
            return None;
        }
        // SAFETY: the predecessor of a non-front node is an element node.
        Some(unsafe { &(*self.prev_node().as_ptr()).element })
    }

    /// The element after the cursor without wrapping, or `None` if the
    /// cursor is at the back or the ghost node.
    pub fn peek_next(&self) -> Option<&'a T> {
        let next = self.next_node();
        if self.is_ghost_node() || next == self.list.ghost_node() {
            return None;
        }
        // SAFETY: `next` is a non-ghost node.
        Some(unsafe { &(*next.as_ptr()).element })
    }
}

impl<'a, T: 'a> CursorMut<'a, T> {
    pub(crate) fn new(
        list: &'a mut List<T>,
        current: NonNull<Node<T>>,
        #[cfg(feature = "length")] index: usize,
    ) -> Self {
        Self {
            #[cfg(feature = "length")]
            index,
            current,
            list,
        }
    }

    /// A read-only view of the cursor, borrowing this one.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(
            self.list,
            self.current,
            #[cfg(feature = "length")]
            self.index,
        )
    }

    pub fn current(&self) -> Option<&T> {
        self.as_cursor().current()
    }

    pub fn previous(&self) -> Option<&T> {
        self.as_cursor().previous()
    }

    pub fn peek_next(&self) -> Option<&T> {
        self.as_cursor().peek_next()
    }
}

// Methods that change the links of the list.
impl<'a, T: 'a> CursorMut<'a, T> {
    /// Inserts a new element before the cursor. The cursor stays on the
    /// same node, whose index grows by one.
    pub fn insert(&mut self, item: T) {
        let (prev, node) = (self.prev_node(), Node::new_detached(item));
        // SAFETY: `current.prev` and `current` are adjacent nodes of the list.
        unsafe { self.list.attach_node(prev, self.current, node) };
        #[cfg(feature = "length")]
        {
            self.index += 1;
        }
    }

    /// Removes the element at the cursor and moves onto the next node.
    /// Returns `None` at the ghost node.
    pub fn remove(&mut self) -> Option<T> {
        if self.is_ghost_node() {
            return None;
        }
        let next = self.next_node();
        // SAFETY: `current` is an element node of the list.
        let node = unsafe { self.list.detach_node(self.current) };
        self.current = next;
        Some(node.into_element())
    }

    /// Removes the element before the cursor. Returns `None` at the front
    /// node.
    pub fn backspace(&mut self) -> Option<T> {
        self.move_prev().ok()?;
        self.remove()
    }

    /// Cuts exactly `n` nodes starting at the cursor into a new list. The
    /// cursor moves to the node after the cut and keeps its index.
    ///
    /// Returns `None` and leaves the list untouched if `n == 0` or fewer
    /// than `n` elements remain from the cursor to the end.
    ///
    /// # Complexity
    ///
    /// *O*(*n*): the run is walked once to find its back node.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::from_iter([1, 2, 3, 4]);
    /// let mut cursor = list.cursor_start_mut();
    /// assert!(cursor.move_next().is_ok());
    /// let run = cursor.cut(2).unwrap();
    /// assert_eq!(Vec::from_iter(run), [2, 3]);
    /// assert_eq!(cursor.current(), Some(&4));
    /// assert!(cursor.cut(2).is_none());
    /// assert_eq!(Vec::from_iter(list), [1, 4]);
    /// ```
    pub fn cut(&mut self, n: usize) -> Option<List<T>> {
        if n == 0 || self.is_ghost_node() {
            return None;
        }
        let (ghost, front) = (self.list.ghost_node(), self.current);
        let mut back = front;
        for _ in 1..n {
            // SAFETY: `back` is a non-ghost node of the list.
            back = unsafe { next_of(back) };
            if back == ghost {
                return None;
            }
        }
        // SAFETY: `front..=back` is a run of `n` element nodes of the list, and
        // `back.next` is read before the run is unlinked.
        unsafe {
            self.current = next_of(back);
            Some(List::from_detached(self.list.detach_nodes(
                front,
                back,
                #[cfg(feature = "length")]
                n,
            )))
        }
    }

    /// Splices `other` before the cursor. The cursor stays on the same node.
    pub fn splice(&mut self, other: List<T>) {
        if let Some(detached) = other.into_detached() {
            #[cfg(feature = "length")]
            {
                self.index += detached.len;
            }
            let prev = self.prev_node();
            // SAFETY: `current.prev` and `current` are adjacent nodes of the list.
            unsafe { self.list.attach_nodes(prev, self.current, detached) };
        }
    }
}

unsafe impl<T: Sync> Send for Cursor<'_, T> {}

unsafe impl<T: Sync> Sync for Cursor<'_, T> {}

unsafe impl<T: Send> Send for CursorMut<'_, T> {}

unsafe impl<T: Sync> Sync for CursorMut<'_, T> {}
