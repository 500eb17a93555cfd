use std::alloc::{self, Layout};
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::error::QueueError;
use crate::list::cursor::{Cursor, CursorMut};
use crate::{IntoIter, Iter, IterMut};

pub mod cursor;
pub mod iterator;

mod algorithms;

/// A cyclic doubly-linked list with owned nodes.
///
/// Every list owns a ghost node that closes the ring, so the front and
/// back are both one link away and an empty list is a ghost linked to
/// itself. Pushing and popping at either end and appending a whole list
/// are constant time.
///
/// With the `length` feature (on by default) the list caches its length:
/// ```text
/// [dependencies]
/// cyclic_queue = { default-features = false }
/// ```
///
/// # Naming Conventions
///
/// - `front..=back`: a closed range of list nodes, both inclusive;
/// - `start..end`: a half-open range of list nodes, `end` excluded (often the
///   ghost node).
pub struct List<T> {
    ghost: NonNull<Node<Erased>>,
    #[cfg(feature = "length")]
    pub(crate) len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

#[repr(C)]
pub(crate) struct Node<T> {
    pub(crate) next: NonNull<Node<T>>,
    pub(crate) prev: NonNull<Node<T>>,
    pub(crate) element: T,
}

/// Payload of the ghost node. The ghost shares the link prefix of `Node<T>`
/// but never carries an element.
struct Erased;

/// A run of nodes unlinked from a list, on its way to another position or
/// another list.
///
/// `front.prev` and `back.next` are stale while the run is detached.
pub(crate) struct DetachedNodes<T> {
    pub(crate) front: NonNull<Node<T>>,
    pub(crate) back: NonNull<Node<T>>,
    #[cfg(feature = "length")]
    pub(crate) len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

/// Reads `node.next` without creating a reference to the whole node, so it
/// is also valid on the ghost node.
///
/// # Safety
///
/// `node` must point to a live node of some list.
#[inline]
pub(crate) unsafe fn next_of<T>(node: NonNull<Node<T>>) -> NonNull<Node<T>> {
    (*node.as_ptr()).next
}

/// Like [`next_of`], but reads `node.prev`.
///
/// # Safety
///
/// `node` must point to a live node of some list.
#[inline]
pub(crate) unsafe fn prev_of<T>(node: NonNull<Node<T>>) -> NonNull<Node<T>> {
    (*node.as_ptr()).prev
}

/// Link `prev` immediately before `next`.
///
/// Only `prev.next` and `next.prev` are written; the former neighbors of
/// both nodes are not touched.
///
/// # Safety
///
/// Both pointers must point to live nodes.
#[inline]
pub(crate) unsafe fn connect<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    (*prev.as_ptr()).next = next;
    (*next.as_ptr()).prev = prev;
}

// private methods
impl<T> List<T> {
    pub(crate) fn ghost_node(&self) -> NonNull<Node<T>> {
        self.ghost.cast()
    }
    pub(crate) fn front_node(&self) -> NonNull<Node<T>> {
        // SAFETY: the ghost is live for the lifetime of the list and its `next`
        // is the first element, or the ghost itself.
        unsafe { next_of(self.ghost_node()) }
    }
    pub(crate) fn back_node(&self) -> NonNull<Node<T>> {
        // SAFETY: as above, `prev` is the last element, or the ghost itself.
        unsafe { prev_of(self.ghost_node()) }
    }

    fn from_ghost(ghost: NonNull<Node<Erased>>) -> Self {
        Self {
            ghost,
            #[cfg(feature = "length")]
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Counts the element nodes by walking the ring once, ignoring the
    /// cached length.
    pub(crate) fn count_nodes(&self) -> usize {
        let ghost = self.ghost_node();
        let mut node = self.front_node();
        let mut count = 0;
        while node != ghost {
            count += 1;
            // SAFETY: every node reachable from the ghost is live.
            node = unsafe { next_of(node) };
        }
        #[cfg(feature = "length")]
        debug_assert_eq!(count, self.len, "cached length out of sync with the ring");
        count
    }

    /// Unlinks `node` and takes back ownership of its allocation.
    ///
    /// # Safety
    ///
    /// `node` must be an element node of this list.
    pub(crate) unsafe fn detach_node(&mut self, node: NonNull<Node<T>>) -> Box<Node<T>> {
        #[cfg(feature = "length")]
        {
            self.len -= 1;
        }
        connect(prev_of(node), next_of(node));
        Box::from_raw(node.as_ptr())
    }

    /// Links a detached `node` between `prev` and `next`.
    ///
    /// # Safety
    ///
    /// `prev` and `next` must be adjacent nodes of this list, which is only
    /// checked with `debug_assertions`.
    pub(crate) unsafe fn attach_node(
        &mut self,
        prev: NonNull<Node<T>>,
        next: NonNull<Node<T>>,
        node: NonNull<Node<T>>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, node);
        connect(node, next);
        #[cfg(feature = "length")]
        {
            self.len += 1;
        }
    }

    /// Unlinks the run `front..=back` and returns it.
    ///
    /// # Safety
    ///
    /// `front..=back` must be a run of element nodes of this list, read in
    /// `next` order, and with `length` it must hold exactly `len` nodes.
    pub(crate) unsafe fn detach_nodes(
        &mut self,
        front: NonNull<Node<T>>,
        back: NonNull<Node<T>>,
        #[cfg(feature = "length")] len: usize,
    ) -> DetachedNodes<T> {
        #[cfg(feature = "length")]
        {
            self.len -= len;
        }
        connect(prev_of(front), next_of(back));
        DetachedNodes::new(
            front,
            back,
            #[cfg(feature = "length")]
            len,
        )
    }

    /// Links a detached run between `prev` and `next`.
    ///
    /// # Safety
    ///
    /// `prev` and `next` must be adjacent nodes of this list.
    pub(crate) unsafe fn attach_nodes(
        &mut self,
        prev: NonNull<Node<T>>,
        next: NonNull<Node<T>>,
        detached: DetachedNodes<T>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, detached.front);
        connect(detached.back, next);
        #[cfg(feature = "length")]
        {
            self.len += detached.len;
        }
    }

    /// Unlinks every element, or returns `None` if there is none.
    pub(crate) fn detach_all_nodes(&mut self) -> Option<DetachedNodes<T>> {
        if self.is_empty() {
            return None;
        }
        #[cfg(feature = "length")]
        let len = self.len;
        let (front, back) = (self.front_node(), self.back_node());
        // SAFETY: the front and back nodes bound the whole run of elements.
        unsafe {
            Some(self.detach_nodes(
                front,
                back,
                #[cfg(feature = "length")]
                len,
            ))
        }
    }

    /// Builds a list that owns the detached run.
    pub(crate) fn from_detached(detached: DetachedNodes<T>) -> Self {
        let mut list = List::new();
        let ghost = list.ghost_node();
        // SAFETY: the ghost of an empty list is adjacent to itself.
        unsafe { list.attach_nodes(ghost, ghost, detached) };
        list
    }

    /// Like [`List::detach_all_nodes`], but consumes the list.
    pub(crate) fn into_detached(mut self) -> Option<DetachedNodes<T>> {
        self.detach_all_nodes()
    }
}

impl<T> List<T> {
    /// Creates an empty list. Aborts if the ghost node cannot be allocated.
    #[inline]
    pub fn new() -> Self {
        Self::from_ghost(new_ghost())
    }

    /// Creates an empty list, returning [`QueueError::AllocFailed`] instead of
    /// aborting if the ghost node cannot be allocated.
    ///
    /// # Examples
    /// ```
    /// use cyclic_queue::List;
    /// let list: List<u32> = List::try_new().unwrap();
    /// assert!(list.is_empty());
    /// ```
    pub fn try_new() -> Result<Self, QueueError> {
        try_new_ghost().map(Self::from_ghost)
    }

    /// Returns `true` if the ghost node links to itself.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front_node() == self.ghost_node()
    }

    /// Returns the number of elements.
    ///
    /// # Complexity
    ///
    /// *O*(1) with `feature = "length"`, *O*(*n*) otherwise.
    #[cfg(feature = "length")]
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(not(feature = "length"))]
    pub fn len(&self) -> usize {
        self.count_nodes()
    }

    /// Drops every element, keeping the ghost node.
    #[inline]
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// The first element, or `None` if the list is empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.cursor_start().current()
    }

    /// The last element, or `None` if the list is empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.cursor_end().previous()
    }

    /// Links a new element right after the ghost node.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::new();
    /// list.push_front("dolphin");
    /// list.push_front("bear");
    /// list.push_back("gerbil");
    /// assert_eq!(list.front(), Some(&"bear"));
    /// assert_eq!(list.back(), Some(&"gerbil"));
    /// assert_eq!(list.pop_back(), Some("gerbil"));
    /// assert_eq!(list.pop_front(), Some("bear"));
    /// assert_eq!(list.len(), 1);
    /// ```
    pub fn push_front(&mut self, elt: T) {
        self.cursor_start_mut().insert(elt);
    }

    /// Like [`List::push_front`], but gives the element back if the node
    /// cannot be allocated. The list is untouched in that case.
    pub fn try_push_front(&mut self, elt: T) -> Result<(), T> {
        let node = Node::try_new_detached(elt)?;
        // SAFETY: the ghost node and the front node are adjacent nodes of the list.
        unsafe { self.attach_node(self.ghost_node(), self.front_node(), node) };
        Ok(())
    }

    /// Unlinks the first element and returns it.
    pub fn pop_front(&mut self) -> Option<T> {
        self.cursor_start_mut().remove()
    }

    /// Links a new element right before the ghost node.
    pub fn push_back(&mut self, elt: T) {
        self.cursor_end_mut().insert(elt);
    }

    /// Like [`List::push_back`], but gives the element back if the node
    /// cannot be allocated. The list is untouched in that case.
    pub fn try_push_back(&mut self, elt: T) -> Result<(), T> {
        let node = Node::try_new_detached(elt)?;
        // SAFETY: the back node and the ghost node are adjacent nodes of the list.
        unsafe { self.attach_node(self.back_node(), self.ghost_node(), node) };
        Ok(())
    }

    /// Unlinks the last element and returns it.
    pub fn pop_back(&mut self) -> Option<T> {
        self.cursor_end_mut().backspace()
    }

    /// A read-only cursor at the first element, or at the ghost node if the
    /// list is empty.
    pub fn cursor_start(&self) -> Cursor<'_, T> {
        Cursor::new(
            self,
            self.front_node(),
            #[cfg(feature = "length")]
            0,
        )
    }

    /// A read-only cursor at the ghost node.
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::new(
            self,
            self.ghost_node(),
            #[cfg(feature = "length")]
            self.len,
        )
    }

    /// An editing cursor at the first element, or at the ghost node if the
    /// list is empty.
    pub fn cursor_start_mut(&mut self) -> CursorMut<'_, T> {
        let front = self.front_node();
        CursorMut::new(
            self,
            front,
            #[cfg(feature = "length")]
            0,
        )
    }

    /// An editing cursor at the ghost node.
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        let ghost = self.ghost_node();
        #[cfg(feature = "length")]
        let len = self.len;
        CursorMut::new(
            self,
            ghost,
            #[cfg(feature = "length")]
            len,
        )
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Moves every node of `other` to the back of this list, leaving `other`
    /// empty. No element is moved or reallocated.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut first = List::from_iter(['a']);
    /// let mut second = List::from_iter(['b', 'c']);
    /// first.append(&mut second);
    /// assert_eq!(Vec::from_iter(first), ['a', 'b', 'c']);
    /// assert!(second.is_empty());
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        if let Some(detached) = other.detach_all_nodes() {
            let (back, ghost) = (self.back_node(), self.ghost_node());
            // SAFETY: the back node and the ghost node are adjacent.
            unsafe { self.attach_nodes(back, ghost, detached) }
        }
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Node<T> {
    /// Allocates a node for `element`, with dangling links until it is
    /// attached.
    pub(crate) fn new_detached(element: T) -> NonNull<Node<T>> {
        let node = Box::new(Node {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
            element,
        });
        NonNull::from(Box::leak(node))
    }

    /// Like [`Node::new_detached`], but hands the element back if the
    /// allocator refuses the node.
    pub(crate) fn try_new_detached(element: T) -> Result<NonNull<Node<T>>, T> {
        let layout = Layout::new::<Node<T>>();
        // SAFETY: `Node<T>` holds two pointers, so `layout` is never zero-sized.
        let ptr = unsafe { alloc::alloc(layout) }.cast::<Node<T>>();
        match NonNull::new(ptr) {
            Some(node) => {
                // SAFETY: `node` is freshly allocated with the layout of `Node<T>`,
                // so it can be released later by `Box::from_raw`.
                unsafe {
                    node.as_ptr().write(Node {
                        next: NonNull::dangling(),
                        prev: NonNull::dangling(),
                        element,
                    });
                }
                Ok(node)
            }
            None => {
                tracing::debug!(size = layout.size(), "node allocation failed");
                Err(element)
            }
        }
    }

    pub(crate) fn into_element(self: Box<Self>) -> T {
        self.element
    }
}

impl<T> DetachedNodes<T> {
    /// # Safety
    ///
    /// `front..=back` must be a run of `len` element nodes.
    unsafe fn new(
        front: NonNull<Node<T>>,
        back: NonNull<Node<T>>,
        #[cfg(feature = "length")] len: usize,
    ) -> Self {
        #[cfg(feature = "length")]
        debug_assert!(len > 0, "empty run of detached nodes");
        Self {
            front,
            back,
            #[cfg(feature = "length")]
            len,
            _marker: PhantomData,
        }
    }
}

fn self_link(ghost: NonNull<Node<Erased>>) -> NonNull<Node<Erased>> {
    // SAFETY: `ghost` is a live detached node, linking it to itself makes
    // it an empty ring.
    unsafe { connect(ghost, ghost) };
    ghost
}

fn new_ghost() -> NonNull<Node<Erased>> {
    self_link(Node::new_detached(Erased))
}

fn try_new_ghost() -> Result<NonNull<Node<Erased>>, QueueError> {
    Node::try_new_detached(Erased)
        .map(self_link)
        .map_err(|_| QueueError::AllocFailed)
}

#[cfg(debug_assertions)]
fn assert_adjacent<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    // SAFETY: callers pass live nodes.
    unsafe {
        assert_eq!(next_of(prev), next);
        assert_eq!(prev_of(next), prev);
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: the ghost was allocated as a `Node<Erased>` and nothing links to
        // it any more since the list is empty.
        unsafe { drop(Box::from_raw(self.ghost.as_ptr())) };
    }
}

unsafe impl<T: Send> Send for List<T> {}

unsafe impl<T: Sync> Sync for List<T> {}

// `List` and its read-only iterators must stay covariant in `T`.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: List<&'static str>) -> List<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: IntoIter<&'static str>) -> IntoIter<&'a str> {
        x
    }
}
