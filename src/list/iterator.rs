use crate::list::{next_of, prev_of, List, Node};
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// The unvisited nodes `start..end` of a borrowing iterator.
///
/// Both ends move towards each other; the span is exhausted when they meet.
struct Span<T> {
    start: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    #[cfg(feature = "length")]
    len: usize,
}

impl<T> Clone for Span<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Span<T> {}

impl<T> Span<T> {
    fn of(list: &List<T>) -> Self {
        Self {
            start: list.front_node(),
            end: list.ghost_node(),
            #[cfg(feature = "length")]
            len: list.len(),
        }
    }

    fn take_front(&mut self) -> Option<NonNull<Node<T>>> {
        if self.start == self.end {
            return None;
        }
        let node = self.start;
        // SAFETY: `start` is an element node of the borrowed list.
        self.start = unsafe { next_of(node) };
        self.shrink();
        Some(node)
    }

    fn take_back(&mut self) -> Option<NonNull<Node<T>>> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: the span is not empty, so `end.prev` is an element node.
        self.end = unsafe { prev_of(self.end) };
        self.shrink();
        Some(self.end)
    }

    #[inline]
    fn shrink(&mut self) {
        #[cfg(feature = "length")]
        {
            self.len -= 1;
        }
    }

    #[cfg(feature = "length")]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    #[cfg(not(feature = "length"))]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.start == self.end {
            (0, Some(0))
        } else {
            (1, None)
        }
    }
}

/// An iterator over the elements of a `List`, from front to back.
///
/// It borrows the list immutably for its whole lifetime:
///
/// ```compile_fail
/// use cyclic_queue::List;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut iter = list.iter();
/// list.push_back(4);
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, T: 'a> {
    span: Span<T>,
    _marker: PhantomData<&'a List<T>>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        Self {
            span: Span::of(list),
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            span: self.span,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        // SAFETY: the node is an element node that outlives `'a`.
        self.span
            .take_front()
            .map(|node| unsafe { &(*node.as_ptr()).element })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.span.size_hint()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        // SAFETY: as in `next`.
        self.span
            .take_back()
            .map(|node| unsafe { &(*node.as_ptr()).element })
    }
}

#[cfg(feature = "length")]
impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// A mutable iterator over the elements of a `List`.
///
/// The list cannot be read while the iterator is alive:
///
/// ```compile_fail
/// use cyclic_queue::List;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut iter = list.iter_mut();
/// println!("{:?}", list.back());
/// println!("{:?}", iter.next());
/// ```
pub struct IterMut<'a, T: 'a> {
    span: Span<T>,
    _marker: PhantomData<&'a mut List<T>>,
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>) -> Self {
        Self {
            span: Span::of(list),
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        // SAFETY: every node is yielded at most once, so the mutable
        // references never alias.
        self.span
            .take_front()
            .map(|node| unsafe { &mut (*node.as_ptr()).element })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.span.size_hint()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        // SAFETY: as in `next`.
        self.span
            .take_back()
            .map(|node| unsafe { &mut (*node.as_ptr()).element })
    }
}

#[cfg(feature = "length")]
impl<'a, T: 'a> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

/// An owning iterator that pops the elements off a `List`.
///
/// Created by [`List::into_iter`]; the elements not yet yielded are dropped
/// together with the iterator.
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.list.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

/// Appends every item with [`List::push_back`], so an allocation failure
/// aborts.
impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::List;

    #[test]
    fn iter_meets_in_the_middle() {
        let list = List::from_iter(0..6);
        let mut iter = list.iter();
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&5));
        #[cfg(feature = "length")]
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.clone().copied().collect::<Vec<_>>(), [1, 2, 3, 4]);
        assert_eq!(iter.by_ref().rev().take(3).count(), 3);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn iter_mut_then_drain() {
        let mut list = List::from_iter(["gerbil".to_string(), "bear".to_string()]);
        for value in list.iter_mut() {
            value.make_ascii_uppercase();
        }
        if let Some(value) = list.iter_mut().next_back() {
            value.push('!');
        }
        let mut into_iter = list.into_iter();
        assert_eq!(into_iter.len(), 2);
        assert_eq!(into_iter.next_back().as_deref(), Some("BEAR!"));
        assert_eq!(into_iter.next().as_deref(), Some("GERBIL"));
        assert_eq!(into_iter.next(), None);
    }

    #[test]
    fn empty_iter() {
        let mut list = List::<u8>::new();
        assert_eq!(list.iter().next(), None);
        assert_eq!(list.iter_mut().next_back(), None);
        assert_eq!(list.iter().size_hint().1, Some(0));
        list.extend([1, 2]);
        assert_eq!(Vec::from_iter(list.iter().copied()), [1, 2]);
    }
}
