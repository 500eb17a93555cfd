use std::fmt::{Debug, Formatter};

use crate::error::QueueError;
use crate::List;

pub mod context;
pub mod element;

pub use context::{merge, QueueContext};
pub use element::Element;

/// A queue of strings backed by a cyclic [`List`] of [`Element`]s.
///
/// Every value is copied into owned storage on insertion and handed back to
/// the caller as an [`Element`] on removal. All the rearranging algorithms
/// relink the nodes in place and never copy a value.
///
/// # Examples
///
/// ```
/// use cyclic_queue::Queue;
///
/// let mut queue = Queue::new();
/// queue.insert_tail("b").unwrap();
/// queue.insert_head("a").unwrap();
/// queue.insert_tail("c").unwrap();
/// assert_eq!(queue.size(), 3);
///
/// let mut buf = [0u8; 8];
/// let element = queue.remove_head(Some(&mut buf[..])).unwrap();
/// assert_eq!(element.value(), "a");
/// assert_eq!(&buf[..2], b"a\0");
/// ```
#[derive(Default)]
pub struct Queue {
    list: List<Element>,
}

impl Queue {
    /// Creates an empty queue.
    #[inline]
    pub fn new() -> Self {
        Self { list: List::new() }
    }

    /// Creates an empty queue, returning [`QueueError::AllocFailed`] instead
    /// of aborting when the allocator refuses.
    pub fn try_new() -> Result<Self, QueueError> {
        List::try_new().map(|list| Self { list })
    }

    /// Inserts a copy of `value` at the head of the queue.
    ///
    /// On [`QueueError::AllocFailed`] nothing stays allocated and the queue
    /// is unchanged.
    pub fn insert_head(&mut self, value: &str) -> Result<(), QueueError> {
        let element = Element::try_new(value)?;
        self.list.try_push_front(element).map_err(node_alloc_failed)
    }

    /// Inserts a copy of `value` at the tail of the queue.
    ///
    /// On [`QueueError::AllocFailed`] nothing stays allocated and the queue
    /// is unchanged.
    pub fn insert_tail(&mut self, value: &str) -> Result<(), QueueError> {
        let element = Element::try_new(value)?;
        self.list.try_push_back(element).map_err(node_alloc_failed)
    }

    /// Unlinks the head element and returns it, or `None` if the queue is
    /// empty.
    ///
    /// If `buf` is given, the value is also copied into it as described in
    /// [`Element::copy_to`].
    pub fn remove_head(&mut self, buf: Option<&mut [u8]>) -> Option<Element> {
        let element = self.list.pop_front()?;
        if let Some(buf) = buf {
            element.copy_to(buf);
        }
        Some(element)
    }

    /// Unlinks the tail element and returns it, or `None` if the queue is
    /// empty.
    ///
    /// If `buf` is given, the value is also copied into it as described in
    /// [`Element::copy_to`].
    pub fn remove_tail(&mut self, buf: Option<&mut [u8]>) -> Option<Element> {
        let element = self.list.pop_back()?;
        if let Some(buf) = buf {
            element.copy_to(buf);
        }
        Some(element)
    }

    /// Counts the elements by walking the ring once.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn size(&self) -> usize {
        self.list.count_nodes()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Iterates over the values from head to tail.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> + '_ {
        self.list.iter().map(Element::value)
    }

    /// Removes and drops every element.
    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Moves every element of `other` to the tail of this queue, leaving
    /// `other` empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn append(&mut self, other: &mut Queue) {
        self.list.append(&mut other.list);
    }

    /// Removes the middle element, which is the one at index `(n - 1) / 2`
    /// in a queue of `n` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::from_iter(["a", "b", "c", "d"]);
    /// queue.delete_middle().unwrap();
    /// assert_eq!(Vec::from_iter(queue.iter()), ["a", "c", "d"]);
    /// ```
    pub fn delete_middle(&mut self) -> Result<(), QueueError> {
        self.list.remove_middle().map(drop).ok_or(QueueError::Empty)
    }

    /// Removes every value that appears more than once in a row, all copies
    /// included. On a sorted queue only the values that occur once remain.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::from_iter(["a", "a", "b", "c", "c"]);
    /// queue.delete_duplicates().unwrap();
    /// assert_eq!(Vec::from_iter(queue.iter()), ["b"]);
    /// ```
    pub fn delete_duplicates(&mut self) -> Result<(), QueueError> {
        if self.list.is_empty() {
            return Err(QueueError::Empty);
        }
        self.list.dedup_runs();
        Ok(())
    }

    /// Swaps every two adjacent elements.
    pub fn swap_pairs(&mut self) {
        self.list.swap_pairs();
    }

    /// Reverses the queue in place.
    pub fn reverse(&mut self) {
        self.list.reverse();
    }

    /// Reverses each run of `k` elements from the head. A tail shorter than
    /// `k` keeps its order.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::from_iter(["1", "2", "3", "4", "5"]);
    /// queue.reverse_k_group(2);
    /// assert_eq!(Vec::from_iter(queue.iter()), ["2", "1", "4", "3", "5"]);
    /// ```
    pub fn reverse_k_group(&mut self, k: usize) {
        self.list.reverse_chunks(k);
    }

    /// Sorts the values in ascending or descending byte-wise order. Equal
    /// values keep their relative order.
    pub fn sort(&mut self, descending: bool) {
        if descending {
            self.list.sort_by(|a, b| b.cmp(a));
        } else {
            self.list.sort();
        }
    }

    /// Removes every element which has a strictly smaller one anywhere
    /// behind it, and returns the number of remaining elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::from_iter(["5", "3", "4", "1", "2"]);
    /// assert_eq!(queue.ascend(), 2);
    /// assert_eq!(Vec::from_iter(queue.iter()), ["1", "2"]);
    /// ```
    pub fn ascend(&mut self) -> usize {
        self.list.retain_ascending();
        self.size()
    }

    /// Removes every element which has a strictly greater one anywhere
    /// behind it, and returns the number of remaining elements.
    pub fn descend(&mut self) -> usize {
        self.list.retain_descending();
        self.size()
    }
}

fn node_alloc_failed(element: Element) -> QueueError {
    tracing::debug!(len = element.value().len(), "queue node allocation failed");
    QueueError::AllocFailed
}

impl Debug for Queue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.list.iter()).finish()
    }
}

impl<'a> FromIterator<&'a str> for Queue {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<'a> Extend<&'a str> for Queue {
    /// Inserts every value at the tail. Unlike [`Queue::insert_tail`], an
    /// allocation failure aborts.
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        self.list
            .extend(iter.into_iter().map(|value| Element::from(value.to_owned())));
    }
}

impl IntoIterator for Queue {
    type Item = Element;
    type IntoIter = crate::IntoIter<Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::Queue;
    use crate::error::QueueError;

    fn values(queue: &Queue) -> Vec<&str> {
        queue.iter().collect()
    }

    #[test]
    fn queue_insert_and_remove() {
        let mut queue = Queue::try_new().unwrap();
        assert!(queue.is_empty());
        assert!(queue.remove_head(None).is_none());
        assert!(queue.remove_tail(None).is_none());

        queue.insert_head("dolphin").unwrap();
        queue.insert_head("bear").unwrap();
        queue.insert_tail("gerbil").unwrap();
        queue.insert_tail("").unwrap();
        assert_eq!(values(&queue), ["bear", "dolphin", "gerbil", ""]);
        assert_eq!(queue.size(), 4);

        let mut buf = [0xffu8; 4];
        let head = queue.remove_head(Some(&mut buf[..])).unwrap();
        assert_eq!(head, "bear");
        assert_eq!(&buf, b"bea\0");

        let tail = queue.remove_tail(Some(&mut buf[..])).unwrap();
        assert_eq!(tail, "");
        assert_eq!(buf[0], 0);

        assert_eq!(queue.remove_tail(None).unwrap().into_value(), "gerbil");
        assert_eq!(queue.size(), 1);
        queue.clear();
        assert_eq!(queue.size(), 0);
    }

    #[test]
    fn queue_delete_middle() {
        let mut queue = Queue::new();
        assert_eq!(queue.delete_middle(), Err(QueueError::Empty));

        let mut queue = Queue::from_iter(["a", "b", "c", "d", "e"]);
        queue.delete_middle().unwrap();
        assert_eq!(values(&queue), ["a", "b", "d", "e"]);
        queue.delete_middle().unwrap();
        assert_eq!(values(&queue), ["a", "d", "e"]);
        queue.delete_middle().unwrap();
        queue.delete_middle().unwrap();
        assert_eq!(values(&queue), ["e"]);
        queue.delete_middle().unwrap();
        assert!(queue.is_empty());
    }

    #[test]
    fn queue_delete_duplicates() {
        let mut queue = Queue::new();
        assert_eq!(queue.delete_duplicates(), Err(QueueError::Empty));

        let mut queue = Queue::from_iter(["a", "a", "b", "c", "c"]);
        queue.delete_duplicates().unwrap();
        assert_eq!(values(&queue), ["b"]);

        let mut queue = Queue::from_iter(["x", "x", "x"]);
        queue.delete_duplicates().unwrap();
        assert!(queue.is_empty());

        let mut queue = Queue::from_iter(["a", "b", "b", "c"]);
        queue.delete_duplicates().unwrap();
        assert_eq!(values(&queue), ["a", "c"]);
    }

    #[test]
    fn queue_swap_and_reverse() {
        let mut queue = Queue::from_iter(["1", "2", "3", "4", "5"]);
        queue.swap_pairs();
        assert_eq!(values(&queue), ["2", "1", "4", "3", "5"]);
        queue.reverse();
        assert_eq!(values(&queue), ["5", "3", "4", "1", "2"]);
        queue.reverse_k_group(3);
        assert_eq!(values(&queue), ["4", "3", "5", "1", "2"]);
        queue.reverse_k_group(1);
        queue.reverse_k_group(0);
        queue.reverse_k_group(6);
        assert_eq!(values(&queue), ["4", "3", "5", "1", "2"]);
        queue.reverse_k_group(5);
        assert_eq!(values(&queue), ["2", "1", "5", "3", "4"]);
    }

    #[test]
    fn queue_sort() {
        let mut queue = Queue::from_iter(["dolphin", "bear", "gerbil", "Bear", "bear"]);
        queue.sort(false);
        assert_eq!(values(&queue), ["Bear", "bear", "bear", "dolphin", "gerbil"]);
        queue.sort(true);
        assert_eq!(values(&queue), ["gerbil", "dolphin", "bear", "bear", "Bear"]);

        let mut queue = Queue::new();
        queue.sort(false);
        assert!(queue.is_empty());
    }

    #[test]
    fn queue_ascend_and_descend() {
        let mut queue = Queue::from_iter(["5", "3", "4", "1", "2"]);
        assert_eq!(queue.ascend(), 2);
        assert_eq!(values(&queue), ["1", "2"]);

        let mut queue = Queue::from_iter(["5", "3", "4", "1", "2"]);
        assert_eq!(queue.descend(), 3);
        assert_eq!(values(&queue), ["5", "4", "2"]);

        let mut queue = Queue::from_iter(["b", "b", "a", "a"]);
        assert_eq!(queue.descend(), 4);
        assert_eq!(queue.ascend(), 2);
        assert_eq!(values(&queue), ["a", "a"]);

        assert_eq!(Queue::new().ascend(), 0);
        assert_eq!(Queue::new().descend(), 0);
    }

    #[test]
    fn queue_append() {
        let mut queue = Queue::from_iter(["a"]);
        let mut other = Queue::from_iter(["b", "c"]);
        queue.append(&mut other);
        assert!(other.is_empty());
        assert_eq!(values(&queue), ["a", "b", "c"]);
        assert_eq!(format!("{:?}", queue), r#"["a", "b", "c"]"#);
    }
}
