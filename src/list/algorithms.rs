use crate::list::{connect, next_of, prev_of, List};
use std::cmp::Ordering;

mod sort;

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T> List<T> {
    /// Reverses the order of the elements in place.
    ///
    /// Every node, the ghost node included, gets its `next` and `prev`
    /// swapped. No element is moved or reallocated.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// list.reverse();
    /// assert_eq!(Vec::from_iter(list), vec![3, 2, 1]);
    /// ```
    pub fn reverse(&mut self) {
        let ghost = self.ghost_node();
        let mut node = ghost;
        // SAFETY: the walk visits every node of the ring exactly once, reading
        // and writing only the link fields, which the ghost node also has.
        unsafe {
            loop {
                let ptr = node.as_ptr();
                let next = (*ptr).next;
                (*ptr).next = (*ptr).prev;
                (*ptr).prev = next;
                node = next;
                if node == ghost {
                    break;
                }
            }
        }
    }

    /// Reverses every disjoint run of exactly `k` consecutive elements, from
    /// front to back. A trailing run shorter than `k` keeps its order, and
    /// `k <= 1` leaves the list unchanged.
    ///
    /// Each run is cut into a scratch list, reversed there and spliced back
    /// at the same position.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time, regardless of `k`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::from_iter(1..=7);
    /// list.reverse_chunks(3);
    /// assert_eq!(Vec::from_iter(list), vec![3, 2, 1, 6, 5, 4, 7]);
    /// ```
    pub fn reverse_chunks(&mut self, k: usize) {
        tracing::trace!(len = self.len(), k, "reverse_chunks");
        if k <= 1 {
            return;
        }
        let mut cursor = self.cursor_start_mut();
        while let Some(mut chunk) = cursor.cut(k) {
            chunk.reverse();
            cursor.splice(chunk);
        }
    }

    /// Swaps every two adjacent elements: (1st, 2nd), (3rd, 4th), ... An
    /// unpaired last element stays in place.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::from_iter(1..=5);
    /// list.swap_pairs();
    /// assert_eq!(Vec::from_iter(list), vec![2, 1, 4, 3, 5]);
    /// ```
    pub fn swap_pairs(&mut self) {
        let ghost = self.ghost_node();
        let mut first = self.front_node();
        // SAFETY: `first` and `second` are adjacent element nodes, relinking them
        // as `prev -> second -> first -> next` keeps the ring well-formed.
        unsafe {
            while first != ghost {
                let second = next_of(first);
                if second == ghost {
                    break;
                }
                let (prev, next) = (prev_of(first), next_of(second));
                connect(prev, second);
                connect(second, first);
                connect(first, next);
                first = next;
            }
        }
    }

    /// Removes the middle element and returns it, or `None` if the list is
    /// empty.
    ///
    /// The middle is found by a single fast/slow walk: the fast pointer moves
    /// two nodes per step and the slow one moves one. For a list of length *n*
    /// the element at index (*n* - 1) / 2 is removed, which is the lower of
    /// the two middles when *n* is even.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::from_iter([1, 2, 3, 4]);
    /// assert_eq!(list.remove_middle(), Some(2));
    /// assert_eq!(list.remove_middle(), Some(3));
    /// assert_eq!(Vec::from_iter(list), vec![1, 4]);
    /// ```
    pub fn remove_middle(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let ghost = self.ghost_node();
        let (mut slow, mut fast) = (self.front_node(), self.front_node());
        // SAFETY: `fast` only advances while the next two nodes are element
        // nodes, and `slow` trails behind it, so both stay on element nodes.
        unsafe {
            while next_of(fast) != ghost && next_of(next_of(fast)) != ghost {
                fast = next_of(next_of(fast));
                slow = next_of(slow);
            }
            Some(self.detach_node(slow).into_element())
        }
    }

    /// Removes every element that belongs to a run of two or more adjacent
    /// equal elements, keeping only the elements which are unique among
    /// their neighbors. Returns the number of removed elements.
    ///
    /// On a sorted list this keeps exactly the values that occur once.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::from_iter([1, 1, 2, 3, 3, 3, 4]);
    /// assert_eq!(list.dedup_runs(), 5);
    /// assert_eq!(Vec::from_iter(list), vec![2, 4]);
    /// ```
    pub fn dedup_runs(&mut self) -> usize
    where
        T: PartialEq,
    {
        self.dedup_runs_by(|a, b| a == b)
    }

    /// Like [`List::dedup_runs`], with `same` deciding whether two adjacent
    /// elements belong to the same run.
    pub fn dedup_runs_by<F>(&mut self, mut same: F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        let mut removed = 0;
        let mut in_run = false;
        let mut cursor = self.cursor_start_mut();
        loop {
            let same_as_next = match (cursor.current(), cursor.peek_next()) {
                (None, _) => break,
                (Some(current), Some(next)) => same(current, next),
                (Some(_), None) => false,
            };
            if same_as_next || in_run {
                cursor.remove();
                removed += 1;
            } else {
                cursor.move_next_cyclic();
            }
            in_run = same_as_next;
        }
        tracing::trace!(removed, "dedup_runs");
        removed
    }

    /// Removes every element which has a strictly smaller element anywhere
    /// after it, so that the remaining elements are non-decreasing. Equal
    /// elements are kept. Returns the number of removed elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::from_iter([5, 3, 4, 1, 2, 2]);
    /// assert_eq!(list.retain_ascending(), 3);
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 2]);
    /// ```
    pub fn retain_ascending(&mut self) -> usize
    where
        T: Ord,
    {
        self.retain_ascending_by(T::cmp)
    }

    /// Like [`List::retain_ascending`], with a comparator function.
    pub fn retain_ascending_by<F>(&mut self, mut compare: F) -> usize
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.retain_from_back(|prev, current| compare(prev, current) == Ordering::Greater)
    }

    /// Removes every element which has a strictly greater element anywhere
    /// after it, so that the remaining elements are non-increasing. Equal
    /// elements are kept. Returns the number of removed elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    ///
    /// let mut list = List::from_iter([5, 3, 4, 1, 2, 2]);
    /// assert_eq!(list.retain_descending(), 2);
    /// assert_eq!(Vec::from_iter(list), vec![5, 4, 2, 2]);
    /// ```
    pub fn retain_descending(&mut self) -> usize
    where
        T: Ord,
    {
        self.retain_descending_by(T::cmp)
    }

    /// Like [`List::retain_descending`], with a comparator function.
    pub fn retain_descending_by<F>(&mut self, mut compare: F) -> usize
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.retain_from_back(|prev, current| compare(prev, current) == Ordering::Less)
    }

    /// Walks from the back with a cursor on the kept element and looks at the
    /// element right before it: that one is removed while `drop_prev` says so,
    /// otherwise the cursor moves onto it.
    fn retain_from_back<F>(&mut self, mut drop_prev: F) -> usize
    where
        F: FnMut(&T, &T) -> bool,
    {
        let mut removed = 0;
        let mut cursor = self.cursor_end_mut();
        if cursor.move_prev().is_err() {
            return 0;
        }
        loop {
            let remove_prev = match (cursor.previous(), cursor.current()) {
                (Some(prev), Some(current)) => drop_prev(prev, current),
                _ => break,
            };
            if remove_prev {
                cursor.backspace();
                removed += 1;
            } else {
                cursor.move_prev_cyclic();
            }
        }
        tracing::trace!(removed, "retain_from_back");
        removed
    }

    /// Sort the list.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time and
    /// *O*(log(*n*)) memory for the recursion.
    ///
    /// # Current Implementation
    ///
    /// The ring is opened into a chain linked by `next` only, sorted by a
    /// recursive top-down merge sort that splits at the middle with a
    /// fast/slow walk, and then closed again by rebuilding the `prev` links.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// let mut list = List::from_iter([5, 2, 4, 3, 1]);
    ///
    /// list.sort();
    ///
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        sort::merge_sort(self, |a, b| a.lt(b));
    }

    /// Sort the list with a comparator function.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// The comparator function must define a total ordering for the
    /// elements in the list. If the ordering is not total, the order
    /// of the elements is unspecified.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// let mut v = List::from_iter([5, 4, 1, 3, 2]);
    /// v.sort_by(|a, b| a.cmp(b));
    /// assert_eq!(Vec::from_iter(v.iter().copied()), vec![1, 2, 3, 4, 5]);
    ///
    /// // reverse sorting
    /// v.sort_by(|a, b| b.cmp(a));
    /// assert_eq!(Vec::from_iter(v), vec![5, 4, 3, 2, 1]);
    /// ```
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        sort::merge_sort(self, |a, b| compare(a, b) == Ordering::Less)
    }
}
