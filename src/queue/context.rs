use crate::error::QueueError;
use crate::queue::{Element, Queue};
use crate::List;

/// One queue of a chain of queues, with its cached element count and an
/// identifier.
///
/// The contexts are chained in an outer [`List`], which is what [`merge`]
/// walks over.
#[derive(Debug, Default)]
pub struct QueueContext {
    queue: Queue,
    size: usize,
    id: usize,
}

impl QueueContext {
    /// Creates a context around an empty queue.
    pub fn new(id: usize) -> Self {
        Self {
            queue: Queue::new(),
            size: 0,
            id,
        }
    }

    /// Wraps an existing queue; the cached size is counted once here.
    pub fn from_queue(id: usize, queue: Queue) -> Self {
        let size = queue.size();
        Self { queue, size, id }
    }

    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    /// The cached element count of the queue.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn into_queue(self) -> Queue {
        self.queue
    }

    /// Like [`Queue::insert_head`]; the cached size grows only on success.
    pub fn insert_head(&mut self, value: &str) -> Result<(), QueueError> {
        self.queue.insert_head(value)?;
        self.size += 1;
        Ok(())
    }

    /// Like [`Queue::insert_tail`]; the cached size grows only on success.
    pub fn insert_tail(&mut self, value: &str) -> Result<(), QueueError> {
        self.queue.insert_tail(value)?;
        self.size += 1;
        Ok(())
    }

    pub fn remove_head(&mut self, buf: Option<&mut [u8]>) -> Option<Element> {
        let element = self.queue.remove_head(buf)?;
        self.size -= 1;
        Some(element)
    }

    pub fn remove_tail(&mut self, buf: Option<&mut [u8]>) -> Option<Element> {
        let element = self.queue.remove_tail(buf)?;
        self.size -= 1;
        Some(element)
    }

    /// Runs `f` on the queue, then recounts the cached size.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::QueueContext;
    ///
    /// let mut context = QueueContext::new(0);
    /// context.insert_tail("bear").unwrap();
    /// context.insert_tail("bear").unwrap();
    /// context.with_queue(|queue| queue.delete_duplicates()).unwrap();
    /// assert_eq!(context.size(), 0);
    /// ```
    pub fn with_queue<R>(&mut self, f: impl FnOnce(&mut Queue) -> R) -> R {
        let result = f(&mut self.queue);
        self.size = self.queue.size();
        result
    }
}

/// Merges every queue of `contexts` into the queue of the first context and
/// sorts the result, ascending or descending.
///
/// Each queue is spliced in constant time. Their cached sizes are summed
/// into the first context and the emptied donors get a size of zero.
///
/// Returns [`QueueError::NoQueues`] if `contexts` is empty.
///
/// # Examples
///
/// ```
/// use cyclic_queue::{merge, List, Queue, QueueContext};
///
/// let mut contexts = List::from_iter([
///     QueueContext::from_queue(0, Queue::from_iter(["b"])),
///     QueueContext::from_queue(1, Queue::from_iter(["a", "c"])),
///     QueueContext::from_queue(2, Queue::from_iter(["d"])),
/// ]);
/// merge(&mut contexts, false).unwrap();
///
/// let first = contexts.front().unwrap();
/// assert_eq!(first.size(), 4);
/// assert_eq!(Vec::from_iter(first.queue().iter()), ["a", "b", "c", "d"]);
/// assert!(contexts.iter().skip(1).all(|donor| donor.size() == 0));
/// ```
pub fn merge(contexts: &mut List<QueueContext>, descending: bool) -> Result<(), QueueError> {
    let mut contexts = contexts.iter_mut();
    let first = contexts.next().ok_or(QueueError::NoQueues)?;
    let mut donors = 0;
    for donor in contexts {
        first.queue.append(&mut donor.queue);
        first.size += donor.size;
        donor.size = 0;
        donors += 1;
    }
    tracing::trace!(id = first.id, donors, size = first.size, descending, "merge");
    first.queue.sort(descending);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{merge, QueueContext};
    use crate::error::QueueError;
    use crate::queue::Queue;
    use crate::List;

    fn trace_init() -> tracing::dispatcher::DefaultGuard {
        use tracing_subscriber::prelude::*;
        tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::TRACE)
            .with_target(false)
            .with_timer(())
            .set_default()
    }

    fn chain(queues: &[&[&str]]) -> List<QueueContext> {
        queues
            .iter()
            .enumerate()
            .map(|(id, values)| {
                QueueContext::from_queue(id, Queue::from_iter(values.iter().copied()))
            })
            .collect()
    }

    #[test]
    fn merge_sorts_into_first() {
        let _trace = trace_init();
        let mut contexts = chain(&[&["b"], &["a", "c"], &["d"]]);
        assert_eq!(merge(&mut contexts, false), Ok(()));

        let mut iter = contexts.iter();
        let first = iter.next().unwrap();
        assert_eq!(first.id(), 0);
        assert_eq!(first.size(), 4);
        assert_eq!(first.queue().size(), 4);
        assert_eq!(Vec::from_iter(first.queue().iter()), ["a", "b", "c", "d"]);
        for donor in iter {
            assert_eq!(donor.size(), 0);
            assert!(donor.queue().is_empty());
        }
    }

    #[test]
    fn merge_descending() {
        let _trace = trace_init();
        let mut contexts = chain(&[&[], &["a", "c"], &["b", "b"], &[]]);
        merge(&mut contexts, true).unwrap();
        let first = contexts.pop_front().unwrap();
        assert_eq!(first.size(), 4);
        let queue = first.into_queue();
        assert_eq!(Vec::from_iter(queue.iter()), ["c", "b", "b", "a"]);
    }

    #[test]
    fn contexts_filled_in_place() {
        let _trace = trace_init();
        let groups: [&[&str]; 3] = [&["c", "a"], &[], &["b", "a"]];
        let mut contexts = List::from_iter((0..3).map(QueueContext::new));
        for (context, values) in contexts.iter_mut().zip(groups) {
            for value in values {
                context.insert_tail(value).unwrap();
            }
        }
        let sizes = Vec::from_iter(contexts.iter().map(QueueContext::size));
        assert_eq!(sizes, [2, 0, 2]);

        if let Some(last) = contexts.iter_mut().next_back() {
            last.insert_head("d").unwrap();
            assert_eq!(last.remove_tail(None).unwrap(), "a");
            assert!(last.remove_head(None).is_some());
            assert_eq!(last.size(), 1);
        }
        if let Some(empty) = contexts.iter_mut().nth(1) {
            assert!(empty.remove_head(None).is_none());
            assert_eq!(empty.size(), 0);
        }

        merge(&mut contexts, false).unwrap();
        let first = contexts.front().unwrap();
        assert_eq!(first.id(), 0);
        assert_eq!(first.size(), 3);
        assert_eq!(Vec::from_iter(first.queue().iter()), ["a", "b", "c"]);
    }

    #[test]
    fn context_size_follows_queue() {
        let mut context = QueueContext::new(1);
        context.insert_tail("a").unwrap();
        context.insert_tail("b").unwrap();
        context.insert_head("b").unwrap();
        assert_eq!(context.with_queue(Queue::descend), 2);
        assert_eq!(context.size(), 2);
        context.with_queue(|queue| queue.remove_tail(None));
        assert_eq!(context.size(), 1);
        assert_eq!(context.size(), context.queue().size());
    }

    #[test]
    fn merge_single_and_none() {
        let mut contexts = List::new();
        assert_eq!(merge(&mut contexts, false), Err(QueueError::NoQueues));

        contexts.push_back(QueueContext::new(7));
        merge(&mut contexts, false).unwrap();
        assert_eq!(contexts.front().map(QueueContext::size), Some(0));

        let mut contexts = chain(&[&["z", "y", "x"]]);
        merge(&mut contexts, false).unwrap();
        let first = contexts.front().unwrap();
        assert_eq!(first.size(), 3);
        assert_eq!(Vec::from_iter(first.queue().iter()), ["x", "y", "z"]);
    }
}
