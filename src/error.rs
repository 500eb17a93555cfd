use std::fmt;

/// Errors reported by [`Queue`](crate::Queue) operations and [`merge`](crate::merge).
///
/// Every failing operation leaves the queue exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueError {
    /// The allocator refused memory for a ghost node, an element node or
    /// the value storage of an element.
    AllocFailed,
    /// The operation requires at least one element.
    Empty,
    /// `merge` was called on a chain without any queue context.
    NoQueues,
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocFailed => write!(f, "allocation failed"),
            Self::Empty => write!(f, "queue is empty"),
            Self::NoQueues => write!(f, "no queue to merge into"),
        }
    }
}

impl std::error::Error for QueueError {}
