use crate::list::{connect, next_of, Node};
use crate::List;
use std::ptr::NonNull;

/// Stable merge sort over the whole list, where `less(a, b)` tells whether
/// `a` must go strictly before `b`.
///
/// While sorting, the nodes form a chain linked by `next` only and
/// terminated by the ghost node; the `prev` links are stale until the ring
/// is closed again by [`close_ring`].
pub(crate) fn merge_sort<T, F>(list: &mut List<T>, mut less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    let (front, ghost) = (list.front_node(), list.ghost_node());
    // SAFETY: `front` is either the ghost or the first element of the list.
    if front == ghost || unsafe { next_of(front) } == ghost {
        return;
    }
    tracing::trace!(len = list.len(), "merge_sort");
    // SAFETY: `front..ghost` is the full range of element nodes. Sorting only
    // permutes them, and `close_ring` links every one of them back.
    unsafe {
        let head = sort_chain(front, ghost, &mut less);
        close_ring(ghost, head);
    }
}

/// Sorts the chain starting at `head` and terminated by `end`, and returns
/// the head of the sorted chain (still terminated by `end`).
unsafe fn sort_chain<T, F>(
    head: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    less: &mut F,
) -> NonNull<Node<T>>
where
    F: FnMut(&T, &T) -> bool,
{
    if head == end || next_of(head) == end {
        return head;
    }
    let back_half = split_chain(head, end);
    let front = sort_chain(head, end, less);
    let back = sort_chain(back_half, end, less);
    merge_chains(front, back, end, less)
}

/// Splits a chain of at least two nodes after its lower middle node, found
/// by a fast/slow walk. The front half is terminated by `end`, and the head
/// of the back half is returned.
unsafe fn split_chain<T>(head: NonNull<Node<T>>, end: NonNull<Node<T>>) -> NonNull<Node<T>> {
    let (mut slow, mut fast) = (head, head);
    while next_of(fast) != end && next_of(next_of(fast)) != end {
        fast = next_of(next_of(fast));
        slow = next_of(slow);
    }
    let back_half = next_of(slow);
    (*slow.as_ptr()).next = end;
    back_half
}

/// Merges two sorted non-empty chains terminated by `end`. On ties the node
/// of `front` is taken first, which keeps the sort stable.
unsafe fn merge_chains<T, F>(
    mut front: NonNull<Node<T>>,
    mut back: NonNull<Node<T>>,
    end: NonNull<Node<T>>,
    less: &mut F,
) -> NonNull<Node<T>>
where
    F: FnMut(&T, &T) -> bool,
{
    let head = take_lesser(&mut front, &mut back, less);
    let mut tail = head;
    while front != end && back != end {
        let node = take_lesser(&mut front, &mut back, less);
        (*tail.as_ptr()).next = node;
        tail = node;
    }
    (*tail.as_ptr()).next = if front != end { front } else { back };
    head
}

/// Pops the head of `back` if it is strictly less than the head of `front`,
/// otherwise pops the head of `front`.
unsafe fn take_lesser<T, F>(
    front: &mut NonNull<Node<T>>,
    back: &mut NonNull<Node<T>>,
    less: &mut F,
) -> NonNull<Node<T>>
where
    F: FnMut(&T, &T) -> bool,
{
    let (f, b) = (*front, *back);
    let from = if less(&b.as_ref().element, &f.as_ref().element) {
        back
    } else {
        front
    };
    let node = *from;
    *from = next_of(node);
    node
}

/// Links the sorted chain starting at `head` back into a ring around
/// `ghost`, rebuilding every `prev` link.
unsafe fn close_ring<T>(ghost: NonNull<Node<T>>, head: NonNull<Node<T>>) {
    let (mut prev, mut node) = (ghost, head);
    loop {
        connect(prev, node);
        if node == ghost {
            break;
        }
        prev = node;
        node = next_of(node);
    }
}
