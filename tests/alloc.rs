//! Allocation tests with a counting, fault-injecting global allocator.
//!
//! The counters are per thread, so that the tests of this file can run in
//! parallel without seeing each other's allocations.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use cyclic_queue::{merge, List, Queue, QueueContext, QueueError};

/// Global allocator that tracks the live bytes of the current thread and can
/// be armed to refuse allocations.
struct FaultyAlloc;

thread_local! {
    static LIVE_BYTES: Cell<isize> = const { Cell::new(0) };
    /// Number of allocations still granted before refusing, if armed.
    static GRANTS: Cell<Option<usize>> = const { Cell::new(None) };
}

fn grant() -> bool {
    GRANTS
        .try_with(|grants| match grants.get() {
            None => true,
            Some(0) => false,
            Some(n) => {
                grants.set(Some(n - 1));
                true
            }
        })
        .unwrap_or(true)
}

fn record(delta: isize) {
    let _ = LIVE_BYTES.try_with(|live| live.set(live.get() + delta));
}

// SAFETY: This allocator delegates to `System` and only records statistics
// or returns null, which every caller of the global allocator must handle.
unsafe impl GlobalAlloc for FaultyAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if !grant() {
            return std::ptr::null_mut();
        }
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            record(layout.size() as isize);
        }
        ptr
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if !grant() {
            return std::ptr::null_mut();
        }
        let new_ptr = System.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            record(new_size as isize - layout.size() as isize);
        }
        new_ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        record(-(layout.size() as isize));
    }
}

#[global_allocator]
static GLOBAL: FaultyAlloc = FaultyAlloc;

fn live_bytes() -> isize {
    LIVE_BYTES.with(Cell::get)
}

/// Runs `f` with only `grants` allocations allowed on this thread.
fn with_grants<R>(grants: usize, f: impl FnOnce() -> R) -> R {
    GRANTS.with(|cell| cell.set(Some(grants)));
    let result = f();
    GRANTS.with(|cell| cell.set(None));
    result
}

fn contents(queue: &Queue) -> Vec<String> {
    queue.iter().map(str::to_owned).collect()
}

#[test]
fn drop_releases_everything() {
    let baseline = live_bytes();
    {
        let mut queue = Queue::new();
        for value in ["dolphin", "bear", "gerbil", "bear", "", "meerkat"] {
            queue.insert_tail(value).unwrap();
        }
        queue.insert_head("aardvark").unwrap();
        queue.sort(false);
        queue.delete_duplicates().unwrap();
        queue.reverse_k_group(3);
        queue.swap_pairs();
        queue.delete_middle().unwrap();
        queue.descend();
        let removed = queue.remove_head(None);
        drop(removed);
        assert!(live_bytes() > baseline);
    }
    assert_eq!(live_bytes(), baseline);
}

#[test]
fn removed_element_is_owned_by_caller() {
    let baseline = live_bytes();
    let mut queue = Queue::new();
    queue.insert_tail("gerbil").unwrap();
    let element = queue.remove_tail(None).unwrap();
    drop(queue);
    assert!(live_bytes() > baseline);
    assert_eq!(element.value(), "gerbil");
    drop(element);
    assert_eq!(live_bytes(), baseline);
}

#[test]
fn merge_releases_everything() {
    let baseline = live_bytes();
    {
        let groups: [&[&str]; 3] = [&["b"], &["a", "c"], &["d"]];
        let mut contexts: List<QueueContext> = groups
            .iter()
            .enumerate()
            .map(|(id, values)| {
                QueueContext::from_queue(id, Queue::from_iter(values.iter().copied()))
            })
            .collect();
        merge(&mut contexts, true).unwrap();
        assert_eq!(contexts.front().map(QueueContext::size), Some(4));
    }
    assert_eq!(live_bytes(), baseline);
}

#[test]
fn failed_value_allocation_leaves_queue_untouched() {
    let mut queue = Queue::from_iter(["bear"]);
    let before = live_bytes();
    let head = with_grants(0, || queue.insert_head("dolphin"));
    let tail = with_grants(0, || queue.insert_tail("dolphin"));
    assert_eq!(head, Err(QueueError::AllocFailed));
    assert_eq!(tail, Err(QueueError::AllocFailed));
    assert_eq!(live_bytes(), before);
    assert_eq!(contents(&queue), ["bear"]);
    assert_eq!(queue.size(), 1);
}

#[test]
fn failed_node_allocation_releases_value() {
    let mut queue = Queue::from_iter(["bear"]);
    let before = live_bytes();
    // The value storage is granted, the node is refused.
    let head = with_grants(1, || queue.insert_head("dolphin"));
    let tail = with_grants(1, || queue.insert_tail("dolphin"));
    // An empty value needs no storage, so the node is the first allocation.
    let empty = with_grants(0, || queue.insert_tail(""));
    assert_eq!(head, Err(QueueError::AllocFailed));
    assert_eq!(tail, Err(QueueError::AllocFailed));
    assert_eq!(empty, Err(QueueError::AllocFailed));
    assert_eq!(live_bytes(), before);
    assert_eq!(contents(&queue), ["bear"]);

    queue.insert_tail("dolphin").unwrap();
    assert_eq!(contents(&queue), ["bear", "dolphin"]);
}

#[test]
fn failed_creation() {
    let before = live_bytes();
    let queue = with_grants(0, Queue::try_new);
    assert_eq!(queue.err(), Some(QueueError::AllocFailed));
    assert_eq!(live_bytes(), before);

    let queue = with_grants(1, Queue::try_new).unwrap();
    assert!(queue.is_empty());
}
