use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Sentinel cost meaning "not reached yet".
pub const UNREACHABLE: u32 = u32::MAX;

/// Heap entry ordered by `(f, order)` so that `BinaryHeap` (a max-heap)
/// pops the smallest `f` first and, among equal `f`, the earliest push.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FrontierEntry {
    pub(crate) f: u32,
    pub(crate) order: u64,
    pub(crate) idx: usize,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority frontier with a membership mirror.
///
/// A cell already in the frontier is never pushed twice; its entry keeps the
/// `f` it was pushed with and is popped in that order.
#[derive(Debug)]
pub(crate) struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    members: Vec<bool>,
    counter: u64,
}

impl Frontier {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            heap: BinaryHeap::new(),
            members: vec![false; len],
            counter: 0,
        }
    }

    /// Push the very first cell with insertion order 0.
    pub(crate) fn seed(&mut self, idx: usize, f: u32) {
        self.heap.push(FrontierEntry { f, order: 0, idx });
        self.members[idx] = true;
    }

    /// Push `idx` unless it is already a member. Returns whether it was
    /// pushed.
    pub(crate) fn push(&mut self, idx: usize, f: u32) -> bool {
        if self.members[idx] {
            return false;
        }
        self.counter += 1;
        self.heap.push(FrontierEntry {
            f,
            order: self.counter,
            idx,
        });
        self.members[idx] = true;
        true
    }

    /// Pop the minimum entry and drop it from the membership set.
    pub(crate) fn pop(&mut self) -> Option<FrontierEntry> {
        let entry = self.heap.pop()?;
        self.members[entry.idx] = false;
        Some(entry)
    }

    #[inline]
    pub(crate) fn contains(&self, idx: usize) -> bool {
        self.members[idx]
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}
