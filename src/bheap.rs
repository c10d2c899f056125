use std::{fmt, io, mem, slice};

use crate::{hsort, Dominance, HeapError};

/// An implicit binary heap whose order is decided by a comparator fixed at construction.
/// - Peek: O(1)
/// - Extract: O(log(n))
/// - Insert: O(log(n)), amortized O(1) growth
/// - Heapify: O(n)
/// Nodes are handles owned by the heap but never cloned or inspected except through the comparator,
/// so storing references or arena indices keeps the pointees owned elsewhere.
/// Capacity only ever grows to powers of two, so n insertions reallocate O(log(n)) times.
pub struct BHeap<T, C> {
    nodes: Vec<T>,
    cmp: C
}

// Positions are 1-based: the root is position 1, the parent of p is p/2 and its children are 2p and 2p + 1.
// Position p is stored at nodes[p - 1].

/// Move the node at position `i` towards the root until its parent dominates it.
pub(crate) fn sift_up_by<T>(nodes: &mut [T], mut i: usize, cmp: &impl Dominance<T>) {
    while i > 1 {
        let parent = i/2;
        if cmp.dominates(&nodes[parent - 1], &nodes[i - 1]) {
            break
        }
        nodes.swap(parent - 1, i - 1);
        i = parent
    }
}

/// Move the node at position `i` towards the leaves until it dominates both of its children.
/// Only `nodes[..]` is treated as live, so callers restrict the base of the heap by slicing.
pub(crate) fn sift_down_by<T>(nodes: &mut [T], mut i: usize, cmp: &impl Dominance<T>) {
    let base = nodes.len();
    loop {
        let Some(lchild) = i.checked_mul(2).filter(|&l|l <= base) else { return };
        let rchild = lchild + 1;
        if cmp.dominates(&nodes[lchild - 1], &nodes[i - 1]) {
            // lchild belongs above the sinking node; if there is no rchild, lchild is the last node
            if rchild > base {
                nodes.swap(i - 1, lchild - 1);
                return
            }
            let m = if cmp.dominates(&nodes[lchild - 1], &nodes[rchild - 1]) { lchild } else { rchild };
            nodes.swap(i - 1, m - 1);
            i = m
        } else if rchild <= base && cmp.dominates(&nodes[rchild - 1], &nodes[i - 1]) {
            nodes.swap(i - 1, rchild - 1);
            i = rchild
        } else { return }
    }
}

impl<T, C: Dominance<T>> BHeap<T, C> {
	/// Create an empty heap with room for one node
    pub fn new(cmp: C) -> Result<Self, HeapError> {
        Self::with_capacity(1, cmp)
    }

	/// Create an empty heap with room for at least `capacity` nodes (at least 1).
	/// The capacity is rounded up to a power of two.
    pub fn with_capacity(capacity: usize, cmp: C) -> Result<Self, HeapError> {
        let mut res = Self{nodes: Vec::new(), cmp};
        res.reserve(capacity.max(1))?;
        Ok(res)
    }

	/// Wrap a vector as the storage of a heap WITHOUT reordering it.
	/// The vector is taken over as is, so the heap's capacity is the vector's capacity (at least its length),
	/// not rounded to a power of two until the next growth.
	/// The heap invariant only holds if `nodes` is already heap ordered under `cmp`,
	/// for example if it came from `BHeap::into_vec` with the same comparator.
	/// Otherwise call `BHeap::heapify` before any other operation, or use `BHeap::make`.
    pub fn from_vec(nodes: Vec<T>, cmp: C) -> Self {
        Self{nodes, cmp}
    }

	/// Create a heap out of a vector and immediately heapify it according to `cmp`
    pub fn make(nodes: Vec<T>, cmp: C) -> Self {
        let mut res = Self::from_vec(nodes, cmp);
        res.heapify();
        res
    }

	/// Reorder all nodes so the heap invariant holds, in O(n)
    pub fn heapify(&mut self) {
        hsort::heapify_by(&mut self.nodes, &self.cmp)
    }

	/// Get the number of nodes in the heap
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

	/// True if there are no nodes to extract
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

	/// Number of nodes the heap can hold before it has to reallocate
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

	/// The comparator the heap was built with; it can't be swapped out
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

	/// Get the dominant node without removing it
    pub fn peek(&self) -> Option<&T> {
        self.nodes.first()
    }

	/// Make sure the heap can hold `min_capacity` nodes without reallocating.
	/// If it can't already, the buffer is grown to the next power of two >= `min_capacity`.
	/// On failure the heap is left exactly as it was.
    pub fn reserve(&mut self, min_capacity: usize) -> Result<(), HeapError> {
        if self.nodes.capacity() >= min_capacity {
            return Ok(())
        }
        let requested = min_capacity.checked_next_power_of_two().ok_or(HeapError::CapacityOverflow)?;
        self.nodes.try_reserve_exact(requested - self.nodes.len())
            .map_err(|source|HeapError::Alloc{requested, source})
    }

	/// Release spare capacity down to the smallest power of two that holds all live nodes (at least 1)
    pub fn shrink(&mut self) {
        if let Some(target) = self.nodes.len().max(1).checked_next_power_of_two() {
            if self.nodes.capacity() > target {
                self.nodes.shrink_to(target)
            }
        }
    }

	/// Insert a node into the heap.
	/// Nodes which neither dominates the other are fine, but their relative order is unspecified.
	/// If the buffer has to grow and can't, `e` is dropped and the heap is unchanged.
    pub fn insert(&mut self, e: T) -> Result<(), HeapError> {
        let next_count = self.nodes.len().checked_add(1).ok_or(HeapError::CapacityOverflow)?;
        self.reserve(next_count)?;
        self.nodes.push(e);
        sift_up_by(&mut self.nodes, next_count, &self.cmp);
        #[cfg(all(test, not(feature = "stress_tests")))]{
            assert!(self.check())
        }
        Ok(())
    }

	/// Insert every node from `items`, in order, as if by repeated `BHeap::insert`,
	/// but with a single capacity check up front.
	/// If that check fails, none of the nodes are inserted.
    pub fn insert_batch<I>(&mut self, items: I) -> Result<(), HeapError>
    where I: IntoIterator<Item = T>, I::IntoIter: ExactSizeIterator {
        let iter = items.into_iter();
        let next_count = self.nodes.len().checked_add(iter.len()).ok_or(HeapError::CapacityOverflow)?;
        self.reserve(next_count)?;
        for e in iter {
            self.nodes.push(e);
            let i = self.nodes.len();
            sift_up_by(&mut self.nodes, i, &self.cmp)
        }
        #[cfg(all(test, not(feature = "stress_tests")))]{
            assert!(self.check())
        }
        Ok(())
    }

	/// Remove and return the dominant node, or None if the heap is empty
    pub fn extract(&mut self) -> Option<T> {
        let last = self.nodes.pop()?;
        if self.nodes.is_empty() {
            return Some(last)
        }
        let root = mem::replace(&mut self.nodes[0], last);
        sift_down_by(&mut self.nodes, 1, &self.cmp);
        #[cfg(all(test, not(feature = "stress_tests")))]{
            assert!(self.check())
        }
        Some(root)
    }

	/// Drop every node, keeping the allocated capacity
    pub fn clear(&mut self) {
        self.nodes.clear()
    }

	/// Visit every node in storage order (NOT sorted order)
    pub fn for_each_node(&self, visitor: impl FnMut(&T)) {
        self.nodes.iter().for_each(visitor)
    }

	/// Borrowing iterator over the nodes in storage order (NOT sorted order)
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.nodes.iter()
    }

	/// Write every node in storage order to `out`, rendering each one with `node_to_string`.
	/// The rendering buffer is cleared before each node.
	/// An empty heap is written as `[ EMPTY ]`.
    pub fn print_by<W>(&self, out: &mut W, node_to_string: impl Fn(&mut String, &T)) -> io::Result<()>
    where W: io::Write + ?Sized {
        if self.nodes.is_empty() {
            return writeln!(out, "[ EMPTY ]")
        }
        let mut buffer = String::new();
        for (i, node) in self.nodes.iter().enumerate() {
            buffer.clear();
            node_to_string(&mut buffer, node);
            writeln!(out, "nodes[{}]:\n{}", i + 1, buffer)?;
        }
        Ok(())
    }

	/// Give up the storage in heap (storage) order
    pub fn into_vec(self) -> Vec<T> {
        self.nodes
    }

	/// Give up the storage sorted in extraction order, dominant node first
    pub fn into_sorted_vec(self) -> Vec<T> {
        let Self{mut nodes, cmp} = self;
        hsort::sort_by(&mut nodes, &cmp);
        nodes
    }

    #[cfg(test)]
    pub(crate) fn check(&self) -> bool {
        hsort::is_heap_by(&self.nodes, &self.cmp)
    }
}

impl<'a, T, C> IntoIterator for &'a BHeap<T, C> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl<T, C> From<BHeap<T, C>> for Vec<T> {
    fn from(heap: BHeap<T, C>) -> Self {
        heap.nodes
    }
}

impl<T: fmt::Debug, C> fmt::Debug for BHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BHeap")
            .field("nodes", &self.nodes)
            .field("capacity", &self.nodes.capacity())
            .finish_non_exhaustive()
    }
}
