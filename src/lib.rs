pub mod bheap;
pub mod error;
pub mod hsort;

pub use bheap::BHeap;
pub use error::HeapError;



/// Decides which of two elements belongs closer to the root of a heap.
/// `dominates(a, b)` returning true means `a` must be placed above `b`.
/// Implementations must be a strict weak ordering (`<`) or its reflexive counterpart (`<=`),
/// and must not change their answers while a heap built with them is alive; this is not checked.
/// Any `Fn(&T, &T) -> bool` closure is a comparator.
pub trait Dominance<T: ?Sized> {
    fn dominates(&self, a: &T, b: &T) -> bool;
}

impl<T: ?Sized, F: Fn(&T, &T) -> bool> Dominance<T> for F {
    fn dominates(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Smallest element on top (a min heap)
#[derive(Clone, Copy, Debug, Default)]
pub struct MinFirst;

/// Largest element on top (a max heap)
#[derive(Clone, Copy, Debug, Default)]
pub struct MaxFirst;

/// Flips the polarity of a borrowed comparator, so `Reversed(&MinFirst)` behaves like `MaxFirst`
#[derive(Clone, Copy, Debug)]
pub struct Reversed<'a, C: ?Sized>(pub &'a C);

impl<T: Ord + ?Sized> Dominance<T> for MinFirst {
    fn dominates(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

impl<T: Ord + ?Sized> Dominance<T> for MaxFirst {
    fn dominates(&self, a: &T, b: &T) -> bool {
        a > b
    }
}

impl<T: ?Sized, C: Dominance<T> + ?Sized> Dominance<T> for Reversed<'_, C> {
    fn dominates(&self, a: &T, b: &T) -> bool {
        self.0.dominates(b, a)
    }
}
