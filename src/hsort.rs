use crate::{bheap::sift_down_by, Dominance, Reversed};

/// Reorder `nodes` in place so that every parent dominates its children under `cmp`,
/// sifting down every internal node from the last one up to the root.
/// O(n) comparisons, no extra storage.
pub fn heapify_by<T>(nodes: &mut [T], cmp: &impl Dominance<T>) {
    for i in (1..=nodes.len()/2).rev() {
        sift_down_by(nodes, i, cmp)
    }
}

/// Heapsort `nodes` in place into extraction order: the node that dominates everything else comes first,
/// so `MinFirst` sorts ascending and `MaxFirst` descending.
/// Any input order is accepted.  Not stable.  O(n log(n)) comparisons, O(1) extra space.
pub fn sort_by<T>(nodes: &mut [T], cmp: &impl Dominance<T>) {
    // Build the heap upside down, so each root swapped to the tail is the least dominant node left
    let rev = Reversed(cmp);
    heapify_by(nodes, &rev);
    for end in (1..nodes.len()).rev() {
        nodes.swap(0, end);
        sift_down_by(&mut nodes[..end], 1, &rev)
    }
}

/// Returns true if every parent dominates its children under `cmp`, treating ties as fine.
/// A tie is a pair where neither node dominates the other (strict comparators)
/// or both do (non-strict ones like `<=`), so only a child that strictly beats its parent fails.
pub fn is_heap_by<T>(nodes: &[T], cmp: &impl Dominance<T>) -> bool {
    (2..=nodes.len()).all(|i|{
        let (parent, child) = (&nodes[i/2 - 1], &nodes[i - 1]);
        cmp.dominates(parent, child) || !cmp.dominates(child, parent)
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::{distributions::{Distribution, Uniform}, Rng};

    use crate::{BHeap, MaxFirst, MinFirst};

    use super::*;

    #[cfg(not(feature = "stress_tests"))]
    const PROPTEST_CASES: u32 = 256;
    #[cfg(feature = "stress_tests")]
    const PROPTEST_CASES: u32 = 10000;

    #[test]
    fn sort_small() {
        let mut a = [5, 3, 8, 1, 9, 2];
        sort_by(&mut a, &MinFirst);
        assert_eq!(a, [1, 2, 3, 5, 8, 9]);
        sort_by(&mut a, &MinFirst);
        assert_eq!(a, [1, 2, 3, 5, 8, 9]);
        sort_by(&mut a, &MaxFirst);
        assert_eq!(a, [9, 8, 5, 3, 2, 1]);
    }

    #[test]
    fn sort_degenerate() {
        let mut empty: [u8; 0] = [];
        sort_by(&mut empty, &MinFirst);
        heapify_by(&mut empty, &MinFirst);
        assert!(is_heap_by(&empty, &MinFirst));
        let mut one = [7];
        sort_by(&mut one, &MaxFirst);
        assert_eq!(one, [7]);
        let mut same = [4; 9];
        sort_by(&mut same, &MinFirst);
        assert_eq!(same, [4; 9]);
    }

    #[test]
    fn sort_with_closure_and_reversed() {
        let mut words = ["kiwi", "fig", "banana", "apple"];
        sort_by(&mut words, &|a: &&str, b: &&str|a.len() < b.len());
        assert_eq!(words.map(str::len), [3, 4, 5, 6]);
        let mut nums = [2, 7, 1, 8, 2, 8];
        sort_by(&mut nums, &Reversed(&MinFirst));
        assert_eq!(nums, [8, 8, 7, 2, 2, 1]);
    }

    #[test]
    fn non_strict_comparator_with_duplicates() {
        let le = |a: &i32, b: &i32|a <= b;
        let mut nodes = [2, 2, 1, 1, 3, 3, 2];
        heapify_by(&mut nodes, &le);
        assert!(is_heap_by(&nodes, &le));
        assert_eq!(nodes[0], 1);
        assert!(!is_heap_by(&[2, 1], &le));
        assert!(is_heap_by(&[1, 1, 1], &le));
        let mut sorted = [2, 2, 1, 1, 3, 3, 2];
        sort_by(&mut sorted, &le);
        assert_eq!(sorted, [1, 1, 2, 2, 2, 3, 3]);

        let mut heap = BHeap::new(le).unwrap();
        heap.insert_batch([2, 2, 1, 1]).unwrap();
        for e in [3, 3, 2, 1, 2] {
            heap.insert(e).unwrap()
        }
        assert!(heap.check());
        let mut out = Vec::new();
        while let Some(e) = heap.extract() {
            out.push(e)
        }
        assert_eq!(out, [1, 1, 1, 2, 2, 2, 2, 3, 3]);
    }

    #[test]
    fn heapify_then_wrap() {
        let mut nodes = vec![5, 3, 8, 1, 9, 2];
        assert!(!is_heap_by(&nodes, &MaxFirst));
        heapify_by(&mut nodes, &MaxFirst);
        assert!(is_heap_by(&nodes, &MaxFirst));
        assert_eq!(nodes[0], 9);
        let mut heap = BHeap::from_vec(nodes, MaxFirst);
        let mut out = Vec::new();
        while let Some(e) = heap.extract() {
            out.push(e)
        }
        assert_eq!(out, [9, 8, 5, 3, 2, 1]);
    }

    #[test]
    fn random_sorts() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let len = rng.gen_range(0..2000);
            let dist = Uniform::new(0u32, rng.gen_range(1..5000));
            let mut nodes: Vec<u32> = dist.sample_iter(&mut rng).take(len).collect();
            let mut expected = nodes.clone();
            expected.sort_unstable();
            sort_by(&mut nodes, &MinFirst);
            if nodes != expected {
                panic!("Heapsort of {} nodes did not match sort_unstable!", len)
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

        #[test]
        fn sorts_like_std(mut nodes in proptest::collection::vec(any::<i32>(), 0..500)) {
            let mut expected = nodes.clone();
            expected.sort_unstable_by(|a, b|b.cmp(a));
            sort_by(&mut nodes, &MaxFirst);
            prop_assert_eq!(nodes, expected);
        }

        #[test]
        fn heapify_establishes_invariant(mut nodes in proptest::collection::vec(0..100i32, 0..500)) {
            heapify_by(&mut nodes, &MinFirst);
            prop_assert!(is_heap_by(&nodes, &MinFirst));
        }

        #[test]
        fn mixed_operations_keep_invariant(ops in proptest::collection::vec(proptest::option::of(0..50i32), 0..300)) {
            // Some(e) inserts e, None extracts
            let mut heap = BHeap::new(MinFirst).unwrap();
            let mut reference = Vec::new();
            for op in ops {
                match op {
                    Some(e) => {
                        heap.insert(e).unwrap();
                        reference.push(e);
                    },
                    None => {
                        reference.sort_unstable_by(|a, b|b.cmp(a));
                        prop_assert_eq!(heap.extract(), reference.pop());
                    }
                }
                prop_assert_eq!(heap.len(), reference.len());
                prop_assert!(heap.check());
            }
        }
    }
}
