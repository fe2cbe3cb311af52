//! An array-backed binary heap whose order is given by a comparator.
//!
//! The comparator `less(a, b)` returns `true` if `a` should be closer to the root
//! than `b`. With `a < b` the heap is a min-heap, with `a > b` a max-heap:
//!
//! ```rust
//! use weightgraph::datastructures::heap::Heap;
//!
//! let mut heap = Heap::new(|a: &(char, i64), b: &(char, i64)| a.1 < b.1);
//! heap.push(('x', 5));
//! heap.push(('y', 2));
//! heap.push(('z', 9));
//! assert_eq!(heap.pop(), Some(('y', 2)));
//! assert_eq!(heap.peek(), Some(&('x', 5)));
//! ```
//!
//! The comparator must describe a total order that does not change while an
//! element is stored in the heap.
use std::fmt;

/// Comparator-ordered binary heap, see the [module documentation](self).
pub struct Heap<T, F = fn(&T, &T) -> bool> where F: Fn(&T, &T) -> bool {
    contents: Vec<T>,
    less: F,
}

fn lt<T: Ord>(a: &T, b: &T) -> bool {
    a < b
}

fn gt<T: Ord>(a: &T, b: &T) -> bool {
    a > b
}

impl<T: Ord> Heap<T> {
    /// Creates an empty heap which pops its smallest element first.
    pub fn min() -> Self {
        Self::new(lt::<T>)
    }

    /// Creates an empty heap which pops its largest element first.
    pub fn max() -> Self {
        Self::new(gt::<T>)
    }
}

impl<T, F> Heap<T, F> where F: Fn(&T, &T) -> bool {
    pub fn new(less: F) -> Self {
        Heap { contents: Vec::new(), less }
    }

    pub fn with_capacity(capacity: usize, less: F) -> Self {
        Heap { contents: Vec::with_capacity(capacity), less }
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Inserts `value` in $O(\log n)$ time.
    pub fn push(&mut self, value: T) {
        self.contents.push(value);
        self.sift_up(self.contents.len() - 1);
    }

    /// Removes and returns the root of the heap or `None` if the heap is empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.contents.is_empty() {
            return None;
        }

        // The last element takes the place of the root
        let root = self.contents.swap_remove(0);
        self.sift_down(0);
        Some(root)
    }

    /// Returns the root of the heap without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.contents.first()
    }

    /// Returns a copy of the stored elements in heap order, which is not
    /// necessarily sorted.
    pub fn values(&self) -> Vec<T> where T: Clone {
        self.contents.clone()
    }

    /// Iterates over the stored elements in heap order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.contents.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.contents
    }

    pub fn clear(&mut self) {
        self.contents.clear();
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !(self.less)(&self.contents[index], &self.contents[parent]) {
                break;
            }
            self.contents.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.contents.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;

            // The right child only wins if it beats the better of
            // the current node and the left child.
            let mut swap = index;
            if left < len && (self.less)(&self.contents[left], &self.contents[swap]) {
                swap = left;
            }
            if right < len && (self.less)(&self.contents[right], &self.contents[swap]) {
                swap = right;
            }
            if swap == index {
                break;
            }
            self.contents.swap(index, swap);
            index = swap;
        }
    }

    #[cfg(test)]
    fn is_heap(&self) -> bool {
        (1..self.contents.len()).all(|i| !(self.less)(&self.contents[i], &self.contents[(i - 1) / 2]))
    }
}

impl<T, F> Extend<T> for Heap<T, F> where F: Fn(&T, &T) -> bool {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T, F> fmt::Debug for Heap<T, F> where T: fmt::Debug, F: Fn(&T, &T) -> bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heap").field("contents", &self.contents).finish()
    }
}


//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####

#[cfg(test)]
mod test {
    use super::*;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn min_heap() {
        let mut H = Heap::min();
        H.extend(vec![10, 7, 21, 99]);

        assert_eq!(H.len(), 4);
        assert_eq!(H.peek(), Some(&7));
        assert_eq!(H.pop(), Some(7));
        assert_eq!(H.len(), 3);
    }

    #[test]
    fn max_heap() {
        let mut H = Heap::max();
        H.extend(1..=4);

        assert_eq!(H.len(), 4);
        assert_eq!(H.peek(), Some(&4));
        assert_eq!(H.pop(), Some(4));
        assert_eq!(H.len(), 3);
    }

    #[test]
    fn empty() {
        let mut H: Heap<i32> = Heap::min();
        assert_eq!(H.pop(), None);
        assert_eq!(H.peek(), None);
        assert!(H.is_empty());

        let mut H: Heap<i32> = Heap::max();
        assert_eq!(H.pop(), None);
        assert_eq!(H.peek(), None);
    }

    #[test]
    fn pop_order() {
        let mut H = Heap::min();
        H.extend(vec![20, 50, 88, 32]);
        let mut order = Vec::new();
        while let Some(x) = H.pop() {
            order.push(x);
        }
        assert_eq!(order, vec![20, 32, 50, 88]);
        assert!(H.is_empty());

        let mut H = Heap::max();
        H.extend(1..=4);
        let order: Vec<_> = std::iter::from_fn(|| H.pop()).collect();
        assert_eq!(order, vec![4, 3, 2, 1]);
    }

    #[test]
    fn pop_swaps_with_right_child() {
        let mut H = Heap::min();
        H.extend(vec![10, 20, 5, 30]);

        assert_eq!(H.pop(), Some(5));
        assert_eq!(H.peek(), Some(&10));
        assert!(H.is_heap());
    }

    #[test]
    fn peek_does_not_remove() {
        let mut H = Heap::min();
        H.extend(vec![7, 1, 25]);
        assert_eq!(H.peek(), Some(&1));
        assert_eq!(H.len(), 3);

        let mut H = Heap::max();
        H.extend(vec![7, 1, 25]);
        assert_eq!(H.peek(), Some(&25));
        assert_eq!(H.len(), 3);
    }

    #[test]
    fn values_in_heap_order() {
        let mut H = Heap::max();
        H.extend(vec![7, 1, 25]);
        assert_eq!(H.values(), vec![25, 1, 7]);

        // The copy is detached from the heap
        let mut values = H.values();
        values.clear();
        assert_eq!(H.len(), 3);
        assert_eq!(H.iter().count(), 3);
        assert_eq!(H.into_vec(), vec![25, 1, 7]);
    }

    #[test]
    fn clear() {
        let mut H = Heap::max();
        H.extend(0..20);
        H.clear();
        assert_eq!(H.len(), 0);
        assert!(H.is_empty());
    }

    #[test]
    fn custom_comparator() {
        let mut H = Heap::with_capacity(4, |a: &(&str, i64), b: &(&str, i64)| a.1 < b.1);
        H.push(("far", 12));
        H.push(("near", 1));
        H.push(("mid", 6));

        assert_eq!(H.pop(), Some(("near", 1)));
        assert_eq!(H.pop(), Some(("mid", 6)));
        assert_eq!(H.pop(), Some(("far", 12)));
        assert_eq!(H.pop(), None);
    }

    #[test]
    fn random_pops_are_monotone() {
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        for _ in 0..50 {
            let n = rng.gen_range(1..200);
            let mut H = Heap::min();
            let mut M = Heap::max();
            for _ in 0..n {
                let x: i32 = rng.gen_range(-1000..1000);
                H.push(x);
                M.push(x);
                assert!(H.is_heap());
                assert!(M.is_heap());
            }

            let k = rng.gen_range(0..=n);
            let mut last = i32::MIN;
            for _ in 0..k {
                let x = H.pop().unwrap();
                assert!(last <= x);
                assert!(H.is_heap());
                last = x;
            }
            assert_eq!(H.len(), n - k);

            let mut last = i32::MAX;
            while let Some(x) = M.pop() {
                assert!(last >= x);
                last = x;
            }
        }
    }
}
