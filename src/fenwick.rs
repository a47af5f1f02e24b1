//! Growable Fenwick tree (Binary Indexed Tree) over a contiguous buffer.
//!
//! The tree is stored 1-indexed in a `Vec<T>` of length `len + 1`. Slot 0
//! always holds `T::zero()` and is never touched by the bit walks, so logical
//! position `i` maps straight onto storage slot `i`.
//!
//! Cell `i` holds the sum of the original values in `(i - lowbit(i), i]`.
//! A new last element only ever covers cells that already exist, which is
//! what makes appending and removing at the end cheap:
//!
//! | Operation | Time |
//! |-----------|------|
//! | `from_slice(values)` | O(n) |
//! | `prefix_sum(i)` | O(log n) |
//! | `update(i, delta)` | O(log n) |
//! | `push(value)` | O(log n) amortized |
//! | `pop()` | O(1) amortized |
//! | `index_of(sum)` | O(log n) |
//! | `to_vec()` | O(n) |

use std::ops::RangeInclusive;

use crate::error::FenwickError;
use crate::error::Result;
use crate::summand::Summand;

/// Capacity below which `pop` never gives memory back.
const MIN_CAPACITY: usize = 16;

/// `pop` shrinks the buffer once its capacity exceeds this multiple of its length.
const SHRINK_RATIO: usize = 4;

/// A Fenwick tree that can grow and shrink at the end.
///
/// Positions are 1-based: the first element is at index `1` and the last at
/// index [`len`](Self::len). `prefix_sum(0)` is always zero.
#[derive(Clone, Debug, PartialEq)]
pub struct FenwickTree<T: Summand> {
    buffer: Vec<T>,
}

impl<T: Summand> FenwickTree<T> {
    /// Create an empty tree.
    pub fn new() -> Self {
        FenwickTree { buffer: vec![T::zero()] }
    }

    /// Create an empty tree with room for `capacity` elements before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut buffer = Vec::with_capacity(capacity + 1);
        buffer.push(T::zero());
        FenwickTree { buffer }
    }

    /// Build a tree whose element at position `i` is `values[i - 1]`, in O(n).
    ///
    /// ```
    /// use fenwick::FenwickTree;
    ///
    /// let tree = FenwickTree::from_slice(&[1, 2, 3, 4]);
    /// assert_eq!(tree.prefix_sum(2), Ok(3));
    /// assert_eq!(tree.prefix_sum(4), Ok(10));
    /// ```
    pub fn from_slice(values: &[T]) -> Self {
        let mut buffer = Vec::with_capacity(values.len() + 1);
        buffer.push(T::zero());
        buffer.extend_from_slice(values);
        Self::from_raw(buffer)
    }

    /// Takes a buffer whose slot 0 is zero and slots `1..` hold the original
    /// values, and folds each cell into its parent in place.
    fn from_raw(mut buffer: Vec<T>) -> Self {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("fenwick_build", len = buffer.len() - 1).entered();

        let n = buffer.len() - 1;
        for i in 1..=n {
            let parent = i + lowbit(i);
            if parent <= n {
                let cell = buffer[i];
                buffer[parent] += cell;
            }
        }
        FenwickTree { buffer }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len() - 1
    }

    /// Whether the tree holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of elements the tree can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.buffer.capacity() - 1
    }

    /// Sum of the elements at positions `1..=index`.
    ///
    /// `index` may range over `0..=len`; `prefix_sum(0)` is zero.
    pub fn prefix_sum(&self, index: usize) -> Result<T> {
        self.check(index, 0)?;
        Ok(self.prefix(index))
    }

    /// Add `delta` to the element at `index` (in `1..=len`).
    ///
    /// This is a relative adjustment: a negative delta lowers the element,
    /// a positive one raises it. Use [`set`](Self::set) to assign.
    pub fn update(&mut self, index: usize, delta: T) -> Result<()> {
        self.check(index, 1)?;
        self.add_at(index, delta);
        Ok(())
    }

    /// Append `value` as the new last element.
    pub fn push(&mut self, value: T) {
        let n = self.buffer.len();
        let cell = value + self.covered_below(n);
        self.buffer.push(cell);

        #[cfg(feature = "tracing")]
        tracing::trace!(len = self.len(), "push");
    }

    /// Remove the last element.
    ///
    /// Returns `false` (and changes nothing) if the tree was empty.
    pub fn pop(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }

        // No remaining cell covers the last slot, so dropping it is enough.
        self.buffer.pop();

        let capacity = self.buffer.capacity();
        if capacity > MIN_CAPACITY && capacity > SHRINK_RATIO * self.buffer.len() {
            self.buffer.shrink_to((2 * self.buffer.len()).max(MIN_CAPACITY));
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(len = self.len(), "pop");

        true
    }

    /// Find the position whose element "contains" the cumulative `sum`: the
    /// smallest index `i` with `prefix_sum(i) > sum`.
    ///
    /// The result lies in `0..=len + 1`. A result of `0` means `sum` is below
    /// zero, so even the empty prefix exceeds it. A result of `len + 1` means
    /// `sum` reaches or passes the total. Neither is a position within bounds.
    ///
    /// The descent assumes prefix sums never decrease, i.e. every element is
    /// non-negative. On trees holding negative elements the answer is still
    /// some index in range, but not a meaningful one.
    ///
    /// ```
    /// use fenwick::FenwickTree;
    ///
    /// let tree = FenwickTree::from_slice(&[5, 3, 2]);
    /// assert_eq!(tree.index_of(-1), 0);
    /// assert_eq!(tree.index_of(4), 1);
    /// assert_eq!(tree.index_of(5), 2);
    /// assert_eq!(tree.index_of(10), 4);
    /// ```
    pub fn index_of(&self, sum: T) -> usize {
        if sum < T::zero() {
            return 0;
        }

        let n = self.len();
        let mut pos = 0;
        let mut remaining = sum;
        let mut step = highest_power_of_two(n);

        while step > 0 {
            let next = pos + step;
            if next <= n && self.buffer[next] <= remaining {
                remaining -= self.buffer[next];
                pos = next;
            }
            step >>= 1;
        }

        pos + 1
    }

    /// Like [`index_of`](Self::index_of), but `None` when the position falls
    /// before the first element or past the last one.
    pub fn find(&self, sum: T) -> Option<usize> {
        let index = self.index_of(sum);
        (1..=self.len()).contains(&index).then_some(index)
    }

    /// The element at `index` (in `1..=len`).
    pub fn get(&self, index: usize) -> Result<T> {
        self.check(index, 1)?;
        let mut value = self.buffer[index];
        let stop = index - lowbit(index);
        let mut j = index - 1;
        while j > stop {
            value -= self.buffer[j];
            j -= lowbit(j);
        }
        Ok(value)
    }

    /// Overwrite the element at `index` (in `1..=len`) with `value`.
    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        let current = self.get(index)?;
        // Split on direction so unsigned cells never go through a negative delta.
        if value >= current {
            self.add_at(index, value - current);
        } else {
            self.sub_at(index, current - value);
        }
        Ok(())
    }

    /// Sum of the elements at positions `start..=end`.
    ///
    /// An empty range (`start > end`) sums to zero. Positions are 1-based, so
    /// `start == 0` is out of range, as is `end > len`.
    pub fn range_sum(&self, range: RangeInclusive<usize>) -> Result<T> {
        let (start, end) = range.into_inner();
        if start == 0 {
            self.check(start, 1)?;
        }
        self.check(end, 0)?;
        if start > end {
            return Ok(T::zero());
        }
        Ok(self.prefix(end) - self.prefix(start - 1))
    }

    /// Sum of every element.
    pub fn total(&self) -> T {
        self.prefix(self.len())
    }

    /// Remove every element, keeping the allocation.
    pub fn clear(&mut self) {
        self.buffer.truncate(1);
    }

    /// Recover the original elements in order, in O(n).
    pub fn to_vec(&self) -> Vec<T> {
        let n = self.len();
        let mut values = self.buffer.clone();
        // Undo the build pass from the top down so each cell is still whole
        // when it is taken out of its parent.
        for i in (1..=n).rev() {
            let parent = i + lowbit(i);
            if parent <= n {
                let cell = values[i];
                values[parent] -= cell;
            }
        }
        values.remove(0);
        values
    }

    /// Iterate over the original elements in order.
    pub fn iter(&self) -> impl Iterator<Item = T> {
        self.to_vec().into_iter()
    }

    fn check(&self, index: usize, min: usize) -> Result<()> {
        let len = self.len();
        if index < min || index > len {
            #[cfg(feature = "tracing")]
            tracing::debug!(index, len, "index out of range");
            return Err(FenwickError::OutOfRange { index, len });
        }
        Ok(())
    }

    fn prefix(&self, mut index: usize) -> T {
        let mut sum = T::zero();
        while index > 0 {
            sum += self.buffer[index];
            index -= lowbit(index);
        }
        sum
    }

    /// Sum of the cells below `n` that cell `n` covers, i.e. the original
    /// values in `(n - lowbit(n), n - 1]`. Only reads slots `< n`.
    fn covered_below(&self, n: usize) -> T {
        let mut sum = T::zero();
        let stop = n - lowbit(n);
        let mut j = n - 1;
        while j > stop {
            sum += self.buffer[j];
            j -= lowbit(j);
        }
        sum
    }

    fn add_at(&mut self, mut index: usize, delta: T) {
        let n = self.len();
        while index <= n {
            self.buffer[index] += delta;
            index += lowbit(index);
        }
    }

    fn sub_at(&mut self, mut index: usize, delta: T) {
        let n = self.len();
        while index <= n {
            self.buffer[index] -= delta;
            index += lowbit(index);
        }
    }
}

impl<T: Summand> Default for FenwickTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Summand> From<Vec<T>> for FenwickTree<T> {
    fn from(mut values: Vec<T>) -> Self {
        values.insert(0, T::zero());
        Self::from_raw(values)
    }
}

impl<T: Summand> FromIterator<T> for FenwickTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let buffer = std::iter::once(T::zero()).chain(iter).collect();
        Self::from_raw(buffer)
    }
}

impl<T: Summand> Extend<T> for FenwickTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.buffer.reserve(iter.size_hint().0);
        for value in iter {
            self.push(value);
        }
    }
}

/// Lowest set bit of `x`. E.g., `lowbit(6) = 2`, `lowbit(4) = 4`.
#[inline]
fn lowbit(x: usize) -> usize {
    x & x.wrapping_neg()
}

/// Largest power of two that is `<= n`, or 0 when `n == 0`.
#[inline]
fn highest_power_of_two(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    1 << (usize::BITS - 1 - n.leading_zeros())
}
