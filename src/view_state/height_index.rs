//! HeightIndex - O(log n) row offsets via Fenwick tree
//!
//! Holds the current size of every row slot in the window (measured or estimated) and
//! answers "where does row i start" and "which row covers offset y" without walking the
//! whole data set.
//!
//! # Complexity
//!
//! - `set`: O(log n)
//! - `prefix_sum`: O(log n)
//! - `lower_bound`: O(log² n)
//! - `push`: O(log n) amortized
//! - `height`: O(1)
//! - `total`: O(log n)

/// Fenwick tree of row heights with a plain copy of the heights alongside.
///
/// The plain copy gives O(1) reads of a single height and lets the tree be rebuilt when the
/// backing storage grows.
#[derive(Debug, Clone, Default)]
pub struct HeightIndex {
    /// Fenwick tree backing storage (1-indexed internally, 0-indexed API).
    tree: Vec<isize>,
    /// Height of each row, `heights.len()` is the number of rows.
    heights: Vec<usize>,
}

impl HeightIndex {
    /// Creates an empty index with room for `capacity` rows.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gridwin::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::new(100);
    /// assert_eq!(index.len(), 0);
    /// assert_eq!(index.total(), 0);
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self {
            tree: vec![0; capacity],
            heights: Vec::with_capacity(capacity),
        }
    }

    /// Builds an index from a full list of heights.
    pub fn from_heights(heights: impl IntoIterator<Item = usize>) -> Self {
        let heights: Vec<usize> = heights.into_iter().collect();
        let mut index = Self {
            tree: Vec::new(),
            heights,
        };
        index.rebuild(index.heights.len());
        index
    }

    fn rebuild(&mut self, capacity: usize) {
        self.tree = vec![0; capacity.max(self.heights.len())];
        for (i, &h) in self.heights.iter().enumerate() {
            fenwick::array::update(&mut self.tree, i, h as isize);
        }
    }

    /// Sets the height at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gridwin::view_state::height_index::HeightIndex;
    /// let mut index = HeightIndex::new(10);
    /// index.push(52);
    /// index.set(0, 80);
    /// assert_eq!(index.prefix_sum(0), 80);
    /// ```
    pub fn set(&mut self, index: usize, height: usize) {
        assert!(
            index < self.len(),
            "index {} out of bounds (len: {})",
            index,
            self.len()
        );

        let delta = height as isize - self.heights[index] as isize;
        if delta != 0 {
            self.heights[index] = height;
            fenwick::array::update(&mut self.tree, index, delta);
        }
    }

    /// Height of the row at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn height(&self, index: usize) -> usize {
        self.heights[index]
    }

    /// Cumulative height up to and including `index` (the row's end offset).
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gridwin::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::from_heights([3, 4, 5]);
    /// assert_eq!(index.prefix_sum(0), 3);
    /// assert_eq!(index.prefix_sum(1), 7);
    /// assert_eq!(index.prefix_sum(2), 12);
    /// ```
    pub fn prefix_sum(&self, index: usize) -> usize {
        assert!(
            index < self.len(),
            "index {} out of bounds (len: {})",
            index,
            self.len()
        );

        let sum = fenwick::array::prefix_sum(&self.tree, index);
        sum.max(0) as usize
    }

    /// Start offset of the row at `index`.
    pub fn start_of(&self, index: usize) -> usize {
        if index == 0 {
            0
        } else {
            self.prefix_sum(index - 1)
        }
    }

    /// First index whose end offset is greater than `value`, i.e. the row covering `value`.
    ///
    /// Zero-height rows never cover an offset.
    ///
    /// # Returns
    ///
    /// - `Some(index)` if such a row exists
    /// - `None` if `value >= total()` or the index is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use gridwin::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::from_heights([10, 20, 15]);
    /// assert_eq!(index.lower_bound(0), Some(0));
    /// assert_eq!(index.lower_bound(10), Some(1));
    /// assert_eq!(index.lower_bound(44), Some(2));
    /// assert_eq!(index.lower_bound(45), None);
    /// ```
    pub fn lower_bound(&self, value: usize) -> Option<usize> {
        let len = self.len();
        let mut left = 0;
        let mut right = len;

        while left < right {
            let mid = left + (right - left) / 2;
            if self.prefix_sum(mid) > value {
                right = mid;
            } else {
                left = mid + 1;
            }
        }

        (left < len).then_some(left)
    }

    /// Total height of all rows.
    pub fn total(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.prefix_sum(self.len() - 1)
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// No rows.
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Appends a row with the given height, growing the tree if needed.
    pub fn push(&mut self, height: usize) {
        let idx = self.len();
        self.heights.push(height);

        if self.heights.len() > self.tree.len() {
            // New parent nodes must cover existing rows too, so rebuild rather than resize.
            self.rebuild(self.tree.len().max(1) * 2);
        } else {
            fenwick::array::update(&mut self.tree, idx, height as isize);
        }
    }

    /// Removes all rows, keeping the allocation.
    pub fn clear(&mut self) {
        self.tree.iter_mut().for_each(|node| *node = 0);
        self.heights.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_index() {
        let index = HeightIndex::new(10);
        assert!(index.is_empty());
        assert_eq!(index.total(), 0);
        assert_eq!(index.lower_bound(0), None);
    }

    #[test]
    fn set_updates_following_offsets() {
        let mut index = HeightIndex::from_heights([3, 4, 5]);
        index.set(1, 10);
        assert_eq!(index.prefix_sum(0), 3);
        assert_eq!(index.prefix_sum(1), 13);
        assert_eq!(index.total(), 18);
        assert_eq!(index.height(1), 10);
        assert_eq!(index.start_of(2), 13);
    }

    #[test]
    fn push_past_capacity_keeps_earlier_rows() {
        let mut index = HeightIndex::new(1);
        index.push(7);
        index.push(9);
        index.push(11);
        assert_eq!(index.prefix_sum(1), 16);
        assert_eq!(index.total(), 27);
    }

    #[test]
    fn clear_then_reuse_past_old_length() {
        let mut index = HeightIndex::new(8);
        for h in [5, 5, 5] {
            index.push(h);
        }
        index.clear();
        for h in [1, 2, 3, 4, 5] {
            index.push(h);
        }
        assert_eq!(index.total(), 15);
        assert_eq!(index.prefix_sum(3), 10);
    }

    #[test]
    fn lower_bound_skips_zero_height_rows() {
        let index = HeightIndex::from_heights([0, 0, 10, 0, 5]);
        assert_eq!(index.lower_bound(0), Some(2));
        assert_eq!(index.lower_bound(10), Some(4));
    }

    proptest! {
        #[test]
        fn prop_prefix_sum_is_cumulative(heights in prop::collection::vec(0usize..=200, 1..80)) {
            let mut index = HeightIndex::new(1);
            for &h in &heights {
                index.push(h);
            }
            let mut expected = 0;
            for (i, &h) in heights.iter().enumerate() {
                expected += h;
                prop_assert_eq!(index.prefix_sum(i), expected);
            }
        }

        #[test]
        fn prop_lower_bound_covers_value(heights in prop::collection::vec(1usize..=100, 1..50), offset in 0usize..5_000) {
            let index = HeightIndex::from_heights(heights.iter().copied());
            match index.lower_bound(offset) {
                Some(i) => {
                    prop_assert!(index.start_of(i) <= offset);
                    prop_assert!(offset < index.prefix_sum(i));
                }
                None => prop_assert!(offset >= index.total()),
            }
        }

        #[test]
        fn prop_set_then_height(
            heights in prop::collection::vec(1usize..=100, 1..50),
            at in 0usize..50,
            new_height in 0usize..=100
        ) {
            let mut index = HeightIndex::from_heights(heights.iter().copied());
            if at < index.len() {
                index.set(at, new_height);
                let actual = index.prefix_sum(at) - index.start_of(at);
                prop_assert_eq!(actual, new_height);
                prop_assert_eq!(index.height(at), new_height);
            }
        }
    }
}
