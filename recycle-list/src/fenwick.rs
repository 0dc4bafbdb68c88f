use alloc::vec::Vec;
use core::cmp;

/// Prefix sums over item heights.
///
/// Backs dynamic-height mode: `prefix_sum(i)` is the top offset of item `i`, and
/// `lower_bound` maps an offset back to an index. Both run in `O(log n)`.
#[derive(Clone, Debug, Default)]
pub(crate) struct Fenwick {
    tree: Vec<u64>, // 1-indexed, tree[0] unused
    total: u64,
    top_bit: usize,
}

impl Fenwick {
    /// Builds the tree from per-index heights in `O(n)`.
    pub(crate) fn from_heights(heights: &[u32]) -> Self {
        let n = heights.len();
        let mut tree = alloc::vec![0u64; n + 1];
        let mut total = 0u64;
        for i in 1..=n {
            let h = heights[i - 1] as u64;
            total = total.saturating_add(h);
            tree[i] = tree[i].saturating_add(h);
            let parent = i + lsb(i);
            if parent <= n {
                tree[parent] = tree[parent].saturating_add(tree[i]);
            }
        }
        Self {
            tree,
            total,
            top_bit: top_bit(n),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.tree.len().saturating_sub(1)
    }

    pub(crate) fn clear(&mut self) {
        self.tree.clear();
        self.total = 0;
        self.top_bit = 0;
    }

    /// Appends one height at the end.
    ///
    /// The new node covers `lsb(n)` trailing values, so its initial value is derived from two
    /// prefix sums of the existing tree.
    pub(crate) fn push(&mut self, height: u32) {
        if self.tree.is_empty() {
            self.tree.push(0);
        }
        let n = self.len() + 1;
        let covered_from = n - lsb(n);
        let carried = self
            .prefix_sum(n - 1)
            .saturating_sub(self.prefix_sum(covered_from));
        let h = height as u64;
        self.tree.push(carried.saturating_add(h));
        self.total = self.total.saturating_add(h);
        self.top_bit = top_bit(n);
    }

    /// Adds `delta` to the height at `index`.
    pub(crate) fn add(&mut self, index: usize, delta: i64) {
        let n = self.len();
        if index >= n || delta == 0 {
            return;
        }
        if delta > 0 {
            self.total = self.total.saturating_add(delta as u64);
        } else {
            self.total = self.total.saturating_sub(delta.unsigned_abs());
        }
        let mut i = index + 1;
        while i <= n {
            let next = self.tree[i] as i128 + delta as i128;
            debug_assert!(next >= 0, "height sum underflow at node {i} (delta={delta})");
            self.tree[i] = next.clamp(0, u64::MAX as i128) as u64;
            i += lsb(i);
        }
    }

    /// Sum of the first `count` heights.
    pub(crate) fn prefix_sum(&self, count: usize) -> u64 {
        let mut i = cmp::min(count, self.len());
        let mut sum = 0u64;
        while i > 0 {
            sum = sum.saturating_add(self.tree[i]);
            i &= i - 1;
        }
        sum
    }

    pub(crate) fn total(&self) -> u64 {
        self.total
    }

    /// Returns the largest `c` such that `prefix_sum(c) <= target`.
    ///
    /// Equivalently, `c` is the first index whose cumulative height (its own height included)
    /// exceeds `target`; `c == len()` when no such index exists.
    pub(crate) fn lower_bound(&self, mut target: u64) -> usize {
        let n = self.len();
        let mut idx = 0usize;
        let mut bit = self.top_bit;
        while bit != 0 {
            let next = idx + bit;
            if next <= n && self.tree[next] <= target {
                target -= self.tree[next];
                idx = next;
            }
            bit >>= 1;
        }
        idx
    }
}

fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

fn top_bit(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    1usize << (usize::BITS - 1 - n.leading_zeros())
}
