use alloc::vec::Vec;

use crate::ListConfig;
use crate::SizeMode;
use crate::fenwick::Fenwick;

/// Answers "how tall is row `i`", "where does row `i` start" and "how tall is the whole list".
///
/// In fixed mode every row is `item_height` tall and all queries are `O(1)` arithmetic. In
/// dynamic mode each row carries its own height (an estimate until measured) and offsets come
/// from a Fenwick tree, so queries and height updates are `O(log n)`.
#[derive(Clone, Debug)]
pub struct SizeModel {
    mode: SizeMode,
    item_height: u32,
    count: usize,
    heights: Vec<u32>, // dynamic mode only
    measured: Vec<bool>,
    sums: Fenwick,
}

impl SizeModel {
    pub fn new(mode: SizeMode, item_height: u32) -> Self {
        Self {
            mode,
            item_height,
            count: 0,
            heights: Vec::new(),
            measured: Vec::new(),
            sums: Fenwick::default(),
        }
    }

    pub fn fixed(item_height: u32) -> Self {
        Self::new(SizeMode::Fixed, item_height)
    }

    pub fn dynamic(item_height: u32) -> Self {
        Self::new(SizeMode::Dynamic, item_height)
    }

    pub fn from_config(config: &ListConfig) -> Self {
        Self::new(config.size_mode(), config.item_height)
    }

    pub fn mode(&self) -> SizeMode {
        self.mode
    }

    pub fn is_dynamic(&self) -> bool {
        self.mode == SizeMode::Dynamic
    }

    /// The configured row height (the overscan unit in dynamic mode).
    pub fn item_height(&self) -> u32 {
        self.item_height
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Height of row `index`, or `0` past the end.
    pub fn height_of(&self, index: usize) -> u32 {
        if index >= self.count {
            return 0;
        }
        match self.mode {
            SizeMode::Fixed => self.item_height,
            SizeMode::Dynamic => self.heights[index],
        }
    }

    /// Top offset of row `index`. Indexes at or past the end map to `total_height()`.
    pub fn offset_of(&self, index: usize) -> u64 {
        let index = index.min(self.count);
        match self.mode {
            SizeMode::Fixed => (index as u64).saturating_mul(self.item_height as u64),
            SizeMode::Dynamic => self.sums.prefix_sum(index),
        }
    }

    pub fn total_height(&self) -> u64 {
        match self.mode {
            SizeMode::Fixed => (self.count as u64).saturating_mul(self.item_height as u64),
            SizeMode::Dynamic => self.sums.total(),
        }
    }

    /// Returns the row covering `offset`, clamped to the last row.
    ///
    /// Returns `None` for an empty model.
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let index = match self.mode {
            SizeMode::Fixed if self.item_height == 0 => 0,
            SizeMode::Fixed => {
                usize::try_from(offset / self.item_height as u64).unwrap_or(usize::MAX)
            }
            SizeMode::Dynamic => self.sums.lower_bound(offset),
        };
        Some(index.min(self.count - 1))
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.measured.get(index).copied().unwrap_or(false)
    }

    /// Records the rendered height of row `index` and returns the height delta.
    ///
    /// Fixed mode ignores measurements; out-of-range indexes are ignored.
    pub fn record_measured(&mut self, index: usize, height: u32) -> i64 {
        if self.mode == SizeMode::Fixed || index >= self.count {
            return 0;
        }
        self.measured[index] = true;
        self.set_height(index, height)
    }

    /// Replaces the estimate of a row that has not been measured yet.
    ///
    /// Measured rows keep their measurement. Returns the height delta.
    pub fn set_estimate(&mut self, index: usize, height: u32) -> i64 {
        if self.mode == SizeMode::Fixed || index >= self.count || self.measured[index] {
            return 0;
        }
        self.set_height(index, height)
    }

    fn set_height(&mut self, index: usize, height: u32) -> i64 {
        let cur = self.heights[index];
        if cur == height {
            return 0;
        }
        self.heights[index] = height;
        let delta = height as i64 - cur as i64;
        self.sums.add(index, delta);
        delta
    }

    /// Drops every row and replaces them with `count` fresh rows.
    ///
    /// `estimate(i)` is only consulted in dynamic mode.
    pub fn replace(&mut self, count: usize, estimate: impl FnMut(usize) -> u32) {
        self.count = count;
        if self.mode == SizeMode::Fixed {
            return;
        }
        self.heights.clear();
        self.heights.extend((0..count).map(estimate));
        self.measured.clear();
        self.measured.resize(count, false);
        self.sums = Fenwick::from_heights(&self.heights);
    }

    /// Appends `added` rows; `estimate` receives each new row's absolute index.
    ///
    /// Returns the total height added.
    pub fn append(&mut self, added: usize, mut estimate: impl FnMut(usize) -> u32) -> u64 {
        let start = self.count;
        self.count = self.count.saturating_add(added);
        if self.mode == SizeMode::Fixed {
            return (added as u64).saturating_mul(self.item_height as u64);
        }

        let mut sum = 0u64;
        self.heights.reserve(added);
        self.measured.reserve(added);
        for i in start..self.count {
            let h = estimate(i);
            self.heights.push(h);
            self.measured.push(false);
            self.sums.push(h);
            sum = sum.saturating_add(h as u64);
        }
        sum
    }

    /// Inserts `added` rows in front of the existing ones.
    ///
    /// `estimate` receives each new row's index (`0..added`). Every existing row shifts down, so
    /// the prefix sums are rebuilt. Returns the total height added.
    pub fn prepend(&mut self, added: usize, estimate: impl FnMut(usize) -> u32) -> u64 {
        self.count = self.count.saturating_add(added);
        if self.mode == SizeMode::Fixed {
            return (added as u64).saturating_mul(self.item_height as u64);
        }

        let mut heights: Vec<u32> = Vec::with_capacity(self.count);
        heights.extend((0..added).map(estimate));
        let sum = heights.iter().fold(0u64, |acc, &h| acc.saturating_add(h as u64));
        heights.extend_from_slice(&self.heights);
        self.heights = heights;

        let mut measured = alloc::vec![false; added];
        measured.extend_from_slice(&self.measured);
        self.measured = measured;

        self.sums = Fenwick::from_heights(&self.heights);
        sum
    }

    /// Removes row `index`, returning its height. Out-of-range indexes are ignored.
    pub fn remove(&mut self, index: usize) -> Option<u32> {
        if index >= self.count {
            return None;
        }
        self.count -= 1;
        if self.mode == SizeMode::Fixed {
            return Some(self.item_height);
        }

        let h = self.heights.remove(index);
        self.measured.remove(index);
        self.sums = Fenwick::from_heights(&self.heights);
        Some(h)
    }

    /// Removes every row.
    pub fn clear(&mut self) {
        self.count = 0;
        self.heights.clear();
        self.measured.clear();
        self.sums.clear();
    }
}
