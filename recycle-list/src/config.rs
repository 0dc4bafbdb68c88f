/// Default row height, in the same units the host reports scroll offsets in.
pub const DEFAULT_ITEM_HEIGHT: u32 = 50;
/// Default number of extra rows rendered on each side of the visible rows.
pub const DEFAULT_OVERSCAN: usize = 5;
/// Default bound on detached nodes kept for reuse.
pub const DEFAULT_POOL_CAPACITY: usize = 100;
/// Default quiescence window before a list is considered idle again.
pub const DEFAULT_IS_SCROLLING_RESET_DELAY_MS: u64 = 150;

/// Plain, callback-free list configuration.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`, so hosts can keep
/// it alongside their other settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ListConfig {
    /// Height of every row in fixed mode; the default estimate (and the overscan unit) in
    /// dynamic mode.
    pub item_height: u32,
    pub overscan: usize,
    /// Track per-row heights (estimated, then measured) instead of a single constant.
    pub dynamic_height: bool,
    /// Maximum number of detached nodes retained for recycling.
    pub pool_capacity: usize,
    /// How long after the last scroll notification the list stays in the scrolling state.
    pub is_scrolling_reset_delay_ms: u64,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            item_height: DEFAULT_ITEM_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
            dynamic_height: false,
            pool_capacity: DEFAULT_POOL_CAPACITY,
            is_scrolling_reset_delay_ms: DEFAULT_IS_SCROLLING_RESET_DELAY_MS,
        }
    }
}

impl ListConfig {
    pub fn new(item_height: u32) -> Self {
        Self {
            item_height,
            ..Self::default()
        }
    }

    pub fn with_item_height(mut self, item_height: u32) -> Self {
        self.item_height = item_height;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_dynamic_height(mut self, dynamic_height: bool) -> Self {
        self.dynamic_height = dynamic_height;
        self
    }

    pub fn with_pool_capacity(mut self, pool_capacity: usize) -> Self {
        self.pool_capacity = pool_capacity;
        self
    }

    pub fn with_is_scrolling_reset_delay_ms(mut self, delay_ms: u64) -> Self {
        self.is_scrolling_reset_delay_ms = delay_ms;
        self
    }

    pub fn size_mode(&self) -> SizeMode {
        if self.dynamic_height {
            SizeMode::Dynamic
        } else {
            SizeMode::Fixed
        }
    }
}

/// How row heights are tracked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizeMode {
    /// Every row has `item_height`.
    Fixed,
    /// Rows start at an estimate and may be measured after render.
    Dynamic,
}
