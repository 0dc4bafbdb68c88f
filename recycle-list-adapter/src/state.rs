use recycle_list::Window;

/// The rendered window as reported to callers.
///
/// `start`/`end` are inclusive; an empty window reports `count == 0` with both bounds at `0`.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize,
    pub count: usize,
}

impl From<Window> for VisibleRange {
    fn from(window: Window) -> Self {
        match window.bounds() {
            Some((start, end)) => Self {
                start,
                end,
                count: window.len(),
            },
            None => Self::default(),
        }
    }
}

/// A read-only snapshot of a list's bookkeeping.
///
/// Useful for debug overlays and for asserting engine behavior in tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub total_items: usize,
    /// Rows in the current window (overscan included).
    pub visible_items: usize,
    /// Viewport height last reported by the container.
    pub container_height: u32,
    pub total_height: u64,
    /// Scroll offset the current window was computed for.
    pub scroll_top: u64,
    /// Nodes currently attached.
    pub rendered_elements: usize,
    /// Detached nodes waiting in the pool.
    pub pool_size: usize,
}
