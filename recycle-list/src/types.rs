use core::ops::Range;

/// Default item identity: the row's position in the sequence.
pub type ItemKey = u64;

/// The inclusive index window that must be rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Window {
    /// Nothing to render (empty list or zero-sized viewport).
    #[default]
    Empty,
    /// Rows `start..=end`.
    Span { start: usize, end: usize },
}

impl Window {
    pub fn span(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "window start after end ({start} > {end})");
        Self::Span { start, end }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// `(start, end)`, both inclusive.
    pub fn bounds(&self) -> Option<(usize, usize)> {
        match *self {
            Self::Empty => None,
            Self::Span { start, end } => Some((start, end)),
        }
    }

    pub fn start(&self) -> Option<usize> {
        self.bounds().map(|(s, _)| s)
    }

    pub fn end(&self) -> Option<usize> {
        self.bounds().map(|(_, e)| e)
    }

    /// Number of rows in the window.
    pub fn len(&self) -> usize {
        match *self {
            Self::Empty => 0,
            Self::Span { start, end } => end - start + 1,
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        match *self {
            Self::Empty => false,
            Self::Span { start, end } => start <= index && index <= end,
        }
    }

    /// The window as a half-open index range (empty for [`Window::Empty`]).
    pub fn indices(&self) -> Range<usize> {
        match *self {
            Self::Empty => 0..0,
            Self::Span { start, end } => start..end + 1,
        }
    }
}
