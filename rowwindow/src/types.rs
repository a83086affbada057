/// A half-open range of zero-based row indexes: `bottom_row..top_row`.
///
/// The same type describes both the *viewable* range (what the viewport shows, supplied by the
/// host) and the *rendered* range (viewable plus excess rows, clamped to the data source).
///
/// Invariant: `bottom_row <= top_row`. [`RowRange::new`] enforces it; constructing the struct
/// literally with inverted bounds is a contract violation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowRange {
    pub bottom_row: usize,
    pub top_row: usize, // exclusive
}

impl RowRange {
    /// The degenerate "nothing to render" range.
    pub const EMPTY: Self = Self {
        bottom_row: 0,
        top_row: 0,
    };

    /// Creates a range, panicking if `top_row < bottom_row`.
    pub fn new(bottom_row: usize, top_row: usize) -> Self {
        assert!(
            bottom_row <= top_row,
            "RowRange: top_row must not be below bottom_row (bottom={bottom_row}, top={top_row})"
        );
        Self {
            bottom_row,
            top_row,
        }
    }

    /// Creates a range, returning `None` if `top_row < bottom_row`.
    pub fn try_new(bottom_row: usize, top_row: usize) -> Option<Self> {
        (bottom_row <= top_row).then_some(Self {
            bottom_row,
            top_row,
        })
    }

    pub fn is_valid(&self) -> bool {
        self.bottom_row <= self.top_row
    }

    pub fn is_empty(&self) -> bool {
        self.bottom_row >= self.top_row
    }

    pub fn len(&self) -> usize {
        self.top_row.saturating_sub(self.bottom_row)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.bottom_row <= index && index < self.top_row
    }
}

impl From<RowRange> for core::ops::Range<usize> {
    fn from(r: RowRange) -> Self {
        r.bottom_row..r.top_row
    }
}

/// Server-side paging configuration.
///
/// `current_page` is 1-based. Rows report `display_index = row_index + offset()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Paging {
    pub page_size: usize,
    pub current_page: usize,
}

impl Paging {
    pub fn new(page_size: usize, current_page: usize) -> Self {
        Self {
            page_size,
            current_page,
        }
    }

    /// `page_size * (current_page - 1)`. Page `0` is treated like page `1`.
    pub fn offset(&self) -> usize {
        self.page_size
            .saturating_mul(self.current_page.saturating_sub(1))
    }
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            page_size: 0,
            current_page: 1,
        }
    }
}

/// Lifecycle phase of a [`crate::RowEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// No viewable range has been supplied yet.
    Uninitialized,
    Idle,
    /// A recompute/rebuild cycle is running (observable from `on_change`).
    Recomputing,
}

/// One-shot "data changed" signal.
///
/// Set when the data source is replaced; consumed by the rendered-range emission that follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirtyFlag(bool);

impl DirtyFlag {
    pub fn new(set: bool) -> Self {
        Self(set)
    }

    pub fn set(&mut self) {
        self.0 = true;
    }

    pub fn clear(&mut self) {
        self.0 = false;
    }

    pub fn is_set(&self) -> bool {
        self.0
    }

    /// Returns the current value and clears the flag.
    pub fn take(&mut self) -> bool {
        core::mem::replace(&mut self.0, false)
    }
}

impl Default for DirtyFlag {
    /// A fresh engine starts dirty so its first emission always rebuilds.
    fn default() -> Self {
        Self(true)
    }
}
