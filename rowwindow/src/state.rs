use crate::RowRange;

/// A lightweight, serializable snapshot of the window calculator's memoized inputs/outputs.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowState {
    pub prev_viewable_range: RowRange,
    pub prev_min_rows: usize,
    pub prev_max_rows: usize,
    pub prev_rendered_range: RowRange,
    pub excess_rows: usize,
}

impl WindowState {
    /// The state of a freshly constructed calculator.
    pub fn initial(excess_rows: usize) -> Self {
        Self {
            prev_viewable_range: RowRange::new(0, 1),
            prev_min_rows: 0,
            prev_max_rows: 0,
            prev_rendered_range: RowRange::new(0, 1),
            excess_rows,
        }
    }
}
