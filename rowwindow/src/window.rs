use crate::{DirtyFlag, RowRange, WindowState};

/// Derives the rendered range from the viewable range.
///
/// The calculator memoizes its last-seen inputs and its last emitted range, and gates every call
/// twice:
/// 1. inputs: skip unless the viewable range, minimum viewport rows, data length or dirty flag
///    changed since the last evaluation;
/// 2. output: skip unless the padded/clamped result differs from the previous emission (or data
///    changed).
///
/// Only an emission clears the dirty flag. Downstream row materialization should run exactly
/// when [`WindowCalculator::compute_rendered_range`] returns `Some`.
#[derive(Clone, Debug)]
pub struct WindowCalculator {
    excess_rows: usize,
    prev_viewable_range: RowRange,
    prev_min_rows: usize,
    prev_max_rows: usize,
    prev_rendered_range: RowRange,
}

impl WindowCalculator {
    pub fn new(excess_rows: usize) -> Self {
        Self::from_state(WindowState::initial(excess_rows))
    }

    pub fn from_state(state: WindowState) -> Self {
        Self {
            excess_rows: state.excess_rows,
            prev_viewable_range: state.prev_viewable_range,
            prev_min_rows: state.prev_min_rows,
            prev_max_rows: state.prev_max_rows,
            prev_rendered_range: state.prev_rendered_range,
        }
    }

    pub fn state(&self) -> WindowState {
        WindowState {
            prev_viewable_range: self.prev_viewable_range,
            prev_min_rows: self.prev_min_rows,
            prev_max_rows: self.prev_max_rows,
            prev_rendered_range: self.prev_rendered_range,
            excess_rows: self.excess_rows,
        }
    }

    pub fn excess_rows(&self) -> usize {
        self.excess_rows
    }

    /// Changes the padding. Takes effect on the next evaluation that passes the input gate.
    pub fn set_excess_rows(&mut self, excess_rows: usize) {
        self.excess_rows = excess_rows;
    }

    /// The last emitted rendered range.
    pub fn prev_rendered_range(&self) -> RowRange {
        self.prev_rendered_range
    }

    /// Pads and clamps a window starting at `bottom_row` spanning `min_rows` rows.
    ///
    /// The result always satisfies `0 <= bottom_row <= top_row <= data_len`.
    pub fn padded_range(&self, bottom_row: usize, min_rows: usize, data_len: usize) -> RowRange {
        let window_top = bottom_row.saturating_add(min_rows);
        let top_row = window_top.saturating_add(self.excess_rows).min(data_len);
        let bottom_row = bottom_row.saturating_sub(self.excess_rows).min(top_row);
        RowRange {
            bottom_row,
            top_row,
        }
    }

    /// Computes the rendered range.
    ///
    /// Returns:
    /// - `Some(RowRange::EMPTY)` when `viewable` is `None` (no viewport yet); last-seen state is
    ///   left untouched.
    /// - `Some(range)` when a new rendered range must be materialized; `dirty` is cleared.
    /// - `None` when nothing materially changed.
    ///
    /// `viewable` must satisfy `bottom_row <= top_row`; it is not validated here.
    pub fn compute_rendered_range(
        &mut self,
        viewable: Option<RowRange>,
        min_viewport_rows: usize,
        data_len: usize,
        dirty: &mut DirtyFlag,
    ) -> Option<RowRange> {
        let Some(viewable) = viewable else {
            vtrace!("compute_rendered_range: no viewable range");
            return Some(RowRange::EMPTY);
        };

        // Length/min-rows changes re-derive the window from the last-seen bottom row.
        let bottom_row = if viewable != self.prev_viewable_range || dirty.is_set() {
            viewable.bottom_row
        } else if self.prev_max_rows != data_len || self.prev_min_rows != min_viewport_rows {
            self.prev_viewable_range.bottom_row
        } else {
            vtrace!(
                bottom = viewable.bottom_row,
                top = viewable.top_row,
                "compute_rendered_range: inputs unchanged"
            );
            return None;
        };

        let next = self.padded_range(bottom_row, min_viewport_rows, data_len);

        self.prev_viewable_range = viewable;
        self.prev_max_rows = data_len;
        self.prev_min_rows = min_viewport_rows;

        if next == self.prev_rendered_range && !dirty.is_set() {
            vtrace!(
                bottom = next.bottom_row,
                top = next.top_row,
                "compute_rendered_range: rendered range unchanged"
            );
            return None;
        }

        dirty.clear();
        self.prev_rendered_range = next;
        vtrace!(
            bottom = next.bottom_row,
            top = next.top_row,
            data_len,
            "compute_rendered_range: emit"
        );
        Some(next)
    }
}

impl Default for WindowCalculator {
    fn default() -> Self {
        Self::new(crate::DEFAULT_EXCESS_ROWS)
    }
}
