use rowwindow::RowRange;

/// Rows needed to fill `viewport_height`, counting a partially visible last row.
///
/// Returns `0` when `row_height` is `0`.
pub fn rows_for_height(viewport_height: u32, row_height: u32) -> usize {
    if row_height == 0 {
        return 0;
    }
    viewport_height.div_ceil(row_height) as usize
}

/// The rows intersecting `[scroll_offset, scroll_offset + viewport_height)`.
///
/// Not clamped to any data length; the window calculator clamps.
pub fn viewable_range_for(scroll_offset: u64, viewport_height: u32, row_height: u32) -> RowRange {
    if row_height == 0 {
        return RowRange::EMPTY;
    }
    let rh = row_height as u64;
    let bottom = scroll_offset / rh;
    let top = scroll_offset
        .saturating_add(viewport_height as u64)
        .div_ceil(rh);
    RowRange::new(bottom as usize, (top as usize).max(bottom as usize))
}
