use core::fmt;

/// A scroll anchor that preserves visual position across data-source replacement.
///
/// Typical use cases:
/// - re-sorting or re-filtering a grid while keeping the top row in place
/// - prepending rows above the viewport without content jumping
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnchor<K> {
    pub key: K,
    /// The distance from the anchor row's top to the scroll offset.
    pub offset_in_row: u64,
}

impl<K: fmt::Debug> fmt::Debug for ScrollAnchor<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollAnchor")
            .field("key", &self.key)
            .field("offset_in_row", &self.offset_in_row)
            .finish()
    }
}

impl<K> ScrollAnchor<K> {
    /// The scroll offset that puts the anchor row back where it was, given its new index.
    pub fn resolve(&self, index: usize, row_height: u32) -> u64 {
        (row_height as u64)
            .saturating_mul(index as u64)
            .saturating_add(self.offset_in_row)
    }
}
