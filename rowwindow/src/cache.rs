use crate::RowRange;
use crate::key::KeyMap;

/// Index-keyed row cache.
///
/// Unbounded: entries live until [`RowCache::clear`] (wholesale invalidation) or an explicit
/// [`RowCache::retain_near`]. An entry for index `i` is only meaningful for the data-source
/// snapshot that produced it.
#[derive(Clone, Debug)]
pub struct RowCache<R> {
    rows: KeyMap<usize, R>,
}

impl<R> RowCache<R> {
    pub fn new() -> Self {
        Self {
            rows: KeyMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&R> {
        self.rows.get(&index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.rows.contains_key(&index)
    }

    pub fn insert(&mut self, index: usize, row: R) -> Option<R> {
        self.rows.insert(index, row)
    }

    /// Returns the cached row at `index`, building and storing it first if missing.
    ///
    /// The second value is `true` when the row was built by this call.
    pub fn get_or_insert_with(&mut self, index: usize, build: impl FnOnce() -> R) -> (&R, bool) {
        let mut built = false;
        let row = self.rows.entry(index).or_insert_with(|| {
            built = true;
            build()
        });
        (row, built)
    }

    /// Drops every entry and returns how many were evicted.
    pub fn clear(&mut self) -> usize {
        let n = self.rows.len();
        self.rows.clear();
        n
    }

    /// Evicts rows farther than `margin` rows outside `range`. Returns how many were evicted.
    ///
    /// Never called by the engine itself; hosts with very large pages can use it to bound memory.
    pub fn retain_near(&mut self, range: RowRange, margin: usize) -> usize {
        let lo = range.bottom_row.saturating_sub(margin);
        let hi = range.top_row.saturating_add(margin);
        let before = self.rows.len();
        self.rows.retain(|&i, _| lo <= i && i < hi);
        before - self.rows.len()
    }
}

impl<R> Default for RowCache<R> {
    fn default() -> Self {
        Self::new()
    }
}
