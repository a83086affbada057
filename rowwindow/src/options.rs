use alloc::sync::Arc;

use crate::Paging;

/// Rows added above and below the viewable range unless configured otherwise.
pub const DEFAULT_EXCESS_ROWS: usize = 8;

/// Maps an entity to a stable identity, used for the entity → row index back-reference table.
pub type EntityKeyFn<E, K> = Arc<dyn Fn(&E) -> K + Send + Sync>;

/// Configuration for [`crate::RowEngine`].
///
/// Cheap to clone: the key mapping is stored in an `Arc`.
pub struct EngineOptions<E, K = u64> {
    /// Padding rows on each side of the viewable range.
    pub excess_rows: usize,
    /// Height of every row, in the host's units. Used for `offset_top`.
    pub row_height: u32,
    pub paging: Paging,
    /// Optional entity identity. When unset, no back-references are recorded.
    pub entity_key: Option<EntityKeyFn<E, K>>,
}

impl<E, K> Clone for EngineOptions<E, K> {
    fn clone(&self) -> Self {
        Self {
            excess_rows: self.excess_rows,
            row_height: self.row_height,
            paging: self.paging,
            entity_key: self.entity_key.clone(),
        }
    }
}

impl<E> EngineOptions<E, u64> {
    /// Creates options without an entity key mapping.
    pub fn new(row_height: u32) -> Self {
        Self {
            excess_rows: DEFAULT_EXCESS_ROWS,
            row_height,
            paging: Paging::default(),
            entity_key: None,
        }
    }
}

impl<E, K> EngineOptions<E, K> {
    /// Creates options with an entity key mapping.
    ///
    /// `entity_key(e)` should return a stable identity for `e` (a primary key, an id field);
    /// the engine records the last row index built for each key.
    pub fn new_with_key(
        row_height: u32,
        entity_key: impl Fn(&E) -> K + Send + Sync + 'static,
    ) -> Self {
        Self {
            excess_rows: DEFAULT_EXCESS_ROWS,
            row_height,
            paging: Paging::default(),
            entity_key: Some(Arc::new(entity_key)),
        }
    }

    pub fn with_excess_rows(mut self, excess_rows: usize) -> Self {
        self.excess_rows = excess_rows;
        self
    }

    pub fn with_row_height(mut self, row_height: u32) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn with_paging(mut self, paging: Paging) -> Self {
        self.paging = paging;
        self
    }

    pub fn with_page(mut self, page_size: usize, current_page: usize) -> Self {
        self.paging = Paging::new(page_size, current_page);
        self
    }

    pub fn with_entity_key<K2>(
        self,
        entity_key: impl Fn(&E) -> K2 + Send + Sync + 'static,
    ) -> EngineOptions<E, K2> {
        EngineOptions {
            excess_rows: self.excess_rows,
            row_height: self.row_height,
            paging: self.paging,
            entity_key: Some(Arc::new(entity_key)),
        }
    }
}

impl<E, K> core::fmt::Debug for EngineOptions<E, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EngineOptions")
            .field("excess_rows", &self.excess_rows)
            .field("row_height", &self.row_height)
            .field("paging", &self.paging)
            .field("has_entity_key", &self.entity_key.is_some())
            .finish_non_exhaustive()
    }
}
