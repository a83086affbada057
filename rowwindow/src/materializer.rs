use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::key::{EntityKey, KeyMap};
use crate::{CellFactory, DataSource, EntityKeyFn, Paging, Row, RowCache, RowPosition, RowRange};

/// Counts from one [`RowMaterializer::materialize_range`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MaterializeStats {
    pub built: usize,
    pub reused: usize,
}

impl MaterializeStats {
    pub fn total(&self) -> usize {
        self.built + self.reused
    }
}

/// Turns a rendered range into an ordered sequence of rows, building only rows missing from its
/// index-keyed cache.
///
/// Row identity is tied to the data-source snapshot: if the entity at an index changes without
/// an [`RowMaterializer::invalidate`] (e.g. an in-place reorder), the cache keeps returning the
/// row built for the old entity. Replacing the data source and invalidating is the caller's
/// obligation.
pub struct RowMaterializer<E, F: CellFactory<E>, K = u64> {
    cell_factory: F,
    row_height: u32,
    paging: Paging,
    cache: RowCache<Arc<Row<E, F::Cells>>>,
    entity_key: Option<EntityKeyFn<E, K>>,
    back_refs: KeyMap<K, usize>,
    rows: Vec<Arc<Row<E, F::Cells>>>,
}

impl<E: Clone, F: CellFactory<E>, K: EntityKey> RowMaterializer<E, F, K> {
    pub fn new(
        cell_factory: F,
        row_height: u32,
        paging: Paging,
        entity_key: Option<EntityKeyFn<E, K>>,
    ) -> Self {
        Self {
            cell_factory,
            row_height,
            paging,
            cache: RowCache::new(),
            entity_key,
            back_refs: KeyMap::new(),
            rows: Vec::new(),
        }
    }

    /// Returns the cached row for `row_index`, building and caching it if missing.
    ///
    /// Also records `row_index` in the back-reference table under the entity's key.
    pub fn build_row(
        &mut self,
        entity: &E,
        row_index: usize,
        paging_offset: usize,
    ) -> Arc<Row<E, F::Cells>> {
        self.build_row_inner(entity, row_index, paging_offset).0
    }

    fn build_row_inner(
        &mut self,
        entity: &E,
        row_index: usize,
        paging_offset: usize,
    ) -> (Arc<Row<E, F::Cells>>, bool) {
        let factory = &self.cell_factory;
        let row_height = self.row_height;
        let (row, built) = self.cache.get_or_insert_with(row_index, || {
            let position = RowPosition::new(row_index, paging_offset, row_height);
            let cells = factory.build_cells(entity, &position);
            Arc::new(Row::new(entity.clone(), position, cells))
        });
        let row = Arc::clone(row);

        if let Some(key_fn) = &self.entity_key {
            self.back_refs.insert(key_fn(entity), row_index);
        }
        (row, built)
    }

    /// Rebuilds the visible row sequence for `range` from `source`.
    ///
    /// `range` must lie within `0..=source.len()`.
    pub fn materialize_range<S>(&mut self, source: &S, range: RowRange) -> MaterializeStats
    where
        S: DataSource<Entity = E> + ?Sized,
    {
        let len = source.len();
        if !range.is_valid() || range.top_row > len {
            vwarn!(
                bottom = range.bottom_row,
                top = range.top_row,
                len,
                "materialize_range: range out of bounds"
            );
            debug_assert!(
                range.is_valid() && range.top_row <= len,
                "materialize_range: range out of bounds (bottom={}, top={}, len={len})",
                range.bottom_row,
                range.top_row
            );
        }

        let paging_offset = self.paging.offset();
        let mut stats = MaterializeStats::default();
        let mut rows = Vec::with_capacity(range.len());
        for (i, entity) in source.slice(range.bottom_row, range.top_row).iter().enumerate() {
            let (row, built) = self.build_row_inner(entity, range.bottom_row + i, paging_offset);
            if built {
                stats.built += 1;
            } else {
                stats.reused += 1;
            }
            rows.push(row);
        }
        self.rows = rows;

        vtrace!(
            bottom = range.bottom_row,
            top = range.top_row,
            built = stats.built,
            reused = stats.reused,
            "materialize_range"
        );
        stats
    }

    /// Drops every cached row and back-reference. The current row sequence is kept until the
    /// next [`RowMaterializer::materialize_range`].
    pub fn invalidate(&mut self) {
        let evicted = self.cache.clear();
        self.back_refs.clear();
        vdebug!(evicted, "RowMaterializer::invalidate");
        let _ = evicted;
    }

    /// The most recently materialized rows, in data-source order.
    pub fn rows(&self) -> &[Arc<Row<E, F::Cells>>] {
        &self.rows
    }

    pub fn cache(&self) -> &RowCache<Arc<Row<E, F::Cells>>> {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut RowCache<Arc<Row<E, F::Cells>>> {
        &mut self.cache
    }

    pub fn cell_factory(&self) -> &F {
        &self.cell_factory
    }

    pub fn row_height(&self) -> u32 {
        self.row_height
    }

    /// Changes the row height and invalidates, since every cached `offset_top` is stale.
    pub fn set_row_height(&mut self, row_height: u32) {
        if self.row_height == row_height {
            return;
        }
        self.row_height = row_height;
        self.invalidate();
    }

    pub fn paging(&self) -> Paging {
        self.paging
    }

    /// Changes paging and invalidates, since every cached display index is stale.
    pub fn set_paging(&mut self, paging: Paging) {
        if self.paging == paging {
            return;
        }
        self.paging = paging;
        self.invalidate();
    }

    /// Last zero-based row index built for the entity, if an entity key mapping is configured.
    pub fn row_index_of(&self, entity: &E) -> Option<usize> {
        let key_fn = self.entity_key.as_ref()?;
        self.back_refs.get(&key_fn(entity)).copied()
    }

    /// The entity's key under the configured mapping.
    pub fn key_of(&self, entity: &E) -> Option<K> {
        self.entity_key.as_ref().map(|key_fn| key_fn(entity))
    }

    pub fn row_index_for_key(&self, key: &K) -> Option<usize> {
        self.back_refs.get(key).copied()
    }
}

impl<E, F: CellFactory<E>, K> core::fmt::Debug for RowMaterializer<E, F, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RowMaterializer")
            .field("row_height", &self.row_height)
            .field("paging", &self.paging)
            .field("cached_rows", &self.cache.len())
            .field("back_refs", &self.back_refs.len())
            .field("rows", &self.rows.len())
            .finish_non_exhaustive()
    }
}
