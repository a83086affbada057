use rowwindow::{CellFactory, DataSource, EntityKey, RowEngine};

use crate::{ScrollAnchor, rows_for_height, viewable_range_for};

/// A framework-neutral controller that wraps a `rowwindow::RowEngine` and drives it from pixel
/// geometry.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_viewport_height` when the viewport resizes
/// - `on_scroll` when the UI reports a new scroll offset
/// - `on_frame` when both arrive together
///
/// Every call results in at most one recompute/rebuild of the engine.
pub struct ScrollController<S, F, K = u64>
where
    S: DataSource,
    F: CellFactory<S::Entity>,
{
    engine: RowEngine<S, F, K>,
    viewport_height: u32,
    scroll_offset: u64,
}

impl<S, F, K> ScrollController<S, F, K>
where
    S: DataSource,
    F: CellFactory<S::Entity>,
    K: EntityKey,
{
    pub fn new(engine: RowEngine<S, F, K>) -> Self {
        Self {
            engine,
            viewport_height: 0,
            scroll_offset: 0,
        }
    }

    pub fn engine(&self) -> &RowEngine<S, F, K> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut RowEngine<S, F, K> {
        &mut self.engine
    }

    pub fn into_engine(self) -> RowEngine<S, F, K> {
        self.engine
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    /// Height of all rows in the current data source.
    pub fn total_height(&self) -> u64 {
        (self.engine.row_height() as u64).saturating_mul(self.engine.data_source().len() as u64)
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.total_height()
            .saturating_sub(self.viewport_height as u64)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    /// Call this when the viewport is resized. Returns `true` if rows were rebuilt.
    pub fn on_viewport_height(&mut self, viewport_height: u32) -> bool {
        self.on_frame(viewport_height, self.scroll_offset)
    }

    /// Call this when the UI reports a scroll offset change. Returns `true` if rows were rebuilt.
    pub fn on_scroll(&mut self, scroll_offset: u64) -> bool {
        self.on_frame(self.viewport_height, scroll_offset)
    }

    /// Applies viewport height and scroll offset in a single coalesced update.
    pub fn on_frame(&mut self, viewport_height: u32, scroll_offset: u64) -> bool {
        self.viewport_height = viewport_height;
        self.scroll_offset = scroll_offset;
        let row_height = self.engine.row_height();
        let min_rows = rows_for_height(viewport_height, row_height);
        let viewable = viewable_range_for(scroll_offset, viewport_height, row_height);
        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "rowwindow_adapter",
            viewport_height,
            scroll_offset,
            min_rows,
            bottom = viewable.bottom_row,
            top = viewable.top_row,
            "ScrollController::on_frame"
        );
        self.engine.batch_update(|e| {
            e.set_min_viewport_rows(min_rows);
            e.set_viewable_range(Some(viewable));
        })
    }

    /// Scrolls so `index` is the first visible row (clamped). Returns the applied offset.
    pub fn scroll_to_row(&mut self, index: usize) -> u64 {
        let offset = (self.engine.row_height() as u64).saturating_mul(index as u64);
        let offset = self.clamp_scroll_offset(offset);
        self.on_scroll(offset);
        offset
    }

    /// Replaces the data source and scrolls back to the first visible row's entity.
    ///
    /// The engine needs an entity key mapping; `key_to_index` maps a key to its index in the new
    /// data source. Returns `true` when the anchor was found and applied.
    pub fn replace_data_source_anchored(
        &mut self,
        source: S,
        key_to_index: impl FnMut(&K) -> Option<usize>,
    ) -> bool {
        let anchor = self.capture_first_visible_anchor();
        self.engine.replace_data_source(source);
        match anchor {
            Some(anchor) => self.apply_anchor(&anchor, key_to_index),
            None => false,
        }
    }

    /// Captures an anchor for the first visible row (by entity key).
    ///
    /// Returns `None` without an entity key mapping or when the first visible row is out of
    /// bounds.
    pub fn capture_first_visible_anchor(&self) -> Option<ScrollAnchor<K>> {
        let row_height = self.engine.row_height();
        if row_height == 0 {
            return None;
        }
        let index = (self.scroll_offset / row_height as u64) as usize;
        let entity = self.engine.entity_at(index)?;
        let key = self.engine.key_of(entity)?;
        Some(ScrollAnchor {
            key,
            offset_in_row: self.scroll_offset % row_height as u64,
        })
    }

    /// Applies a previously captured anchor by adjusting the scroll offset.
    ///
    /// The adapter must provide a `key_to_index` mapping for the *current* data source.
    pub fn apply_anchor(
        &mut self,
        anchor: &ScrollAnchor<K>,
        mut key_to_index: impl FnMut(&K) -> Option<usize>,
    ) -> bool {
        let Some(index) = key_to_index(&anchor.key) else {
            return false;
        };
        let target = anchor.resolve(index, self.engine.row_height());
        let target = self.clamp_scroll_offset(target);
        self.on_scroll(target);
        true
    }
}

impl<S, F, K> core::fmt::Debug for ScrollController<S, F, K>
where
    S: DataSource,
    F: CellFactory<S::Entity>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollController")
            .field("engine", &self.engine)
            .field("viewport_height", &self.viewport_height)
            .field("scroll_offset", &self.scroll_offset)
            .finish()
    }
}
