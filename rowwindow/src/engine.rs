use alloc::sync::Arc;

use crate::key::EntityKey;
use crate::{
    CellFactory, DataSource, DirtyFlag, EngineOptions, Paging, Phase, Row, RowMaterializer,
    RowRange, WindowCalculator, WindowState,
};

/// A callback fired after each recompute that rebuilt the row sequence.
///
/// It runs while the engine is in [`Phase::Recomputing`].
pub type OnChangeCallback<S, F, K> = Arc<dyn Fn(&RowEngine<S, F, K>) + Send + Sync>;

type RowOf<S, F> =
    Row<<S as DataSource>::Entity, <F as CellFactory<<S as DataSource>::Entity>>::Cells>;

/// A headless windowing and row-materialization engine.
///
/// The host owns change detection and calls the entry points below whenever an input changes:
/// - `set_viewable_range` / `set_min_viewport_rows` when the viewport scrolls or resizes
/// - `replace_data_source` when the sorted/filtered sequence is swapped for a new one
/// - `refresh` after growing the current data source in place
///
/// Each entry point runs a full recompute-and-rebuild cycle synchronously and returns `true` when
/// the row sequence was rebuilt. Use [`RowEngine::batch_update`] to coalesce several changes
/// into one cycle.
pub struct RowEngine<S, F, K = u64>
where
    S: DataSource,
    F: CellFactory<S::Entity>,
{
    source: S,
    viewable_range: Option<RowRange>,
    min_viewport_rows: usize,
    rendered_range: RowRange,
    dirty: DirtyFlag,
    window: WindowCalculator,
    materializer: RowMaterializer<S::Entity, F, K>,
    phase: Phase,
    on_change: Option<OnChangeCallback<S, F, K>>,
    batch_depth: usize,
    recompute_pending: bool,
}

impl<S, F, K> RowEngine<S, F, K>
where
    S: DataSource,
    F: CellFactory<S::Entity>,
    K: EntityKey,
{
    /// Creates an engine over `source`. No rows are rendered until a viewable range is set.
    pub fn new(source: S, cell_factory: F, options: EngineOptions<S::Entity, K>) -> Self {
        vdebug!(
            len = source.len(),
            excess_rows = options.excess_rows,
            row_height = options.row_height,
            page_size = options.paging.page_size,
            current_page = options.paging.current_page,
            "RowEngine::new"
        );
        let mut engine = Self {
            source,
            viewable_range: None,
            min_viewport_rows: 0,
            rendered_range: RowRange::EMPTY,
            dirty: DirtyFlag::default(),
            window: WindowCalculator::new(options.excess_rows),
            materializer: RowMaterializer::new(
                cell_factory,
                options.row_height,
                options.paging,
                options.entity_key,
            ),
            phase: Phase::Uninitialized,
            on_change: None,
            batch_depth: 0,
            recompute_pending: false,
        };
        engine.recompute();
        engine
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&RowEngine<S, F, K>) + Send + Sync + 'static>,
    ) {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    /// Batches multiple input changes into a single recompute.
    ///
    /// Entry points called inside `f` only record their input; the recompute runs once when the
    /// outermost batch ends.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) -> bool {
        self.batch_depth = self.batch_depth.saturating_add(1);
        f(self);
        debug_assert!(self.batch_depth > 0, "batch_depth underflow");
        self.batch_depth = self.batch_depth.saturating_sub(1);

        if self.batch_depth == 0 && core::mem::replace(&mut self.recompute_pending, false) {
            self.recompute_now()
        } else {
            false
        }
    }

    /// Re-evaluates the rendered range with the current inputs.
    ///
    /// Call this after mutating the data source in place (e.g. appending rows); the new length is
    /// picked up without invalidating cached rows.
    pub fn refresh(&mut self) -> bool {
        self.recompute()
    }

    fn recompute(&mut self) -> bool {
        if self.batch_depth > 0 {
            self.recompute_pending = true;
            return false;
        }
        self.recompute_now()
    }

    fn recompute_now(&mut self) -> bool {
        vtrace!(
            has_viewport = self.viewable_range.is_some(),
            min_viewport_rows = self.min_viewport_rows,
            len = self.source.len(),
            dirty = self.dirty.is_set(),
            "RowEngine::recompute"
        );
        let Some(next) = self.window.compute_rendered_range(
            self.viewable_range,
            self.min_viewport_rows,
            self.source.len(),
            &mut self.dirty,
        ) else {
            return false;
        };

        if self.viewable_range.is_none() && next == self.rendered_range && self.rows().is_empty()
        {
            return false;
        }

        self.phase = Phase::Recomputing;
        self.rendered_range = next;
        let stats = self.materializer.materialize_range(&self.source, next);
        vtrace!(
            bottom = next.bottom_row,
            top = next.top_row,
            built = stats.built,
            reused = stats.reused,
            "RowEngine::rebuild"
        );
        let _ = stats;

        if let Some(cb) = &self.on_change {
            cb(self);
        }

        self.phase = if self.viewable_range.is_some() {
            Phase::Idle
        } else {
            Phase::Uninitialized
        };
        true
    }

    /// Sets the range of rows visible in the viewport. `None` means no viewport yet.
    pub fn set_viewable_range(&mut self, range: Option<RowRange>) -> bool {
        if let Some(r) = range {
            if !r.is_valid() {
                vwarn!(
                    bottom = r.bottom_row,
                    top = r.top_row,
                    "set_viewable_range: top_row below bottom_row"
                );
                debug_assert!(
                    r.is_valid(),
                    "set_viewable_range: top_row below bottom_row (bottom={}, top={})",
                    r.bottom_row,
                    r.top_row
                );
            }
        }
        // Coming back from "no viewport" must rebuild even if the range matches the last one.
        if self.viewable_range.is_none() && range.is_some() {
            self.dirty.set();
        }
        self.viewable_range = range;
        self.recompute()
    }

    pub fn set_min_viewport_rows(&mut self, min_viewport_rows: usize) -> bool {
        self.min_viewport_rows = min_viewport_rows;
        self.recompute()
    }

    /// Replaces the data source: marks data as changed, drops every cached row, and recomputes.
    ///
    /// Returns the previous data source.
    pub fn replace_data_source(&mut self, source: S) -> S {
        vdebug!(
            old_len = self.source.len(),
            new_len = source.len(),
            "RowEngine::replace_data_source"
        );
        let old = core::mem::replace(&mut self.source, source);
        self.dirty.set();
        self.materializer.invalidate();
        self.recompute();
        old
    }

    /// Changes paging. Display indexes of cached rows become stale, so this invalidates.
    pub fn set_paging(&mut self, paging: Paging) -> bool {
        if self.materializer.paging() == paging {
            return false;
        }
        vdebug!(
            page_size = paging.page_size,
            current_page = paging.current_page,
            "RowEngine::set_paging"
        );
        self.materializer.set_paging(paging);
        self.dirty.set();
        self.recompute()
    }

    /// Changes the row height. Cached pixel offsets become stale, so this invalidates.
    pub fn set_row_height(&mut self, row_height: u32) -> bool {
        if self.materializer.row_height() == row_height {
            return false;
        }
        vdebug!(row_height, "RowEngine::set_row_height");
        self.materializer.set_row_height(row_height);
        self.dirty.set();
        self.recompute()
    }

    /// Changes the excess row padding. Cached rows stay valid.
    pub fn set_excess_rows(&mut self, excess_rows: usize) -> bool {
        if self.window.excess_rows() == excess_rows {
            return false;
        }
        self.window.set_excess_rows(excess_rows);
        self.dirty.set();
        self.recompute()
    }

    pub fn data_changed(&self) -> bool {
        self.dirty.is_set()
    }

    /// Overrides the dirty flag. Setting it forces the next evaluation to emit and rebuild.
    pub fn set_data_changed(&mut self, changed: bool) {
        if changed {
            self.dirty.set();
        } else {
            self.dirty.clear();
        }
    }

    /// Drops cached rows without touching the dirty flag.
    pub fn clear_row_cache(&mut self) {
        self.materializer.invalidate();
    }

    pub fn data_source(&self) -> &S {
        &self.source
    }

    /// Mutable access for in-place edits.
    ///
    /// Cached rows are not invalidated: only appends (followed by [`RowEngine::refresh`]) are
    /// safe. Reorders or removals need [`RowEngine::replace_data_source`].
    pub fn data_source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn rows(&self) -> &[Arc<RowOf<S, F>>] {
        self.materializer.rows()
    }

    pub fn rendered_range(&self) -> RowRange {
        self.rendered_range
    }

    pub fn viewable_range(&self) -> Option<RowRange> {
        self.viewable_range
    }

    pub fn min_viewport_rows(&self) -> usize {
        self.min_viewport_rows
    }

    pub fn excess_rows(&self) -> usize {
        self.window.excess_rows()
    }

    pub fn paging(&self) -> Paging {
        self.materializer.paging()
    }

    pub fn row_height(&self) -> u32 {
        self.materializer.row_height()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Snapshot of the window calculator's memoized state.
    pub fn state(&self) -> WindowState {
        self.window.state()
    }

    /// Last zero-based row index built for `entity`. Requires an entity key mapping.
    pub fn row_index_of(&self, entity: &S::Entity) -> Option<usize> {
        self.materializer.row_index_of(entity)
    }

    pub fn row_index_for_key(&self, key: &K) -> Option<usize> {
        self.materializer.row_index_for_key(key)
    }

    pub fn key_of(&self, entity: &S::Entity) -> Option<K> {
        self.materializer.key_of(entity)
    }

    /// The entity at zero-based `index`, if in bounds.
    pub fn entity_at(&self, index: usize) -> Option<&S::Entity> {
        if index >= self.source.len() {
            return None;
        }
        self.source.slice(index, index + 1).first()
    }

    pub fn cached_row_count(&self) -> usize {
        self.materializer.cache().len()
    }

    pub fn materializer(&self) -> &RowMaterializer<S::Entity, F, K> {
        &self.materializer
    }

    /// Evicts cached rows farther than `margin` rows outside the rendered range.
    pub fn trim_row_cache(&mut self, margin: usize) -> usize {
        let range = self.rendered_range;
        self.materializer.cache_mut().retain_near(range, margin)
    }
}

impl<S, F, K> core::fmt::Debug for RowEngine<S, F, K>
where
    S: DataSource,
    F: CellFactory<S::Entity>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RowEngine")
            .field("len", &self.source.len())
            .field("viewable_range", &self.viewable_range)
            .field("min_viewport_rows", &self.min_viewport_rows)
            .field("rendered_range", &self.rendered_range)
            .field("dirty", &self.dirty)
            .field("window", &self.window)
            .field("materializer", &self.materializer)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
