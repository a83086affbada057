/// Where a row sits, both in the data source and on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowPosition {
    /// 1-based position (`source_index + 1`).
    pub row_index: usize,
    /// `row_index` plus the paging offset; the absolute index across pages.
    pub display_index: usize,
    /// `row_height * source_index`.
    pub offset_top: u64,
}

impl RowPosition {
    pub fn new(source_index: usize, paging_offset: usize, row_height: u32) -> Self {
        let row_index = source_index.saturating_add(1);
        Self {
            row_index,
            display_index: row_index.saturating_add(paging_offset),
            offset_top: (row_height as u64).saturating_mul(source_index as u64),
        }
    }

    /// The zero-based data-source index this position was built for.
    pub fn source_index(&self) -> usize {
        self.row_index - 1
    }

    pub fn offset_bottom(&self, row_height: u32) -> u64 {
        self.offset_top.saturating_add(row_height as u64)
    }
}

/// A materialized row: a handle to its entity, its position and the cells built for it.
///
/// Rows are immutable once built and are shared out of the cache via `Arc`, so repeated
/// requests for the same index yield the same allocation until the cache is invalidated.
#[derive(Clone, Debug)]
pub struct Row<E, C> {
    entity: E,
    position: RowPosition,
    cells: C,
}

impl<E, C> Row<E, C> {
    pub(crate) fn new(entity: E, position: RowPosition, cells: C) -> Self {
        Self {
            entity,
            position,
            cells,
        }
    }

    pub fn entity(&self) -> &E {
        &self.entity
    }

    pub fn position(&self) -> RowPosition {
        self.position
    }

    pub fn row_index(&self) -> usize {
        self.position.row_index
    }

    pub fn display_index(&self) -> usize {
        self.position.display_index
    }

    pub fn offset_top(&self) -> u64 {
        self.position.offset_top
    }

    pub fn source_index(&self) -> usize {
        self.position.source_index()
    }

    pub fn cells(&self) -> &C {
        &self.cells
    }
}
