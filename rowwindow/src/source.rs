use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::RowPosition;

/// An ordered, positionally sliceable sequence of entities.
///
/// Entities are handed to rows by clone, so they should be cheap handles (`Arc<T>`, ids, small
/// `Copy` structs). The engine never owns the underlying records.
pub trait DataSource {
    type Entity: Clone;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the entities in `start..end`.
    ///
    /// Panics if the range is out of bounds.
    fn slice(&self, start: usize, end: usize) -> &[Self::Entity];
}

impl<T: Clone> DataSource for Vec<T> {
    type Entity = T;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn slice(&self, start: usize, end: usize) -> &[T] {
        &self[start..end]
    }
}

impl<T: Clone> DataSource for Arc<[T]> {
    type Entity = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn slice(&self, start: usize, end: usize) -> &[T] {
        &self[start..end]
    }
}

impl<T: Clone> DataSource for Box<[T]> {
    type Entity = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn slice(&self, start: usize, end: usize) -> &[T] {
        &self[start..end]
    }
}

impl<T: Clone> DataSource for &[T] {
    type Entity = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn slice(&self, start: usize, end: usize) -> &[T] {
        &self[start..end]
    }
}

/// Builds the cell set of a row.
///
/// Must be deterministic for a given entity and column configuration, and must not touch engine
/// state. Any `Fn(&E, &RowPosition) -> C` closure is a cell factory.
pub trait CellFactory<E> {
    type Cells;

    fn build_cells(&self, entity: &E, position: &RowPosition) -> Self::Cells;
}

impl<E, C, F> CellFactory<E> for F
where
    F: Fn(&E, &RowPosition) -> C,
{
    type Cells = C;

    fn build_cells(&self, entity: &E, position: &RowPosition) -> C {
        self(entity, position)
    }
}

/// A cell factory that builds nothing, for hosts that draw cells straight from the entity.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCells;

impl<E> CellFactory<E> for NoCells {
    type Cells = ();

    fn build_cells(&self, _entity: &E, _position: &RowPosition) {}
}
