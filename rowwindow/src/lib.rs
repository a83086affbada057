//! A headless viewport windowing and row-materialization engine for virtualized lists and grids.
//!
//! For viewport-provider helpers (pixel scroll → viewable range, anchoring across data
//! replacement), see the `rowwindow-adapter` crate.
//!
//! Given an ordered data source and the range of rows visible in a viewport, the engine derives
//! the *rendered range* (visible rows plus excess rows above and below, clamped to the data) and
//! lazily builds row objects for it through an index-keyed cache, so that only rows entering the
//! window are constructed.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - the viewable range and minimum viewport row count
//! - the data source, and a notification when it is replaced
//! - a cell factory that turns an entity into whatever cells it draws
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod cache;
mod engine;
mod key;
mod materializer;
mod options;
mod row;
mod source;
mod state;
mod types;
mod window;


pub use cache::RowCache;
pub use engine::{OnChangeCallback, RowEngine};
pub use materializer::{MaterializeStats, RowMaterializer};
pub use options::{DEFAULT_EXCESS_ROWS, EngineOptions, EntityKeyFn};
pub use row::{Row, RowPosition};
pub use source::{CellFactory, DataSource, NoCells};
pub use state::WindowState;
pub use types::{DirtyFlag, Paging, Phase, RowRange};
pub use window::WindowCalculator;

pub use key::EntityKey;
