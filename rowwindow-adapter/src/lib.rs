//! Viewport provider helpers for the `rowwindow` crate.
//!
//! The `rowwindow` engine consumes row ranges; UI layers usually have pixel scroll offsets and
//! viewport heights. This crate provides small, framework-neutral helpers to bridge the two:
//!
//! - Converting scroll offset + viewport height into a viewable range and minimum row count
//! - A controller that feeds those into a `RowEngine` in one coalesced update per frame
//! - Scroll anchoring by entity key, so replacing the data source (sort, filter) does not jump
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod anchor;
mod controller;
mod viewport;

#[cfg(test)]
mod tests;

pub use anchor::ScrollAnchor;
pub use controller::ScrollController;
pub use viewport::{rows_for_height, viewable_range_for};
