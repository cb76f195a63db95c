//! Fractional grid layout.
//!
//! Every node is placed into a cell range of its parent's grid and then
//! shrunk by its own padding. `LayoutGrid` adds an explicit cell table on
//! top of the same placement rule.

mod core;
pub mod grid;

pub use self::core::{cell_fraction, resolve_content_rect};
pub use grid::LayoutGrid;
