//! Explicit cell container.
//!
//! A `LayoutGrid` is an element whose behavior remembers which child sits
//! in each `(column, row)` slot. Occupants are ordinary children, so update,
//! draw and input dispatch treat them like any other node.
//!
//! ```
//! use element_tree::{Element, ElementTree, LayoutGrid, Rectangle};
//!
//! let mut tree = ElementTree::new();
//! let grid = LayoutGrid::create(&mut tree, 2, 1)?;
//! let ok = tree.create(Element::new().with_text("OK"));
//! LayoutGrid::attach(&mut tree, grid, 1, 0, ok)?;
//! tree.layout(grid, Rectangle::new(0.0, 0.0, 200.0, 50.0))?;
//! assert_eq!(LayoutGrid::cell(&tree, grid, 1, 0)?, Some(ok));
//! # Ok::<(), element_tree::UiError>(())
//! ```

use std::any::Any;

use crate::element::{Behavior, Element, ElementId, ElementTree};
use crate::error::{Result, UiError};

#[derive(Debug, Clone)]
pub struct LayoutGrid {
    columns: u32,
    rows: u32,
    cells: Vec<Option<ElementId>>,
}

impl LayoutGrid {
    pub fn new(columns: u32, rows: u32) -> Result<Self> {
        if columns == 0 || rows == 0 {
            return Err(UiError::InvalidGrid {
                width: columns,
                height: rows,
            });
        }
        Ok(Self {
            columns,
            rows,
            cells: vec![None; columns as usize * rows as usize],
        })
    }

    /// Create a standalone grid element with an empty cell table.
    pub fn create(tree: &mut ElementTree, columns: u32, rows: u32) -> Result<ElementId> {
        let grid = Self::new(columns, rows)?;
        Ok(tree.create(Element::new().with_grid(columns, rows).with_behavior(grid)))
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    fn index(&self, x: u32, y: u32) -> Result<usize> {
        if x >= self.columns || y >= self.rows {
            return Err(UiError::CellOutOfRange {
                x,
                y,
                columns: self.columns,
                rows: self.rows,
            });
        }
        Ok(y as usize * self.columns as usize + x as usize)
    }

    /// Place `child` in cell `(x, y)`.
    ///
    /// An empty cell takes `child` as a direct child of the grid covering that
    /// one cell. An occupied cell nests `child` under the current occupant,
    /// which keeps its slot.
    pub fn attach(
        tree: &mut ElementTree,
        grid: ElementId,
        x: u32,
        y: u32,
        child: ElementId,
    ) -> Result<()> {
        let occupant = Self::cell(tree, grid, x, y)?;
        if let Some(occupant) = occupant {
            return tree.attach(occupant, child);
        }

        tree.attach(grid, child)?;
        let node = tree.get_mut(child)?;
        node.pos = (x, y);
        node.span = (1, 1);

        let table = tree
            .behavior_mut::<LayoutGrid>(grid)
            .ok_or(UiError::NotALayoutGrid(grid))?;
        let index = table.index(x, y)?;
        table.cells[index] = Some(child);
        Ok(())
    }

    /// Occupant of cell `(x, y)`. A child removed from the grid since it was
    /// placed reads as empty.
    pub fn cell(tree: &ElementTree, grid: ElementId, x: u32, y: u32) -> Result<Option<ElementId>> {
        let table = tree
            .behavior::<LayoutGrid>(grid)
            .ok_or(UiError::NotALayoutGrid(grid))?;
        let occupant = table.cells[table.index(x, y)?];
        Ok(occupant.filter(|id| tree.parent(*id).ok().flatten() == Some(grid)))
    }
}

impl Behavior for LayoutGrid {
    fn class_id(&self) -> &'static str {
        "layout-grid"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
