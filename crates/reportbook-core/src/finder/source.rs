//! Read-only capabilities the finder needs from sheets and cells
//!
//! [`Sheet`] and [`Cell`] implement these with indexed lookups. Host types
//! only have to expose a name and their cells; the default methods fall back
//! to linear scans.

use std::borrow::Cow;

use crate::cell::Cell;
use crate::sheet::Sheet;

/// A cell-like value: coordinate plus the string form of its value
pub trait CellSource {
    /// Row (1-based)
    fn row(&self) -> u32;

    /// Column (1-based)
    fn column(&self) -> u16;

    /// Value as text, `None` when the cell holds no value
    fn value(&self) -> Option<Cow<'_, str>>;

    /// The string searches match against; empty when there is no value
    fn search_text(&self) -> Cow<'_, str> {
        self.value().unwrap_or(Cow::Borrowed(""))
    }
}

/// A sheet-like value: a name and a collection of cells
pub trait SheetSource {
    type Cell: CellSource;

    /// Sheet name
    fn name(&self) -> &str;

    /// All cells, in any order unless [`SheetSource::is_indexed`] holds
    fn cells(&self) -> impl Iterator<Item = &Self::Cell> + '_;

    /// Whether `cells` yields row-major order and `cell_at` / `cells_in`
    /// are indexed lookups rather than scans
    fn is_indexed(&self) -> bool {
        false
    }

    /// Cell at (row, col)
    fn cell_at(&self, row: u32, col: u16) -> Option<&Self::Cell> {
        self.cells()
            .find(|cell| cell.row() == row && cell.column() == col)
    }

    /// Cells inside a closed bounding box (order as for `cells`)
    fn cells_in(
        &self,
        min_row: u32,
        max_row: u32,
        min_col: u16,
        max_col: u16,
    ) -> impl Iterator<Item = &Self::Cell> + '_ {
        self.cells().filter(move |cell| {
            (min_row..=max_row).contains(&cell.row()) && (min_col..=max_col).contains(&cell.column())
        })
    }
}

impl CellSource for Cell {
    fn row(&self) -> u32 {
        Cell::row(self)
    }

    fn column(&self) -> u16 {
        Cell::column(self)
    }

    fn value(&self) -> Option<Cow<'_, str>> {
        Cell::value(self).as_str().map(Cow::Borrowed)
    }
}

impl SheetSource for Sheet {
    type Cell = Cell;

    fn name(&self) -> &str {
        Sheet::name(self)
    }

    fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        Sheet::cells(self)
    }

    fn is_indexed(&self) -> bool {
        true
    }

    fn cell_at(&self, row: u32, col: u16) -> Option<&Cell> {
        self.find_cell_by_coords(row, col)
    }

    fn cells_in(
        &self,
        min_row: u32,
        max_row: u32,
        min_col: u16,
        max_col: u16,
    ) -> impl Iterator<Item = &Cell> + '_ {
        self.cell_store()
            .iter_range(min_row, max_row, min_col, max_col)
    }
}
