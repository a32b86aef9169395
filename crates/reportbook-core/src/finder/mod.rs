//! Read-only cell queries over one or many sheets
//!
//! A [`Finder`] borrows a slice of sheets. It works over this crate's
//! [`Sheet`](crate::Sheet) as well as any host type implementing
//! [`SheetSource`]. Every scan visits cells in row-major order, so "first
//! match" and the order of multi-cell results are deterministic.
//!
//! Lookups report absence as `None` (or an explicit `None` entry for the
//! positional range lookups). Only a malformed letter address or an invalid
//! regex pattern produce an error.
//!
//! ## Example
//!
//! ```rust
//! use reportbook_core::Book;
//!
//! let mut book = Book::new();
//! let sheet = book.add_sheet("Data", None, None).unwrap();
//! sheet.write_cell(1, 1, "A1").unwrap();
//! sheet.write_cell(1, 2, "B1").unwrap();
//! sheet.write_cell(2, 1, "A2").unwrap();
//!
//! let finder = book.finder();
//! let data = finder.find_sheet_by_name("Data").unwrap();
//!
//! let hits = data.find_cells_by_regex("^A").unwrap();
//! let letters: Vec<_> = hits.iter().map(|c| c.letter()).collect();
//! assert_eq!(letters, vec!["A1", "A2"]);
//! ```

mod pattern;
mod source;

pub use source::{CellSource, SheetSource};

use std::borrow::Cow;
use std::collections::BTreeSet;

use regex::Regex;

use crate::cell::Coordinate;
use crate::error::Result;

/// A cell found by a cross-sheet search
#[derive(Debug)]
pub struct Found<'a, C> {
    /// Position of the sheet in the searched slice
    pub sheet_index: usize,
    pub sheet_name: &'a str,
    pub cell: &'a C,
}

// Manual impls: derives would require `C: Clone`
impl<C> Clone for Found<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Found<'_, C> {}

/// Bind a finder to a slice of sheets
pub fn create_finder<S: SheetSource>(sheets: &[S]) -> Finder<'_, S> {
    Finder::new(sheets)
}

/// Query engine over an ordered collection of sheets
#[derive(Debug)]
pub struct Finder<'a, S> {
    sheets: &'a [S],
}

impl<S> Clone for Finder<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Finder<'_, S> {}

impl<'a, S: SheetSource> Finder<'a, S> {
    pub fn new(sheets: &'a [S]) -> Self {
        Self { sheets }
    }

    /// Number of sheets in scope
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Every sheet, in order
    pub fn sheets(&self) -> impl Iterator<Item = SheetFinder<'a, S>> + 'a {
        self.sheets.iter().enumerate().map(|(i, s)| SheetFinder::new(s, i))
    }

    // === Sheet lookup ===

    /// First sheet whose name equals `name`
    pub fn find_sheet_by_name(&self, name: &str) -> Option<SheetFinder<'a, S>> {
        self.sheets().find(|s| s.name() == name)
    }

    /// Sheet at position `index`
    pub fn find_sheet_by_index(&self, index: usize) -> Option<SheetFinder<'a, S>> {
        self.sheets.get(index).map(|s| SheetFinder::new(s, index))
    }

    /// First sheet whose name matches `pattern`
    pub fn find_sheet_by_regex(&self, pattern: &str) -> Result<Option<SheetFinder<'a, S>>> {
        let re = pattern::compile(pattern)?;
        Ok(self.sheets().find(|s| re.is_match(s.name())))
    }

    /// Sheets whose name is in `names`, in sheet order
    pub fn sheets_with_names(&self, names: &[&str]) -> Vec<SheetFinder<'a, S>> {
        self.sheets()
            .filter(|s| names.contains(&s.name()))
            .collect()
    }

    /// Sheets whose name is not in `names`, in sheet order
    pub fn sheets_without_names(&self, names: &[&str]) -> Vec<SheetFinder<'a, S>> {
        self.sheets()
            .filter(|s| !names.contains(&s.name()))
            .collect()
    }

    // === Cross-sheet search ===

    /// First cell across all sheets whose value equals `text`
    pub fn find_cell_by_str(&self, text: &str) -> Option<Found<'a, S::Cell>> {
        self.sheets()
            .find_map(|s| s.find_cell_by_str(text).map(|cell| s.found(cell)))
    }

    /// Every cell across all sheets whose value equals `text`
    pub fn find_cells_by_str(&self, text: &str) -> Vec<Found<'a, S::Cell>> {
        self.sheets()
            .flat_map(|s| {
                s.find_cells_by_str(text)
                    .into_iter()
                    .map(move |cell| s.found(cell))
            })
            .collect()
    }

    /// First cell across all sheets whose value matches `pattern`
    pub fn find_cell_by_regex(&self, pattern: &str) -> Result<Option<Found<'a, S::Cell>>> {
        let re = pattern::compile(pattern)?;
        Ok(self
            .sheets()
            .find_map(|s| s.first_matching(&re).map(|cell| s.found(cell))))
    }

    /// Every cell across all sheets whose value matches `pattern`
    pub fn find_cells_by_regex(&self, pattern: &str) -> Result<Vec<Found<'a, S::Cell>>> {
        let re = pattern::compile(pattern)?;
        Ok(self
            .sheets()
            .flat_map(|s| s.all_matching(&re).into_iter().map(move |cell| s.found(cell)))
            .collect())
    }
}

/// Queries against a single sheet
#[derive(Debug)]
pub struct SheetFinder<'a, S> {
    sheet: &'a S,
    index: usize,
}

impl<S> Clone for SheetFinder<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for SheetFinder<'_, S> {}

type Cells<'a, C> = Box<dyn Iterator<Item = &'a C> + 'a>;

impl<'a, S: SheetSource> SheetFinder<'a, S> {
    /// Wrap a sheet; `index` is its position in the surrounding collection
    pub fn new(sheet: &'a S, index: usize) -> Self {
        Self { sheet, index }
    }

    /// The underlying sheet
    pub fn sheet(&self) -> &'a S {
        self.sheet
    }

    pub fn name(&self) -> &'a str {
        self.sheet.name()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    fn found(&self, cell: &'a S::Cell) -> Found<'a, S::Cell> {
        Found {
            sheet_index: self.index,
            sheet_name: self.name(),
            cell,
        }
    }

    // === Traversal ===

    /// All cells, row-major
    fn scan(&self) -> Cells<'a, S::Cell> {
        let sheet = self.sheet;
        if sheet.is_indexed() {
            Box::new(sheet.cells())
        } else {
            Box::new(row_major(sheet.cells()))
        }
    }

    /// Cells inside a closed bounding box, row-major
    fn scan_range(&self, min_row: u32, max_row: u32, min_col: u16, max_col: u16) -> Cells<'a, S::Cell> {
        let sheet = self.sheet;
        let cells = sheet.cells_in(min_row, max_row, min_col, max_col);
        if sheet.is_indexed() {
            Box::new(cells)
        } else {
            Box::new(row_major(cells))
        }
    }

    /// Cells in the given rows, row-major
    fn scan_rows(&self, rows: &[u32]) -> Cells<'a, S::Cell> {
        let rows: BTreeSet<u32> = rows.iter().copied().collect();
        let sheet = self.sheet;
        if sheet.is_indexed() {
            Box::new(
                rows.into_iter()
                    .flat_map(move |row| sheet.cells_in(row, row, 1, u16::MAX)),
            )
        } else {
            Box::new(row_major(
                sheet.cells().filter(move |c| rows.contains(&c.row())),
            ))
        }
    }

    /// Cells in the given columns, row-major
    fn scan_cols(&self, cols: &[u16]) -> Cells<'a, S::Cell> {
        let cols: BTreeSet<u16> = cols.iter().copied().collect();
        let (Some(&first), Some(&last)) = (cols.first(), cols.last()) else {
            return Box::new(std::iter::empty());
        };
        Box::new(
            self.scan_range(1, u32::MAX, first, last)
                .filter(move |c| cols.contains(&c.column())),
        )
    }

    fn first_matching(&self, re: &Regex) -> Option<&'a S::Cell> {
        self.scan().find(|c| re.is_match(&c.search_text()))
    }

    fn all_matching(&self, re: &Regex) -> Vec<&'a S::Cell> {
        matching(self.scan(), re)
    }

    // === Coordinate lookup ===

    /// Cell at (row, col)
    pub fn find_cell_by_coords(&self, row: u32, col: u16) -> Option<&'a S::Cell> {
        self.sheet.cell_at(row, col)
    }

    /// Value at (row, col); `None` when there is no cell or no value
    pub fn find_value_by_coords(&self, row: u32, col: u16) -> Option<Cow<'a, str>> {
        self.find_cell_by_coords(row, col).and_then(CellSource::value)
    }

    /// Cell at an A1-style address; fails only if the address is malformed
    pub fn find_cell_by_letter(&self, letter: &str) -> Result<Option<&'a S::Cell>> {
        let coord = Coordinate::parse(letter)?;
        Ok(self.find_cell_by_coords(coord.row, coord.col))
    }

    // === Value search ===

    /// First cell whose value equals `text`
    pub fn find_cell_by_str(&self, text: &str) -> Option<&'a S::Cell> {
        self.scan().find(|c| c.search_text() == text)
    }

    /// Every cell whose value equals `text`
    pub fn find_cells_by_str(&self, text: &str) -> Vec<&'a S::Cell> {
        self.scan().filter(|c| c.search_text() == text).collect()
    }

    /// First cell whose value matches `pattern`
    pub fn find_cell_by_regex(&self, pattern: &str) -> Result<Option<&'a S::Cell>> {
        let re = pattern::compile(pattern)?;
        Ok(self.first_matching(&re))
    }

    /// Every cell whose value matches `pattern`
    pub fn find_cells_by_regex(&self, pattern: &str) -> Result<Vec<&'a S::Cell>> {
        let re = pattern::compile(pattern)?;
        Ok(self.all_matching(&re))
    }

    /// Cells in `rows` whose value matches `pattern`
    pub fn find_cells_for_rows_by_regex(&self, pattern: &str, rows: &[u32]) -> Result<Vec<&'a S::Cell>> {
        let re = pattern::compile(pattern)?;
        Ok(matching(self.scan_rows(rows), &re))
    }

    /// Cells in `cols` whose value matches `pattern`
    pub fn find_cells_for_cols_by_regex(&self, pattern: &str, cols: &[u16]) -> Result<Vec<&'a S::Cell>> {
        let re = pattern::compile(pattern)?;
        Ok(matching(self.scan_cols(cols), &re))
    }

    /// Cells whose value matches every pattern
    ///
    /// An empty pattern list matches nothing.
    pub fn find_cells_multi_regex<P: AsRef<str>>(&self, patterns: &[P]) -> Result<Vec<&'a S::Cell>> {
        let regexes = pattern::compile_all(patterns)?;
        if regexes.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .scan()
            .filter(|c| {
                let text = c.search_text();
                regexes.iter().all(|re| re.is_match(&text))
            })
            .collect())
    }

    /// Cells from the first `start` match through the next `end` match, inclusive
    ///
    /// The end match must come strictly after the start cell; a cell matching
    /// both patterns only opens the span. Without an end match the span runs
    /// to the last cell. Without a start match the result is empty.
    pub fn find_cells_between_regex(&self, start: &str, end: &str) -> Result<Vec<&'a S::Cell>> {
        let start = pattern::compile(start)?;
        let end = pattern::compile(end)?;

        let mut cells = self
            .scan()
            .skip_while(|c| !start.is_match(&c.search_text()));

        let mut span = Vec::new();
        if let Some(first) = cells.next() {
            span.push(first);
            for cell in cells {
                span.push(cell);
                if end.is_match(&cell.search_text()) {
                    break;
                }
            }
        }
        Ok(span)
    }

    // === Positional range lookup ===

    /// Cells in the rows `start_row..=end_row`, row-major
    pub fn find_cells_in_rows(&self, start_row: u32, end_row: u32) -> Vec<&'a S::Cell> {
        self.scan_range(start_row, end_row, 1, u16::MAX).collect()
    }

    /// Cells in the columns `start_col..=end_col`, row-major
    pub fn find_cells_in_cols(&self, start_col: u16, end_col: u16) -> Vec<&'a S::Cell> {
        self.scan_range(1, u32::MAX, start_col, end_col).collect()
    }

    /// Cell at each requested row of column `col`, in input order
    ///
    /// Missing cells stay in the result as `None`, so the length always
    /// equals `rows.len()`.
    pub fn find_cells_range_rows(&self, col: u16, rows: &[u32]) -> Vec<Option<&'a S::Cell>> {
        rows.iter()
            .map(|&row| self.find_cell_by_coords(row, col))
            .collect()
    }

    /// Value at each requested row of column `col`, in input order
    pub fn find_values_by_col_rows(&self, col: u16, rows: &[u32]) -> Vec<Option<Cow<'a, str>>> {
        rows.iter()
            .map(|&row| self.find_value_by_coords(row, col))
            .collect()
    }

    /// Cell at each requested column of row `row`, in input order
    pub fn find_cells_range_cols(&self, row: u32, cols: &[u16]) -> Vec<Option<&'a S::Cell>> {
        cols.iter()
            .map(|&col| self.find_cell_by_coords(row, col))
            .collect()
    }

    /// Value at each requested column of row `row`, in input order
    pub fn find_values_by_row_cols(&self, row: u32, cols: &[u16]) -> Vec<Option<Cow<'a, str>>> {
        cols.iter()
            .map(|&col| self.find_value_by_coords(row, col))
            .collect()
    }
}

fn matching<'a, C: CellSource + 'a>(cells: Cells<'a, C>, re: &Regex) -> Vec<&'a C> {
    cells.filter(|c| re.is_match(&c.search_text())).collect()
}

/// Sort cells of an unordered source by (row, column)
fn row_major<'a, C: CellSource + 'a>(cells: impl Iterator<Item = &'a C>) -> std::vec::IntoIter<&'a C> {
    let mut cells: Vec<&'a C> = cells.collect();
    cells.sort_by_key(|c| (c.row(), c.column()));
    cells.into_iter()
}
