//! Sheet type

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cell::{Cell, CellStore, CellValue, Coordinate};
use crate::comment::{Comment, CommentStore};
use crate::dimension::Dimensions;
use crate::error::Result;
use crate::merge::{MergeRegion, MergeRegionIndex};
use crate::record::CellRecord;
use crate::{DEFAULT_MAX_COL, DEFAULT_MAX_ROW};

/// Visibility of a sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SheetState {
    /// Sheet is visible
    #[default]
    Visible,
    /// Sheet is hidden but can be unhidden by the user
    Hidden,
    /// Sheet is hidden and can only be unhidden programmatically
    VeryHidden,
}

/// Per-sheet configuration
///
/// Capacity is advisory: it bounds bulk generation and the default range of
/// [`Sheet::iter_cells`], and grows when a write lands outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetOptions {
    /// Declared number of rows
    pub max_row: u32,
    /// Declared number of columns
    pub max_col: u16,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            max_row: DEFAULT_MAX_ROW,
            max_col: DEFAULT_MAX_COL,
        }
    }
}

impl SheetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the declared number of rows
    pub fn with_max_row(mut self, max_row: u32) -> Self {
        self.max_row = max_row;
        self
    }

    /// Set the declared number of columns
    pub fn with_max_col(mut self, max_col: u16) -> Self {
        self.max_col = max_col;
        self
    }
}

/// A sheet (single named grid in a book)
#[derive(Debug, Clone)]
pub struct Sheet {
    /// Stable identity
    id: Uuid,
    /// Sheet name, unique within the owning book
    name: String,
    /// Position in the owning book
    index: usize,
    /// Declared capacity
    max_row: u32,
    max_col: u16,
    state: SheetState,
    cells: CellStore,
    merges: MergeRegionIndex,
    dimensions: Dimensions,
    comments: CommentStore,
}

impl Sheet {
    pub(crate) fn new<S: Into<String>>(name: S, index: usize, options: SheetOptions) -> Self {
        Self::with_id(Uuid::new_v4(), name, index, options)
    }

    pub(crate) fn with_id<S: Into<String>>(
        id: Uuid,
        name: S,
        index: usize,
        options: SheetOptions,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            index,
            max_row: options.max_row,
            max_col: options.max_col,
            state: SheetState::default(),
            cells: CellStore::new(),
            merges: MergeRegionIndex::new(),
            dimensions: Dimensions::new(),
            comments: CommentStore::new(),
        }
    }

    // === Metadata ===

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename without uniqueness checks; [`crate::Book::rename_sheet`] is the public path
    pub(crate) fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    /// Position of the sheet in its book
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn max_row(&self) -> u32 {
        self.max_row
    }

    pub fn max_column(&self) -> u16 {
        self.max_col
    }

    pub fn sheet_state(&self) -> SheetState {
        self.state
    }

    pub fn set_sheet_state(&mut self, state: SheetState) {
        self.state = state;
    }

    /// Check if the sheet is visible
    pub fn is_visible(&self) -> bool {
        self.state == SheetState::Visible
    }

    /// Number of materialized cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Direct access to the cell store
    pub fn cell_store(&self) -> &CellStore {
        &self.cells
    }

    // === Cell Modification ===

    /// Write a value at (row, col), creating the cell if needed
    ///
    /// An existing cell keeps its id. Writing outside the declared capacity
    /// grows it.
    pub fn write_cell<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<&mut Cell> {
        let cell = self.cells.write(row, col, value)?;
        self.max_row = self.max_row.max(row);
        self.max_col = self.max_col.max(col);
        Ok(cell)
    }

    /// Alias of [`Sheet::write_cell`]
    pub fn cell<V: Into<CellValue>>(&mut self, row: u32, col: u16, value: V) -> Result<&mut Cell> {
        self.write_cell(row, col, value)
    }

    /// Replace the value at (row, col)
    pub fn set_value<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<&mut Cell> {
        self.write_cell(row, col, value)
    }

    /// Set the formula at (row, col), creating an empty cell if needed
    pub fn set_formula<S: Into<String>>(
        &mut self,
        row: u32,
        col: u16,
        formula: S,
    ) -> Result<&mut Cell> {
        let cell = self.touch(row, col)?;
        Ok(cell.set_formula(formula))
    }

    /// Set the style id at (row, col), creating an empty cell if needed
    pub fn set_style_id<S: Into<String>>(
        &mut self,
        row: u32,
        col: u16,
        style_id: S,
    ) -> Result<&mut Cell> {
        let cell = self.touch(row, col)?;
        Ok(cell.set_style_id(style_id))
    }

    fn touch(&mut self, row: u32, col: u16) -> Result<&mut Cell> {
        let cell = self.cells.get_or_create(row, col)?;
        self.max_row = self.max_row.max(row);
        self.max_col = self.max_col.max(col);
        Ok(cell)
    }

    /// Materialize an empty cell at every free coordinate of the declared capacity
    ///
    /// Existing cells are left untouched. Returns the number of cells created.
    pub fn generate_empty_cells(&mut self) -> usize {
        let created = self.cells.fill_empty(self.max_row, self.max_col);
        log::debug!(
            "sheet '{}': generated {created} empty cells ({}x{})",
            self.name,
            self.max_row,
            self.max_col
        );
        created
    }

    /// Populate the sheet from reader records
    ///
    /// Produces the same state as calling [`Sheet::write_cell`] then
    /// [`Sheet::set_formula`] / [`Sheet::set_style_id`] per record.
    pub fn load_records<I>(&mut self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = CellRecord>,
    {
        let mut loaded = 0;
        for record in records {
            let cell = self.write_cell(record.row, record.col, record.value)?;
            if let Some(formula) = record.formula {
                cell.set_formula(formula);
            }
            if let Some(style_id) = record.style_id {
                cell.set_style_id(style_id);
            }
            loaded += 1;
        }
        log::debug!("sheet '{}': loaded {loaded} cell records", self.name);
        Ok(loaded)
    }

    pub(crate) fn insert_cell(&mut self, cell: Cell) {
        let Coordinate { row, col } = cell.coordinate();
        self.max_row = self.max_row.max(row);
        self.max_col = self.max_col.max(col);
        self.cells.insert(cell);
    }

    // === Cell Access ===

    /// Get the cell at (row, col)
    pub fn find_cell_by_coords(&self, row: u32, col: u16) -> Option<&Cell> {
        self.cells.get(row, col)
    }

    /// Get the mutable cell at (row, col)
    pub fn find_cell_by_coords_mut(&mut self, row: u32, col: u16) -> Option<&mut Cell> {
        self.cells.get_mut(row, col)
    }

    /// Get the cell at an A1-style address
    ///
    /// Fails only when the address cannot be parsed.
    pub fn find_cell_by_letter(&self, letter: &str) -> Result<Option<&Cell>> {
        let coord = Coordinate::parse(letter)?;
        Ok(self.cells.get(coord.row, coord.col))
    }

    /// Get the value at (row, col) as text, empty when there is no value
    pub fn get_cell_value(&self, row: u32, col: u16) -> String {
        self.cells
            .get(row, col)
            .map(|c| c.value().to_string())
            .unwrap_or_default()
    }

    /// Iterate over all cells, row-major
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    /// Iterate over the cells inside a closed bounding box, row-major
    ///
    /// Omitted bounds default to 1 and the declared capacity.
    pub fn iter_cells(
        &self,
        min_row: Option<u32>,
        max_row: Option<u32>,
        min_col: Option<u16>,
        max_col: Option<u16>,
    ) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter_range(
            min_row.unwrap_or(1),
            max_row.unwrap_or(self.max_row),
            min_col.unwrap_or(1),
            max_col.unwrap_or(self.max_col),
        )
    }

    // === Merged Cells ===

    /// Register a merge region and mark every covered cell
    ///
    /// Cells inside the region are created when missing.
    pub fn add_merge_cells(
        &mut self,
        start_row: u32,
        end_row: u32,
        start_col: u16,
        end_col: u16,
    ) -> Result<()> {
        let region = MergeRegion::new(start_row, end_row, start_col, end_col);
        self.merges.add(region, self.max_row, self.max_col)?;

        for (row, col) in region.coordinates() {
            self.cells
                .get_or_create(row, col)?
                .set_merge_region(Some(region));
        }

        log::debug!("sheet '{}': merged {region}", self.name);
        Ok(())
    }

    /// Alias of [`Sheet::add_merge_cells`]
    pub fn set_merged_cells(
        &mut self,
        start_row: u32,
        end_row: u32,
        start_col: u16,
        end_col: u16,
    ) -> Result<()> {
        self.add_merge_cells(start_row, end_row, start_col, end_col)
    }

    /// Registered merge regions in registration order
    pub fn merge_cells(&self) -> &[MergeRegion] {
        self.merges.regions()
    }

    /// Region covering (row, col), if any
    pub fn merge_region_at(&self, row: u32, col: u16) -> Option<&MergeRegion> {
        self.merges.region_at(row, col)
    }

    /// Re-register a region restored from serialized state
    pub(crate) fn restore_merge(&mut self, region: MergeRegion) -> Result<()> {
        self.merges.add(region, self.max_row, self.max_col)
    }

    // === Dimensions ===

    /// Set the height of a row
    pub fn set_height_row(&mut self, row: u32, height: f64) -> Result<()> {
        self.dimensions.set_row_height(row, height)
    }

    /// Set the width of a column
    pub fn set_width_column(&mut self, col: u16, width: f64) -> Result<()> {
        self.dimensions.set_column_width(col, width)
    }

    pub fn set_hidden_row(&mut self, row: u32, hidden: bool) -> Result<()> {
        self.dimensions.set_row_hidden(row, hidden)
    }

    pub fn set_hidden_column(&mut self, col: u16, hidden: bool) -> Result<()> {
        self.dimensions.set_column_hidden(col, hidden)
    }

    /// Height of a row, falling back to [`crate::DEFAULT_ROW_HEIGHT`]
    pub fn height_by_row(&self, row: u32) -> f64 {
        self.dimensions.height_or_default(row)
    }

    /// Width of a column, falling back to [`crate::DEFAULT_COLUMN_WIDTH`]
    pub fn width_by_column(&self, col: u16) -> f64 {
        self.dimensions.width_or_default(col)
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    // === Comments ===

    /// Attach a comment at (row, col), replacing any existing one
    pub fn add_comment(
        &mut self,
        row: u32,
        col: u16,
        text: impl Into<String>,
        author: impl Into<String>,
    ) -> Result<()> {
        self.comments.upsert(Comment::new(row, col, text, author)?);
        Ok(())
    }

    /// Get the comment at (row, col)
    pub fn comment(&self, row: u32, col: u16) -> Option<&Comment> {
        self.comments.get(row, col)
    }

    /// Comments in row-major order
    pub fn comments(&self) -> impl Iterator<Item = &Comment> + '_ {
        self.comments.iter()
    }

    /// Deep copy under a new name and position; every cell gets a fresh id
    pub(crate) fn duplicate<S: Into<String>>(&self, name: S, index: usize) -> Self {
        let mut cells = CellStore::new();
        for cell in self.cells.iter() {
            cells.insert(cell.duplicate());
        }

        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            index,
            cells,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::DataType;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    fn sheet(max_row: u32, max_col: u16) -> Sheet {
        Sheet::new(
            "Sheet1",
            0,
            SheetOptions::new().with_max_row(max_row).with_max_col(max_col),
        )
    }

    #[test]
    fn test_sheet_defaults() {
        let sheet = Sheet::new("Test", 0, SheetOptions::default());
        assert_eq!(sheet.name(), "Test");
        assert_eq!(sheet.max_row(), DEFAULT_MAX_ROW);
        assert_eq!(sheet.max_column(), DEFAULT_MAX_COL);
        assert_eq!(sheet.sheet_state(), SheetState::Visible);
        assert_eq!(sheet.cell_count(), 0);
    }

    #[test]
    fn test_write_then_read() {
        let mut sheet = sheet(5, 5);
        let id = sheet.write_cell(2, 3, "42").unwrap().id();

        let cell = sheet.find_cell_by_coords(2, 3).unwrap();
        assert_eq!(cell.value().as_str(), Some("42"));
        assert_eq!(cell.data_type(), DataType::Numeric);

        sheet.write_cell(2, 3, "forty-two").unwrap();
        let cell = sheet.find_cell_by_coords(2, 3).unwrap();
        assert_eq!(cell.id(), id);
        assert_eq!(cell.data_type(), DataType::String);
    }

    #[test]
    fn test_write_grows_capacity() {
        let mut sheet = sheet(5, 5);
        sheet.write_cell(150, 150, "far").unwrap();
        assert_eq!(sheet.max_row(), 150);
        assert_eq!(sheet.max_column(), 150);

        // Shrinking never happens
        sheet.write_cell(1, 1, "near").unwrap();
        assert_eq!(sheet.max_row(), 150);
    }

    #[test]
    fn test_write_rejects_zero() {
        let mut sheet = sheet(5, 5);
        assert!(matches!(
            sheet.write_cell(0, 1, "x"),
            Err(Error::CoordinateOutOfRange { row: 0, col: 1 })
        ));
    }

    #[test]
    fn test_find_cell_by_letter() {
        let mut sheet = sheet(5, 5);
        sheet.write_cell(3, 2, "value").unwrap();

        let cell = sheet.find_cell_by_letter("B3").unwrap().unwrap();
        assert_eq!(cell.value().as_str(), Some("value"));
        assert!(sheet.find_cell_by_letter("C3").unwrap().is_none());
        assert!(matches!(
            sheet.find_cell_by_letter("3B"),
            Err(Error::InvalidLetterAddress(_))
        ));
    }

    #[test]
    fn test_generate_empty_cells() {
        let mut sheet = sheet(5, 5);
        sheet.write_cell(1, 1, "kept").unwrap();

        assert_eq!(sheet.generate_empty_cells(), 24);
        assert_eq!(sheet.cell_count(), 25);
        assert_eq!(sheet.get_cell_value(1, 1), "kept");

        // Idempotent
        assert_eq!(sheet.generate_empty_cells(), 0);
    }

    #[test]
    fn test_iter_cells_bounded() {
        let mut sheet = sheet(5, 5);
        sheet.generate_empty_cells();

        let coords: Vec<_> = sheet
            .iter_cells(Some(2), Some(3), Some(2), Some(3))
            .map(|c| (c.row(), c.column()))
            .collect();
        assert_eq!(coords, vec![(2, 2), (2, 3), (3, 2), (3, 3)]);

        assert_eq!(sheet.iter_cells(None, None, None, None).count(), 25);
        assert_eq!(sheet.iter_cells(Some(5), None, Some(5), None).count(), 1);
    }

    #[test]
    fn test_merge_marks_every_cell() {
        let mut sheet = sheet(5, 5);
        sheet.add_merge_cells(1, 3, 1, 3).unwrap();

        let region = MergeRegion::new(1, 3, 1, 3);
        let merged: Vec<_> = sheet.iter_cells(Some(1), Some(3), Some(1), Some(3)).collect();
        assert_eq!(merged.len(), 9);
        for cell in merged {
            assert!(cell.is_merge());
            assert_eq!(cell.merge_region(), Some(&region));
        }

        sheet.write_cell(4, 4, "x").unwrap();
        assert!(!sheet.find_cell_by_coords(4, 4).unwrap().is_merge());
        assert_eq!(sheet.merge_cells(), &[region]);
    }

    #[test]
    fn test_merge_keeps_existing_values() {
        let mut sheet = sheet(5, 5);
        let id = sheet.write_cell(1, 1, "Header").unwrap().id();
        sheet.set_merged_cells(1, 1, 1, 3).unwrap();

        let anchor = sheet.find_cell_by_coords(1, 1).unwrap();
        assert_eq!(anchor.id(), id);
        assert_eq!(anchor.value().as_str(), Some("Header"));
        assert!(anchor.is_merge());
    }

    #[test]
    fn test_merge_validation() {
        let mut sheet = sheet(5, 5);

        assert!(matches!(
            sheet.add_merge_cells(3, 1, 1, 1),
            Err(Error::MergeRegionOutOfBounds(_))
        ));
        assert!(matches!(
            sheet.add_merge_cells(1, 6, 1, 1),
            Err(Error::MergeRegionOutOfBounds(_))
        ));

        sheet.add_merge_cells(1, 2, 1, 2).unwrap();
        assert!(matches!(
            sheet.add_merge_cells(2, 3, 2, 3),
            Err(Error::MergeRegionOverlap(_))
        ));

        // Failed calls leave no trace
        assert_eq!(sheet.merge_cells().len(), 1);
        assert_eq!(sheet.cell_count(), 4);
    }

    #[test]
    fn test_sizes() {
        let mut sheet = sheet(5, 5);
        sheet.set_height_row(1, 40.0).unwrap();
        sheet.set_width_column(2, 10.0).unwrap();

        assert_eq!(sheet.height_by_row(1), 40.0);
        assert_eq!(sheet.height_by_row(2), crate::DEFAULT_ROW_HEIGHT);
        assert_eq!(sheet.width_by_column(2), 10.0);
        assert_eq!(sheet.width_by_column(1), crate::DEFAULT_COLUMN_WIDTH);
    }

    #[test]
    fn test_comments() {
        let mut sheet = sheet(5, 5);
        sheet.add_comment(2, 2, "first", "Ann").unwrap();
        sheet.add_comment(1, 4, "other", "Bob").unwrap();
        sheet.add_comment(2, 2, "second", "Ann").unwrap();

        assert_eq!(sheet.comment(2, 2).unwrap().text, "second");
        let coords: Vec<_> = sheet.comments().map(|c| c.coordinate().to_string()).collect();
        assert_eq!(coords, vec!["D1", "B2"]);
    }

    #[test]
    fn test_set_formula_and_style() {
        let mut sheet = sheet(5, 5);
        sheet.write_cell(1, 1, "10").unwrap();
        sheet.set_formula(1, 1, "=SUM(B1:B3)").unwrap();
        sheet.set_style_id(2, 2, "bold").unwrap();

        let cell = sheet.find_cell_by_coords(1, 1).unwrap();
        assert_eq!(cell.data_type(), DataType::Formula);
        assert_eq!(cell.value().as_str(), Some("10"));
        assert_eq!(sheet.find_cell_by_coords(2, 2).unwrap().style_id(), Some("bold"));
    }

    #[test]
    fn test_load_records_matches_writes() {
        let mut written = sheet(5, 5);
        written.write_cell(1, 1, "Name").unwrap();
        written.write_cell(2, 1, "3.5").unwrap();
        written
            .write_cell(3, 1, "7")
            .unwrap()
            .set_formula("=A2*2")
            .set_style_id("s1");

        let mut loaded = sheet(5, 5);
        let count = loaded
            .load_records(vec![
                CellRecord::new(1, 1, "Name"),
                CellRecord::new(2, 1, "3.5"),
                CellRecord::new(3, 1, "7")
                    .with_formula("=A2*2")
                    .with_style_id("s1"),
            ])
            .unwrap();
        assert_eq!(count, 3);

        for (a, b) in written.cells().zip(loaded.cells()) {
            assert_eq!(a.coordinate(), b.coordinate());
            assert_eq!(a.value(), b.value());
            assert_eq!(a.data_type(), b.data_type());
            assert_eq!(a.formula(), b.formula());
            assert_eq!(a.style_id(), b.style_id());
        }
        assert_eq!(written.cell_count(), loaded.cell_count());
    }

    #[test]
    fn test_duplicate() {
        let mut sheet = sheet(5, 5);
        sheet.write_cell(1, 1, "a").unwrap();
        sheet.add_merge_cells(2, 2, 1, 2).unwrap();

        let copy = sheet.duplicate("Copy", 1);
        assert_eq!(copy.name(), "Copy");
        assert_eq!(copy.index(), 1);
        assert_ne!(copy.id(), sheet.id());
        assert_eq!(copy.cell_count(), sheet.cell_count());
        assert_eq!(copy.merge_cells(), sheet.merge_cells());
        assert_ne!(
            copy.find_cell_by_coords(1, 1).unwrap().id(),
            sheet.find_cell_by_coords(1, 1).unwrap().id()
        );
    }
}
