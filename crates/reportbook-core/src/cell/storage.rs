//! Cell storage implementation
//!
//! Sparse storage: only written or explicitly generated cells exist.
//! Lookups go through a hash index; ordered traversal goes through a
//! row-based `BTreeMap` of column sets, so iteration is row-major no matter
//! in which order cells were written.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use ahash::AHashMap;

use super::{Cell, CellValue, Coordinate};
use crate::error::Result;

/// Sparse per-sheet cell collection, at most one cell per coordinate
///
/// Structure: `AHashMap<(row, col), Cell>` for O(1) lookup plus
/// `BTreeMap<row, BTreeSet<col>>` for ordered iteration.
#[derive(Debug, Clone, Default)]
pub struct CellStore {
    /// (row, col) → cell
    cells: AHashMap<(u32, u16), Cell>,

    /// Row index → occupied columns
    rows: BTreeMap<u32, BTreeSet<u16>>,
}

impl CellStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a cell
    #[inline]
    pub fn get(&self, row: u32, col: u16) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Get a mutable cell
    #[inline]
    pub fn get_mut(&mut self, row: u32, col: u16) -> Option<&mut Cell> {
        self.cells.get_mut(&(row, col))
    }

    /// Check whether a cell exists at the coordinate
    #[inline]
    pub fn contains(&self, row: u32, col: u16) -> bool {
        self.cells.contains_key(&(row, col))
    }

    /// Create or update the cell at (row, col)
    ///
    /// An existing cell is mutated in place and keeps its id.
    pub fn write<V: Into<CellValue>>(&mut self, row: u32, col: u16, value: V) -> Result<&mut Cell> {
        let coordinate = Coordinate::checked(row, col)?;

        match self.cells.entry((row, col)) {
            Entry::Occupied(entry) => {
                let cell = entry.into_mut();
                cell.set_value(value);
                Ok(cell)
            }
            Entry::Vacant(entry) => {
                self.rows.entry(row).or_default().insert(col);
                Ok(entry.insert(Cell::new(coordinate, value)))
            }
        }
    }

    /// Get the cell at (row, col), creating an empty one when missing
    pub fn get_or_create(&mut self, row: u32, col: u16) -> Result<&mut Cell> {
        let coordinate = Coordinate::checked(row, col)?;
        let rows = &mut self.rows;
        Ok(self.cells.entry((row, col)).or_insert_with(|| {
            rows.entry(row).or_default().insert(col);
            Cell::empty(coordinate)
        }))
    }

    /// Insert a fully built cell, replacing any cell at its coordinate
    pub fn insert(&mut self, cell: Cell) -> Option<Cell> {
        let Coordinate { row, col } = cell.coordinate();
        self.rows.entry(row).or_default().insert(col);
        self.cells.insert((row, col), cell)
    }

    /// Create an empty cell for every missing coordinate in `[1..=max_row] x [1..=max_col]`
    ///
    /// Returns the number of cells created. Existing cells are never touched.
    pub fn fill_empty(&mut self, max_row: u32, max_col: u16) -> usize {
        let mut created = 0;
        for row in 1..=max_row {
            let cols = self.rows.entry(row).or_default();
            for col in 1..=max_col {
                if cols.insert(col) {
                    self.cells
                        .insert((row, col), Cell::empty(Coordinate::new(row, col)));
                    created += 1;
                }
            }
        }
        // Rows that received nothing (max_col == 0) must not linger
        self.rows.retain(|_, cols| !cols.is_empty());
        created
    }

    /// Iterate over all cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().flat_map(move |(&row, cols)| {
            cols.iter()
                .filter_map(move |&col| self.cells.get(&(row, col)))
        })
    }

    /// Iterate over the cells inside a closed bounding box, row-major
    ///
    /// An inverted box yields nothing.
    pub fn iter_range(
        &self,
        min_row: u32,
        max_row: u32,
        min_col: u16,
        max_col: u16,
    ) -> impl Iterator<Item = &Cell> + '_ {
        let valid = min_row <= max_row && min_col <= max_col;
        valid
            .then(|| self.rows.range(min_row..=max_row))
            .into_iter()
            .flatten()
            .flat_map(move |(&row, cols)| {
                cols.range(min_col..=max_col)
                    .filter_map(move |&col| self.cells.get(&(row, col)))
            })
    }

    /// Iterate over the cells of one row, by column
    pub fn iter_row(&self, row: u32) -> impl Iterator<Item = &Cell> + '_ {
        self.rows
            .get(&row)
            .into_iter()
            .flat_map(move |cols| cols.iter().filter_map(move |&col| self.cells.get(&(row, col))))
    }

    /// Get the bounds of stored cells as (max_row, max_col), or `None` if empty
    pub fn used_bounds(&self) -> Option<(u32, u16)> {
        let max_row = *self.rows.keys().next_back()?;
        let max_col = self
            .rows
            .values()
            .filter_map(|cols| cols.iter().next_back())
            .copied()
            .max()?;
        Some((max_row, max_col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::DataType;
    use proptest::prelude::*;

    #[test]
    fn test_write_and_get() {
        let mut store = CellStore::new();

        store.write(1, 1, "42").unwrap();
        let cell = store.get(1, 1).unwrap();
        assert_eq!(cell.value().as_str(), Some("42"));
        assert_eq!(cell.data_type(), DataType::Numeric);

        assert!(store.get(2, 2).is_none());
    }

    #[test]
    fn test_write_rejects_zero_coordinates() {
        let mut store = CellStore::new();
        assert!(store.write(0, 1, "x").is_err());
        assert!(store.write(1, 0, "x").is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_overwrite_keeps_id() {
        let mut store = CellStore::new();

        let id = store.write(2, 3, "first").unwrap().id();
        let cell = store.write(2, 3, "second").unwrap();

        assert_eq!(cell.id(), id);
        assert_eq!(cell.value().as_str(), Some("second"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_iteration_is_row_major() {
        let mut store = CellStore::new();

        store.write(2, 1, "c").unwrap();
        store.write(1, 2, "b").unwrap();
        store.write(1, 1, "a").unwrap();

        let values: Vec<_> = store.iter().map(|c| c.value().to_string()).collect();
        assert_eq!(values, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_fill_empty_keeps_existing() {
        let mut store = CellStore::new();
        let id = store.write(2, 2, "kept").unwrap().id();

        let created = store.fill_empty(5, 5);

        assert_eq!(created, 24);
        assert_eq!(store.len(), 25);
        let cell = store.get(2, 2).unwrap();
        assert_eq!(cell.id(), id);
        assert_eq!(cell.value().as_str(), Some("kept"));
        assert!(store.get(5, 5).unwrap().is_value_empty());
    }

    #[test]
    fn test_iter_range() {
        let mut store = CellStore::new();
        store.fill_empty(5, 5);

        let coords: Vec<_> = store
            .iter_range(2, 3, 2, 3)
            .map(|c| (c.row(), c.column()))
            .collect();
        assert_eq!(coords, vec![(2, 2), (2, 3), (3, 2), (3, 3)]);

        // Inverted bounds yield nothing
        assert_eq!(store.iter_range(3, 2, 1, 5).count(), 0);
        assert_eq!(store.iter_range(1, 5, 4, 1).count(), 0);
    }

    #[test]
    fn test_get_or_create() {
        let mut store = CellStore::new();
        store.get_or_create(4, 4).unwrap().set_style_id("s1");

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(4, 4).unwrap().style_id(), Some("s1"));
        assert_eq!(store.iter_row(4).count(), 1);
    }

    #[test]
    fn test_used_bounds() {
        let mut store = CellStore::new();
        assert!(store.used_bounds().is_none());

        store.write(5, 3, "1").unwrap();
        store.write(10, 1, "2").unwrap();
        store.write(2, 7, "3").unwrap();

        assert_eq!(store.used_bounds(), Some((10, 7)));
    }

    proptest! {
        #[test]
        fn iteration_sorted_for_any_write_order(
            coords in proptest::collection::vec((1u32..50, 1u16..50), 1..60)
        ) {
            let mut store = CellStore::new();
            for (row, col) in &coords {
                store.write(*row, *col, "v").unwrap();
            }

            let seen: Vec<_> = store.iter().map(|c| (c.row(), c.column())).collect();
            let mut expected = seen.clone();
            expected.sort();
            expected.dedup();
            prop_assert_eq!(seen, expected);
        }
    }
}
