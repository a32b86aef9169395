//! Row heights, column widths and hidden rows/columns

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::{DEFAULT_COLUMN_WIDTH, DEFAULT_ROW_HEIGHT};

/// Sizing and visibility of a sheet's rows and columns
///
/// Only explicitly set entries are stored; lookups fall back to
/// [`DEFAULT_ROW_HEIGHT`] and [`DEFAULT_COLUMN_WIDTH`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dimensions {
    row_heights: BTreeMap<u32, f64>,
    column_widths: BTreeMap<u16, f64>,
    hidden_rows: BTreeSet<u32>,
    hidden_columns: BTreeSet<u16>,
}

impl Dimensions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_row_height(&mut self, row: u32, height: f64) -> Result<()> {
        if row < 1 {
            return Err(Error::coordinate(row, 1));
        }
        let height = Error::ensure_finite("row height", height)?;
        self.row_heights.insert(row, height);
        Ok(())
    }

    pub fn set_column_width(&mut self, col: u16, width: f64) -> Result<()> {
        if col < 1 {
            return Err(Error::coordinate(1, col));
        }
        let width = Error::ensure_finite("column width", width)?;
        self.column_widths.insert(col, width);
        Ok(())
    }

    pub fn set_row_hidden(&mut self, row: u32, hidden: bool) -> Result<()> {
        if row < 1 {
            return Err(Error::coordinate(row, 1));
        }
        if hidden {
            self.hidden_rows.insert(row);
        } else {
            self.hidden_rows.remove(&row);
        }
        Ok(())
    }

    pub fn set_column_hidden(&mut self, col: u16, hidden: bool) -> Result<()> {
        if col < 1 {
            return Err(Error::coordinate(1, col));
        }
        if hidden {
            self.hidden_columns.insert(col);
        } else {
            self.hidden_columns.remove(&col);
        }
        Ok(())
    }

    /// Explicitly set height of a row
    pub fn row_height(&self, row: u32) -> Option<f64> {
        self.row_heights.get(&row).copied()
    }

    /// Explicitly set width of a column
    pub fn column_width(&self, col: u16) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    /// Height of a row, or [`DEFAULT_ROW_HEIGHT`]
    pub fn height_or_default(&self, row: u32) -> f64 {
        self.row_height(row).unwrap_or(DEFAULT_ROW_HEIGHT)
    }

    /// Width of a column, or [`DEFAULT_COLUMN_WIDTH`]
    pub fn width_or_default(&self, col: u16) -> f64 {
        self.column_width(col).unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    pub fn is_row_hidden(&self, row: u32) -> bool {
        self.hidden_rows.contains(&row)
    }

    pub fn is_column_hidden(&self, col: u16) -> bool {
        self.hidden_columns.contains(&col)
    }

    pub fn row_heights(&self) -> &BTreeMap<u32, f64> {
        &self.row_heights
    }

    pub fn column_widths(&self) -> &BTreeMap<u16, f64> {
        &self.column_widths
    }

    pub fn hidden_rows(&self) -> impl Iterator<Item = u32> + '_ {
        self.hidden_rows.iter().copied()
    }

    pub fn hidden_columns(&self) -> impl Iterator<Item = u16> + '_ {
        self.hidden_columns.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let dims = Dimensions::new();
        assert_eq!(dims.height_or_default(1), DEFAULT_ROW_HEIGHT);
        assert_eq!(dims.width_or_default(1), DEFAULT_COLUMN_WIDTH);
        assert!(dims.row_height(1).is_none());
    }

    #[test]
    fn test_set_sizes() {
        let mut dims = Dimensions::new();
        dims.set_row_height(2, 35.0).unwrap();
        dims.set_column_width(3, 12.5).unwrap();
        dims.set_row_height(2, 40.0).unwrap();

        assert_eq!(dims.height_or_default(2), 40.0);
        assert_eq!(dims.width_or_default(3), 12.5);
        assert_eq!(dims.row_heights().len(), 1);

        assert!(dims.set_row_height(0, 1.0).is_err());
        assert!(dims.set_column_width(0, 1.0).is_err());
    }

    #[test]
    fn test_non_finite_sizes_rejected() {
        let mut dims = Dimensions::new();
        assert!(matches!(
            dims.set_row_height(1, f64::NAN),
            Err(Error::NonFiniteNumber { .. })
        ));
        assert!(matches!(
            dims.set_column_width(1, f64::INFINITY),
            Err(Error::NonFiniteNumber { .. })
        ));
        assert!(dims.row_heights().is_empty());
        assert!(dims.column_widths().is_empty());
    }

    #[test]
    fn test_hidden() {
        let mut dims = Dimensions::new();
        dims.set_row_hidden(5, true).unwrap();
        dims.set_column_hidden(2, true).unwrap();
        dims.set_column_hidden(4, true).unwrap();
        dims.set_column_hidden(2, false).unwrap();

        assert!(dims.is_row_hidden(5));
        assert!(!dims.is_column_hidden(2));
        assert_eq!(dims.hidden_columns().collect::<Vec<_>>(), vec![4]);
    }
}
