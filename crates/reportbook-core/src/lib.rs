//! # reportbook-core
//!
//! Core data structures for the reportbook spreadsheet-report engine.
//!
//! This crate provides:
//! - [`Book`], [`Sheet`], [`Cell`] - the in-memory workbook model and its mutation API
//! - [`Coordinate`] and the letter codec ([`column_number_to_letter`], [`get_letter_coordinate`])
//! - [`MergeRegion`] and [`Comment`] - per-sheet merge and annotation metadata
//! - [`Finder`] - read-only cell queries (coordinate, letter, string, regex, ranges)
//!   over a [`Book`] or any host type implementing [`SheetSource`]
//! - [`BookData`] - the canonical serialized form consumed by external file writers
//!
//! ## Example
//!
//! ```rust
//! use reportbook_core::Book;
//!
//! let mut book = Book::new();
//! let sheet = book.add_sheet("Report", Some(5), Some(5)).unwrap();
//!
//! sheet.write_cell(1, 1, "Total").unwrap();
//! sheet.write_cell(1, 2, "42").unwrap();
//! sheet.add_merge_cells(2, 3, 1, 2).unwrap();
//!
//! let finder = book.finder();
//! let sheet = finder.find_sheet_by_name("Report").unwrap();
//! assert_eq!(sheet.find_value_by_coords(1, 2).as_deref(), Some("42"));
//! ```

pub mod book;
pub mod cell;
pub mod comment;
pub mod dimension;
pub mod error;
pub mod finder;
pub mod merge;
pub mod record;
pub mod serialize;
pub mod sheet;

// Re-exports for convenience
pub use book::Book;
pub use cell::{
    column_number_to_letter, get_letter_coordinate, letter_to_column_number, AttrValue, Cell,
    CellId, CellStore, CellValue, Coordinate, DataType,
};
pub use comment::{Comment, CommentStore};
pub use dimension::Dimensions;
pub use error::{Error, Result};
pub use finder::{create_finder, CellSource, Finder, Found, SheetFinder, SheetSource};
pub use merge::{MergeRegion, MergeRegionIndex};
pub use record::CellRecord;
pub use serialize::{BookData, CellData, CommentData, SheetData};
pub use sheet::{Sheet, SheetOptions, SheetState};

/// Default column width applied when a column has no explicit width
pub const DEFAULT_COLUMN_WIDTH: f64 = 22.5;

/// Default row height applied when a row has no explicit height
pub const DEFAULT_ROW_HEIGHT: f64 = 20.0;

/// Declared row capacity of a sheet created without an explicit one
pub const DEFAULT_MAX_ROW: u32 = 5;

/// Declared column capacity of a sheet created without an explicit one
pub const DEFAULT_MAX_COL: u16 = 5;

/// Maximum number of rows in a spreadsheet (Excel limit, advisory only)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a spreadsheet (Excel limit, advisory only)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
