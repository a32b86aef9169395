//! # reportbook
//!
//! An in-memory spreadsheet-report engine.
//!
//! Reportbook builds workbooks programmatically, finds cells by coordinate,
//! address, exact value or regex, and hands a canonical structure to an
//! external file writer.
//!
//! ## Features
//!
//! - Sparse sheets with O(1) coordinate lookup and row-major iteration
//! - Merge regions recorded on every member cell
//! - Comments, row heights, column widths and hidden rows/columns
//! - A read-only [`Finder`] over books or any host type implementing [`SheetSource`]
//! - Idempotent serialization to a canonical JSON structure
//!
//! ## Example
//!
//! ```rust
//! use reportbook::prelude::*;
//!
//! let mut book = Book::new();
//! let sheet = book.add_sheet("Sales", Some(10), Some(3)).unwrap();
//!
//! sheet.write_cell(1, 1, "Region").unwrap();
//! sheet.write_cell(1, 2, "Total").unwrap();
//! sheet.write_cell(2, 1, "North").unwrap();
//! sheet.write_cell(2, 2, 1250).unwrap();
//! sheet.add_merge_cells(4, 4, 1, 3).unwrap();
//!
//! let finder = book.finder();
//! let sales = finder.find_sheet_by_name("Sales").unwrap();
//! let total = sales.find_cell_by_str("Total").unwrap();
//! assert_eq!(total.letter(), "B1");
//!
//! let json = book.to_json().unwrap();
//! let restored = Book::from_json(&json).unwrap();
//! assert_eq!(restored.to_json().unwrap(), json);
//! ```

pub mod prelude;

// Re-export core types
pub use reportbook_core::{
    // Codec
    column_number_to_letter,
    // Finder
    create_finder,
    get_letter_coordinate,
    letter_to_column_number,
    AttrValue,
    // Main types
    Book,
    // Serialized form
    BookData,
    Cell,
    CellData,
    CellId,
    CellRecord,
    CellSource,
    CellStore,
    // Cell types
    CellValue,
    Comment,
    CommentData,
    CommentStore,
    Coordinate,
    DataType,
    Dimensions,
    // Error types
    Error,
    Finder,
    Found,
    MergeRegion,
    MergeRegionIndex,
    Result,
    Sheet,
    SheetData,
    SheetFinder,
    SheetOptions,
    SheetSource,
    SheetState,
    // Constants
    DEFAULT_COLUMN_WIDTH,
    DEFAULT_MAX_COL,
    DEFAULT_MAX_ROW,
    DEFAULT_ROW_HEIGHT,
    MAX_COLS,
    MAX_ROWS,
    MAX_SHEET_NAME_LEN,
};
