//! Prelude module - common imports for reportbook users
//!
//! ```rust
//! use reportbook::prelude::*;
//! ```

pub use crate::{
    // Main types
    Book,
    Cell,
    CellRecord,
    // Finder traits
    CellSource,
    // Cell types
    CellValue,
    Coordinate,
    DataType,
    // Error types
    Error,
    Finder,
    MergeRegion,
    Result,
    Sheet,
    SheetFinder,
    SheetOptions,
    SheetSource,
    SheetState,
};
