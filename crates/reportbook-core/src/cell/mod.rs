//! Cell-related types and utilities
//!
//! This module contains:
//! - [`Coordinate`] and the A1 letter codec
//! - [`CellValue`] / [`DataType`] - the value stored in a cell and its inferred tag
//! - [`Cell`] - complete cell state (value, formula, style, merge, extension attributes)
//! - [`CellStore`] - sparse, indexed per-sheet cell collection

mod address;
mod data;
mod storage;
mod value;

pub use address::{column_number_to_letter, get_letter_coordinate, letter_to_column_number, Coordinate};
pub(crate) use address::format_letter;
pub use data::{Cell, CellId, HIDDEN_VALUE_KEY};
pub use storage::CellStore;
pub use value::{is_numeric_literal, AttrValue, CellValue, DataType};
