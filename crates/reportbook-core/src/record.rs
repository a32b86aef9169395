//! Cell records produced by file readers

use crate::cell::CellValue;

/// One cell as delivered by an external file reader
///
/// Loading a record is equivalent to `write_cell` followed by `set_formula`
/// and `set_style_id` for whichever of those are present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellRecord {
    pub row: u32,
    pub col: u16,
    pub value: CellValue,
    pub formula: Option<String>,
    pub style_id: Option<String>,
}

impl CellRecord {
    pub fn new<V: Into<CellValue>>(row: u32, col: u16, value: V) -> Self {
        Self {
            row,
            col,
            value: value.into(),
            formula: None,
            style_id: None,
        }
    }

    pub fn with_formula<S: Into<String>>(mut self, formula: S) -> Self {
        self.formula = Some(formula.into());
        self
    }

    pub fn with_style_id<S: Into<String>>(mut self, style_id: S) -> Self {
        self.style_id = Some(style_id.into());
        self
    }
}

impl<V: Into<CellValue>> From<(u32, u16, V)> for CellRecord {
    fn from((row, col, value): (u32, u16, V)) -> Self {
        CellRecord::new(row, col, value)
    }
}
