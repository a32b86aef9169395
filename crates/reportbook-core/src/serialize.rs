//! Canonical serialized form of a book
//!
//! External file writers consume this structure; readers and tests rebuild a
//! [`Book`] from it. Sheets keep their insertion order and cells are listed
//! row-major, so serializing the same book twice yields identical output.
//!
//! Derived fields (`cell`, `data_type`, `index`) are written for consumers
//! but recomputed on the way back in.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::book::Book;
use crate::cell::{AttrValue, Cell, CellId, CellValue, Coordinate, DataType};
use crate::comment::Comment;
use crate::error::{Error, Result};
use crate::merge::MergeRegion;
use crate::sheet::{Sheet, SheetOptions, SheetState};

/// Serialized book
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookData {
    pub sheets: Vec<SheetData>,
}

/// Serialized sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetData {
    pub id: Uuid,
    pub name: String,
    pub index: usize,
    pub max_row: u32,
    pub max_column: u16,
    #[serde(default)]
    pub sheet_state: SheetState,
    #[serde(default)]
    pub cells: Vec<CellData>,
    #[serde(default)]
    pub merge_cells: Vec<MergeRegion>,
    /// Row number → height
    #[serde(default)]
    pub rows: BTreeMap<u32, f64>,
    /// Column number → width
    #[serde(default)]
    pub columns: BTreeMap<u16, f64>,
    #[serde(default)]
    pub hidden_rows: Vec<u32>,
    #[serde(default)]
    pub hidden_columns: Vec<u16>,
    #[serde(default)]
    pub comments: Vec<CommentData>,
}

/// Serialized cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellData {
    pub id: CellId,
    pub row: u32,
    pub column: u16,
    /// A1-style coordinate
    pub cell: String,
    pub value: CellValue,
    pub data_type: DataType,
    pub formula: Option<String>,
    pub style_id: Option<String>,
    #[serde(default)]
    pub is_merge: bool,
    pub start_row: Option<u32>,
    pub end_row: Option<u32>,
    pub start_column: Option<u16>,
    pub end_column: Option<u16>,
    #[serde(default)]
    pub extra: BTreeMap<String, AttrValue>,
}

/// Serialized comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentData {
    pub row: u32,
    pub column: u16,
    /// A1-style coordinate
    pub coordinate: String,
    pub author: String,
    pub text: String,
}

// === Book → data ===

impl From<&Book> for BookData {
    fn from(book: &Book) -> Self {
        Self {
            sheets: book.sheets().iter().map(SheetData::from).collect(),
        }
    }
}

impl From<&Sheet> for SheetData {
    fn from(sheet: &Sheet) -> Self {
        let dims = sheet.dimensions();
        Self {
            id: sheet.id(),
            name: sheet.name().to_string(),
            index: sheet.index(),
            max_row: sheet.max_row(),
            max_column: sheet.max_column(),
            sheet_state: sheet.sheet_state(),
            cells: sheet.cells().map(CellData::from).collect(),
            merge_cells: sheet.merge_cells().to_vec(),
            rows: dims.row_heights().clone(),
            columns: dims.column_widths().clone(),
            hidden_rows: dims.hidden_rows().collect(),
            hidden_columns: dims.hidden_columns().collect(),
            comments: sheet.comments().map(CommentData::from).collect(),
        }
    }
}

impl From<&Cell> for CellData {
    fn from(cell: &Cell) -> Self {
        let merge = cell.merge_region();
        Self {
            id: cell.id(),
            row: cell.row(),
            column: cell.column(),
            cell: cell.letter().to_string(),
            value: cell.value().clone(),
            data_type: cell.data_type(),
            formula: cell.formula().map(str::to_string),
            style_id: cell.style_id().map(str::to_string),
            is_merge: cell.is_merge(),
            start_row: merge.map(|m| m.start_row),
            end_row: merge.map(|m| m.end_row),
            start_column: merge.map(|m| m.start_col),
            end_column: merge.map(|m| m.end_col),
            extra: cell.extras().clone(),
        }
    }
}

impl From<&Comment> for CommentData {
    fn from(comment: &Comment) -> Self {
        Self {
            row: comment.row(),
            column: comment.column(),
            coordinate: comment.coordinate().to_string(),
            author: comment.author.clone(),
            text: comment.text.clone(),
        }
    }
}

// === data → Book ===

impl TryFrom<BookData> for Book {
    type Error = Error;

    fn try_from(data: BookData) -> Result<Self> {
        let mut book = Book::new();
        for sheet in data.sheets {
            let index = book.sheet_count();
            book.push_restored(sheet.into_sheet(index)?)?;
        }
        Ok(book)
    }
}

impl SheetData {
    /// Rebuild the sheet at position `index`
    pub(crate) fn into_sheet(self, index: usize) -> Result<Sheet> {
        let options = SheetOptions::new()
            .with_max_row(self.max_row)
            .with_max_col(self.max_column);
        let mut sheet = Sheet::with_id(self.id, self.name, index, options);
        sheet.set_sheet_state(self.sheet_state);

        for region in self.merge_cells {
            sheet.restore_merge(region)?;
        }
        for cell in self.cells {
            sheet.insert_cell(cell.into_cell()?);
        }
        for (row, height) in self.rows {
            sheet.set_height_row(row, height)?;
        }
        for (col, width) in self.columns {
            sheet.set_width_column(col, width)?;
        }
        for row in self.hidden_rows {
            sheet.set_hidden_row(row, true)?;
        }
        for col in self.hidden_columns {
            sheet.set_hidden_column(col, true)?;
        }
        for comment in self.comments {
            sheet.add_comment(comment.row, comment.column, comment.text, comment.author)?;
        }

        Ok(sheet)
    }
}

impl CellData {
    pub(crate) fn into_cell(self) -> Result<Cell> {
        let coordinate = Coordinate::checked(self.row, self.column)?;
        let merge = match (self.start_row, self.end_row, self.start_column, self.end_column) {
            (Some(start_row), Some(end_row), Some(start_col), Some(end_col)) if self.is_merge => {
                Some(MergeRegion::new(start_row, end_row, start_col, end_col))
            }
            _ => None,
        };

        let mut cell = Cell::with_id(self.id, coordinate, self.value);
        cell.restore(
            self.formula.filter(|f| !f.is_empty()),
            self.style_id,
            merge,
            self.extra,
        );
        Ok(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_book() -> Book {
        let mut book = Book::new();
        let sheet = book.add_sheet("Report", Some(4), Some(3)).unwrap();
        sheet.write_cell(1, 1, "Title").unwrap();
        sheet.write_cell(2, 2, "12.5").unwrap().set_style_id("num");
        sheet
            .write_cell(3, 2, "25")
            .unwrap()
            .set_formula("=B2*2")
            .set_extra("hidden", true);
        sheet.add_merge_cells(1, 1, 1, 3).unwrap();
        sheet.set_height_row(1, 32.0).unwrap();
        sheet.set_width_column(2, 14.0).unwrap();
        sheet.set_hidden_column(3, true).unwrap();
        sheet.add_comment(2, 2, "Check rate", "Ann").unwrap();
        sheet.set_sheet_state(SheetState::Hidden);

        book.add_sheet("Empty", None, None).unwrap();
        book
    }

    #[test]
    fn test_cell_shape() {
        let book = sample_book();
        let dict = book.to_dict().unwrap();
        let cells = &dict["sheets"][0]["cells"];

        // Merged row first (row-major), then B2, then B3
        assert_eq!(cells[0]["cell"], json!("A1"));
        assert_eq!(cells[0]["is_merge"], json!(true));
        assert_eq!(cells[0]["end_column"], json!(3));
        assert_eq!(cells[1]["cell"], json!("B1"));
        assert_eq!(cells[1]["value"], json!(null));
        assert_eq!(cells[1]["data_type"], json!(null));

        let b2 = &cells[3];
        assert_eq!(b2["cell"], json!("B2"));
        assert_eq!(b2["value"], json!("12.5"));
        assert_eq!(b2["data_type"], json!("n"));
        assert_eq!(b2["style_id"], json!("num"));
        assert_eq!(b2["is_merge"], json!(false));
        assert_eq!(b2["start_row"], json!(null));

        let b3 = &cells[4];
        assert_eq!(b3["data_type"], json!("f"));
        assert_eq!(b3["formula"], json!("=B2*2"));
        assert_eq!(b3["extra"], json!({"hidden": true}));
    }

    #[test]
    fn test_sheet_shape() {
        let book = sample_book();
        let dict = book.to_dict().unwrap();
        let sheet = &dict["sheets"][0];

        assert_eq!(sheet["name"], json!("Report"));
        assert_eq!(sheet["index"], json!(0));
        assert_eq!(sheet["sheet_state"], json!("hidden"));
        assert_eq!(
            sheet["merge_cells"],
            json!([{"start_row": 1, "end_row": 1, "start_column": 1, "end_column": 3}])
        );
        assert_eq!(sheet["rows"], json!({"1": 32.0}));
        assert_eq!(sheet["columns"], json!({"2": 14.0}));
        assert_eq!(sheet["hidden_columns"], json!([3]));
        assert_eq!(
            sheet["comments"],
            json!([{"row": 2, "column": 2, "coordinate": "B2", "author": "Ann", "text": "Check rate"}])
        );

        assert_eq!(dict["sheets"][1]["name"], json!("Empty"));
        assert_eq!(dict["sheets"][1]["cells"], json!([]));
    }

    #[test]
    fn test_round_trip_is_idempotent() {
        let book = sample_book();
        let first = book.to_dict().unwrap();

        let restored = Book::from_dict(&first).unwrap();
        assert_eq!(restored.to_dict().unwrap(), first);

        let json = book.to_json().unwrap();
        let restored = Book::from_json(&json).unwrap();
        assert_eq!(restored.to_json().unwrap(), json);
    }

    #[test]
    fn test_non_finite_numbers_never_reach_the_structure() {
        let mut book = Book::new();
        let sheet = book.add_sheet("Ratios", None, None).unwrap();

        assert!(sheet.set_height_row(1, f64::NAN).is_err());
        assert!(sheet.set_width_column(1, f64::INFINITY).is_err());
        sheet
            .write_cell(1, 1, "x")
            .unwrap()
            .set_extra("ratio", f64::NAN)
            .set_extra("scale", AttrValue::Float(f64::NEG_INFINITY));

        let dict = book.to_dict().unwrap();
        assert_eq!(dict["sheets"][0]["rows"], json!({}));
        assert_eq!(dict["sheets"][0]["columns"], json!({}));
        assert_eq!(
            dict["sheets"][0]["cells"][0]["extra"],
            json!({"ratio": null, "scale": null})
        );

        let restored = Book::from_dict(&dict).unwrap();
        assert_eq!(restored.to_dict().unwrap(), dict);
    }

    #[test]
    fn test_restore_keeps_ids_and_state() {
        let book = sample_book();
        let restored = Book::from_dict(&book.to_dict().unwrap()).unwrap();

        let original = book.get_sheet_index(0).unwrap();
        let sheet = restored.get_sheet_index(0).unwrap();
        assert_eq!(sheet.id(), original.id());

        let cell = sheet.find_cell_by_coords(3, 2).unwrap();
        assert_eq!(cell.id(), original.find_cell_by_coords(3, 2).unwrap().id());
        assert_eq!(cell.data_type(), DataType::Formula);
        assert_eq!(cell.extra("hidden"), Some(&AttrValue::Bool(true)));
        assert!(sheet.find_cell_by_coords(1, 2).unwrap().is_merge());
        assert!(sheet.dimensions().is_column_hidden(3));
    }

    #[test]
    fn test_restore_rejects_invalid_data() {
        let mut dict = sample_book().to_dict().unwrap();
        dict["sheets"][1]["name"] = json!("Report");
        assert!(matches!(
            Book::from_dict(&dict),
            Err(Error::DuplicateSheetName(_))
        ));

        let mut dict = sample_book().to_dict().unwrap();
        dict["sheets"][0]["cells"][0]["row"] = json!(0);
        assert!(matches!(
            Book::from_dict(&dict),
            Err(Error::CoordinateOutOfRange { .. })
        ));

        assert!(matches!(
            Book::from_json("{not json"),
            Err(Error::Serialization(_))
        ));
    }
}
