//! Book type - the ordered collection of sheets

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::finder::Finder;
use crate::record::CellRecord;
use crate::serialize::BookData;
use crate::sheet::{Sheet, SheetOptions};
use crate::MAX_SHEET_NAME_LEN;

/// Characters a sheet name must not contain
const INVALID_NAME_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];

/// A book (workbook)
///
/// Sheets keep their insertion order; only [`Book::add_sheet`] and its
/// variants change it.
#[derive(Debug, Clone, Default)]
pub struct Book {
    sheets: Vec<Sheet>,
}

impl Book {
    /// Create an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of sheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Check if the book has no sheets
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// All sheets in insertion order
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Iterate over all sheets mutably
    pub fn sheets_mut(&mut self) -> impl Iterator<Item = &mut Sheet> {
        self.sheets.iter_mut()
    }

    // === Sheet creation ===

    /// Create and append a sheet
    ///
    /// Omitted capacities default to [`crate::DEFAULT_MAX_ROW`] x
    /// [`crate::DEFAULT_MAX_COL`].
    pub fn add_sheet(
        &mut self,
        name: &str,
        max_row: Option<u32>,
        max_col: Option<u16>,
    ) -> Result<&mut Sheet> {
        let mut options = SheetOptions::default();
        if let Some(max_row) = max_row {
            options = options.with_max_row(max_row);
        }
        if let Some(max_col) = max_col {
            options = options.with_max_col(max_col);
        }
        self.add_sheet_with_options(name, options)
    }

    /// Create and append a sheet with explicit options
    pub fn add_sheet_with_options(&mut self, name: &str, options: SheetOptions) -> Result<&mut Sheet> {
        self.validate_sheet_name(name, None)?;

        let index = self.sheets.len();
        log::debug!(
            "adding sheet '{name}' at index {index} ({}x{})",
            options.max_row,
            options.max_col
        );
        Ok(self.push(Sheet::new(name, index, options)))
    }

    /// Create a sheet from reader records
    ///
    /// The sheet starts with no declared capacity; it grows to cover the
    /// records.
    pub fn add_sheet_from_records<I>(&mut self, name: &str, records: I) -> Result<&mut Sheet>
    where
        I: IntoIterator<Item = CellRecord>,
    {
        self.validate_sheet_name(name, None)?;

        let options = SheetOptions::new().with_max_row(0).with_max_col(0);
        let mut sheet = Sheet::new(name, self.sheets.len(), options);
        sheet.load_records(records)?;
        Ok(self.push(sheet))
    }

    /// Deep-copy the sheet named `source` and append it as `new_name`
    ///
    /// The copy gets fresh sheet and cell ids.
    pub fn copy_sheet(&mut self, source: &str, new_name: &str) -> Result<&mut Sheet> {
        self.validate_sheet_name(new_name, None)?;

        let index = self.sheets.len();
        let copy = self
            .get_sheet_name(source)
            .ok_or_else(|| Error::SheetNotFound(source.to_string()))?
            .duplicate(new_name, index);

        log::debug!("copied sheet '{source}' to '{new_name}'");
        Ok(self.push(copy))
    }

    /// Rename the sheet at `index`
    pub fn rename_sheet(&mut self, index: usize, new_name: &str) -> Result<()> {
        if index >= self.sheets.len() {
            return Err(Error::SheetNotFound(format!("index {index}")));
        }
        self.validate_sheet_name(new_name, Some(index))?;
        self.sheets[index].set_name(new_name);
        Ok(())
    }

    fn push(&mut self, sheet: Sheet) -> &mut Sheet {
        let index = self.sheets.len();
        self.sheets.push(sheet);
        &mut self.sheets[index]
    }

    /// Append a sheet restored from serialized state
    pub(crate) fn push_restored(&mut self, sheet: Sheet) -> Result<()> {
        self.validate_sheet_name(sheet.name(), None)?;
        self.push(sheet);
        Ok(())
    }

    // === Sheet lookup ===

    /// Get a sheet by name
    pub fn get_sheet_name(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name() == name)
    }

    /// Get a mutable sheet by name
    pub fn get_sheet_name_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.name() == name)
    }

    /// Get a sheet by position
    pub fn get_sheet_index(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }

    /// Get a mutable sheet by position
    pub fn get_sheet_index_mut(&mut self, index: usize) -> Option<&mut Sheet> {
        self.sheets.get_mut(index)
    }

    /// Query engine over all sheets
    pub fn finder(&self) -> Finder<'_, Sheet> {
        Finder::new(&self.sheets)
    }

    // === Serialization ===

    /// Canonical serialized structure
    pub fn to_data(&self) -> BookData {
        BookData::from(self)
    }

    /// Canonical structure as a JSON value
    pub fn to_dict(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.to_data())?)
    }

    /// Canonical structure as a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_data())?)
    }

    /// Rebuild a book from its canonical structure
    pub fn from_data(data: BookData) -> Result<Self> {
        Book::try_from(data)
    }

    /// Rebuild a book from a JSON value produced by [`Book::to_dict`]
    pub fn from_dict(value: &Value) -> Result<Self> {
        let data = BookData::deserialize(value)?;
        Self::from_data(data)
    }

    /// Rebuild a book from a JSON string produced by [`Book::to_json`]
    pub fn from_json(json: &str) -> Result<Self> {
        let data: BookData = serde_json::from_str(json)?;
        Self::from_data(data)
    }

    // === Validation ===

    /// Validate a sheet name, optionally excluding a sheet from the duplicate check
    fn validate_sheet_name(&self, name: &str, exclude_index: Option<usize>) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }
        if let Some(c) = name.chars().find(|c| INVALID_NAME_CHARS.contains(c)) {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name cannot contain '{}'",
                c
            )));
        }

        // Names are compared exactly
        let taken = self
            .sheets
            .iter()
            .enumerate()
            .any(|(i, s)| Some(i) != exclude_index && s.name() == name);
        if taken {
            return Err(Error::DuplicateSheetName(name.into()));
        }

        Ok(())
    }
}
