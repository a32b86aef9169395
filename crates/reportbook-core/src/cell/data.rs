//! A single addressable cell

use std::collections::BTreeMap;

use uuid::Uuid;

use super::{AttrValue, CellValue, Coordinate, DataType};
use crate::error::{Error, Result};
use crate::merge::MergeRegion;

/// Stable identity of a cell, assigned at creation
pub type CellId = Uuid;

/// Attribute key under which [`Cell::set_hidden_value`] stores its text
pub const HIDDEN_VALUE_KEY: &str = "hidden_value";

/// Complete state of a single cell
///
/// The coordinate is fixed at creation. Overwriting the value keeps the
/// [`CellId`]; the data type is recomputed on every value or formula change.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    id: CellId,
    coordinate: Coordinate,
    letter: String,
    value: CellValue,
    data_type: DataType,
    formula: Option<String>,
    style_id: Option<String>,
    merge: Option<MergeRegion>,
    extra: BTreeMap<String, AttrValue>,
}

impl Cell {
    /// Create a cell with a fresh id
    pub fn new<V: Into<CellValue>>(coordinate: Coordinate, value: V) -> Self {
        Self::with_id(Uuid::new_v4(), coordinate, value)
    }

    /// Create a cell with a known id (used when restoring serialized state)
    pub fn with_id<V: Into<CellValue>>(id: CellId, coordinate: Coordinate, value: V) -> Self {
        let value = value.into();
        let data_type = value.data_type();
        Self {
            id,
            coordinate,
            letter: coordinate.to_letter(),
            value,
            data_type,
            formula: None,
            style_id: None,
            merge: None,
            extra: BTreeMap::new(),
        }
    }

    /// Create an empty cell
    pub fn empty(coordinate: Coordinate) -> Self {
        Self::new(coordinate, CellValue::empty())
    }

    // === Identity ===

    /// Get the cell id
    #[inline]
    pub fn id(&self) -> CellId {
        self.id
    }

    /// Get the cell coordinate
    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Get the row (1-based)
    #[inline]
    pub fn row(&self) -> u32 {
        self.coordinate.row
    }

    /// Get the column (1-based)
    #[inline]
    pub fn column(&self) -> u16 {
        self.coordinate.col
    }

    /// Get the A1-style coordinate, e.g. `"B3"`
    #[inline]
    pub fn letter(&self) -> &str {
        &self.letter
    }

    // === Value ===

    #[inline]
    pub fn value(&self) -> &CellValue {
        &self.value
    }

    #[inline]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    #[inline]
    pub fn formula(&self) -> Option<&str> {
        self.formula.as_deref()
    }

    #[inline]
    pub fn style_id(&self) -> Option<&str> {
        self.style_id.as_deref()
    }

    /// Check if the cell carries a non-empty formula
    #[inline]
    pub fn is_formula(&self) -> bool {
        self.formula.as_deref().is_some_and(|f| !f.is_empty())
    }

    /// Check if the cell has no value
    #[inline]
    pub fn is_value_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Check if the value is a numeric literal (independent of any formula)
    #[inline]
    pub fn is_value_numeric(&self) -> bool {
        self.value.data_type() == DataType::Numeric
    }

    /// Replace the value, keeping the id
    pub fn set_value<V: Into<CellValue>>(&mut self, value: V) -> &mut Self {
        self.value = value.into();
        self.refresh_data_type();
        self
    }

    /// Store a number, tagged [`DataType::Numeric`]
    ///
    /// Fails with [`Error::NonFiniteNumber`] for NaN or an infinity.
    pub fn set_value_number(&mut self, value: f64) -> Result<&mut Self> {
        let value = Error::ensure_finite("cell value", value)?;
        Ok(self.set_value(value))
    }

    pub fn set_value_integer(&mut self, value: i64) -> &mut Self {
        self.set_value(value)
    }

    /// Set the formula; a non-empty formula tags the cell as [`DataType::Formula`]
    ///
    /// Setting an empty formula is the same as [`Cell::remove_formula`].
    pub fn set_formula<S: Into<String>>(&mut self, formula: S) -> &mut Self {
        let formula = formula.into();
        self.formula = if formula.is_empty() {
            None
        } else {
            Some(formula)
        };
        self.refresh_data_type();
        self
    }

    /// Drop the formula and restore the value-inferred data type
    pub fn remove_formula(&mut self) -> &mut Self {
        self.formula = None;
        self.refresh_data_type();
        self
    }

    pub fn set_style_id<S: Into<String>>(&mut self, style_id: S) -> &mut Self {
        self.style_id = Some(style_id.into());
        self
    }

    pub fn clear_style_id(&mut self) -> &mut Self {
        self.style_id = None;
        self
    }

    fn refresh_data_type(&mut self) {
        self.data_type = if self.is_formula() {
            DataType::Formula
        } else {
            self.value.data_type()
        };
    }

    // === Merge ===

    /// Check if the cell belongs to a merge region
    #[inline]
    pub fn is_merge(&self) -> bool {
        self.merge.is_some()
    }

    /// Bounds of the merge region this cell belongs to
    #[inline]
    pub fn merge_region(&self) -> Option<&MergeRegion> {
        self.merge.as_ref()
    }

    pub(crate) fn set_merge_region(&mut self, region: Option<MergeRegion>) {
        self.merge = region;
    }

    // === Extension attributes ===

    /// Get an extension attribute
    pub fn extra(&self, key: &str) -> Option<&AttrValue> {
        self.extra.get(key)
    }

    /// All extension attributes, ordered by key
    pub fn extras(&self) -> &BTreeMap<String, AttrValue> {
        &self.extra
    }

    /// Attach an arbitrary attribute to the cell
    ///
    /// A non-finite float is stored as [`AttrValue::Null`].
    pub fn set_extra<K: Into<String>, V: Into<AttrValue>>(&mut self, key: K, value: V) -> &mut Self {
        self.extra.insert(key.into(), value.into().into_finite());
        self
    }

    pub fn remove_extra(&mut self, key: &str) -> Option<AttrValue> {
        self.extra.remove(key)
    }

    pub fn set_hidden_value<S: Into<String>>(&mut self, value: S) -> &mut Self {
        self.set_extra(HIDDEN_VALUE_KEY, AttrValue::Str(value.into()))
    }

    pub fn hidden_value(&self) -> Option<&str> {
        self.extra(HIDDEN_VALUE_KEY).and_then(AttrValue::as_str)
    }

    /// Copy of this cell with a fresh id
    pub(crate) fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            ..self.clone()
        }
    }

    /// Restore fields that are not derived from the value
    pub(crate) fn restore(
        &mut self,
        formula: Option<String>,
        style_id: Option<String>,
        merge: Option<MergeRegion>,
        extra: BTreeMap<String, AttrValue>,
    ) {
        self.formula = formula;
        self.style_id = style_id;
        self.merge = merge;
        self.extra = extra;
        self.refresh_data_type();
    }
}
