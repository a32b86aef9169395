//! Merge regions
//!
//! A merge region is a rectangle of cells shown as one. The sheet registers
//! regions here and copies the bounds onto every member cell.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cell::format_letter;
use crate::error::{Error, Result};

/// Bounds of a merge region (1-based, inclusive on both axes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MergeRegion {
    pub start_row: u32,
    pub end_row: u32,
    #[serde(rename = "start_column")]
    pub start_col: u16,
    #[serde(rename = "end_column")]
    pub end_col: u16,
}

impl MergeRegion {
    /// Create a region without validation
    pub const fn new(start_row: u32, end_row: u32, start_col: u16, end_col: u16) -> Self {
        Self {
            start_row,
            end_row,
            start_col,
            end_col,
        }
    }

    /// Check that the region is ordered, 1-based, and fits in `max_row` x `max_col`
    pub fn validate(&self, max_row: u32, max_col: u16) -> Result<()> {
        if self.start_row < 1 || self.start_col < 1 {
            return Err(Error::MergeRegionOutOfBounds(format!(
                "{self}: rows and columns start at 1"
            )));
        }
        if self.start_row > self.end_row || self.start_col > self.end_col {
            return Err(Error::MergeRegionOutOfBounds(format!(
                "{self}: start must not exceed end"
            )));
        }
        if self.end_row > max_row || self.end_col > max_col {
            return Err(Error::MergeRegionOutOfBounds(format!(
                "{self}: exceeds sheet capacity {max_row}x{max_col}"
            )));
        }
        Ok(())
    }

    /// Check if a cell is within this region
    pub fn contains(&self, row: u32, col: u16) -> bool {
        row >= self.start_row && row <= self.end_row && col >= self.start_col && col <= self.end_col
    }

    /// Check if this region overlaps with another
    pub fn overlaps(&self, other: &MergeRegion) -> bool {
        self.start_row <= other.end_row
            && self.end_row >= other.start_row
            && self.start_col <= other.end_col
            && self.end_col >= other.start_col
    }

    /// Get the total number of cells in the region
    pub fn cell_count(&self) -> u64 {
        let rows = u64::from(self.end_row.saturating_sub(self.start_row)) + 1;
        let cols = u64::from(self.end_col.saturating_sub(self.start_col)) + 1;
        rows * cols
    }

    /// Iterate over all member coordinates (row by row)
    pub fn coordinates(&self) -> impl Iterator<Item = (u32, u16)> {
        let (start_col, end_col) = (self.start_col, self.end_col);
        (self.start_row..=self.end_row)
            .flat_map(move |row| (start_col..=end_col).map(move |col| (row, col)))
    }
}

impl fmt::Display for MergeRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            format_letter(self.start_row, self.start_col),
            format_letter(self.end_row, self.end_col)
        )
    }
}

/// Ordered list of the merge regions registered on a sheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeRegionIndex {
    regions: Vec<MergeRegion>,
}

impl MergeRegionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Regions in registration order
    pub fn regions(&self) -> &[MergeRegion] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Validate and register a region
    ///
    /// Fails with [`Error::MergeRegionOutOfBounds`] for an invalid region and
    /// [`Error::MergeRegionOverlap`] if it intersects a registered one.
    pub fn add(&mut self, region: MergeRegion, max_row: u32, max_col: u16) -> Result<()> {
        region.validate(max_row, max_col)?;

        if self.regions.iter().any(|existing| existing.overlaps(&region)) {
            return Err(Error::MergeRegionOverlap(region.to_string()));
        }

        self.regions.push(region);
        Ok(())
    }

    /// Find the region containing a cell
    pub fn region_at(&self, row: u32, col: u16) -> Option<&MergeRegion> {
        self.regions.iter().find(|r| r.contains(row, col))
    }

    /// Check if a cell is part of a merged region
    pub fn is_merged(&self, row: u32, col: u16) -> bool {
        self.region_at(row, col).is_some()
    }
}
