//! Error types for reportbook-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in reportbook-core
///
/// Lookups never produce these; absence is reported as `None`.
#[derive(Debug, Error)]
pub enum Error {
    /// Row or column index below 1
    #[error("Coordinate out of range: row {row}, column {col} (both must be >= 1)")]
    CoordinateOutOfRange { row: u32, col: u32 },

    /// Malformed A1-style address
    #[error("Invalid letter address: {0}")]
    InvalidLetterAddress(String),

    /// Sheet name already used in the book
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// Sheet not found by name or index (structural operations only)
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Sheet name is empty, too long, or contains a reserved character
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// NaN or an infinity where a finite number is required
    #[error("Non-finite number for {field}: {value}")]
    NonFiniteNumber { field: &'static str, value: f64 },

    /// Merge region is inverted or exceeds the sheet capacity
    #[error("Merge region out of bounds: {0}")]
    MergeRegionOutOfBounds(String),

    /// Merge region intersects an already registered region
    #[error("Merge region {0} overlaps an existing merge region")]
    MergeRegionOverlap(String),

    /// Search pattern failed to compile
    #[error("Invalid regex pattern '{pattern}': {source}")]
    InvalidRegexPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Canonical structure could not be produced or parsed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a [`Error::CoordinateOutOfRange`] from a row/column pair
    pub(crate) fn coordinate(row: u32, col: u16) -> Self {
        Error::CoordinateOutOfRange {
            row,
            col: u32::from(col),
        }
    }

    /// Reject NaN and infinities, which the canonical structure cannot carry
    pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Error::NonFiniteNumber { field, value })
        }
    }
}
