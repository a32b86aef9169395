//! Cell coordinates and the A1 letter codec

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A 1-based cell coordinate (row, column)
///
/// Ordering is row-major: by row, then by column. Every ordered collection in
/// this crate relies on that.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Coordinate {
    /// Row index (1-based)
    pub row: u32,
    /// Column index (1-based, A=1, B=2, ..., XFD=16384)
    #[serde(rename = "column")]
    pub col: u16,
}

impl Coordinate {
    /// Create a coordinate without validation
    pub const fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Create a coordinate, rejecting row or column 0
    pub fn checked(row: u32, col: u16) -> Result<Self> {
        if row < 1 || col < 1 {
            return Err(Error::coordinate(row, col));
        }
        Ok(Self { row, col })
    }

    /// Parse a coordinate from A1-style notation
    ///
    /// The address must be a run of ASCII letters followed by a run of digits
    /// (case-insensitive, surrounding whitespace ignored).
    ///
    /// # Examples
    /// ```
    /// use reportbook_core::Coordinate;
    ///
    /// let coord = Coordinate::parse("B3").unwrap();
    /// assert_eq!(coord.row, 3);
    /// assert_eq!(coord.col, 2);
    ///
    /// assert!(Coordinate::parse("3B").is_err());
    /// assert!(Coordinate::parse("A0").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || Error::InvalidLetterAddress(s.to_string());

        let split = s
            .bytes()
            .position(|b| !b.is_ascii_alphabetic())
            .ok_or_else(invalid)?;
        let (letters, digits) = s.split_at(split);

        if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let col = letter_to_column_number(letters)?;
        let row: u32 = digits.parse().map_err(|_| invalid())?;
        if row == 0 {
            return Err(invalid());
        }

        Ok(Self { row, col })
    }

    /// Format as A1-style string
    ///
    /// An unchecked coordinate with column 0 renders as the bare row number;
    /// [`get_letter_coordinate`] rejects it instead.
    pub fn to_letter(&self) -> String {
        format_letter(self.row, self.col)
    }
}

impl From<(u32, u16)> for Coordinate {
    #[inline]
    fn from((row, col): (u32, u16)) -> Self {
        Coordinate::new(row, col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_letter())
    }
}

impl FromStr for Coordinate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Convert a 1-based column number to letters (1 = A, 26 = Z, 27 = AA, ...)
///
/// This is bijective base-26: there is no zero digit, so the loop shifts the
/// number down by one before taking each remainder.
///
/// # Examples
/// ```
/// use reportbook_core::column_number_to_letter;
///
/// assert_eq!(column_number_to_letter(1).unwrap(), "A");
/// assert_eq!(column_number_to_letter(703).unwrap(), "AAA");
/// assert!(column_number_to_letter(0).is_err());
/// ```
pub fn column_number_to_letter(col: u16) -> Result<String> {
    if col < 1 {
        return Err(Error::coordinate(1, col));
    }
    Ok(letters_unchecked(col))
}

fn letters_unchecked(col: u16) -> String {
    let mut result = Vec::with_capacity(4);
    let mut n = u32::from(col);

    while n > 0 {
        n -= 1;
        result.push(b'A' + (n % 26) as u8);
        n /= 26;
    }

    result.reverse();
    // Only ASCII uppercase letters were pushed
    String::from_utf8(result).unwrap_or_default()
}

/// Convert column letters to a 1-based column number (A = 1, Z = 26, AA = 27, ...)
///
/// Letters are case-insensitive. Fails with [`Error::InvalidLetterAddress`] on
/// an empty string, a non-letter, or a column beyond `u16::MAX`.
pub fn letter_to_column_number(letters: &str) -> Result<u16> {
    if letters.is_empty() {
        return Err(Error::InvalidLetterAddress(letters.to_string()));
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidLetterAddress(letters.to_string()));
        }
        col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
        if col > u32::from(u16::MAX) {
            return Err(Error::InvalidLetterAddress(letters.to_string()));
        }
    }

    Ok(col as u16)
}

/// Get the A1-style coordinate of a cell, e.g. (1, 1) -> "A1"
///
/// Fails with [`Error::CoordinateOutOfRange`] when row or column is 0.
pub fn get_letter_coordinate(row: u32, col: u16) -> Result<String> {
    let coordinate = Coordinate::checked(row, col)?;
    Ok(format_letter(coordinate.row, coordinate.col))
}

/// Display form without validation
pub(crate) fn format_letter(row: u32, col: u16) -> String {
    format!("{}{}", letters_unchecked(col), row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_column_number_to_letter() {
        assert_eq!(column_number_to_letter(1).unwrap(), "A");
        assert_eq!(column_number_to_letter(2).unwrap(), "B");
        assert_eq!(column_number_to_letter(26).unwrap(), "Z");
        assert_eq!(column_number_to_letter(27).unwrap(), "AA");
        assert_eq!(column_number_to_letter(28).unwrap(), "AB");
        assert_eq!(column_number_to_letter(702).unwrap(), "ZZ");
        assert_eq!(column_number_to_letter(703).unwrap(), "AAA");
        assert_eq!(column_number_to_letter(16384).unwrap(), "XFD"); // Max Excel column
    }

    #[test]
    fn test_column_number_to_letter_zero() {
        assert!(matches!(
            column_number_to_letter(0),
            Err(Error::CoordinateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_letter_to_column_number() {
        assert_eq!(letter_to_column_number("A").unwrap(), 1);
        assert_eq!(letter_to_column_number("Z").unwrap(), 26);
        assert_eq!(letter_to_column_number("AA").unwrap(), 27);
        assert_eq!(letter_to_column_number("ZZ").unwrap(), 702);
        assert_eq!(letter_to_column_number("AAA").unwrap(), 703);
        assert_eq!(letter_to_column_number("XFD").unwrap(), 16384);

        // Case insensitive
        assert_eq!(letter_to_column_number("a").unwrap(), 1);
        assert_eq!(letter_to_column_number("aa").unwrap(), 27);

        assert!(letter_to_column_number("").is_err());
        assert!(letter_to_column_number("A1").is_err());
        assert!(letter_to_column_number("ZZZZ").is_err()); // beyond u16
    }

    #[test]
    fn test_get_letter_coordinate() {
        assert_eq!(get_letter_coordinate(1, 1).unwrap(), "A1");
        assert_eq!(get_letter_coordinate(100, 3).unwrap(), "C100");
        assert_eq!(get_letter_coordinate(7, 28).unwrap(), "AB7");
    }

    #[test]
    fn test_get_letter_coordinate_rejects_zero() {
        assert!(matches!(
            get_letter_coordinate(1, 0),
            Err(Error::CoordinateOutOfRange { row: 1, col: 0 })
        ));
        assert!(matches!(
            get_letter_coordinate(0, 1),
            Err(Error::CoordinateOutOfRange { row: 0, col: 1 })
        ));
    }

    #[test]
    fn test_coordinate_parse() {
        assert_eq!(Coordinate::parse("A1").unwrap(), Coordinate::new(1, 1));
        assert_eq!(Coordinate::parse("b2").unwrap(), Coordinate::new(2, 2));
        assert_eq!(Coordinate::parse(" AB10 ").unwrap(), Coordinate::new(10, 28));
        assert_eq!(
            Coordinate::parse("XFD1048576").unwrap(),
            Coordinate::new(1_048_576, 16384)
        );
    }

    #[test]
    fn test_coordinate_parse_errors() {
        for bad in ["", "A", "1", "A0", "1A", "A1B", "$A$1", "A-1", "Ä1"] {
            assert!(
                matches!(Coordinate::parse(bad), Err(Error::InvalidLetterAddress(_))),
                "expected failure for {bad:?}"
            );
        }
    }

    #[test]
    fn test_coordinate_checked() {
        assert!(Coordinate::checked(1, 1).is_ok());
        assert!(Coordinate::checked(0, 1).is_err());
        assert!(Coordinate::checked(1, 0).is_err());
    }

    #[test]
    fn test_coordinate_ordering_is_row_major() {
        let mut coords = vec![
            Coordinate::new(2, 1),
            Coordinate::new(1, 3),
            Coordinate::new(1, 1),
        ];
        coords.sort();
        assert_eq!(
            coords,
            vec![
                Coordinate::new(1, 1),
                Coordinate::new(1, 3),
                Coordinate::new(2, 1)
            ]
        );
    }

    #[test]
    fn test_coordinate_display() {
        assert_eq!(Coordinate::new(1, 1).to_string(), "A1");
        assert_eq!(Coordinate::new(42, 702).to_string(), "ZZ42");
    }

    proptest! {
        #[test]
        fn letter_round_trip(col in 1u16..=16384) {
            let letters = column_number_to_letter(col).unwrap();
            prop_assert_eq!(letter_to_column_number(&letters).unwrap(), col);
        }

        #[test]
        fn address_round_trip(row in 1u32..=1_048_576, col in 1u16..=16384) {
            let coord = Coordinate::new(row, col);
            prop_assert_eq!(Coordinate::parse(&coord.to_letter()).unwrap(), coord);
        }
    }
}
