//! Cell comments (notes)
//!
//! Comments are attached to a coordinate rather than to a cell, so a comment
//! can sit on a coordinate that holds no cell.
//!
//! ## Example
//!
//! ```rust
//! use reportbook_core::Book;
//!
//! let mut book = Book::new();
//! let sheet = book.add_sheet("Notes", None, None).unwrap();
//!
//! sheet.add_comment(1, 1, "Check this total", "Auditor").unwrap();
//!
//! let comment = sheet.comment(1, 1).unwrap();
//! assert_eq!(comment.coordinate(), "A1");
//! assert_eq!(comment.author, "Auditor");
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::cell::Coordinate;
use crate::error::Result;

/// A cell comment/note
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    coordinate: Coordinate,
    letter: String,
    /// Author of the comment
    pub author: String,
    /// Comment text content
    pub text: String,
}

impl Comment {
    /// Create a comment at (row, col)
    pub fn new(
        row: u32,
        col: u16,
        text: impl Into<String>,
        author: impl Into<String>,
    ) -> Result<Self> {
        let coordinate = Coordinate::checked(row, col)?;
        Ok(Self {
            coordinate,
            letter: coordinate.to_letter(),
            author: author.into(),
            text: text.into(),
        })
    }

    /// Row the comment is attached to
    pub fn row(&self) -> u32 {
        self.coordinate.row
    }

    /// Column the comment is attached to
    pub fn column(&self) -> u16 {
        self.coordinate.col
    }

    /// A1-style coordinate, e.g. `"C4"`
    pub fn coordinate(&self) -> &str {
        &self.letter
    }

    /// Check if this comment has an author
    pub fn has_author(&self) -> bool {
        !self.author.is_empty()
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_author() {
            write!(f, "[{}]: {}", self.author, self.text)
        } else {
            write!(f, "{}", self.text)
        }
    }
}

/// Comments of a sheet keyed by coordinate, iterated row-major
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentStore {
    comments: BTreeMap<Coordinate, Comment>,
}

impl CommentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Insert or replace the comment at the comment's coordinate
    ///
    /// Returns the replaced comment, if any.
    pub fn upsert(&mut self, comment: Comment) -> Option<Comment> {
        self.comments.insert(comment.coordinate, comment)
    }

    pub fn get(&self, row: u32, col: u16) -> Option<&Comment> {
        self.comments.get(&Coordinate::new(row, col))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Comment> + '_ {
        self.comments.values()
    }
}
