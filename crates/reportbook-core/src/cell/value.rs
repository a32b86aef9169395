//! Cell value types

use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Inferred classification of a cell
///
/// Serialized as the short tags used by spreadsheet writers: `"n"`, `"s"`,
/// `"f"`, or `null` for an empty cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DataType {
    /// No value
    #[default]
    Null,
    /// Value is a numeric literal
    Numeric,
    /// Any other value
    String,
    /// A formula is set; overrides the value-based tag
    Formula,
}

impl DataType {
    /// Short tag, or `None` for [`DataType::Null`]
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            DataType::Null => None,
            DataType::Numeric => Some("n"),
            DataType::String => Some("s"),
            DataType::Formula => Some("f"),
        }
    }

    /// Parse a short tag; unknown tags fall back to [`DataType::String`]
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            None | Some("") => DataType::Null,
            Some("n") => DataType::Numeric,
            Some("f") => DataType::Formula,
            Some(_) => DataType::String,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag().unwrap_or(""))
    }
}

impl Serialize for DataType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.tag() {
            Some(tag) => serializer.serialize_str(tag),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = Option::<String>::deserialize(deserializer)?;
        Ok(DataType::from_tag(tag.as_deref()))
    }
}

fn numeric_literal_re() -> &'static Regex {
    static NUMERIC_RE: OnceLock<Regex> = OnceLock::new();
    NUMERIC_RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?$")
            .expect("numeric literal regex must compile")
    })
}

/// The value stored in a cell
///
/// Values are kept in their textual form so that the string a host wrote is
/// exactly the string a search matches against. An empty string is the same
/// as no value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>")]
pub struct CellValue(Option<String>);

impl CellValue {
    /// The empty value
    pub const fn empty() -> Self {
        CellValue(None)
    }

    /// Create a value from text; `""` becomes empty
    pub fn text<S: Into<String>>(s: S) -> Self {
        let s = s.into();
        if s.is_empty() {
            CellValue(None)
        } else {
            CellValue(Some(s))
        }
    }

    /// Check if the value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Get the value as text, if any
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// The string form used by searches (empty string when there is no value)
    pub fn to_search_string(&self) -> Cow<'_, str> {
        match &self.0 {
            Some(s) => Cow::Borrowed(s.as_str()),
            None => Cow::Borrowed(""),
        }
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        self.0
            .as_deref()
            .filter(|s| is_numeric_literal(s))
            .and_then(|s| s.parse().ok())
    }

    /// Infer the data type of this value
    pub fn data_type(&self) -> DataType {
        match self.0.as_deref() {
            None => DataType::Null,
            Some(s) if is_numeric_literal(s) => DataType::Numeric,
            Some(_) => DataType::String,
        }
    }
}

/// Check whether `s` is a plain decimal literal such as `42`, `-3.5` or `1e10`
pub fn is_numeric_literal(s: &str) -> bool {
    numeric_literal_re().is_match(s)
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_deref().unwrap_or(""))
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::text(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::text(s)
    }
}

impl From<&String> for CellValue {
    fn from(s: &String) -> Self {
        CellValue::text(s.as_str())
    }
}

impl From<Option<&str>> for CellValue {
    fn from(s: Option<&str>) -> Self {
        s.map(CellValue::text).unwrap_or_default()
    }
}

impl From<Option<String>> for CellValue {
    fn from(s: Option<String>) -> Self {
        s.map(CellValue::text).unwrap_or_default()
    }
}

/// Formats with `Display`; NaN and infinities therefore become the text
/// `"NaN"` / `"inf"` and are tagged [`DataType::String`]. Use
/// [`Cell::set_value_number`](crate::Cell::set_value_number) to reject them.
impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue(Some(n.to_string()))
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue(Some(n.to_string()))
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue(Some(n.to_string()))
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue(Some(n.to_string()))
    }
}

/// A primitive value in a cell's open attribute map
///
/// Floats are always finite: NaN and infinities become [`AttrValue::Null`]
/// on the way in, since JSON has no representation for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl AttrValue {
    /// Try to get the value as a string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Replace a non-finite float with [`AttrValue::Null`]
    pub(crate) fn into_finite(self) -> Self {
        match self {
            AttrValue::Float(n) if !n.is_finite() => AttrValue::Null,
            other => other,
        }
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        AttrValue::Int(n)
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        AttrValue::Float(n).into_finite()
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}
