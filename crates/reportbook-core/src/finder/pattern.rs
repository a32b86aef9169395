//! Search pattern compilation

use regex::Regex;

use crate::error::{Error, Result};

/// Compile a user-supplied pattern
pub(crate) fn compile(pattern: &str) -> Result<Regex> {
    log::trace!("compiling search pattern {pattern:?}");
    Regex::new(pattern).map_err(|source| Error::InvalidRegexPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Compile every pattern, failing on the first invalid one
pub(crate) fn compile_all<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Regex>> {
    patterns.iter().map(|p| compile(p.as_ref())).collect()
}
