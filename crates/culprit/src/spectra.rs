//! Element descriptions ("spectra" files).
//!
//! One human-readable label per line, in the same order as the coverage
//! matrix columns (e.g. `com.example.Parser#parse(java.lang.String):42`).
//! Labels are opaque; they are only echoed back in reports.

use crate::result::{read_text, CulpritResult};
use std::path::Path;

/// Split spectra text into one label per line.
///
/// A trailing newline does not produce an extra empty label; blank lines in
/// the middle are kept so that labels stay index-aligned with the matrix.
#[must_use]
pub fn parse_spectra(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect()
}

/// Read a spectra file
///
/// # Errors
/// Returns an I/O error if the file cannot be read, or
/// [`crate::CulpritError::MalformedInput`] if it is not UTF-8.
pub fn load_spectra(path: &Path) -> CulpritResult<Vec<String>> {
    let content = read_text(path)?;
    Ok(parse_spectra(&content))
}
