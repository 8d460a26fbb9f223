//! Spreadsheet column reference resolution

use crate::error::{MarksheetError, Result};

/// Resolve a spreadsheet-style column reference to a zero-based index.
///
/// One letter covers A-Z (0-25); two letters continue spreadsheet
/// numbering, so "AA" follows "Z" as 26 and "BA" is 52. This is not a
/// pure positional base-26 system: the first letter of a two-letter
/// reference counts from one. Anything that is not one or two ASCII
/// letters is rejected.
pub fn column_index(reference: &str) -> Result<usize> {
    fn letter(reference: &str, c: char) -> Result<usize> {
        let upper = c.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            Ok(upper as usize - 'A' as usize)
        } else {
            Err(MarksheetError::InvalidColumnReference(reference.to_string()))
        }
    }

    let chars: Vec<char> = reference.chars().collect();
    match chars.as_slice() {
        [single] => letter(reference, *single),
        [first, second] => {
            Ok((letter(reference, *first)? + 1) * 26 + letter(reference, *second)?)
        }
        _ => Err(MarksheetError::InvalidColumnReference(reference.to_string())),
    }
}
