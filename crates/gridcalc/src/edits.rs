//! Edit scripts
//!
//! A line-based format for replaying cell edits:
//!
//! ```text
//! # comment
//! A1   10
//! A2   =$A1*2
//! A1
//! ```
//!
//! Each line is an address, whitespace, then the cell input (the rest of the
//! line with leading whitespace removed). An address alone clears the cell.
//! Blank lines and lines starting with `#` are skipped.

use crate::calculation::{CalculationOptions, SheetCalculationExt};
use crate::{CellAddress, Sheet};
use log::debug;
use thiserror::Error;

/// Errors that can occur while reading or applying an edit script
#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    /// Line that does not start with a valid address
    #[error("Malformed edit at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    /// Edit the sheet rejected
    #[error("Cannot apply edit at line {line}: {source}")]
    Cell {
        line: usize,
        #[source]
        source: gridcalc_core::Error,
    },
}

/// One cell edit read from a script
#[derive(Debug, Clone, PartialEq)]
pub struct Edit {
    /// 1-based script line
    pub line: usize,
    /// Target cell
    pub address: CellAddress,
    /// New cell input (empty clears the cell)
    pub input: String,
}

/// Parse a single script line
///
/// Returns `Ok(None)` for blank and comment lines.
pub fn parse_edit_line(line_no: usize, line: &str) -> Result<Option<Edit>, EditError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let content = line.trim_start();

    if content.is_empty() || content.starts_with('#') {
        return Ok(None);
    }

    let (address, input) = match content.split_once(char::is_whitespace) {
        Some((address, rest)) => (address, rest.trim_start()),
        None => (content, ""),
    };

    let address = CellAddress::parse(address).map_err(|e| EditError::Malformed {
        line: line_no,
        reason: e.to_string(),
    })?;

    Ok(Some(Edit {
        line: line_no,
        address,
        input: input.to_string(),
    }))
}

/// Parse a whole script
pub fn parse_script(script: &str) -> Result<Vec<Edit>, EditError> {
    let mut edits = Vec::new();
    for (idx, line) in script.lines().enumerate() {
        if let Some(edit) = parse_edit_line(idx + 1, line)? {
            edits.push(edit);
        }
    }
    Ok(edits)
}

/// Apply edits in order, returning the display text of each edited cell
pub fn apply_edits(
    sheet: &mut Sheet,
    edits: &[Edit],
    options: &CalculationOptions,
) -> Result<Vec<String>, EditError> {
    let mut displays = Vec::with_capacity(edits.len());

    for edit in edits {
        debug!("Line {}: {} <- {:?}", edit.line, edit.address, edit.input);
        let display = sheet
            .edit_cell_with_options(edit.address.row, edit.address.col, &edit.input, options)
            .map_err(|source| EditError::Cell {
                line: edit.line,
                source,
            })?;
        displays.push(display);
    }

    Ok(displays)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_lines() {
        let edit = parse_edit_line(3, "B2  =1 + 1 ").unwrap().unwrap();
        assert_eq!(edit.line, 3);
        assert_eq!(edit.address, CellAddress::new(1, 1));
        assert_eq!(edit.input, "=1 + 1 ");

        let edit = parse_edit_line(1, "  $c$4\thello world\r").unwrap().unwrap();
        assert_eq!(edit.address.to_string(), "$C$4");
        assert_eq!(edit.input, "hello world");
    }

    #[test]
    fn test_address_alone_clears() {
        let edit = parse_edit_line(1, "A1").unwrap().unwrap();
        assert_eq!(edit.input, "");
    }

    #[test]
    fn test_skips_blank_and_comments() {
        assert_eq!(parse_edit_line(1, "").unwrap(), None);
        assert_eq!(parse_edit_line(1, "   ").unwrap(), None);
        assert_eq!(parse_edit_line(1, "# A1 5").unwrap(), None);
        assert_eq!(parse_edit_line(1, "  # note").unwrap(), None);
    }

    #[test]
    fn test_malformed_line() {
        let err = parse_edit_line(7, "=1+1 A1").unwrap_err();
        assert!(matches!(err, EditError::Malformed { line: 7, .. }));
        assert!(err.to_string().starts_with("Malformed edit at line 7:"));
    }

    #[test]
    fn test_parse_script_numbers_lines() {
        let edits = parse_script("# header\n\nA1 1\nA2 =$A1+1\n").unwrap();
        assert_eq!(edits.len(), 2);
        assert_eq!(edits[0].line, 3);
        assert_eq!(edits[1].line, 4);
        assert_eq!(edits[1].input, "=$A1+1");
    }

    #[test]
    fn test_apply_edits() {
        let mut sheet = Sheet::new(5, 5);
        let edits = parse_script("A1 2\nA2 =$A1*3\nA3 text\nA3").unwrap();
        let displays = apply_edits(&mut sheet, &edits, &CalculationOptions::default()).unwrap();

        assert_eq!(displays, vec!["2", "6", "text", ""]);
        assert_eq!(sheet.display_at(1, 0), Some("6"));
        assert_eq!(sheet.cell_at(2, 0), None);
    }

    #[test]
    fn test_apply_outside_sheet() {
        let mut sheet = Sheet::new(2, 2);
        let edits = parse_script("A1 1\nZ9 2").unwrap();
        let err = apply_edits(&mut sheet, &edits, &CalculationOptions::default()).unwrap_err();
        assert!(matches!(err, EditError::Cell { line: 2, .. }));
    }
}
