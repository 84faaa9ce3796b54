//! Cell address type
//!
//! Addresses are written as column letters then a 1-based row number, each
//! optionally preceded by a `$` marker. A marker is part of how the reference
//! was written and nothing more: `B2`, `$B2` and `$B$2` all name the same cell.

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A cell address (e.g., "A1", "$B2")
///
/// Column letters are case-insensitive. The `$` markers are kept only so the
/// address prints back the way it was written; compare `row` and `col` to
/// ask whether two addresses name the same cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ...)
    pub col: u16,
    /// Written with `$` before the row number
    pub row_marked: bool,
    /// Written with `$` before the column letters
    pub col_marked: bool,
}

impl CellAddress {
    /// Create an unmarked address
    pub fn new(row: u32, col: u16) -> Self {
        Self::with_markers(row, col, false, false)
    }

    /// Create an address that prints with the given `$` markers
    pub fn with_markers(row: u32, col: u16, row_marked: bool, col_marked: bool) -> Self {
        Self {
            row,
            col,
            row_marked,
            col_marked,
        }
    }

    /// Parse an address such as `A1`, `$b12` or `C$3`
    ///
    /// Surrounding whitespace is ignored. Rows past [`MAX_ROWS`] and columns
    /// past [`MAX_COLS`] are out of bounds.
    ///
    /// # Examples
    /// ```
    /// use gridcalc_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("A1").unwrap();
    /// assert_eq!((addr.row, addr.col), (0, 0));
    ///
    /// let addr = CellAddress::parse("$b2").unwrap();
    /// assert_eq!((addr.row, addr.col), (1, 1));
    /// assert_eq!(addr.to_string(), "$B2");
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let text = s.trim();

        let (col_marked, rest) = take_marker(text);
        let letters_len = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        let (letters, rest) = rest.split_at(letters_len);
        if letters.is_empty() {
            return Err(Error::InvalidAddress(format!(
                "no column letters in '{}'",
                text
            )));
        }
        let col = Self::letters_to_column(letters)?;

        let (row_marked, digits) = take_marker(rest);
        let row = parse_row(digits, text)?;

        Ok(Self::with_markers(row, col, row_marked, col_marked))
    }

    /// Column letters for a 0-based index (0 = A, 25 = Z, 26 = AA)
    pub fn column_to_letters(col: u16) -> String {
        // Bijective base 26: there is no zero digit
        let mut n = u32::from(col) + 1;
        let mut letters = Vec::with_capacity(3);
        while n > 0 {
            let digit = (n - 1) % 26;
            letters.push(char::from(b'A' + digit as u8));
            n = (n - 1) / 26;
        }
        letters.iter().rev().collect()
    }

    /// 0-based index for column letters (A = 0, Z = 25, AA = 26)
    pub fn letters_to_column(letters: &str) -> Result<u16> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }

        let number = letters.chars().try_fold(0u32, |acc, c| {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidAddress(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            let digit = u32::from(c.to_ascii_uppercase()) - u32::from('A') + 1;
            acc.checked_mul(26)
                .and_then(|v| v.checked_add(digit))
                .filter(|v| *v <= u32::from(MAX_COLS))
                .ok_or(Error::ColumnOutOfBounds(u32::MAX, MAX_COLS - 1))
        })?;

        Ok((number - 1) as u16)
    }
}

/// Split off a leading `$`
fn take_marker(s: &str) -> (bool, &str) {
    match s.strip_prefix('$') {
        Some(rest) => (true, rest),
        None => (false, s),
    }
}

/// 0-based row for the digits after the column letters
fn parse_row(digits: &str, text: &str) -> Result<u32> {
    if digits.is_empty() {
        return Err(Error::InvalidAddress(format!("no row number in '{}'", text)));
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidAddress(format!(
            "invalid row number in '{}'",
            text
        )));
    }

    // Too many digits for u64 is still just a row past the grid
    let row = digits.parse::<u64>().unwrap_or(u64::MAX);
    match row {
        0 => Err(Error::InvalidAddress(format!(
            "row number must be >= 1 in '{}'",
            text
        ))),
        r if r > u64::from(MAX_ROWS) => Err(Error::RowOutOfBounds(
            u32::try_from(r - 1).unwrap_or(u32::MAX),
            MAX_ROWS - 1,
        )),
        r => Ok((r - 1) as u32),
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = |marked: bool| if marked { "$" } else { "" };
        write!(
            f,
            "{}{}{}{}",
            marker(self.col_marked),
            Self::column_to_letters(self.col),
            marker(self.row_marked),
            self.row + 1
        )
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
