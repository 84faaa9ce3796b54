//! Cell value types

use std::fmt;

/// The scalar value of a literal (non-formula) cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Empty cell (no value)
    #[default]
    Empty,

    /// Numeric value
    Number(f64),

    /// Text value
    Text(String),
}

impl CellValue {
    /// Classify literal cell input
    ///
    /// Blank input is [`CellValue::Empty`], input that reads as a finite number
    /// (surrounding whitespace ignored) is [`CellValue::Number`], anything else
    /// is kept verbatim as [`CellValue::Text`].
    ///
    /// ```
    /// use gridcalc_core::CellValue;
    ///
    /// assert_eq!(CellValue::from_input(" 12.5 "), CellValue::Number(12.5));
    /// assert_eq!(CellValue::from_input("total"), CellValue::Text("total".into()));
    /// assert_eq!(CellValue::from_input(""), CellValue::Empty);
    /// ```
    pub fn from_input(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(input.to_string()),
        }
    }
}

/// Render a number the way the grid displays it
///
/// Shortest round-trip decimal form; negative zero shows as `0`.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => f.write_str(&format_number(*n)),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

/// Complete data for a single cell
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellData {
    /// Text exactly as the user entered it
    pub input: String,
    /// Text shown in the grid (the input itself, or a formula's rendered result)
    pub display: String,
}

impl CellData {
    /// Create a cell whose display mirrors its input
    pub fn new<S: Into<String>>(input: S) -> Self {
        let input = input.into();
        Self {
            display: input.clone(),
            input,
        }
    }

    /// Check if the input is a formula (starts with `=`)
    pub fn is_formula(&self) -> bool {
        self.input.starts_with('=')
    }

    /// Check if this cell holds nothing worth storing
    pub fn is_empty(&self) -> bool {
        self.input.is_empty() && self.display.is_empty()
    }
}
