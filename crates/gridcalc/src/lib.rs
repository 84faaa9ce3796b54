//! # gridcalc
//!
//! A spreadsheet grid with a small formula engine.
//!
//! Cell input that starts with `=` is a formula: its body is tokenized, parsed
//! into an AST and evaluated, resolving `$A1`-style references against the
//! sheet. The result, or `ERROR: <message>`, becomes the cell's display text.
//! Any other input is shown exactly as entered.
//!
//! ## Features
//!
//! - Arithmetic with `+ - * /` and parentheses
//! - `SUM` and `AVERAGE`
//! - Transitive cell references with a cycle/depth guard
//! - Full-sheet recalculation
//! - Line-based edit scripts ([`edits`])
//!
//! ## Example
//!
//! ```rust
//! use gridcalc::prelude::*;
//!
//! let mut sheet = Sheet::new(20, 10);
//!
//! sheet.edit_cell("A1", "Price").unwrap();
//! sheet.edit_cell("B1", "12.5").unwrap();
//! sheet.edit_cell("B2", "4").unwrap();
//!
//! assert_eq!(sheet.edit_cell("B3", "=$B1*$B2").unwrap(), "50");
//! assert_eq!(sheet.edit_cell("B4", "=AVERAGE($B1, $B2)").unwrap(), "8.25");
//! assert_eq!(sheet.edit_cell("B5", "=$A1+1").unwrap(), "ERROR: Invalid operation");
//! ```

pub mod calculation;
pub mod edits;
pub mod prelude;

// Re-export calculation types
pub use calculation::{CalculationOptions, CalculationStats, SheetCalculationExt};

// Re-export edit script types
pub use edits::{apply_edits, parse_script, Edit, EditError};

// Re-export core types
pub use gridcalc_core::{
    format_number, CellAddress, CellData, CellValue, Error, Result, Sheet, DEFAULT_COLS,
    DEFAULT_ROWS, MAX_COLS, MAX_ROWS,
};

// Re-export formula types
pub use gridcalc_formula::{
    evaluate, evaluate_formula, evaluate_input, formula_body, parse, render_result, tokenize,
    AstNode, CellContent, CellLookup, EvaluationContext, EvaluationOptions, FormulaError,
    FormulaResult, FormulaValue, Operator, Stage, Token, TokenKind, MAX_NESTING_DEPTH,
};

/// Formula engine internals
pub mod formula {
    pub use gridcalc_formula::*;
}
