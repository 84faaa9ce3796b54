//! # gridcalc-formula
//!
//! Formula engine for gridcalc.
//!
//! This crate provides:
//! - Tokenizing (formula text → typed tokens)
//! - Parsing (tokens → AST)
//! - Evaluation (AST → value), resolving cell references through a
//!   [`CellLookup`] supplied by the host
//! - The cell-input boundary that renders results or `ERROR: <message>`
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_formula::{evaluate_input, EvaluationContext};
//!
//! let ctx = EvaluationContext::simple();
//! assert_eq!(evaluate_input("=1+2*3", &ctx), "7");
//! assert_eq!(evaluate_input("=1/0", &ctx), "ERROR: Division by zero");
//! assert_eq!(evaluate_input("plain text", &ctx), "plain text");
//! ```

pub mod ast;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod lookup;
pub mod parser;
pub mod token;

pub use ast::{AstNode, Operator};
pub use engine::{evaluate_formula, evaluate_input, formula_body, render_result};
pub use error::{FormulaError, FormulaResult, Stage};
pub use evaluator::{evaluate, EvaluationContext, EvaluationOptions, FormulaValue};
pub use lookup::{CellContent, CellLookup};
pub use parser::{parse, MAX_NESTING_DEPTH};
pub use token::{tokenize, Token, TokenKind};
