//! Cell input boundary
//!
//! Runs the tokenize → parse → evaluate pipeline for one cell input and turns
//! the outcome into display text. This is the only place an error becomes a
//! string.

use crate::error::FormulaResult;
use crate::evaluator::{evaluate, EvaluationContext, FormulaValue};
use crate::parser::parse;
use crate::token::tokenize;
use log::debug;

/// Formula body of a cell input: the text after `=`, trimmed
///
/// Returns `None` for literal input.
pub fn formula_body(input: &str) -> Option<&str> {
    input.strip_prefix('=').map(str::trim)
}

/// Tokenize, parse and evaluate a formula body
pub fn evaluate_formula(body: &str, ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let tokens = tokenize(body)?;
    let ast = parse(&tokens)?;
    evaluate(&ast, ctx)
}

/// Render an evaluation outcome as display text
pub fn render_result(result: &FormulaResult<FormulaValue>) -> String {
    match result {
        Ok(value) => value.to_string(),
        Err(e) => format!("ERROR: {}", e),
    }
}

/// Compute the display text for a cell input
///
/// Input not starting with `=` is returned unchanged.
///
/// # Example
/// ```rust
/// use gridcalc_formula::{evaluate_input, EvaluationContext};
///
/// let ctx = EvaluationContext::simple();
/// assert_eq!(evaluate_input("=(1+2)*3", &ctx), "9");
/// assert_eq!(evaluate_input("=", &ctx), "ERROR: Unexpected token: EOF");
/// assert_eq!(evaluate_input("12", &ctx), "12");
/// ```
pub fn evaluate_input(input: &str, ctx: &EvaluationContext) -> String {
    let Some(body) = formula_body(input) else {
        return input.to_string();
    };

    let result = evaluate_formula(body, ctx);
    if let Err(e) = &result {
        debug!("Formula {:?} failed at {:?} stage: {}", body, e.stage(), e);
    }
    render_result(&result)
}
