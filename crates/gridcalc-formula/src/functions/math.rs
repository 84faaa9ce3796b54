//! Math functions

use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::{EvaluationContext, FormulaValue};

/// SUM function
pub fn fn_sum(args: &[FormulaValue], _ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    Ok(FormulaValue::Number(sum_numbers(args, "sum")?))
}

/// AVERAGE function
pub fn fn_average(args: &[FormulaValue], _ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let sum = sum_numbers(args, "average")?;

    if args.is_empty() {
        Err(FormulaError::DivisionByZero)
    } else {
        Ok(FormulaValue::Number(sum / args.len() as f64))
    }
}

fn sum_numbers(args: &[FormulaValue], function: &str) -> FormulaResult<f64> {
    args.iter().try_fold(0.0, |acc, arg| Ok(acc + coerce(arg, function)?))
}

/// Read an argument as a number: text is trimmed and parsed, empty counts as 0
fn coerce(value: &FormulaValue, function: &str) -> FormulaResult<f64> {
    match value {
        FormulaValue::Number(n) => Ok(*n),
        FormulaValue::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| FormulaError::InvalidArgument(function.to_string())),
        FormulaValue::Empty => Ok(0.0),
    }
}
