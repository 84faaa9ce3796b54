//! Formula evaluator

use crate::ast::{AstNode, Operator};
use crate::error::{FormulaError, FormulaResult};
use crate::functions::FunctionRegistry;
use crate::lookup::{CellContent, CellLookup};
use gridcalc_core::{format_number, CellValue};
use log::trace;
use std::fmt;
use std::sync::OnceLock;

/// Global function registry (lazily initialized)
static FUNCTION_REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();

fn get_function_registry() -> &'static FunctionRegistry {
    FUNCTION_REGISTRY.get_or_init(FunctionRegistry::new)
}

/// Value types during formula evaluation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormulaValue {
    Number(f64),
    String(String),
    Empty,
}

impl FormulaValue {
    /// The value if it is a number; no coercion
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FormulaValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for FormulaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaValue::Number(n) => f.write_str(&format_number(*n)),
            FormulaValue::String(s) => f.write_str(s),
            FormulaValue::Empty => Ok(()),
        }
    }
}

impl From<CellValue> for FormulaValue {
    fn from(value: CellValue) -> Self {
        match value {
            CellValue::Empty => FormulaValue::Empty,
            CellValue::Number(n) => FormulaValue::Number(n),
            CellValue::Text(s) => FormulaValue::String(s),
        }
    }
}

/// Evaluation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationOptions {
    /// How many references may be followed through formula cells before
    /// evaluation gives up
    pub max_reference_depth: usize,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            max_reference_depth: 64,
        }
    }
}

/// Context for formula evaluation
#[derive(Clone, Copy)]
pub struct EvaluationContext<'a> {
    /// Cell lookup for references
    pub lookup: Option<&'a dyn CellLookup>,
    /// Evaluation settings
    pub options: EvaluationOptions,
}

impl<'a> EvaluationContext<'a> {
    /// Create a context resolving references through `lookup`
    pub fn new(lookup: &'a dyn CellLookup) -> Self {
        Self {
            lookup: Some(lookup),
            options: EvaluationOptions::default(),
        }
    }

    /// Create a simple context without a lookup (for testing)
    pub fn simple() -> Self {
        Self {
            lookup: None,
            options: EvaluationOptions::default(),
        }
    }

    /// Replace the evaluation settings
    pub fn with_options(mut self, options: EvaluationOptions) -> Self {
        self.options = options;
        self
    }
}

impl fmt::Debug for EvaluationContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluationContext")
            .field("has_lookup", &self.lookup.is_some())
            .field("options", &self.options)
            .finish()
    }
}

/// Evaluate a formula AST
///
/// # Example
/// ```rust
/// use gridcalc_formula::{evaluate, parse, tokenize, EvaluationContext, FormulaValue};
///
/// let ast = parse(&tokenize("SUM(1, 2) * 2").unwrap()).unwrap();
/// let value = evaluate(&ast, &EvaluationContext::simple()).unwrap();
/// assert_eq!(value, FormulaValue::Number(6.0));
/// ```
pub fn evaluate(node: &AstNode, ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    evaluate_at(node, ctx, 0)
}

/// Evaluate with the number of references already followed
fn evaluate_at(node: &AstNode, ctx: &EvaluationContext, depth: usize) -> FormulaResult<FormulaValue> {
    match node {
        AstNode::Number(n) => Ok(FormulaValue::Number(*n)),
        AstNode::String(s) => Ok(FormulaValue::String(s.clone())),
        AstNode::BasicOperation {
            operator,
            left,
            right,
        } => evaluate_binary_op(*operator, left, right, ctx, depth),
        AstNode::Reference(address) => evaluate_reference(address, ctx, depth),
        AstNode::Function { name, arguments } => evaluate_function(name, arguments, ctx, depth),
    }
}

/// Evaluate a binary operation
fn evaluate_binary_op(
    op: Operator,
    left: &AstNode,
    right: &AstNode,
    ctx: &EvaluationContext,
    depth: usize,
) -> FormulaResult<FormulaValue> {
    // Evaluate operands first
    let left_val = evaluate_at(left, ctx, depth)?;
    let right_val = evaluate_at(right, ctx, depth)?;

    let (Some(l), Some(r)) = (left_val.as_number(), right_val.as_number()) else {
        return Err(FormulaError::InvalidOperation);
    };

    if op == Operator::Divide && r == 0.0 {
        return Err(FormulaError::DivisionByZero);
    }

    op.apply(l, r)
        .map(FormulaValue::Number)
        .ok_or_else(|| FormulaError::UnsupportedOperator(op.symbol().to_string()))
}

/// Resolve a reference, following formula cells transitively
fn evaluate_reference(
    address: &str,
    ctx: &EvaluationContext,
    depth: usize,
) -> FormulaResult<FormulaValue> {
    let lookup = ctx.lookup.ok_or(FormulaError::MissingContext)?;

    if depth >= ctx.options.max_reference_depth {
        return Err(FormulaError::ReferenceDepthExceeded);
    }

    trace!("Resolving reference {} at depth {}", address, depth);

    match lookup.get_cell(address)? {
        None => Ok(FormulaValue::Empty),
        Some(CellContent::Value(value)) => Ok(value.into()),
        Some(CellContent::Formula(ast)) => evaluate_at(&ast, ctx, depth + 1),
    }
}

/// Evaluate a function call
fn evaluate_function(
    name: &str,
    arguments: &[AstNode],
    ctx: &EvaluationContext,
    depth: usize,
) -> FormulaResult<FormulaValue> {
    // Evaluate arguments
    let args = arguments
        .iter()
        .map(|arg| evaluate_at(arg, ctx, depth))
        .collect::<FormulaResult<Vec<_>>>()?;

    let registry = get_function_registry();
    let def = registry
        .get(name)
        .ok_or_else(|| FormulaError::FunctionNotImplemented(name.to_lowercase()))?;

    def.call(&args, ctx)
}
