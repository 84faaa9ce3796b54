//! Built-in functions

pub mod math;

use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::{EvaluationContext, FormulaValue};
use std::collections::HashMap;

/// Function implementation signature
pub type FunctionImpl = fn(&[FormulaValue], &EvaluationContext) -> FormulaResult<FormulaValue>;

/// Function definition
pub struct FunctionDef {
    /// Function name (uppercase)
    pub name: &'static str,
    /// Minimum arguments
    pub min_args: usize,
    /// Maximum arguments (None = unlimited)
    pub max_args: Option<usize>,
    /// Implementation
    pub implementation: FunctionImpl,
}

impl FunctionDef {
    /// Check the argument count and run the implementation
    pub fn call(&self, args: &[FormulaValue], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
        let too_few = args.len() < self.min_args;
        let too_many = self.max_args.is_some_and(|max| args.len() > max);
        if too_few || too_many {
            return Err(FormulaError::InvalidArgument(self.name.to_lowercase()));
        }
        (self.implementation)(args, ctx)
    }
}

/// Function registry
pub struct FunctionRegistry {
    functions: HashMap<String, FunctionDef>,
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionRegistry {
    /// Create a new registry with all built-in functions
    pub fn new() -> Self {
        let mut registry = Self {
            functions: HashMap::new(),
        };

        registry.register_math_functions();

        registry
    }

    /// Look up a function by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(&name.to_uppercase())
    }

    /// Register a function
    pub fn register(&mut self, def: FunctionDef) {
        self.functions.insert(def.name.to_uppercase(), def);
    }

    fn register_math_functions(&mut self) {
        // SUM
        self.register(FunctionDef {
            name: "SUM",
            min_args: 0,
            max_args: None,
            implementation: math::fn_sum,
        });

        // AVERAGE
        self.register(FunctionDef {
            name: "AVERAGE",
            min_args: 0,
            max_args: None,
            implementation: math::fn_average,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = FunctionRegistry::new();
        assert!(registry.get("sum").is_some());
        assert!(registry.get("Average").is_some());
        assert!(registry.get("MAX").is_none());
        assert_eq!(registry.get("average").map(|def| def.name), Some("AVERAGE"));
    }

    #[test]
    fn test_arity_is_checked() {
        fn fn_one(_: &[FormulaValue], _: &EvaluationContext) -> FormulaResult<FormulaValue> {
            Ok(FormulaValue::Number(1.0))
        }

        let mut registry = FunctionRegistry::new();
        registry.register(FunctionDef {
            name: "ONE",
            min_args: 1,
            max_args: Some(1),
            implementation: fn_one,
        });

        let ctx = EvaluationContext::simple();
        let def = registry.get("one").unwrap();
        assert_eq!(
            def.call(&[], &ctx),
            Err(FormulaError::InvalidArgument("one".into()))
        );
        assert_eq!(
            def.call(&[FormulaValue::Empty], &ctx),
            Ok(FormulaValue::Number(1.0))
        );
        assert!(def.call(&[FormulaValue::Empty, FormulaValue::Empty], &ctx).is_err());
    }
}
