//! Formula error types
//!
//! The `Display` text of every variant is the exact message shown to the
//! user after the `ERROR: ` prefix.

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Pipeline stage that raised an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Tokenize,
    Parse,
    Evaluate,
}

/// Errors that can occur while tokenizing, parsing or evaluating a formula
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FormulaError {
    // === Tokenizer ===
    /// Character that starts no token
    #[error("Unknown character: {0}")]
    UnknownCharacter(char),

    /// String literal without a closing quote
    #[error("Unterminated string")]
    UnterminatedString,

    // === Parser ===
    /// Token that cannot start a factor, or trailing input
    #[error("Unexpected token: {0}")]
    UnexpectedToken(String),

    /// Parenthesized expression missing its `)`
    #[error("Expected ')' to close expression")]
    UnclosedGroup,

    /// Function name not followed by `(`
    #[error("Expected '(' after function name")]
    MissingArgumentList,

    /// Function arguments not followed by `)`
    #[error("Expected ')' after function arguments")]
    UnclosedArgumentList,

    /// Numeric literal that does not form a number (e.g. a lone `.`)
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    /// Groups, argument lists or operator chains past the parser's depth limit
    #[error("Expression nested deeper than {0} levels")]
    NestingTooDeep(usize),

    // === Evaluator ===
    /// Operand of a binary operation is not a number
    #[error("Invalid operation")]
    InvalidOperation,

    /// Division with a zero right operand
    #[error("Division by zero")]
    DivisionByZero,

    /// Parsed operator the evaluator has no arithmetic for
    #[error("Unsupported operator")]
    UnsupportedOperator(String),

    /// Function name with no implementation
    #[error("Function not implemented")]
    FunctionNotImplemented(String),

    /// Function argument that cannot be read as a number
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Reference evaluated without a lookup capability
    #[error("Context or getCell method not provided")]
    MissingContext,

    /// Reference chain deeper than the configured limit
    #[error("Reference cycle or depth exceeded")]
    ReferenceDepthExceeded,

    /// Reference to an address the host cannot resolve
    #[error("Invalid reference: {0}")]
    InvalidReference(String),
}

impl FormulaError {
    /// The pipeline stage this error belongs to
    pub fn stage(&self) -> Stage {
        match self {
            FormulaError::UnknownCharacter(_) | FormulaError::UnterminatedString => {
                Stage::Tokenize
            }
            FormulaError::UnexpectedToken(_)
            | FormulaError::UnclosedGroup
            | FormulaError::MissingArgumentList
            | FormulaError::UnclosedArgumentList
            | FormulaError::InvalidNumber(_)
            | FormulaError::NestingTooDeep(_) => Stage::Parse,
            FormulaError::InvalidOperation
            | FormulaError::DivisionByZero
            | FormulaError::UnsupportedOperator(_)
            | FormulaError::FunctionNotImplemented(_)
            | FormulaError::InvalidArgument(_)
            | FormulaError::MissingContext
            | FormulaError::ReferenceDepthExceeded
            | FormulaError::InvalidReference(_) => Stage::Evaluate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            FormulaError::UnknownCharacter('@').to_string(),
            "Unknown character: @"
        );
        assert_eq!(
            FormulaError::UnexpectedToken("EOF".into()).to_string(),
            "Unexpected token: EOF"
        );
        assert_eq!(
            FormulaError::UnsupportedOperator("=".into()).to_string(),
            "Unsupported operator"
        );
        assert_eq!(
            FormulaError::FunctionNotImplemented("max".into()).to_string(),
            "Function not implemented"
        );
        assert_eq!(
            FormulaError::MissingContext.to_string(),
            "Context or getCell method not provided"
        );
        assert_eq!(
            FormulaError::NestingTooDeep(256).to_string(),
            "Expression nested deeper than 256 levels"
        );
    }

    #[test]
    fn test_stage() {
        assert_eq!(FormulaError::UnterminatedString.stage(), Stage::Tokenize);
        assert_eq!(FormulaError::UnclosedGroup.stage(), Stage::Parse);
        assert_eq!(FormulaError::NestingTooDeep(1).stage(), Stage::Parse);
        assert_eq!(FormulaError::DivisionByZero.stage(), Stage::Evaluate);
    }
}
