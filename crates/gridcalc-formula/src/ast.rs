//! Formula Abstract Syntax Tree types

use std::fmt;

/// Formula expression AST
///
/// Every tree is rooted at the node returned by one
/// [`parse`](crate::parser::parse) call. Children are owned, so trees are
/// finite and acyclic.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AstNode {
    /// Numeric literal
    Number(f64),

    /// Binary operation
    BasicOperation {
        operator: Operator,
        left: Box<AstNode>,
        right: Box<AstNode>,
    },

    /// Function call
    Function {
        name: String,
        arguments: Vec<AstNode>,
    },

    /// Cell reference, kept as written (e.g. `$A1`) and resolved at evaluation time
    Reference(String),

    /// String literal
    String(String),
}

impl AstNode {
    /// Build a binary operation node
    pub fn binary(operator: Operator, left: AstNode, right: AstNode) -> Self {
        AstNode::BasicOperation {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Build a function call node
    pub fn function<S: Into<String>>(name: S, arguments: Vec<AstNode>) -> Self {
        AstNode::Function {
            name: name.into(),
            arguments,
        }
    }

    /// Collect every reference address in the tree, left to right
    pub fn references(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            AstNode::Reference(address) => out.push(address),
            AstNode::BasicOperation { left, right, .. } => {
                left.collect_references(out);
                right.collect_references(out);
            }
            AstNode::Function { arguments, .. } => {
                for arg in arguments {
                    arg.collect_references(out);
                }
            }
            AstNode::Number(_) | AstNode::String(_) => {}
        }
    }
}

/// Binary operators accepted by the parser
///
/// Only the arithmetic four are evaluated; the rest parse but are rejected
/// by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operator {
    // Multiplicative
    Multiply,
    Divide,

    // Additive tier (shares one binding power)
    Add,
    Subtract,
    LessThan,
    GreaterThan,
    Equal,
    NotEqual,
    Concat,
    Pipe,
    Range,
}

impl Operator {
    /// Operators binding tighter than the rest
    pub const MULTIPLICATIVE: [Operator; 2] = [Operator::Multiply, Operator::Divide];

    /// Operators of the looser tier, all at the same binding power
    pub const ADDITIVE_TIER: [Operator; 9] = [
        Operator::Add,
        Operator::Subtract,
        Operator::LessThan,
        Operator::GreaterThan,
        Operator::Equal,
        Operator::NotEqual,
        Operator::Concat,
        Operator::Pipe,
        Operator::Range,
    ];

    /// Look up an operator by its spelling
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "*" => Some(Operator::Multiply),
            "/" => Some(Operator::Divide),
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Subtract),
            "<" => Some(Operator::LessThan),
            ">" => Some(Operator::GreaterThan),
            "=" => Some(Operator::Equal),
            "<>" => Some(Operator::NotEqual),
            "&" => Some(Operator::Concat),
            "|" => Some(Operator::Pipe),
            ":" => Some(Operator::Range),
            _ => None,
        }
    }

    /// Source spelling
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::LessThan => "<",
            Operator::GreaterThan => ">",
            Operator::Equal => "=",
            Operator::NotEqual => "<>",
            Operator::Concat => "&",
            Operator::Pipe => "|",
            Operator::Range => ":",
        }
    }

    /// Apply an arithmetic operator
    ///
    /// Returns `None` for operators with no numeric meaning.
    pub fn apply(&self, left: f64, right: f64) -> Option<f64> {
        match self {
            Operator::Add => Some(left + right),
            Operator::Subtract => Some(left - right),
            Operator::Multiply => Some(left * right),
            Operator::Divide => Some(left / right),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_symbols_round_trip() {
        for op in Operator::MULTIPLICATIVE
            .iter()
            .chain(Operator::ADDITIVE_TIER.iter())
        {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(*op));
        }
        assert_eq!(Operator::from_symbol("("), None);
        assert_eq!(Operator::from_symbol(","), None);
    }

    #[test]
    fn test_apply() {
        assert_eq!(Operator::Add.apply(1.0, 2.0), Some(3.0));
        assert_eq!(Operator::Divide.apply(1.0, 4.0), Some(0.25));
        assert_eq!(Operator::Equal.apply(1.0, 1.0), None);
        assert_eq!(Operator::Range.apply(1.0, 1.0), None);
    }

    #[test]
    fn test_references() {
        let ast = AstNode::binary(
            Operator::Add,
            AstNode::Reference("$A1".into()),
            AstNode::function(
                "SUM",
                vec![AstNode::Number(1.0), AstNode::Reference("b2".into())],
            ),
        );
        assert_eq!(ast.references(), vec!["$A1", "b2"]);
        assert!(AstNode::Number(1.0).references().is_empty());
    }
}
