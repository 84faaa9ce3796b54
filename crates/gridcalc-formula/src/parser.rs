//! Formula parser
//!
//! A recursive descent parser over the token stream produced by
//! [`tokenize`](crate::token::tokenize).
//!
//! Binding power has two tiers: `*` and `/` bind tightest, and every other
//! binary operator (`+ - < > = <> & | :`) shares the looser tier. Both tiers
//! are left-associative.
//!
//! Both the nesting of groups and function calls and the depth of the
//! resulting tree are capped at [`MAX_NESTING_DEPTH`].

use crate::ast::{AstNode, Operator};
use crate::error::{FormulaError, FormulaResult};
use crate::token::{Token, TokenKind};
use log::{debug, trace};

/// Deepest expression the parser accepts
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parse a token stream into an AST
///
/// The whole stream must be consumed; leftover tokens are an error. The EOF
/// sentinel is optional, so hand-built token lists parse too.
///
/// # Example
/// ```rust
/// use gridcalc_formula::{parse, tokenize, AstNode, Operator};
///
/// let ast = parse(&tokenize("2*3+4").unwrap()).unwrap();
/// assert_eq!(
///     ast,
///     AstNode::binary(
///         Operator::Add,
///         AstNode::binary(Operator::Multiply, AstNode::Number(2.0), AstNode::Number(3.0)),
///         AstNode::Number(4.0),
///     )
/// );
/// ```
pub fn parse(tokens: &[Token]) -> FormulaResult<AstNode> {
    debug!("Parsing {} tokens", tokens.len());

    let mut parser = Parser::new(tokens);
    let (ast, _) = parser.parse_expression()?;

    // Make sure we consumed all input
    if !parser.at_end() {
        return Err(FormulaError::UnexpectedToken(parser.describe_current()));
    }

    trace!("AST: {:?}", ast);
    Ok(ast)
}

/// A parsed subtree and its depth
type Parsed = (AstNode, usize);

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// Open groups and argument lists
    nesting: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            nesting: 0,
        }
    }

    // === Grammar ===

    /// expression = term { additive-tier-op term }
    fn parse_expression(&mut self) -> FormulaResult<Parsed> {
        let (mut left, mut depth) = self.parse_term()?;

        while let Some(op) = self.match_operator(&Operator::ADDITIVE_TIER) {
            let (right, right_depth) = self.parse_term()?;
            depth = parent_depth(depth.max(right_depth))?;
            left = AstNode::binary(op, left, right);
        }

        Ok((left, depth))
    }

    /// term = factor { ("*" | "/") factor }
    fn parse_term(&mut self) -> FormulaResult<Parsed> {
        let (mut left, mut depth) = self.parse_factor()?;

        while let Some(op) = self.match_operator(&Operator::MULTIPLICATIVE) {
            let (right, right_depth) = self.parse_factor()?;
            depth = parent_depth(depth.max(right_depth))?;
            left = AstNode::binary(op, left, right);
        }

        Ok((left, depth))
    }

    fn parse_factor(&mut self) -> FormulaResult<Parsed> {
        let token = match self.current() {
            Some(token) if !token.is_eof() => token,
            _ => return Err(FormulaError::UnexpectedToken("EOF".into())),
        };

        match token.kind {
            TokenKind::Number => {
                self.advance();
                token
                    .value
                    .parse::<f64>()
                    .map(|n| (AstNode::Number(n), 1))
                    .map_err(|_| FormulaError::InvalidNumber(token.value.clone()))
            }
            TokenKind::Operator if token.value == "(" => {
                self.advance();
                self.enter()?;
                let inner = self.parse_expression()?;
                if !self.check_operator(")") {
                    return Err(FormulaError::UnclosedGroup);
                }
                self.advance();
                self.leave();
                Ok(inner)
            }
            TokenKind::Function => {
                self.advance();
                self.parse_function_call(&token.value)
            }
            TokenKind::Ref => {
                self.advance();
                Ok((AstNode::Reference(token.value.clone()), 1))
            }
            TokenKind::Characters => {
                self.advance();
                Ok((AstNode::String(token.value.clone()), 1))
            }
            _ => Err(FormulaError::UnexpectedToken(token.value.clone())),
        }
    }

    fn parse_function_call(&mut self, name: &str) -> FormulaResult<Parsed> {
        if !self.check_operator("(") {
            return Err(FormulaError::MissingArgumentList);
        }
        self.advance();
        self.enter()?;

        let mut arguments = Vec::new();
        let mut deepest = 0;
        while !self.check_operator(")") {
            let (argument, depth) = self.parse_expression()?;
            deepest = deepest.max(depth);
            arguments.push(argument);
            if self.check_operator(",") {
                self.advance();
            } else {
                break;
            }
        }

        if !self.check_operator(")") {
            return Err(FormulaError::UnclosedArgumentList);
        }
        self.advance();
        self.leave();

        Ok((AstNode::function(name, arguments), parent_depth(deepest)?))
    }

    // === Helper methods ===

    fn enter(&mut self) -> FormulaResult<()> {
        self.nesting += 1;
        if self.nesting > MAX_NESTING_DEPTH {
            return Err(FormulaError::NestingTooDeep(MAX_NESTING_DEPTH));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.nesting -= 1;
    }

    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn at_end(&self) -> bool {
        self.current().map_or(true, Token::is_eof)
    }

    fn check_operator(&self, symbol: &str) -> bool {
        self.current().is_some_and(|t| t.is_operator(symbol))
    }

    /// Consume the current token if it is one of `ops`
    fn match_operator(&mut self, ops: &[Operator]) -> Option<Operator> {
        let token = self.current()?;
        if token.kind != TokenKind::Operator {
            return None;
        }
        let op = Operator::from_symbol(&token.value).filter(|op| ops.contains(op))?;
        self.advance();
        Some(op)
    }

    fn describe_current(&self) -> String {
        match self.current() {
            Some(token) if !token.is_eof() => token.value.clone(),
            _ => "EOF".to_string(),
        }
    }
}

/// Depth of a node whose deepest child has `child_depth`
fn parent_depth(child_depth: usize) -> FormulaResult<usize> {
    let depth = child_depth + 1;
    if depth > MAX_NESTING_DEPTH {
        return Err(FormulaError::NestingTooDeep(MAX_NESTING_DEPTH));
    }
    Ok(depth)
}
