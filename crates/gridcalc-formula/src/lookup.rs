//! Cell lookup capability
//!
//! The evaluator's only window onto the host grid. It receives the lookup as a
//! shared borrow and never mutates it.

use crate::ast::AstNode;
use crate::engine::formula_body;
use crate::error::{FormulaError, FormulaResult};
use crate::parser::parse;
use crate::token::tokenize;
use gridcalc_core::{CellValue, Sheet};
use log::trace;
use std::collections::HashMap;

/// What a referenced cell holds
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    /// A literal value, returned to the formula unchanged
    Value(CellValue),
    /// A parsed formula, evaluated transitively
    Formula(AstNode),
}

impl From<CellValue> for CellContent {
    fn from(value: CellValue) -> Self {
        CellContent::Value(value)
    }
}

impl From<AstNode> for CellContent {
    fn from(ast: AstNode) -> Self {
        CellContent::Formula(ast)
    }
}

/// Resolve a reference address to cell content
pub trait CellLookup {
    /// Look up a cell by address as written in the formula (e.g. `$A1`)
    ///
    /// `Ok(None)` means the cell is empty.
    fn get_cell(&self, address: &str) -> FormulaResult<Option<CellContent>>;
}

impl CellLookup for Sheet {
    fn get_cell(&self, address: &str) -> FormulaResult<Option<CellContent>> {
        let cell = self
            .cell(address)
            .map_err(|_| FormulaError::InvalidReference(address.to_string()))?;

        let Some(cell) = cell else {
            return Ok(None);
        };

        trace!("Resolved {} to {:?}", address, cell.input);

        match formula_body(&cell.input) {
            Some(body) => {
                let tokens = tokenize(body)?;
                Ok(Some(CellContent::Formula(parse(&tokens)?)))
            }
            None => Ok(Some(CellContent::Value(CellValue::from_input(&cell.input)))),
        }
    }
}

/// Address-keyed map of prepared contents, mostly for tests and embedding
///
/// Keys are matched exactly as written in the formula.
impl CellLookup for HashMap<String, CellContent> {
    fn get_cell(&self, address: &str) -> FormulaResult<Option<CellContent>> {
        Ok(self.get(address).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Operator;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sheet_lookup_literals() {
        let mut sheet = Sheet::new(10, 5);
        sheet.set_input_at(0, 0, "42").unwrap();
        sheet.set_input_at(1, 0, "hello").unwrap();

        assert_eq!(
            sheet.get_cell("$A1").unwrap(),
            Some(CellContent::Value(CellValue::Number(42.0)))
        );
        assert_eq!(
            sheet.get_cell("a2").unwrap(),
            Some(CellContent::Value(CellValue::Text("hello".into())))
        );
        assert_eq!(sheet.get_cell("B1").unwrap(), None);
    }

    #[test]
    fn test_sheet_lookup_formula() {
        let mut sheet = Sheet::new(10, 5);
        sheet.set_input_at(0, 1, "= 1 + 2 ").unwrap();

        assert_eq!(
            sheet.get_cell("$B1").unwrap(),
            Some(CellContent::Formula(AstNode::binary(
                Operator::Add,
                AstNode::Number(1.0),
                AstNode::Number(2.0)
            )))
        );
    }

    #[test]
    fn test_sheet_lookup_propagates_formula_errors() {
        let mut sheet = Sheet::new(10, 5);
        sheet.set_input_at(0, 0, "=@").unwrap();
        sheet.set_input_at(1, 0, "=(1").unwrap();

        assert_eq!(
            sheet.get_cell("A1").unwrap_err(),
            FormulaError::UnknownCharacter('@')
        );
        assert_eq!(sheet.get_cell("A2").unwrap_err(), FormulaError::UnclosedGroup);
    }

    #[test]
    fn test_sheet_lookup_matches_cell_input_rules() {
        let mut sheet = Sheet::new(10, 5);
        sheet.set_input_at(0, 0, "=").unwrap();
        sheet.set_input_at(1, 0, "=\t7 ").unwrap();
        let deep = format!("={}1{}", "(".repeat(1_000), ")".repeat(1_000));
        sheet.set_input_at(2, 0, &deep).unwrap();

        assert_eq!(
            sheet.get_cell("A1").unwrap_err(),
            FormulaError::UnexpectedToken("EOF".into())
        );
        assert_eq!(
            sheet.get_cell("A2").unwrap(),
            Some(CellContent::Formula(AstNode::Number(7.0)))
        );
        assert_eq!(
            sheet.get_cell("A3").unwrap_err(),
            FormulaError::NestingTooDeep(crate::parser::MAX_NESTING_DEPTH)
        );
    }

    #[test]
    fn test_sheet_lookup_invalid_reference() {
        let sheet = Sheet::new(10, 5);
        assert_eq!(
            sheet.get_cell("$Z1").unwrap_err(),
            FormulaError::InvalidReference("$Z1".into())
        );
        assert_eq!(
            sheet.get_cell("A0").unwrap_err(),
            FormulaError::InvalidReference("A0".into())
        );
    }

    #[test]
    fn test_map_lookup() {
        let mut cells = HashMap::new();
        cells.insert("$A1".to_string(), CellContent::from(CellValue::Number(1.0)));

        assert_eq!(
            cells.get_cell("$A1").unwrap(),
            Some(CellContent::Value(CellValue::Number(1.0)))
        );
        assert_eq!(cells.get_cell("A1").unwrap(), None);
    }
}
