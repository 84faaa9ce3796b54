//! Sheet calculation
//!
//! Writes formula results back into a [`Sheet`]. Every evaluation reads cell
//! inputs, never cached displays, so a full recalculation gives the same result
//! in any order.
//!
//! # Example
//!
//! ```rust
//! use gridcalc::prelude::*;
//!
//! let mut sheet = Sheet::new(10, 5);
//! sheet.edit_cell("A1", "10").unwrap();
//! sheet.edit_cell("A2", "20").unwrap();
//! assert_eq!(sheet.edit_cell("A3", "=$A1+$A2").unwrap(), "30");
//!
//! // A3 is not refreshed by the edit below until the sheet is recalculated
//! sheet.edit_cell("A1", "15").unwrap();
//! let stats = sheet.recalculate().unwrap();
//! assert_eq!(stats.cells_calculated, 1);
//! assert_eq!(sheet.display_at(2, 0), Some("35"));
//! ```

use crate::{
    evaluate_formula, evaluate_input, formula_body, render_result, CellAddress, EvaluationContext,
    EvaluationOptions, Result, Sheet,
};
use log::{debug, warn};

/// Options for sheet calculation
#[derive(Debug, Clone, Default)]
pub struct CalculationOptions {
    /// Settings passed to every formula evaluation
    pub evaluation: EvaluationOptions,
    /// Recalculate every formula cell after each edit instead of only the
    /// edited cell (default: false)
    pub recalculate_on_edit: bool,
}

/// Statistics from a calculation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculationStats {
    /// Total number of formula cells
    pub formula_count: usize,
    /// Number of cells calculated
    pub cells_calculated: usize,
    /// Number of cells whose formula ended in an error
    pub errors: usize,
}

/// Extension trait for Sheet to add editing and calculation methods
pub trait SheetCalculationExt {
    /// Store new input in a cell and return its display text
    fn edit_cell(&mut self, address: &str, input: &str) -> Result<String>;

    /// Store new input by row and column and return its display text
    fn edit_cell_at(&mut self, row: u32, col: u16, input: &str) -> Result<String>;

    /// Store new input with custom options and return its display text
    fn edit_cell_with_options(
        &mut self,
        row: u32,
        col: u16,
        input: &str,
        options: &CalculationOptions,
    ) -> Result<String>;

    /// Recalculate all formulas with default options
    fn recalculate(&mut self) -> Result<CalculationStats>;

    /// Recalculate all formulas with custom options
    fn recalculate_with_options(&mut self, options: &CalculationOptions)
        -> Result<CalculationStats>;
}

impl SheetCalculationExt for Sheet {
    fn edit_cell(&mut self, address: &str, input: &str) -> Result<String> {
        let addr = self.resolve(address)?;
        self.edit_cell_at(addr.row, addr.col, input)
    }

    fn edit_cell_at(&mut self, row: u32, col: u16, input: &str) -> Result<String> {
        self.edit_cell_with_options(row, col, input, &CalculationOptions::default())
    }

    fn edit_cell_with_options(
        &mut self,
        row: u32,
        col: u16,
        input: &str,
        options: &CalculationOptions,
    ) -> Result<String> {
        self.set_input_at(row, col, input)?;

        if options.recalculate_on_edit {
            self.recalculate_with_options(options)?;
        } else {
            let display = {
                let ctx = EvaluationContext::new(&*self).with_options(options.evaluation);
                evaluate_input(input, &ctx)
            };
            self.set_display_at(row, col, display)?;
        }

        Ok(self.display_at(row, col).unwrap_or_default().to_string())
    }

    fn recalculate(&mut self) -> Result<CalculationStats> {
        self.recalculate_with_options(&CalculationOptions::default())
    }

    fn recalculate_with_options(
        &mut self,
        options: &CalculationOptions,
    ) -> Result<CalculationStats> {
        let mut stats = CalculationStats::default();

        // Phase 1: evaluate every formula against the current inputs
        let displays = {
            let ctx = EvaluationContext::new(&*self).with_options(options.evaluation);
            let mut displays: Vec<(CellAddress, String)> = Vec::new();

            for (addr, cell) in self.formula_cells() {
                stats.formula_count += 1;
                let Some(body) = formula_body(&cell.input) else {
                    continue;
                };

                let result = evaluate_formula(body, &ctx);
                if let Err(e) = &result {
                    warn!("Formula in {} failed: {}", addr, e);
                    stats.errors += 1;
                }
                displays.push((addr, render_result(&result)));
                stats.cells_calculated += 1;
            }

            displays
        };

        // Phase 2: write results back
        for (addr, display) in displays {
            self.set_display_at(addr.row, addr.col, display)?;
        }

        debug!(
            "Recalculated {} of {} formula cells ({} errors)",
            stats.cells_calculated, stats.formula_count, stats.errors
        );
        Ok(stats)
    }
}
