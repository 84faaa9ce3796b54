//! Sheet type

use std::collections::BTreeMap;

use crate::cell::{CellAddress, CellData};
use crate::error::{Error, Result};
use crate::{DEFAULT_COLS, DEFAULT_ROWS};

/// A fixed-size grid of cells
///
/// The sheet exclusively owns its cells. Only non-empty cells are stored,
/// keyed by 0-based `(row, col)` so iteration is row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    /// Sheet name
    name: String,
    /// Number of rows in the grid
    rows: u32,
    /// Number of columns in the grid
    cols: u16,
    /// Cell storage
    cells: BTreeMap<(u32, u16), CellData>,
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl Sheet {
    /// Create an empty sheet with the given dimensions
    pub fn new(rows: u32, cols: u16) -> Self {
        Self::with_name("Sheet1", rows, cols)
    }

    /// Create an empty named sheet with the given dimensions
    pub fn with_name<S: Into<String>>(name: S, rows: u32, cols: u16) -> Self {
        Self {
            name: name.into(),
            rows,
            cols,
            cells: BTreeMap::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    /// Number of rows
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Check whether an address falls inside the grid
    pub fn contains(&self, addr: &CellAddress) -> bool {
        addr.row < self.rows && addr.col < self.cols
    }

    /// Header label for a column (A, B, ..., Z, AA, ...)
    pub fn column_label(col: u16) -> String {
        CellAddress::column_to_letters(col)
    }

    /// Change the grid dimensions, dropping cells that fall outside
    pub fn resize(&mut self, rows: u32, cols: u16) {
        self.rows = rows;
        self.cols = cols;
        self.cells.retain(|&(row, col), _| row < rows && col < cols);
    }

    // === Cell Access ===

    /// Get a cell by address string (e.g., "A1")
    pub fn cell(&self, address: &str) -> Result<Option<&CellData>> {
        let addr = self.resolve(address)?;
        Ok(self.cell_at(addr.row, addr.col))
    }

    /// Get a cell by row and column indices
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&CellData> {
        self.cells.get(&(row, col))
    }

    /// Raw input of a cell, if it has any
    pub fn input_at(&self, row: u32, col: u16) -> Option<&str> {
        self.cell_at(row, col).map(|c| c.input.as_str())
    }

    /// Display text of a cell, if it has any
    pub fn display_at(&self, row: u32, col: u16) -> Option<&str> {
        self.cell_at(row, col).map(|c| c.display.as_str())
    }

    /// Store raw input; the display mirrors it until something overwrites it
    ///
    /// Empty input clears the cell.
    pub fn set_input_at<S: Into<String>>(&mut self, row: u32, col: u16, input: S) -> Result<()> {
        self.check_bounds(row, col)?;
        let cell = CellData::new(input);
        if cell.is_empty() {
            self.cells.remove(&(row, col));
        } else {
            self.cells.insert((row, col), cell);
        }
        Ok(())
    }

    /// Overwrite the display text of an existing or new cell
    pub fn set_display_at<S: Into<String>>(
        &mut self,
        row: u32,
        col: u16,
        display: S,
    ) -> Result<()> {
        self.check_bounds(row, col)?;
        let cell = self.cells.entry((row, col)).or_default();
        cell.display = display.into();
        if cell.is_empty() {
            self.cells.remove(&(row, col));
        }
        Ok(())
    }

    /// Clear a cell
    pub fn clear_cell_at(&mut self, row: u32, col: u16) {
        self.cells.remove(&(row, col));
    }

    /// Iterate over all non-empty cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (CellAddress, &CellData)> {
        self.cells
            .iter()
            .map(|(&(row, col), data)| (CellAddress::new(row, col), data))
    }

    /// Iterate over cells whose input is a formula
    pub fn formula_cells(&self) -> impl Iterator<Item = (CellAddress, &CellData)> {
        self.cells().filter(|(_, data)| data.is_formula())
    }

    /// Number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Parse an address and make sure it lies inside the grid
    pub fn resolve(&self, address: &str) -> Result<CellAddress> {
        let addr = CellAddress::parse(address)?;
        self.check_bounds(addr.row, addr.col)?;
        Ok(addr)
    }

    fn check_bounds(&self, row: u32, col: u16) -> Result<()> {
        if row < self.rows && col < self.cols {
            Ok(())
        } else {
            Err(Error::OutOfSheet {
                address: CellAddress::new(row, col).to_string(),
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_sheet_is_empty() {
        let sheet = Sheet::default();
        assert_eq!(sheet.rows(), 100);
        assert_eq!(sheet.cols(), 26);
        assert_eq!(sheet.cell_count(), 0);
        assert_eq!(sheet.name(), "Sheet1");
    }

    #[test]
    fn test_set_and_read_input() {
        let mut sheet = Sheet::new(5, 5);
        sheet.set_input_at(1, 2, "hello").unwrap();

        assert_eq!(sheet.input_at(1, 2), Some("hello"));
        assert_eq!(sheet.display_at(1, 2), Some("hello"));
        assert_eq!(sheet.cell("C2").unwrap().unwrap().input, "hello");
        assert_eq!(sheet.cell("$c$2").unwrap().unwrap().input, "hello");
        assert!(sheet.cell("A1").unwrap().is_none());
    }

    #[test]
    fn test_display_overwrite() {
        let mut sheet = Sheet::new(5, 5);
        sheet.set_input_at(0, 0, "=1+1").unwrap();
        sheet.set_display_at(0, 0, "2").unwrap();

        let cell = sheet.cell_at(0, 0).unwrap();
        assert_eq!(cell.input, "=1+1");
        assert_eq!(cell.display, "2");
    }

    #[test]
    fn test_empty_input_clears() {
        let mut sheet = Sheet::new(5, 5);
        sheet.set_input_at(0, 0, "x").unwrap();
        sheet.set_input_at(0, 0, "").unwrap();
        assert_eq!(sheet.cell_count(), 0);
    }

    #[test]
    fn test_out_of_sheet() {
        let mut sheet = Sheet::new(2, 2);
        assert_eq!(
            sheet.set_input_at(2, 0, "x"),
            Err(Error::OutOfSheet {
                address: "A3".into(),
                rows: 2,
                cols: 2
            })
        );
        assert!(sheet.cell("C1").is_err());
        assert!(sheet.cell("A0").is_err());
    }

    #[test]
    fn test_iteration_is_row_major() {
        let mut sheet = Sheet::new(5, 5);
        sheet.set_input_at(1, 0, "=A1").unwrap();
        sheet.set_input_at(0, 3, "b").unwrap();
        sheet.set_input_at(0, 1, "a").unwrap();

        let order: Vec<String> = sheet.cells().map(|(a, _)| a.to_string()).collect();
        assert_eq!(order, vec!["B1", "D1", "A2"]);

        let formulas: Vec<String> = sheet.formula_cells().map(|(a, _)| a.to_string()).collect();
        assert_eq!(formulas, vec!["A2"]);
    }

    #[test]
    fn test_resize_drops_outside_cells() {
        let mut sheet = Sheet::new(5, 5);
        sheet.set_input_at(0, 0, "keep").unwrap();
        sheet.set_input_at(4, 4, "drop").unwrap();
        sheet.resize(3, 3);

        assert_eq!(sheet.cell_count(), 1);
        assert_eq!(sheet.input_at(0, 0), Some("keep"));
        assert!(sheet.set_input_at(4, 4, "x").is_err());
    }

    #[test]
    fn test_column_label() {
        assert_eq!(Sheet::column_label(0), "A");
        assert_eq!(Sheet::column_label(26), "AA");
    }
}
