//! Tests for editing cells and recalculating sheets

use gridcalc::prelude::*;
use gridcalc::{apply_edits, parse_script, EditError};
use pretty_assertions::assert_eq;

/// Test editing a mix of literal and formula cells
#[test]
fn test_edit_cells() {
    let mut sheet = Sheet::default();

    assert_eq!(sheet.edit_cell("A1", "Quantity").unwrap(), "Quantity");
    assert_eq!(sheet.edit_cell("B1", "3").unwrap(), "3");
    assert_eq!(sheet.edit_cell("C1", "=$B1*4").unwrap(), "12");
    assert_eq!(sheet.edit_cell("$d$1", "=$C1/8").unwrap(), "1.5");

    let cell = sheet.cell("C1").unwrap().unwrap();
    assert_eq!(cell.input, "=$B1*4");
    assert_eq!(cell.display, "12");
}

/// Test that re-entering a plain numeric display changes nothing
#[test]
fn test_plain_value_is_idempotent() {
    let mut sheet = Sheet::new(5, 5);
    let first = sheet.edit_cell("A1", "42").unwrap();
    let second = sheet.edit_cell("A1", &first).unwrap();

    assert_eq!(first, second);
    assert_eq!(sheet.input_at(0, 0), Some("42"));
}

/// Test clearing a cell
#[test]
fn test_clear_cell() {
    let mut sheet = Sheet::new(5, 5);
    sheet.edit_cell("A1", "1").unwrap();
    sheet.edit_cell("A1", "").unwrap();

    assert_eq!(sheet.cell_count(), 0);
    assert_eq!(sheet.edit_cell("B1", "=$A1").unwrap(), "");
}

/// Test recalculation over a chain of formulas
#[test]
fn test_recalculate_chain() {
    let mut sheet = Sheet::new(10, 3);
    sheet.edit_cell("A1", "1").unwrap();
    for row in 2..=5 {
        let formula = format!("=$A{}+1", row - 1);
        sheet.edit_cell(&format!("A{}", row), &formula).unwrap();
    }
    assert_eq!(sheet.display_at(4, 0), Some("5"));

    sheet.edit_cell("A1", "100").unwrap();
    assert_eq!(sheet.display_at(4, 0), Some("5"));

    let stats = sheet.recalculate().unwrap();
    assert_eq!(stats.formula_count, 4);
    assert_eq!(stats.cells_calculated, 4);
    assert_eq!(stats.errors, 0);
    assert_eq!(sheet.display_at(4, 0), Some("104"));
}

/// Test that recalculation reports failing cells
#[test]
fn test_recalculate_counts_errors() {
    let mut sheet = Sheet::new(5, 5);
    sheet.edit_cell("A1", "=1/0").unwrap();
    sheet.edit_cell("A2", "=$A2").unwrap();
    sheet.edit_cell("A3", "=2*2").unwrap();

    let stats = sheet.recalculate().unwrap();
    assert_eq!(stats.formula_count, 3);
    assert_eq!(stats.errors, 2);
    assert_eq!(sheet.display_at(2, 0), Some("4"));
}

/// Test recalculating on every edit
#[test]
fn test_recalculate_on_edit_option() {
    let options = CalculationOptions {
        recalculate_on_edit: true,
        ..Default::default()
    };

    let mut sheet = Sheet::new(5, 5);
    sheet.edit_cell_with_options(0, 0, "1", &options).unwrap();
    sheet.edit_cell_with_options(0, 1, "=SUM($A1, $A1)", &options).unwrap();
    sheet.edit_cell_with_options(0, 0, "21", &options).unwrap();

    assert_eq!(sheet.display_at(0, 1), Some("42"));
}

/// Test replaying an edit script
#[test]
fn test_edit_script() {
    let script = "\
# budget
A1 Rent
B1 1200
A2 Food
B2 450.5
B3 =SUM($B1, $B2)
B4 =AVERAGE($B1, $B2)
";
    let mut sheet = Sheet::new(10, 4);
    let edits = parse_script(script).unwrap();
    let displays = apply_edits(&mut sheet, &edits, &CalculationOptions::default()).unwrap();

    assert_eq!(
        displays,
        vec!["Rent", "1200", "Food", "450.5", "1650.5", "825.25"]
    );
    assert_eq!(sheet.display_at(3, 1), Some("825.25"));
}

/// Test script errors carry their line number
#[test]
fn test_edit_script_errors() {
    assert!(matches!(
        parse_script("A1 1\n12 x\n"),
        Err(EditError::Malformed { line: 2, .. })
    ));

    let mut sheet = Sheet::new(2, 2);
    let edits = parse_script("A1 1\nB2 2\nC3 3").unwrap();
    let err = apply_edits(&mut sheet, &edits, &CalculationOptions::default()).unwrap_err();
    assert_eq!(err.to_string(), "Cannot apply edit at line 3: Cell C3 is outside the 2x2 sheet");
}
