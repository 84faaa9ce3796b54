//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellValue`] - The scalar value of a literal cell
//! - [`CellData`] - Raw input and display text of a cell

mod address;
mod value;

pub use address::CellAddress;
pub use value::{format_number, CellData, CellValue};
