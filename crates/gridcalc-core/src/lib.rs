//! # gridcalc-core
//!
//! Core data structures for the gridcalc spreadsheet engine.
//!
//! This crate provides the fundamental types used throughout gridcalc:
//! - [`CellAddress`] - Cell addressing in A1 notation
//! - [`CellValue`] - Scalar values held by literal cells
//! - [`CellData`] - A cell's raw input and display text
//! - [`Sheet`] - The grid that owns every cell
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::{CellAddress, Sheet};
//!
//! let mut sheet = Sheet::new(10, 5);
//! let addr = CellAddress::parse("B2").unwrap();
//! sheet.set_input_at(addr.row, addr.col, "42").unwrap();
//!
//! assert_eq!(sheet.display_at(1, 1), Some("42"));
//! ```

pub mod cell;
pub mod error;
pub mod sheet;

// Re-exports for convenience
pub use cell::{format_number, CellAddress, CellData, CellValue};
pub use error::{Error, Result};
pub use sheet::Sheet;

/// Maximum number of rows addressable by a reference (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns addressable by a reference (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Rows in a sheet created with [`Sheet::default`]
pub const DEFAULT_ROWS: u32 = 100;

/// Columns in a sheet created with [`Sheet::default`]
pub const DEFAULT_COLS: u16 = 26;
