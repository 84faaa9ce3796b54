//! Prelude module - common imports for gridcalc users
//!
//! ```rust
//! use gridcalc::prelude::*;
//! ```

pub use crate::{
    // Calculation types
    CalculationOptions,
    CalculationStats,
    // Cell types
    CellAddress,
    CellData,
    CellValue,
    // Formula types
    EvaluationContext,
    EvaluationOptions,
    FormulaError,
    FormulaValue,

    // Error types
    Error,
    Result,

    // Main types
    Sheet,
    // Extension traits
    SheetCalculationExt,
};
