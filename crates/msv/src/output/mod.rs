//! Output formatting utilities for the msv CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules by entity type:
//!
//! - [`units`] - Unit output formatting (search results, show)
//! - [`equipment`] - Equipment and weapon class listings
//! - [`expression`] - Compiled equipment expressions (explain, build)
//! - [`helpers`] - Common formatting utilities (truncation, tonnage, labels)

mod equipment;
mod expression;
pub mod helpers;
mod units;

// Units
pub use units::{
    format_search_json, format_search_table, format_unit_details_json,
    format_unit_details_table,
};

// Equipment
pub use equipment::{
    format_classes_json, format_classes_table, format_equipment_json, format_equipment_table,
};

// Expressions
pub use expression::{format_expression_json, format_expression_table};
