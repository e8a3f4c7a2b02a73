//! Composite unit filtering for mech catalogs.
//!
//! This crate evaluates multi-criteria queries over the units of a
//! [`mechsieve_catalog_rs::Catalog`]. See the [`filter`] module for the
//! filter model and the equipment expression language.

pub mod filter;

pub use filter::{
    ExpressionBuilder, ExpressionTree, FilterDraft, FilterError, FilterEvaluator, FilterResult,
    Token, UnitFilter,
};
