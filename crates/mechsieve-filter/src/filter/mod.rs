//! Unit filters and the equipment expression language.
//!
//! A [`UnitFilter`] combines independent criteria over catalog units and
//! accepts a unit only when every active criterion does. One of those
//! criteria is an equipment expression: a boolean tree of quantity tests over
//! the unit's inventory.
//!
//! # Equipment expressions
//!
//! Expressions are token streams ([`Token`]) assembled by an
//! [`ExpressionBuilder`] and compiled into an [`ExpressionTree`]. They also
//! have a textual spelling, read by the [`Lexer`]:
//!
//! - `2 MediumLaser` - at least two of the equipment `MediumLaser`
//! - `<1 "Gauss Rifle"` - fewer than one, i.e. no Gauss rifle
//! - `6 class:missile` - at least six missile launchers of any kind, summed
//! - `&` / `and` - AND
//! - `|` / `or` - OR
//! - `()` - Grouping
//!
//! AND binds tighter than OR.
//!
//! # Other criteria
//!
//! - Inclusive numeric ranges ([`RangePredicate`] over a [`RangeField`])
//! - Tri-state flags ([`TriState`] over a [`BoolField`]) and unit types
//! - Include/exclude value lists ([`CategorySet`] over a [`CategoryField`])
//! - Quirk lists with all-of/any-of modes ([`QuirkCriterion`])
//! - Source and name words, and an exact MUL id
//!
//! # Example
//!
//! ```
//! use mechsieve_catalog_rs::Unit;
//! use mechsieve_filter_rs::filter::{ExpressionTree, UnitFilter};
//!
//! let unit = Unit::new("Hunchback", "HBK-4P")
//!     .with_equipment("MediumLaser", 8)
//!     .with_equipment("SmallLaser", 1);
//!
//! let mut filter = UnitFilter::new();
//! filter.set_equipment(ExpressionTree::parse("6 MediumLaser & <1 class:missile").unwrap());
//! assert!(filter.accepts(&unit).unwrap());
//! ```

mod ast;
mod builder;
mod criteria;
mod error;
mod evaluator;
mod fields;
mod lexer;
mod parser;
mod token;
mod unit_filter;

pub use ast::{same_equipment, ExpressionNode, ExpressionTree, Leaf};
pub use builder::ExpressionBuilder;
pub use criteria::{
    quirk_set, CategorySet, MatchMode, QuirkCriterion, RangePredicate, TextMatch, TriState,
    TriStateSelection,
};
pub use error::{FilterError, FilterResult};
pub use evaluator::FilterEvaluator;
pub use fields::{BoolField, CategoryField, RangeField};
pub use lexer::{parse_target, tokenize, Lexer};
pub use parser::ExpressionParser;
pub use token::{render_tokens, Comparison, Operand, Operator, Target, Token};
pub use unit_filter::{parse_unit_type, FilterDraft, QuirkDraft, RangeText, UnitFilter};

#[cfg(test)]
mod tests;
