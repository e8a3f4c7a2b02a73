//! Filter evaluation against catalog units.
//!
//! This module provides [`UnitFilter::accepts`] for single units and the
//! [`FilterEvaluator`] for batches.
//!
//! # Example
//!
//! ```
//! use mechsieve_catalog_rs::Unit;
//! use mechsieve_filter_rs::filter::{FilterEvaluator, RangeField, UnitFilter};
//!
//! let mut filter = UnitFilter::new();
//! filter.set_range(RangeField::Tonnage, "", "50").unwrap();
//!
//! let mut light = Unit::new("Locust", "LCT-1V");
//! light.tonnage = 20.0;
//! let mut heavy = Unit::new("Atlas", "AS7-D");
//! heavy.tonnage = 100.0;
//!
//! let units = vec![light, heavy];
//! let matches = FilterEvaluator::new(&filter).filter_units(&units).unwrap();
//! assert_eq!(matches.len(), 1);
//! ```

use mechsieve_catalog_rs::{Inventory, Unit};
use rayon::prelude::*;
use tracing::{debug, trace};

use super::criteria::quirk_set;
use super::error::{FilterError, FilterResult};
use super::unit_filter::UnitFilter;

impl UnitFilter {
    /// Returns true if `unit` passes every active criterion.
    ///
    /// A disabled filter accepts every unit without looking at it.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidInventory` when the equipment tree is in
    /// use and the unit's inventory lists differ in length. The check happens
    /// before any other criterion, so a corrupt unit is reported whether or not
    /// a cheaper criterion would have rejected it.
    pub fn accepts(&self, unit: &Unit) -> FilterResult<bool> {
        if self.disabled {
            return Ok(true);
        }

        let inventory = if self.check_equipment && !self.equipment.is_empty() {
            Some(inventory_of(unit)?)
        } else {
            None
        };

        Ok(self.accepts_scalars(unit)
            && self.accepts_quirks(unit)
            && inventory.map_or(true, |inv| self.equipment.evaluate_inventory(&inv)))
    }

    /// Id, type, flag, range, category and text criteria, cheapest first.
    fn accepts_scalars(&self, unit: &Unit) -> bool {
        if self.mul_id.is_some_and(|id| unit.mul_id != Some(id)) {
            return false;
        }

        let bits = unit.entity_type;
        if !self.include_mask.is_empty() && !bits.intersects(self.include_mask) {
            return false;
        }
        if bits.intersects(self.exclude_mask) {
            return false;
        }

        if !self
            .flags
            .iter()
            .all(|(field, state)| state.test(field.value_of(unit)))
        {
            return false;
        }

        if !self
            .ranges
            .iter()
            .all(|(field, range)| range.contains(field.value_of(unit)))
        {
            return false;
        }

        if !self
            .categories
            .iter()
            .all(|(field, set)| set.accepts(field.value_of(unit)))
        {
            return false;
        }

        if self.source.is_active() && !self.source.matches(&unit.source) {
            return false;
        }
        if self.name.is_active() && !self.name.matches(&unit.display_name()) {
            return false;
        }

        true
    }

    fn accepts_quirks(&self, unit: &Unit) -> bool {
        if self.quirks.is_active() && !self.quirks.accepts(&quirk_set(&unit.quirks)) {
            return false;
        }
        if self.weapon_quirks.is_active()
            && !self.weapon_quirks.accepts(&quirk_set(&unit.weapon_quirks))
        {
            return false;
        }
        true
    }
}

fn inventory_of(unit: &Unit) -> FilterResult<Inventory<'_>> {
    unit.inventory().map_err(|e| FilterError::InvalidInventory {
        unit: unit.display_name(),
        names: e.names,
        quantities: e.quantities,
    })
}

/// Evaluates a [`UnitFilter`] against batches of units.
///
/// Every method keeps the units' original order. A unit with a corrupt
/// inventory aborts the batch with `FilterError::InvalidInventory`.
#[derive(Debug, Clone, Copy)]
pub struct FilterEvaluator<'a> {
    filter: &'a UnitFilter,
}

impl<'a> FilterEvaluator<'a> {
    /// Creates a new evaluator over `filter`.
    pub fn new(filter: &'a UnitFilter) -> Self {
        Self { filter }
    }

    /// Returns true if the unit matches the filter.
    pub fn matches(&self, unit: &Unit) -> FilterResult<bool> {
        let accepted = self.filter.accepts(unit)?;
        trace!(unit = %unit.display_name(), accepted, "unit evaluated");
        Ok(accepted)
    }

    /// Filters a slice of units, returning only those that match.
    pub fn filter_units<'b>(&self, units: &'b [Unit]) -> FilterResult<Vec<&'b Unit>> {
        let mut matched = Vec::new();
        for unit in units {
            if self.matches(unit)? {
                matched.push(unit);
            }
        }
        debug!(scanned = units.len(), matched = matched.len(), "batch filtered");
        Ok(matched)
    }

    /// Like [`filter_units`](Self::filter_units), spread across the rayon pool.
    pub fn par_filter_units<'b>(&self, units: &'b [Unit]) -> FilterResult<Vec<&'b Unit>> {
        let filter = self.filter;
        let flags = units
            .par_iter()
            .map(|unit| filter.accepts(unit))
            .collect::<FilterResult<Vec<bool>>>()?;

        let matched: Vec<&Unit> = units
            .iter()
            .zip(flags)
            .filter_map(|(unit, accepted)| accepted.then_some(unit))
            .collect();
        debug!(
            scanned = units.len(),
            matched = matched.len(),
            "batch filtered in parallel"
        );
        Ok(matched)
    }

    /// Returns at most `limit` matches, stopping the scan once they are found.
    pub fn first_matches<'b>(&self, units: &'b [Unit], limit: usize) -> FilterResult<Vec<&'b Unit>> {
        let mut matched = Vec::new();
        for unit in units {
            if matched.len() >= limit {
                break;
            }
            if self.matches(unit)? {
                matched.push(unit);
            }
        }
        Ok(matched)
    }

    /// Counts matching units without collecting them.
    pub fn count(&self, units: &[Unit]) -> FilterResult<usize> {
        let mut total = 0;
        for unit in units {
            if self.matches(unit)? {
                total += 1;
            }
        }
        Ok(total)
    }
}

#[cfg(test)]
#[path = "evaluator_tests.rs"]
mod tests;
