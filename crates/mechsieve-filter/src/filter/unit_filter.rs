//! The composite unit filter and its editable draft.

use std::collections::BTreeMap;

use mechsieve_catalog_rs::{EntityType, UnitType};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::ast::ExpressionTree;
use super::builder::ExpressionBuilder;
use super::criteria::{
    CategorySet, MatchMode, QuirkCriterion, RangePredicate, TextMatch, TriState,
    TriStateSelection,
};
use super::error::{FilterError, FilterResult};
use super::fields::{BoolField, CategoryField, RangeField};
use super::lexer::tokenize;
use super::token::Token;

/// Every criterion a unit search can apply.
///
/// A filter accepts a unit when every active criterion accepts it. Inactive
/// criteria (open ranges, unset tri-states, empty lists, blank text, the empty
/// equipment tree) accept everything, so `UnitFilter::new()` matches the whole
/// catalog. A disabled filter also matches everything regardless of its
/// criteria.
///
/// Filters are plain owned values: `clone()` gives an independent working
/// copy whose edits never reach the original.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitFilter {
    pub(crate) disabled: bool,
    pub(crate) ranges: BTreeMap<RangeField, RangePredicate>,
    pub(crate) flags: BTreeMap<BoolField, TriState>,
    pub(crate) unit_types: BTreeMap<UnitType, TriState>,
    pub(crate) include_mask: EntityType,
    pub(crate) exclude_mask: EntityType,
    pub(crate) categories: BTreeMap<CategoryField, CategorySet>,
    pub(crate) quirks: QuirkCriterion,
    pub(crate) weapon_quirks: QuirkCriterion,
    pub(crate) source: TextMatch,
    pub(crate) name: TextMatch,
    pub(crate) mul_id: Option<i32>,
    pub(crate) equipment: ExpressionTree,
    pub(crate) check_equipment: bool,
}

impl Default for UnitFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitFilter {
    /// Creates an enabled filter with no active criteria.
    pub fn new() -> Self {
        Self {
            disabled: false,
            ranges: BTreeMap::new(),
            flags: BTreeMap::new(),
            unit_types: BTreeMap::new(),
            include_mask: EntityType::NONE,
            exclude_mask: EntityType::NONE,
            categories: BTreeMap::new(),
            quirks: QuirkCriterion::default(),
            weapon_quirks: QuirkCriterion::default(),
            source: TextMatch::default(),
            name: TextMatch::default(),
            mul_id: None,
            equipment: ExpressionTree::empty(),
            check_equipment: true,
        }
    }

    /// Creates a disabled filter, the "no filter active" state.
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::new()
        }
    }

    // ==================== Ranges ====================

    /// Sets a range from bound text. Empty text leaves that side open.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidRangeBound` for non-numeric text; the
    /// previous range is kept.
    pub fn set_range(&mut self, field: RangeField, low: &str, high: &str) -> FilterResult<()> {
        let predicate = RangePredicate::parse(field.name(), low, high)?;
        self.set_range_bounds(field, predicate);
        Ok(())
    }

    /// Sets a range from numeric bounds.
    pub fn set_range_bounds(&mut self, field: RangeField, predicate: RangePredicate) {
        if predicate.is_active() {
            self.ranges.insert(field, predicate);
        } else {
            self.ranges.remove(&field);
        }
    }

    /// The range on `field`; unbounded if none was set.
    pub fn range(&self, field: RangeField) -> RangePredicate {
        self.ranges.get(&field).copied().unwrap_or_default()
    }

    // ==================== Tri-states ====================

    pub fn set_flag(&mut self, field: BoolField, state: TriState) {
        if state.is_set() {
            self.flags.insert(field, state);
        } else {
            self.flags.remove(&field);
        }
    }

    pub fn flag(&self, field: BoolField) -> TriState {
        self.flags.get(&field).copied().unwrap_or_default()
    }

    /// Sets one unit type's tri-state and recomputes the type masks.
    ///
    /// Included types are alternatives: a unit passes when it carries any
    /// included bit. A unit carrying any excluded bit is rejected.
    pub fn set_unit_type(&mut self, unit_type: UnitType, state: TriState) {
        if state.is_set() {
            self.unit_types.insert(unit_type, state);
        } else {
            self.unit_types.remove(&unit_type);
        }

        let mask = |wanted: TriState| {
            self.unit_types
                .iter()
                .filter(|(_, state)| **state == wanted)
                .fold(EntityType::NONE, |mask, (t, _)| mask | t.entity_type())
        };
        let (include, exclude) = (mask(TriState::Include), mask(TriState::Exclude));
        self.include_mask = include;
        self.exclude_mask = exclude;
    }

    pub fn unit_type(&self, unit_type: UnitType) -> TriState {
        self.unit_types.get(&unit_type).copied().unwrap_or_default()
    }

    /// Bits a unit must intersect, `NONE` when no type is included.
    pub fn include_mask(&self) -> EntityType {
        self.include_mask
    }

    /// Bits a unit must not intersect.
    pub fn exclude_mask(&self) -> EntityType {
        self.exclude_mask
    }

    // ==================== Categories and quirks ====================

    pub fn set_category(&mut self, field: CategoryField, set: CategorySet) {
        if set.is_active() {
            self.categories.insert(field, set);
        } else {
            self.categories.remove(&field);
        }
    }

    pub fn category(&self, field: CategoryField) -> Option<&CategorySet> {
        self.categories.get(&field)
    }

    pub fn set_quirks(&mut self, criterion: QuirkCriterion) {
        self.quirks = criterion;
    }

    pub fn quirks(&self) -> &QuirkCriterion {
        &self.quirks
    }

    pub fn set_weapon_quirks(&mut self, criterion: QuirkCriterion) {
        self.weapon_quirks = criterion;
    }

    pub fn weapon_quirks(&self) -> &QuirkCriterion {
        &self.weapon_quirks
    }

    // ==================== Text ====================

    /// Every whitespace-separated word must occur in the unit's source.
    pub fn set_source(&mut self, text: &str) {
        self.source = TextMatch::new(text);
    }

    /// Every whitespace-separated word must occur in "chassis model".
    pub fn set_name(&mut self, text: &str) {
        self.name = TextMatch::new(text);
    }

    /// Sets the MUL id from text; blank text clears it.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidMulId` for non-integer text; the previous
    /// id is kept.
    pub fn set_mul_id(&mut self, text: &str) -> FilterResult<()> {
        let trimmed = text.trim();
        self.mul_id = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.parse().map_err(|_| FilterError::InvalidMulId {
                text: text.to_string(),
            })?)
        };
        Ok(())
    }

    pub fn mul_id(&self) -> Option<i32> {
        self.mul_id
    }

    // ==================== Equipment ====================

    /// Compiles `tokens` and installs the tree.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::MalformedExpression` if the stream does not
    /// compile; the previous tree stays in place.
    pub fn set_equipment_tokens(&mut self, tokens: &[Token]) -> FilterResult<()> {
        match ExpressionTree::compile(tokens) {
            Ok(tree) => {
                debug!(expression = %tree, "equipment expression compiled");
                self.equipment = tree;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "equipment expression rejected, keeping previous");
                Err(e)
            }
        }
    }

    pub fn set_equipment(&mut self, tree: ExpressionTree) {
        self.equipment = tree;
    }

    pub fn equipment(&self) -> &ExpressionTree {
        &self.equipment
    }

    pub fn equipment_mut(&mut self) -> &mut ExpressionTree {
        &mut self.equipment
    }

    /// Whether the equipment tree takes part in evaluation.
    pub fn set_check_equipment(&mut self, check: bool) {
        self.check_equipment = check;
    }

    pub fn check_equipment(&self) -> bool {
        self.check_equipment
    }

    // ==================== State ====================

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Returns true if the filter cannot reject any unit.
    pub fn is_unconstrained(&self) -> bool {
        self.disabled || self.active_criteria().is_empty()
    }

    /// One line per active criterion, for display.
    pub fn active_criteria(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.disabled {
            return lines;
        }

        if let Some(id) = self.mul_id {
            lines.push(format!("mul_id = {id}"));
        }
        for (unit_type, state) in &self.unit_types {
            lines.push(format!("type {unit_type}: {}", describe_state(*state)));
        }
        for (field, state) in &self.flags {
            lines.push(format!("{field}: {}", describe_state(*state)));
        }
        for (field, range) in &self.ranges {
            let (low, high) = range.to_text();
            let low = if low.is_empty() { "*".to_string() } else { low };
            let high = if high.is_empty() { "*".to_string() } else { high };
            lines.push(format!("{field} in {low}..{high}"));
        }
        for (field, set) in &self.categories {
            if !set.include.is_empty() {
                lines.push(format!("{field} in [{}]", set.include.join(", ")));
            }
            if !set.exclude.is_empty() {
                lines.push(format!("{field} not in [{}]", set.exclude.join(", ")));
            }
        }
        if self.source.is_active() {
            lines.push(format!("source contains \"{}\"", self.source.text()));
        }
        if self.name.is_active() {
            lines.push(format!("name contains \"{}\"", self.name.text()));
        }
        describe_quirks("quirks", &self.quirks, &mut lines);
        describe_quirks("weapon quirks", &self.weapon_quirks, &mut lines);
        if self.check_equipment && !self.equipment.is_empty() {
            lines.push(format!("equipment: {}", self.equipment));
        }
        lines
    }
}

fn describe_state(state: TriState) -> &'static str {
    match state {
        TriState::Unset => "any",
        TriState::Include => "yes",
        TriState::Exclude => "no",
    }
}

fn describe_quirks(label: &str, criterion: &QuirkCriterion, lines: &mut Vec<String>) {
    let mode = |m: MatchMode| match m {
        MatchMode::AllOf => "all of",
        MatchMode::AnyOf => "any of",
    };
    if !criterion.include.is_empty() {
        lines.push(format!(
            "{label} {} [{}]",
            mode(criterion.include_mode),
            criterion.include.join(", ")
        ));
    }
    if !criterion.exclude.is_empty() {
        lines.push(format!(
            "{label} none of {} [{}]",
            mode(criterion.exclude_mode),
            criterion.exclude.join(", ")
        ));
    }
}

// ==================== FilterDraft ====================

/// Raw bound text for one range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeText {
    pub low: String,
    pub high: String,
}

impl RangeText {
    pub fn new(low: impl Into<String>, high: impl Into<String>) -> Self {
        Self {
            low: low.into(),
            high: high.into(),
        }
    }
}

/// Quirk toggles plus the two match modes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuirkDraft {
    pub selection: TriStateSelection,
    pub include_mode: MatchMode,
    pub exclude_mode: MatchMode,
}

impl Default for QuirkDraft {
    fn default() -> Self {
        Self {
            selection: TriStateSelection::new(),
            include_mode: MatchMode::AllOf,
            exclude_mode: MatchMode::AnyOf,
        }
    }
}

impl QuirkDraft {
    fn to_criterion(&self) -> QuirkCriterion {
        let set = self.selection.to_category_set();
        QuirkCriterion {
            include: set.include,
            exclude: set.exclude,
            include_mode: self.include_mode,
            exclude_mode: self.exclude_mode,
        }
    }
}

/// Editable, serializable filter state as a user enters it.
///
/// Everything is kept as raw text and tri-state toggles; [`FilterDraft::build`]
/// validates it all at once and produces a [`UnitFilter`]. Drafts load from
/// TOML query files:
///
/// ```toml
/// equipment = "2 MediumLaser & 1 SRM6"
///
/// [ranges]
/// tonnage = { low = "20", high = "55" }
///
/// [unit_types]
/// mek = "include"
///
/// [categories.engine_type]
/// Fusion = "include"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterDraft {
    pub disabled: bool,
    pub source: String,
    pub name: String,
    pub mul_id: String,
    /// Textual equipment expression; see [`tokenize`](super::tokenize).
    pub equipment: String,
    pub check_equipment: bool,
    /// Keyed by [`RangeField`] name.
    pub ranges: BTreeMap<String, RangeText>,
    /// Keyed by [`BoolField`] name.
    pub flags: BTreeMap<String, TriState>,
    /// Keyed by [`UnitType`] name.
    pub unit_types: BTreeMap<String, TriState>,
    /// Keyed by [`CategoryField`] name.
    pub categories: BTreeMap<String, TriStateSelection>,
    pub quirks: QuirkDraft,
    pub weapon_quirks: QuirkDraft,
}

impl Default for FilterDraft {
    fn default() -> Self {
        Self {
            disabled: false,
            source: String::new(),
            name: String::new(),
            mul_id: String::new(),
            equipment: String::new(),
            check_equipment: true,
            ranges: BTreeMap::new(),
            flags: BTreeMap::new(),
            unit_types: BTreeMap::new(),
            categories: BTreeMap::new(),
            quirks: QuirkDraft::default(),
            weapon_quirks: QuirkDraft::default(),
        }
    }
}

impl FilterDraft {
    /// Sets the equipment expression from tokens.
    pub fn set_equipment_tokens(&mut self, tokens: &[Token]) {
        self.equipment = super::token::render_tokens(tokens);
    }

    /// Validates every field and builds the filter.
    ///
    /// # Errors
    ///
    /// Returns the first error found: `InvalidRangeBound`, `InvalidMulId`,
    /// `MalformedExpression`, `RejectedToken` or `UnknownValue`.
    pub fn build(&self) -> FilterResult<UnitFilter> {
        let mut filter = UnitFilter::new();
        filter.set_disabled(self.disabled);

        for (field, text) in &self.ranges {
            filter.set_range(field.parse()?, &text.low, &text.high)?;
        }
        for (field, state) in &self.flags {
            filter.set_flag(field.parse()?, *state);
        }
        for (unit_type, state) in &self.unit_types {
            filter.set_unit_type(parse_unit_type(unit_type)?, *state);
        }
        for (field, selection) in &self.categories {
            filter.set_category(field.parse()?, selection.to_category_set());
        }
        filter.set_quirks(self.quirks.to_criterion());
        filter.set_weapon_quirks(self.weapon_quirks.to_criterion());
        filter.set_source(&self.source);
        filter.set_name(&self.name);
        filter.set_mul_id(&self.mul_id)?;

        let builder = ExpressionBuilder::from_tokens(tokenize(&self.equipment)?)?;
        filter.set_equipment(builder.compile()?);
        filter.set_check_equipment(self.check_equipment);

        debug!(
            criteria = filter.active_criteria().len(),
            disabled = filter.is_disabled(),
            "filter built"
        );
        Ok(filter)
    }
}

/// Parses a unit type name, suggesting the closest one on failure.
pub fn parse_unit_type(text: &str) -> FilterResult<UnitType> {
    text.parse().map_err(|_: String| {
        FilterError::unknown_value("unit type", text, UnitType::ALL.iter().map(|t| t.as_str()))
    })
}
