//! Tests for unit filter evaluation.

use super::*;
use crate::filter::{
    BoolField, CategoryField, CategorySet, MatchMode, Operand, QuirkCriterion, RangeField,
    Token, TriState,
};
use mechsieve_catalog_rs::{EntityType, UnitType};

// ==================== Test Helpers ====================

fn make_unit(chassis: &str, tonnage: f64) -> Unit {
    let mut unit = Unit::new(chassis, "Prime");
    unit.tonnage = tonnage;
    unit.entity_type = EntityType::MEK | EntityType::BIPED_MEK;
    unit
}

fn accepts(filter: &UnitFilter, unit: &Unit) -> bool {
    filter.accepts(unit).unwrap()
}

fn corrupt_unit() -> Unit {
    let mut unit = make_unit("Broken", 50.0);
    unit.equipment_names = vec!["Medium Laser".to_string(), "SRM 6".to_string()];
    unit.equipment_quantities = vec![2];
    unit
}

// ==================== Disabled / Unconstrained ====================

#[test]
fn test_unconstrained_filter_accepts_everything() {
    let filter = UnitFilter::new();
    assert!(accepts(&filter, &make_unit("Atlas", 100.0)));
    assert!(accepts(&filter, &Unit::default()));
}

#[test]
fn test_disabled_filter_ignores_criteria() {
    let mut filter = UnitFilter::new();
    filter.set_range(RangeField::Tonnage, "", "20").unwrap();
    filter.set_flag(BoolField::Omni, TriState::Include);
    filter.set_disabled(true);

    assert!(accepts(&filter, &make_unit("Atlas", 100.0)));
}

#[test]
fn test_disabled_filter_skips_inventory_check() {
    let mut filter = UnitFilter::disabled();
    filter
        .set_equipment_tokens(&[Operand::at_least("Medium Laser", 1).into()])
        .unwrap();
    assert!(accepts(&filter, &corrupt_unit()));
}

// ==================== Ranges ====================

#[test]
fn test_range_inclusivity() {
    let mut filter = UnitFilter::new();
    filter.set_range(RangeField::Tonnage, "20", "20").unwrap();
    assert!(accepts(&filter, &make_unit("Locust", 20.0)));
    assert!(!accepts(&filter, &make_unit("Odd", 19.0)));
    assert!(!accepts(&filter, &make_unit("Odd", 21.0)));

    filter.set_range(RangeField::Tonnage, "", "50").unwrap();
    assert!(accepts(&filter, &make_unit("Zero", 0.0)));
    assert!(accepts(&filter, &make_unit("Centurion", 50.0)));
    assert!(!accepts(&filter, &make_unit("Catapult", 65.0)));
}

#[test]
fn test_transport_range() {
    let mut carrier = make_unit("Carrier", 80.0);
    carrier.transport.battle_armor.bays = 2;
    let plain = make_unit("Plain", 80.0);

    let mut filter = UnitFilter::new();
    filter.set_range(RangeField::BattleArmorBays, "1", "").unwrap();
    assert!(accepts(&filter, &carrier));
    assert!(!accepts(&filter, &plain));
}

// ==================== Tri-state flags ====================

#[test]
fn test_flags() {
    let mut omni = make_unit("Mad Cat", 75.0);
    omni.omni = true;
    let standard = make_unit("Marauder", 75.0);

    let mut filter = UnitFilter::new();
    filter.set_flag(BoolField::Omni, TriState::Include);
    assert!(accepts(&filter, &omni));
    assert!(!accepts(&filter, &standard));

    filter.set_flag(BoolField::Omni, TriState::Exclude);
    assert!(!accepts(&filter, &omni));
    assert!(accepts(&filter, &standard));

    filter.set_flag(BoolField::Omni, TriState::Unset);
    assert!(accepts(&filter, &omni));
    assert!(accepts(&filter, &standard));
}

// ==================== Entity-type masks ====================

#[test]
fn test_unit_type_include_is_any_of() {
    let mek = make_unit("Atlas", 100.0);
    let mut tank = make_unit("Demolisher", 80.0);
    tank.entity_type = EntityType::TANK;
    let mut fighter = make_unit("Stuka", 100.0);
    fighter.entity_type = EntityType::AEROSPACE_FIGHTER;

    let mut filter = UnitFilter::new();
    filter.set_unit_type(UnitType::Mek, TriState::Include);
    filter.set_unit_type(UnitType::Tank, TriState::Include);

    assert!(accepts(&filter, &mek));
    assert!(accepts(&filter, &tank));
    assert!(!accepts(&filter, &fighter));
}

#[test]
fn test_unit_type_exclude() {
    let biped = make_unit("Atlas", 100.0);
    let mut quad = make_unit("Goliath", 80.0);
    quad.entity_type = EntityType::MEK | EntityType::QUAD_MEK;

    let mut filter = UnitFilter::new();
    filter.set_unit_type(UnitType::Mek, TriState::Include);
    filter.set_unit_type(UnitType::QuadMek, TriState::Exclude);

    assert!(accepts(&filter, &biped));
    assert!(!accepts(&filter, &quad));
}

// ==================== Categories ====================

#[test]
fn test_category_include_exclude_independence() {
    let mut unit = make_unit("Atlas", 100.0);
    unit.engine_type = "A".to_string();

    let mut filter = UnitFilter::new();
    filter.set_category(CategoryField::EngineType, CategorySet::new(["A"], ["A"]));
    assert!(!accepts(&filter, &unit));

    filter.set_category(CategoryField::EngineType, CategorySet::new(["B"], ["C"]));
    assert!(!accepts(&filter, &unit));

    filter.set_category(CategoryField::EngineType, CategorySet::new(["a", "B"], ["C"]));
    assert!(accepts(&filter, &unit));
}

// ==================== Quirks ====================

#[test]
fn test_quirk_criteria() {
    let mut unit = make_unit("Atlas", 100.0);
    unit.quirks = vec!["Command Mek".to_string(), "Distracting".to_string()];
    unit.weapon_quirks = vec!["Accurate Weapon".to_string()];

    let mut filter = UnitFilter::new();
    filter.set_quirks(QuirkCriterion {
        include: vec!["command mek".into()],
        exclude: vec!["Rugged".into()],
        ..Default::default()
    });
    assert!(accepts(&filter, &unit));

    filter.set_weapon_quirks(QuirkCriterion {
        exclude: vec!["Accurate Weapon".into(), "Jettison-Capable".into()],
        exclude_mode: MatchMode::AllOf,
        ..Default::default()
    });
    assert!(accepts(&filter, &unit));

    filter.set_weapon_quirks(QuirkCriterion {
        exclude: vec!["Accurate Weapon".into(), "Jettison-Capable".into()],
        exclude_mode: MatchMode::AnyOf,
        ..Default::default()
    });
    assert!(!accepts(&filter, &unit));
}

// ==================== Text ====================

#[test]
fn test_source_and_name_text() {
    let mut unit = make_unit("Mad Cat", 75.0);
    unit.source = "Technical Readout: 3050".to_string();

    let mut filter = UnitFilter::new();
    filter.set_source("readout 3050");
    assert!(accepts(&filter, &unit));

    filter.set_source("readout 3058");
    assert!(!accepts(&filter, &unit));

    filter.set_source("   ");
    filter.set_name("cat prime");
    assert!(accepts(&filter, &unit));
    filter.set_name("timber");
    assert!(!accepts(&filter, &unit));
}

#[test]
fn test_mul_id() {
    let mut unit = make_unit("Atlas", 100.0);
    unit.mul_id = Some(140);
    let unknown = make_unit("Custom", 100.0);

    let mut filter = UnitFilter::new();
    filter.set_mul_id("140").unwrap();
    assert!(accepts(&filter, &unit));
    assert!(!accepts(&filter, &unknown));
}

// ==================== Equipment ====================

#[test]
fn test_end_to_end_equipment() {
    let unit = make_unit("Hunchback", 50.0)
        .with_equipment("Medium Laser", 2)
        .with_equipment("SRM 6", 1);

    let mut filter = UnitFilter::new();
    filter
        .set_equipment_tokens(&[
            Operand::at_least("MediumLaser", 2).into(),
            Token::AND,
            Operand::at_least("SRM6", 1).into(),
        ])
        .unwrap();
    assert!(accepts(&filter, &unit));

    filter.equipment_mut().leaves_mut()[1].quantity = 2;
    assert!(!accepts(&filter, &unit));
}

#[test]
fn test_check_equipment_flag() {
    let unit = make_unit("Atlas", 100.0);
    let mut filter = UnitFilter::new();
    filter
        .set_equipment_tokens(&[Operand::at_least("Gauss Rifle", 1).into()])
        .unwrap();
    assert!(!accepts(&filter, &unit));

    filter.set_check_equipment(false);
    assert!(accepts(&filter, &unit));
}

#[test]
fn test_corrupt_inventory_is_an_error() {
    let mut filter = UnitFilter::new();
    filter.set_range(RangeField::Tonnage, "90", "").unwrap();
    filter
        .set_equipment_tokens(&[Operand::at_least("Medium Laser", 1).into()])
        .unwrap();

    let err = filter.accepts(&corrupt_unit()).unwrap_err();
    assert_eq!(
        err,
        FilterError::InvalidInventory {
            unit: "Broken Prime".to_string(),
            names: 2,
            quantities: 1,
        }
    );
}

#[test]
fn test_corrupt_inventory_ignored_without_expression() {
    let filter = UnitFilter::new();
    assert!(accepts(&filter, &corrupt_unit()));
}

// ==================== Deep copy ====================

#[test]
fn test_clone_isolation() {
    let mut original = UnitFilter::new();
    original.set_range(RangeField::Tonnage, "20", "50").unwrap();
    original
        .set_equipment_tokens(&[Operand::at_least("Medium Laser", 2).into()])
        .unwrap();

    let mut copy = original.clone();
    copy.set_range(RangeField::Tonnage, "60", "").unwrap();
    copy.equipment_mut().leaves_mut()[0].quantity = 9;

    assert_eq!(original.range(RangeField::Tonnage).low, Some(20.0));
    assert_eq!(original.equipment().leaves()[0].quantity, 2);
    assert_eq!(copy.range(RangeField::Tonnage).low, Some(60.0));
}

// ==================== FilterEvaluator ====================

fn roster() -> Vec<Unit> {
    vec![
        make_unit("Locust", 20.0).with_equipment("MediumLaser", 1),
        make_unit("Hunchback", 50.0).with_equipment("AC20", 1),
        make_unit("Wolverine", 55.0).with_equipment("MediumLaser", 1),
        make_unit("Atlas", 100.0).with_equipment("MediumLaser", 4),
        make_unit("Commando", 25.0).with_equipment("MediumLaser", 1),
    ]
}

fn names(units: &[&Unit]) -> Vec<String> {
    units.iter().map(|u| u.chassis.clone()).collect()
}

#[test]
fn test_filter_units_preserves_order() {
    let mut filter = UnitFilter::new();
    filter
        .set_equipment_tokens(&[Operand::at_least("Medium Laser", 1).into()])
        .unwrap();
    let units = roster();
    let evaluator = FilterEvaluator::new(&filter);

    let sequential = evaluator.filter_units(&units).unwrap();
    assert_eq!(
        names(&sequential),
        vec!["Locust", "Wolverine", "Atlas", "Commando"]
    );
    assert_eq!(evaluator.par_filter_units(&units).unwrap(), sequential);
    assert_eq!(evaluator.count(&units).unwrap(), 4);
}

#[test]
fn test_first_matches_stops_at_limit() {
    let filter = UnitFilter::new();
    let units = roster();
    let evaluator = FilterEvaluator::new(&filter);

    assert_eq!(
        names(&evaluator.first_matches(&units, 2).unwrap()),
        vec!["Locust", "Hunchback"]
    );
    assert!(evaluator.first_matches(&units, 0).unwrap().is_empty());
}

#[test]
fn test_batch_aborts_on_corrupt_inventory() {
    let mut filter = UnitFilter::new();
    filter
        .set_equipment_tokens(&[Operand::at_least("Medium Laser", 1).into()])
        .unwrap();
    let mut units = roster();
    units.insert(2, corrupt_unit());
    let evaluator = FilterEvaluator::new(&filter);

    assert!(matches!(
        evaluator.filter_units(&units),
        Err(FilterError::InvalidInventory { .. })
    ));
    assert!(matches!(
        evaluator.par_filter_units(&units),
        Err(FilterError::InvalidInventory { .. })
    ));
}
