//! Integration tests: a saved catalog searched with a query file.

use mechsieve_catalog_rs::{Catalog, CatalogStore, EntityType, EquipmentRecord, Unit};
use mechsieve_filter_rs::filter::{ExpressionTree, FilterDraft, FilterError, FilterEvaluator};

// ============================================================================
// Fixtures
// ============================================================================

fn mek(chassis: &str, model: &str, tonnage: f64) -> Unit {
    let mut unit = Unit::new(chassis, model);
    unit.tonnage = tonnage;
    unit.entity_type = EntityType::MEK | EntityType::BIPED_MEK;
    unit.engine_type = "Fusion".to_string();
    unit.tech_base = "Inner Sphere".to_string();
    unit.canon = true;
    unit
}

/// Inventories hold equipment keys, as catalog files do.
fn sample_catalog() -> Catalog {
    let mut hunchback = mek("Hunchback", "HBK-4G", 50.0)
        .with_equipment("AC20", 1)
        .with_equipment("MediumLaser", 2)
        .with_equipment("SmallLaser", 1);
    hunchback.mul_id = Some(1489);
    hunchback.source = "TRO 3039".to_string();

    let mut centurion = mek("Centurion", "CN9-A", 50.0)
        .with_equipment("AC10", 1)
        .with_equipment("LRM10", 1)
        .with_equipment("MediumLaser", 2);
    centurion.source = "TRO 3039".to_string();

    let mut hunchback_iic = mek("Hunchback IIC", "", 50.0)
        .with_equipment("MediumLaser", 2)
        .with_equipment("SRM6", 1)
        .with_equipment("SRM6", 1);
    hunchback_iic.tech_base = "Clan".to_string();
    hunchback_iic.source = "TRO 3058".to_string();
    hunchback_iic.quirks = vec!["Cramped Cockpit".to_string()];

    let mut demolisher = Unit::new("Demolisher", "Heavy Tank");
    demolisher.tonnage = 80.0;
    demolisher.entity_type = EntityType::TANK;
    demolisher.engine_type = "ICE".to_string();
    demolisher.equipment_names = vec!["AC20".to_string()];
    demolisher.equipment_quantities = vec![2];

    Catalog::new(
        vec![hunchback, centurion, hunchback_iic, demolisher],
        vec![
            EquipmentRecord::new("MediumLaser", "Medium Laser"),
            EquipmentRecord::new("SmallLaser", "Small Laser"),
            EquipmentRecord::new("SRM6", "SRM 6"),
            EquipmentRecord::new("LRM10", "LRM 10"),
            EquipmentRecord::new("AC10", "AC/10"),
            EquipmentRecord::new("AC20", "AC/20"),
        ],
    )
}

fn saved_catalog(dir: &tempfile::TempDir) -> Catalog {
    let store = CatalogStore::with_path(dir.path().join("catalog.json"));
    store.save(&sample_catalog()).unwrap();
    store.load().unwrap()
}

fn search(catalog: &Catalog, query: &str) -> Vec<String> {
    let draft: FilterDraft = toml::from_str(query).unwrap();
    let mut filter = draft.build().unwrap();
    filter.equipment_mut().resolve_keys(catalog).unwrap();
    FilterEvaluator::new(&filter)
        .filter_units(&catalog.units)
        .unwrap()
        .into_iter()
        .map(Unit::display_name)
        .collect()
}

// ============================================================================
// Searches
// ============================================================================

#[test]
fn test_empty_query_returns_whole_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = saved_catalog(&dir);
    assert_eq!(search(&catalog, "").len(), 4);
}

#[test]
fn test_equipment_and_type_query() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = saved_catalog(&dir);

    let found = search(
        &catalog,
        r#"
equipment = "2 MediumLaser & (1 AC/20 | 1 class:missile)"

[unit_types]
mek = "include"
"#,
    );
    assert_eq!(
        found,
        vec!["Hunchback HBK-4G", "Centurion CN9-A", "Hunchback IIC"]
    );
}

#[test]
fn test_duplicate_entries_sum_only_for_classes() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = saved_catalog(&dir);

    assert!(search(&catalog, r#"equipment = "2 SRM6""#).is_empty());
    assert_eq!(
        search(&catalog, r#"equipment = "2 class:srm""#),
        vec!["Hunchback IIC"]
    );
}

#[test]
fn test_category_quirk_and_text_query() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = saved_catalog(&dir);

    let found = search(
        &catalog,
        r#"
source = "tro 3039"

[categories.engine_type]
Fusion = "include"

[categories.tech_base]
Clan = "exclude"

[quirks.selection]
"Cramped Cockpit" = "exclude"
"#,
    );
    assert_eq!(found, vec!["Hunchback HBK-4G", "Centurion CN9-A"]);
}

#[test]
fn test_mul_id_and_range_query() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = saved_catalog(&dir);

    assert_eq!(
        search(&catalog, r#"mul_id = "1489""#),
        vec!["Hunchback HBK-4G"]
    );
    assert_eq!(
        search(
            &catalog,
            r#"
[ranges]
tonnage = { low = "60" }
"#
        ),
        vec!["Demolisher Heavy Tank"]
    );
}

#[test]
fn test_display_names_resolve_to_inventory_keys() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = saved_catalog(&dir);

    assert_eq!(
        search(&catalog, r#"equipment = '2 "Medium Laser" & 1 AC/20'"#),
        vec!["Hunchback HBK-4G"]
    );
    assert_eq!(
        search(&catalog, r#"equipment = '2 "ac 20"'"#),
        vec!["Demolisher Heavy Tank"]
    );
}

#[test]
fn test_class_leaves_match_inventory_keys() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = saved_catalog(&dir);

    assert_eq!(
        search(&catalog, r#"equipment = "1 class:autocannon""#),
        vec!["Hunchback HBK-4G", "Centurion CN9-A", "Demolisher Heavy Tank"]
    );
    assert_eq!(
        search(&catalog, r#"equipment = "3 class:laser""#),
        vec!["Hunchback HBK-4G"]
    );
}

#[test]
fn test_resolve_keys_against_catalog() {
    let catalog = sample_catalog();

    let mut tree = ExpressionTree::parse("1 mediumlaser").unwrap();
    tree.resolve_keys(&catalog).unwrap();
    assert_eq!(tree.to_string(), "1 MediumLaser");

    let mut typo = ExpressionTree::parse("1 MediumLazer").unwrap();
    assert!(matches!(
        typo.resolve_keys(&catalog),
        Err(FilterError::UnknownValue { .. })
    ));
}

#[test]
fn test_corrupt_catalog_aborts_equipment_search() {
    let mut catalog = sample_catalog();
    catalog.units[1].equipment_quantities.pop();

    let draft: FilterDraft = toml::from_str(r#"equipment = "1 MediumLaser""#).unwrap();
    let filter = draft.build().unwrap();
    let err = FilterEvaluator::new(&filter)
        .filter_units(&catalog.units)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "unit 'Centurion CN9-A' has a corrupt inventory: 3 names but 2 quantities"
    );
}
