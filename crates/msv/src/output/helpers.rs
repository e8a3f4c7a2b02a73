//! Common helper functions for output formatting.

use mechsieve_catalog_rs::Unit;
use owo_colors::OwoColorize;

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Formats a tonnage, dropping the fraction for whole numbers.
pub fn format_tons(tons: f64) -> String {
    if tons.fract() == 0.0 {
        format!("{tons:.0}")
    } else {
        format!("{tons}")
    }
}

/// Formats a unit's MUL id, or a dash when it has none.
pub fn format_mul_id(mul_id: Option<i32>) -> String {
    mul_id.map_or_else(|| "-".to_string(), |id| id.to_string())
}

/// Lists a unit's types, e.g. "mek" or "tank, support-tank".
pub fn format_unit_types(unit: &Unit) -> String {
    let types = unit.entity_type.types();
    if types.is_empty() {
        return "-".to_string();
    }
    types
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Formats a table header line, dimmed when colors are on.
pub fn format_header(header: &str, use_colors: bool) -> String {
    if use_colors {
        format!("{}\n", header.dimmed())
    } else {
        format!("{header}\n")
    }
}

/// Formats a bold label such as "Unit:".
pub fn format_label(label: &str, use_colors: bool) -> String {
    if use_colors {
        label.bold().to_string()
    } else {
        label.to_string()
    }
}

/// Formats a yes/no flag.
pub fn format_flag(value: bool, use_colors: bool) -> String {
    match (value, use_colors) {
        (true, true) => "yes".green().to_string(),
        (true, false) => "yes".to_string(),
        (false, true) => "no".dimmed().to_string(),
        (false, false) => "no".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mechsieve_catalog_rs::UnitType;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Atlas", 10), "Atlas");
        assert_eq!(truncate_str("Marauder II MAD-4A", 10), "Marauder...");
        assert_eq!(truncate_str("Höllenhund", 10), "Höllenhund");
    }

    #[test]
    fn test_format_tons() {
        assert_eq!(format_tons(100.0), "100");
        assert_eq!(format_tons(0.5), "0.5");
        assert_eq!(format_tons(42.25), "42.25");
    }

    #[test]
    fn test_format_mul_id() {
        assert_eq!(format_mul_id(Some(140)), "140");
        assert_eq!(format_mul_id(None), "-");
    }

    #[test]
    fn test_format_unit_types() {
        let mut unit = Unit::new("Atlas", "AS7-D");
        assert_eq!(format_unit_types(&unit), "-");

        unit.entity_type = UnitType::Mek.entity_type();
        assert_eq!(format_unit_types(&unit), UnitType::Mek.as_str());
    }

    #[test]
    fn test_plain_formatting_has_no_escapes() {
        assert_eq!(format_header("A  B", false), "A  B\n");
        assert_eq!(format_label("Unit:", false), "Unit:");
        assert_eq!(format_flag(true, false), "yes");
        assert_eq!(format_flag(false, false), "no");
        assert!(format_flag(true, true).contains('\u{1b}'));
    }
}
