//! Weapon classes: named groups of equipment identified by name keywords.
//!
//! Each class is paired with a [`ClassRule`] in a static table. A rule is
//! either a keyword test over the folded equipment name (see
//! [`normalize_equipment_name`]) or the union of other classes. Keywords are
//! written already folded, so `ERLargeLaser` and `ER Large Laser` match alike.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::normalize_equipment_name;

/// How a weapon class recognises equipment names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassRule {
    /// Matches when the folded name contains any of `any` and none of `none`.
    Keywords {
        any: &'static [&'static str],
        none: &'static [&'static str],
    },
    /// Matches when any member class matches.
    Composite(&'static [WeaponClass]),
}

impl ClassRule {
    fn matches_folded(&self, name: &str) -> bool {
        match self {
            ClassRule::Keywords { any, none } => {
                any.iter().any(|k| name.contains(k)) && !none.iter().any(|k| name.contains(k))
            }
            ClassRule::Composite(members) => {
                members.iter().any(|class| class.rule().matches_folded(name))
            }
        }
    }
}

/// A named category of equipment, such as "any autocannon".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeaponClass {
    Autocannon,
    RotaryAutocannon,
    UltraAutocannon,
    LbxAutocannon,
    Gauss,
    MachineGun,
    Flamer,
    Laser,
    PulseLaser,
    ErLaser,
    Ppc,
    Lrm,
    Mrm,
    Srm,
    Artillery,
    Missile,
    Ballistic,
    Energy,
    Physical,
    Ammo,
}

const NO_AMMO: &[&str] = &["ammo"];

const CLASS_TABLE: &[(WeaponClass, &str, ClassRule)] = &[
    (
        WeaponClass::Autocannon,
        "autocannon",
        ClassRule::Keywords {
            any: &["autocannon", "ac/", "xac", "ac2", "ac5", "ac10", "ac20"],
            none: NO_AMMO,
        },
    ),
    (
        WeaponClass::RotaryAutocannon,
        "rotary-autocannon",
        ClassRule::Keywords {
            any: &["rotaryac", "rac/"],
            none: NO_AMMO,
        },
    ),
    (
        WeaponClass::UltraAutocannon,
        "ultra-autocannon",
        ClassRule::Keywords {
            any: &["ultraac", "uac/"],
            none: NO_AMMO,
        },
    ),
    (
        WeaponClass::LbxAutocannon,
        "lbx-autocannon",
        ClassRule::Keywords {
            any: &["-xac", "lbx"],
            none: NO_AMMO,
        },
    ),
    (
        WeaponClass::Gauss,
        "gauss",
        ClassRule::Keywords {
            any: &["gauss"],
            none: NO_AMMO,
        },
    ),
    (
        WeaponClass::MachineGun,
        "machine-gun",
        ClassRule::Keywords {
            any: &["machinegun"],
            none: NO_AMMO,
        },
    ),
    (
        WeaponClass::Flamer,
        "flamer",
        ClassRule::Keywords {
            any: &["flamer"],
            none: NO_AMMO,
        },
    ),
    (
        WeaponClass::Laser,
        "laser",
        ClassRule::Keywords {
            any: &["laser"],
            none: &["ammo", "anti-missile", "antimissile", "insulator"],
        },
    ),
    (
        WeaponClass::PulseLaser,
        "pulse-laser",
        ClassRule::Keywords {
            any: &["pulselaser"],
            none: NO_AMMO,
        },
    ),
    (
        WeaponClass::ErLaser,
        "er-laser",
        ClassRule::Keywords {
            any: &["ermicro", "ersmall", "ermedium", "erlarge", "erlaser"],
            none: NO_AMMO,
        },
    ),
    (
        WeaponClass::Ppc,
        "ppc",
        ClassRule::Keywords {
            any: &["ppc", "particlecannon"],
            none: &["capacitor"],
        },
    ),
    (
        WeaponClass::Lrm,
        "lrm",
        ClassRule::Keywords {
            any: &["lrm"],
            none: NO_AMMO,
        },
    ),
    (
        WeaponClass::Mrm,
        "mrm",
        ClassRule::Keywords {
            any: &["mrm"],
            none: NO_AMMO,
        },
    ),
    (
        WeaponClass::Srm,
        "srm",
        ClassRule::Keywords {
            any: &["srm"],
            none: NO_AMMO,
        },
    ),
    (
        WeaponClass::Artillery,
        "artillery",
        ClassRule::Keywords {
            any: &["arrowiv", "longtom", "sniper", "thumper"],
            none: NO_AMMO,
        },
    ),
    (
        WeaponClass::Missile,
        "missile",
        ClassRule::Composite(&[WeaponClass::Lrm, WeaponClass::Mrm, WeaponClass::Srm]),
    ),
    (
        WeaponClass::Ballistic,
        "ballistic",
        ClassRule::Composite(&[
            WeaponClass::Autocannon,
            WeaponClass::Gauss,
            WeaponClass::MachineGun,
        ]),
    ),
    (
        WeaponClass::Energy,
        "energy",
        ClassRule::Composite(&[WeaponClass::Laser, WeaponClass::Ppc, WeaponClass::Flamer]),
    ),
    (
        WeaponClass::Physical,
        "physical",
        ClassRule::Keywords {
            any: &["hatchet", "sword", "claw", "mace", "talons", "lance", "retractableblade"],
            none: NO_AMMO,
        },
    ),
    (
        WeaponClass::Ammo,
        "ammo",
        ClassRule::Keywords {
            any: &["ammo"],
            none: &[],
        },
    ),
];

impl WeaponClass {
    /// Every weapon class, in table order.
    pub fn all() -> impl Iterator<Item = WeaponClass> {
        CLASS_TABLE.iter().map(|(class, _, _)| *class)
    }

    fn entry(self) -> &'static (WeaponClass, &'static str, ClassRule) {
        // The table lists every variant exactly once; see test_table_covers_every_class.
        CLASS_TABLE
            .iter()
            .find(|(class, _, _)| *class == self)
            .unwrap_or(&CLASS_TABLE[0])
    }

    /// Returns the matching rule for this class.
    pub fn rule(self) -> &'static ClassRule {
        &self.entry().2
    }

    /// Returns the identifier used in expressions, e.g. `"missile"`.
    pub fn label(self) -> &'static str {
        self.entry().1
    }

    /// Returns true if the equipment key or name belongs to this class.
    ///
    /// Matching ignores case and whitespace.
    pub fn matches(self, equipment_name: &str) -> bool {
        self.rule()
            .matches_folded(&normalize_equipment_name(equipment_name))
    }
}

impl fmt::Display for WeaponClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WeaponClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['_', ' '], "-");
        CLASS_TABLE
            .iter()
            .find(|(_, label, _)| *label == wanted)
            .map(|(class, _, _)| *class)
            .ok_or_else(|| format!("unknown weapon class: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_every_class() {
        let classes: Vec<WeaponClass> = WeaponClass::all().collect();
        assert_eq!(classes.len(), 20);
        for class in &classes {
            assert_eq!(classes.iter().filter(|c| *c == class).count(), 1);
            assert_eq!(class.entry().0, *class);
        }
    }

    #[test]
    fn test_missile_matches_launchers_not_ammo() {
        assert!(WeaponClass::Missile.matches("LRM 20"));
        assert!(WeaponClass::Missile.matches("MRM 10"));
        assert!(WeaponClass::Missile.matches("Streak SRM 6"));
        assert!(!WeaponClass::Missile.matches("SRM 6 Ammo"));
        assert!(!WeaponClass::Missile.matches("Medium Laser"));
    }

    #[test]
    fn test_autocannon_family() {
        assert!(WeaponClass::Autocannon.matches("AC/20"));
        assert!(WeaponClass::Autocannon.matches("Ultra AC/5"));
        assert!(WeaponClass::Autocannon.matches("LB 10-X AC"));
        assert!(WeaponClass::UltraAutocannon.matches("Ultra AC/5"));
        assert!(!WeaponClass::UltraAutocannon.matches("AC/5"));
        assert!(WeaponClass::LbxAutocannon.matches("LB 10-X AC"));
        assert!(WeaponClass::RotaryAutocannon.matches("Rotary AC/2"));
        assert!(!WeaponClass::Autocannon.matches("AC/10 Ammo"));
    }

    #[test]
    fn test_laser_classes() {
        assert!(WeaponClass::Laser.matches("Medium Laser"));
        assert!(WeaponClass::Laser.matches("ER Large Laser"));
        assert!(!WeaponClass::Laser.matches("Laser Anti-Missile System"));
        assert!(WeaponClass::ErLaser.matches("ER Medium Laser"));
        assert!(!WeaponClass::ErLaser.matches("Medium Laser"));
        assert!(WeaponClass::PulseLaser.matches("Small Pulse Laser"));
    }

    #[test]
    fn test_keywords_are_folded() {
        for (class, _, rule) in CLASS_TABLE {
            if let ClassRule::Keywords { any, none } = rule {
                for keyword in any.iter().chain(none.iter()) {
                    assert_eq!(normalize_equipment_name(keyword), *keyword, "{class:?}");
                }
            }
        }
    }

    #[test]
    fn test_key_style_names() {
        assert!(WeaponClass::ErLaser.matches("ERLargeLaser"));
        assert!(WeaponClass::ErLaser.matches("CLERMediumLaser"));
        assert!(WeaponClass::MachineGun.matches("ISMachineGun"));
        assert!(WeaponClass::PulseLaser.matches("ISMediumPulseLaser"));
        assert!(WeaponClass::RotaryAutocannon.matches("ISRotaryAC5"));
        assert!(WeaponClass::UltraAutocannon.matches("ISUltraAC10"));
        assert!(WeaponClass::Autocannon.matches("ISAC20"));
        assert!(WeaponClass::LbxAutocannon.matches("ISLBXAC10"));
        assert!(WeaponClass::Artillery.matches("ISArrowIV"));
        assert!(WeaponClass::Artillery.matches("ISLongTom"));
        assert!(WeaponClass::Physical.matches("ISRetractableBlade"));
        assert!(WeaponClass::Missile.matches("LRM20"));

        assert!(!WeaponClass::Autocannon.matches("ISAC20 Ammo"));
        assert!(!WeaponClass::Laser.matches("ISLaserAntiMissileSystem"));
        assert!(!WeaponClass::ErLaser.matches("ISMediumLaser"));
    }

    #[test]
    fn test_key_and_display_name_agree() {
        let pairs = [
            ("ERLargeLaser", "ER Large Laser"),
            ("ISMachineGun", "Machine Gun"),
            ("ISMediumPulseLaser", "Medium Pulse Laser"),
            ("ISUltraAC5", "Ultra AC/5"),
            ("ISArrowIV", "Arrow IV"),
            ("ISSRM6", "SRM 6"),
        ];
        for class in WeaponClass::all() {
            for (key, name) in pairs {
                assert_eq!(class.matches(key), class.matches(name), "{class:?} {key} / {name}");
            }
        }
    }

    #[test]
    fn test_composites() {
        assert!(WeaponClass::Ballistic.matches("Gauss Rifle"));
        assert!(WeaponClass::Ballistic.matches("Machine Gun"));
        assert!(!WeaponClass::Ballistic.matches("PPC"));
        assert!(WeaponClass::Energy.matches("ER PPC"));
        assert!(WeaponClass::Energy.matches("Flamer"));
        assert!(!WeaponClass::Energy.matches("LRM 5"));
    }

    #[test]
    fn test_from_str_and_label() {
        assert_eq!("missile".parse::<WeaponClass>(), Ok(WeaponClass::Missile));
        assert_eq!("Machine Gun".parse::<WeaponClass>(), Ok(WeaponClass::MachineGun));
        assert_eq!("er_laser".parse::<WeaponClass>(), Ok(WeaponClass::ErLaser));
        assert!("blaster".parse::<WeaponClass>().is_err());

        for class in WeaponClass::all() {
            assert_eq!(class.label().parse::<WeaponClass>(), Ok(class));
        }
    }
}
