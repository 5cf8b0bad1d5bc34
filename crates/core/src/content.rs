//! Weapon and bonus catalogues. Numbers come from [`RulesConfig`]; this module
//! owns the closed sets and turns tuning values into profiles.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{BonusTuning, RulesConfig, WeaponStats};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    Pistol,
    Rifle,
    Shotgun,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 3] = [WeaponKind::Pistol, WeaponKind::Rifle, WeaponKind::Shotgun];

    pub fn name(self) -> &'static str {
        match self {
            WeaponKind::Pistol => "Pistol",
            WeaponKind::Rifle => "Rifle",
            WeaponKind::Shotgun => "Shotgun",
        }
    }

    pub fn profile(self, rules: &RulesConfig) -> WeaponProfile {
        let stats = match self {
            WeaponKind::Pistol => &rules.weapons.pistol,
            WeaponKind::Rifle => &rules.weapons.rifle,
            WeaponKind::Shotgun => &rules.weapons.shotgun,
        };
        WeaponProfile::from_stats(self.name(), stats)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusKind {
    Tough,
    LongShot,
    Quickdraw,
    EagleEye,
    Gunslinger,
    Desperado,
}

impl BonusKind {
    pub const ALL: [BonusKind; 6] = [
        BonusKind::Tough,
        BonusKind::LongShot,
        BonusKind::Quickdraw,
        BonusKind::EagleEye,
        BonusKind::Gunslinger,
        BonusKind::Desperado,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BonusKind::Tough => "TOUGH",
            BonusKind::LongShot => "LONG SHOT",
            BonusKind::Quickdraw => "QUICKDRAW",
            BonusKind::EagleEye => "EAGLE EYE",
            BonusKind::Gunslinger => "GUNSLINGER",
            BonusKind::Desperado => "DESPERADO",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BonusKind::Tough => "Years of hard living have made you resilient",
            BonusKind::LongShot => "You can make shots others wouldn't dare attempt",
            BonusKind::Quickdraw => "Lightning fast on the draw, your shots hit harder",
            BonusKind::EagleEye => "Your aim is legendary across the frontier",
            BonusKind::Gunslinger => "Sometimes luck favors the bold",
            BonusKind::Desperado => "Live fast, die hard - nothing left to lose",
        }
    }

    pub fn profile(self, tuning: &BonusTuning) -> BonusProfile {
        let effects = match self {
            BonusKind::Tough => vec![BonusEffect::MaxHealth(tuning.tough_health)],
            BonusKind::LongShot => vec![
                BonusEffect::RangeMultiplier(tuning.longshot_range_multiplier),
                BonusEffect::Accuracy { near: 0.0, far: -tuning.longshot_accuracy_penalty },
            ],
            BonusKind::Quickdraw => vec![BonusEffect::FlatDamage(tuning.quickdraw_damage)],
            BonusKind::EagleEye => vec![BonusEffect::Accuracy {
                near: tuning.eagle_eye_accuracy,
                far: tuning.eagle_eye_accuracy,
            }],
            BonusKind::Gunslinger => vec![BonusEffect::CriticalChance(tuning.gunslinger_crit_chance)],
            BonusKind::Desperado => vec![
                BonusEffect::DamageDealtMultiplier(tuning.desperado_damage_dealt_multiplier),
                BonusEffect::DamageTakenMultiplier(tuning.desperado_damage_taken_multiplier),
            ],
        };
        BonusProfile { name: self.name(), description: self.description(), effects }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WeaponProfile {
    pub name: &'static str,
    pub max_range: u32,
    pub min_accuracy: f64,
    pub max_accuracy: f64,
    pub min_damage: i32,
    pub max_damage: i32,
}

impl WeaponProfile {
    fn from_stats(name: &'static str, stats: &WeaponStats) -> Self {
        Self {
            name,
            max_range: stats.max_range,
            min_accuracy: stats.min_accuracy,
            max_accuracy: stats.max_accuracy,
            min_damage: stats.min_damage,
            max_damage: stats.max_damage,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BonusEffect {
    MaxHealth(i32),
    RangeMultiplier(f64),
    /// `far` applies once the target sits beyond the weapon's unscaled range.
    Accuracy { near: f64, far: f64 },
    FlatDamage(i32),
    DamageDealtMultiplier(f64),
    DamageTakenMultiplier(f64),
    CriticalChance(f64),
}

#[derive(Clone, Debug, PartialEq)]
pub struct BonusProfile {
    pub name: &'static str,
    pub description: &'static str,
    pub effects: Vec<BonusEffect>,
}

impl BonusProfile {
    pub fn none() -> Self {
        Self { name: "NONE", description: "No bonus selected", effects: Vec::new() }
    }

    pub fn for_kind(kind: Option<BonusKind>, tuning: &BonusTuning) -> Self {
        kind.map_or_else(Self::none, |kind| kind.profile(tuning))
    }

    pub fn health_delta(&self) -> i32 {
        self.effects
            .iter()
            .map(|effect| match effect {
                BonusEffect::MaxHealth(delta) => *delta,
                _ => 0,
            })
            .sum()
    }

    pub fn range_multiplier(&self) -> f64 {
        self.effects
            .iter()
            .map(|effect| match effect {
                BonusEffect::RangeMultiplier(multiplier) => *multiplier,
                _ => 1.0,
            })
            .product()
    }

    pub fn accuracy_delta(&self, beyond_base_range: bool) -> f64 {
        self.effects
            .iter()
            .map(|effect| match effect {
                BonusEffect::Accuracy { near, far } => {
                    if beyond_base_range {
                        *far
                    } else {
                        *near
                    }
                }
                _ => 0.0,
            })
            .sum()
    }

    pub fn flat_damage(&self) -> i32 {
        self.effects
            .iter()
            .map(|effect| match effect {
                BonusEffect::FlatDamage(delta) => *delta,
                _ => 0,
            })
            .sum()
    }

    pub fn damage_dealt_multiplier(&self) -> f64 {
        self.effects
            .iter()
            .map(|effect| match effect {
                BonusEffect::DamageDealtMultiplier(multiplier) => *multiplier,
                _ => 1.0,
            })
            .product()
    }

    pub fn damage_taken_multiplier(&self) -> f64 {
        self.effects
            .iter()
            .map(|effect| match effect {
                BonusEffect::DamageTakenMultiplier(multiplier) => *multiplier,
                _ => 1.0,
            })
            .product()
    }

    pub fn critical_chance(&self) -> f64 {
        self.effects
            .iter()
            .map(|effect| match effect {
                BonusEffect::CriticalChance(chance) => *chance,
                _ => 0.0,
            })
            .sum()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseLoadoutError(pub String);

impl fmt::Display for ParseLoadoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown loadout entry `{}`", self.0)
    }
}

impl Error for ParseLoadoutError {}

fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace(['-', '_', ' '], "")
}

impl FromStr for WeaponKind {
    type Err = ParseLoadoutError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize(raw).as_str() {
            "pistol" | "1" => Ok(WeaponKind::Pistol),
            "rifle" | "2" => Ok(WeaponKind::Rifle),
            "shotgun" | "3" => Ok(WeaponKind::Shotgun),
            _ => Err(ParseLoadoutError(raw.to_string())),
        }
    }
}

impl FromStr for BonusKind {
    type Err = ParseLoadoutError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize(raw).as_str() {
            "tough" | "1" => Ok(BonusKind::Tough),
            "longshot" | "2" => Ok(BonusKind::LongShot),
            "quickdraw" | "3" => Ok(BonusKind::Quickdraw),
            "eagleeye" | "4" => Ok(BonusKind::EagleEye),
            "gunslinger" | "5" => Ok(BonusKind::Gunslinger),
            "desperado" | "6" => Ok(BonusKind::Desperado),
            _ => Err(ParseLoadoutError(raw.to_string())),
        }
    }
}
