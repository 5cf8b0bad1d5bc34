//! Balance and generation tuning.
//!
//! Every table carries `#[serde(default)]`, so a rules file only needs the
//! keys it wants to change:
//!
//! ```toml
//! critical_multiplier = 3.0
//!
//! [weapons.rifle]
//! max_range = 25
//! ```

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Smallest arena side that still leaves a walkable interior inside the border walls.
pub const MIN_MAP_SIDE: usize = 4;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub player_max_health: i32,
    pub opponent_max_health: i32,
    /// Final hit probability is clamped into `[accuracy_floor, accuracy_ceiling]`.
    pub accuracy_floor: f64,
    pub accuracy_ceiling: f64,
    pub critical_multiplier: f64,
    pub weapons: WeaponTable,
    pub bonuses: BonusTuning,
    pub policy: PolicyTuning,
    pub map: MapConfig,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            player_max_health: 100,
            opponent_max_health: 100,
            accuracy_floor: 0.0,
            accuracy_ceiling: 1.0,
            critical_multiplier: 2.0,
            weapons: WeaponTable::default(),
            bonuses: BonusTuning::default(),
            policy: PolicyTuning::default(),
            map: MapConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub max_range: u32,
    pub min_accuracy: f64,
    pub max_accuracy: f64,
    pub min_damage: i32,
    pub max_damage: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTable {
    pub pistol: WeaponStats,
    pub rifle: WeaponStats,
    pub shotgun: WeaponStats,
}

impl Default for WeaponTable {
    fn default() -> Self {
        Self {
            pistol: WeaponStats {
                max_range: 12,
                min_accuracy: 0.4,
                max_accuracy: 1.0,
                min_damage: 20,
                max_damage: 35,
            },
            rifle: WeaponStats {
                max_range: 20,
                min_accuracy: 0.6,
                max_accuracy: 1.0,
                min_damage: 35,
                max_damage: 50,
            },
            shotgun: WeaponStats {
                max_range: 8,
                min_accuracy: 0.8,
                max_accuracy: 1.0,
                min_damage: 40,
                max_damage: 60,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusTuning {
    pub tough_health: i32,
    pub longshot_range_multiplier: f64,
    pub longshot_accuracy_penalty: f64,
    pub quickdraw_damage: i32,
    pub eagle_eye_accuracy: f64,
    pub gunslinger_crit_chance: f64,
    pub desperado_damage_dealt_multiplier: f64,
    pub desperado_damage_taken_multiplier: f64,
}

impl Default for BonusTuning {
    fn default() -> Self {
        Self {
            tough_health: 20,
            longshot_range_multiplier: 1.5,
            longshot_accuracy_penalty: 0.3,
            quickdraw_damage: 10,
            eagle_eye_accuracy: 0.2,
            gunslinger_crit_chance: 0.15,
            desperado_damage_dealt_multiplier: 1.4,
            desperado_damage_taken_multiplier: 1.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyTuning {
    /// Chance to take an available shot instead of closing in.
    pub aggression: f64,
    pub close_range_bonus: f64,
    /// Fraction of effective range under which `close_range_bonus` applies.
    pub close_range_fraction: f64,
}

impl Default for PolicyTuning {
    fn default() -> Self {
        Self { aggression: 0.7, close_range_bonus: 0.2, close_range_fraction: 0.5 }
    }
}

/// Inclusive `(min, max)` pairs for feature counts and sizes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: usize,
    pub height: usize,
    pub spawn_border_margin: usize,
    pub spawn_min_distance: u32,
    pub wall_clusters: (usize, usize),
    pub wall_cluster_size: (usize, usize),
    pub tree_clusters: (usize, usize),
    pub tree_cluster_size: (usize, usize),
    pub water_features: (usize, usize),
    pub water_size: (usize, usize),
    pub rock_formations: (usize, usize),
    pub cactus_patches: (usize, usize),
    pub building_ruins: (usize, usize),
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 50,
            spawn_border_margin: 2,
            spawn_min_distance: 20,
            wall_clusters: (15, 25),
            wall_cluster_size: (1, 4),
            tree_clusters: (3, 8),
            tree_cluster_size: (2, 6),
            water_features: (0, 2),
            water_size: (3, 8),
            rock_formations: (2, 5),
            cactus_patches: (1, 4),
            building_ruins: (0, 3),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "rules file I/O error: {e}"),
            Self::Parse(e) => write!(f, "invalid rules file: {e}"),
            Self::Invalid(reason) => write!(f, "rejected rules: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl RulesConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let rules: Self = toml::from_str(text).map_err(ConfigError::Parse)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_toml_str(&text)
    }

    /// Rejects tunings under which a duel could start decided, heal on a hit,
    /// or be fought on an arena too small to hold two connected starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(self.player_max_health > 0, "player_max_health must be positive")?;
        ensure(self.opponent_max_health > 0, "opponent_max_health must be positive")?;
        ensure(in_unit(self.accuracy_floor), "accuracy_floor must lie in [0, 1]")?;
        ensure(in_unit(self.accuracy_ceiling), "accuracy_ceiling must lie in [0, 1]")?;
        ensure(
            self.accuracy_floor <= self.accuracy_ceiling,
            "accuracy_floor must not exceed accuracy_ceiling",
        )?;
        ensure(self.critical_multiplier >= 0.0, "critical_multiplier must not be negative")?;

        for (name, stats) in
            [("pistol", &self.weapons.pistol), ("rifle", &self.weapons.rifle), ("shotgun", &self.weapons.shotgun)]
        {
            stats.validate(name)?;
        }
        self.bonuses.validate()?;
        self.policy.validate()?;
        self.map.validate()
    }
}

fn ensure(condition: bool, reason: &str) -> Result<(), ConfigError> {
    if condition { Ok(()) } else { Err(ConfigError::Invalid(reason.to_string())) }
}

fn in_unit(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

impl WeaponStats {
    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        let accuracy_ok = in_unit(self.min_accuracy)
            && in_unit(self.max_accuracy)
            && self.min_accuracy <= self.max_accuracy;
        if !accuracy_ok {
            return Err(ConfigError::Invalid(format!(
                "{name}: accuracies must satisfy 0 <= min_accuracy <= max_accuracy <= 1"
            )));
        }
        if self.min_damage < 0 || self.min_damage > self.max_damage {
            return Err(ConfigError::Invalid(format!(
                "{name}: damage must satisfy 0 <= min_damage <= max_damage"
            )));
        }
        if self.max_range == 0 {
            return Err(ConfigError::Invalid(format!("{name}: max_range must be positive")));
        }
        Ok(())
    }
}

impl BonusTuning {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure(self.tough_health >= 0, "tough_health must not be negative")?;
        ensure(self.quickdraw_damage >= 0, "quickdraw_damage must not be negative")?;
        ensure(self.longshot_range_multiplier > 0.0, "longshot_range_multiplier must be positive")?;
        ensure(in_unit(self.longshot_accuracy_penalty), "longshot_accuracy_penalty must lie in [0, 1]")?;
        ensure(in_unit(self.eagle_eye_accuracy), "eagle_eye_accuracy must lie in [0, 1]")?;
        ensure(in_unit(self.gunslinger_crit_chance), "gunslinger_crit_chance must lie in [0, 1]")?;
        ensure(
            self.desperado_damage_dealt_multiplier >= 0.0,
            "desperado_damage_dealt_multiplier must not be negative",
        )?;
        ensure(
            self.desperado_damage_taken_multiplier >= 0.0,
            "desperado_damage_taken_multiplier must not be negative",
        )
    }
}

impl PolicyTuning {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure(in_unit(self.aggression), "policy.aggression must lie in [0, 1]")?;
        ensure(in_unit(self.close_range_bonus), "policy.close_range_bonus must lie in [0, 1]")?;
        ensure(in_unit(self.close_range_fraction), "policy.close_range_fraction must lie in [0, 1]")
    }
}

impl MapConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_MAP_SIDE || self.height < MIN_MAP_SIDE {
            return Err(ConfigError::Invalid(format!(
                "map must be at least {MIN_MAP_SIDE}x{MIN_MAP_SIDE}, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}
