//! Hit chance and damage for a single shot.
//! This module turns a traced path plus dice draws into a shot result.
//! It does not decide turn order or validate movement.

use super::*;
use crate::content::WeaponProfile;

/// Linear falloff from `max_accuracy` at point blank to `min_accuracy` at the
/// effective range, flat beyond it.
pub fn base_accuracy(weapon: &WeaponProfile, distance: f64, effective_range: f64) -> f64 {
    if distance <= 0.0 {
        return weapon.max_accuracy;
    }
    if distance >= effective_range {
        return weapon.min_accuracy;
    }
    let falloff = (weapon.max_accuracy - weapon.min_accuracy) * (distance / effective_range);
    (weapon.max_accuracy - falloff).max(weapon.min_accuracy).min(weapon.max_accuracy)
}

/// Final probability that a shot at `distance` connects, bonus included.
pub fn hit_chance(shooter: &Combatant, distance: f64, rules: &RulesConfig) -> f64 {
    let base = base_accuracy(&shooter.weapon, distance, shooter.effective_range());
    let beyond_base_range = distance > f64::from(shooter.weapon.max_range);
    let adjusted = base + shooter.bonus.accuracy_delta(beyond_base_range);
    adjusted.max(rules.accuracy_floor).min(rules.accuracy_ceiling)
}

fn roll_damage<D: Dice + ?Sized>(
    shooter: &Combatant,
    target: &Combatant,
    rules: &RulesConfig,
    dice: &mut D,
) -> (i32, bool) {
    let rolled = dice.roll_inclusive(shooter.weapon.min_damage, shooter.weapon.max_damage)
        + shooter.bonus.flat_damage();
    let scaled = f64::from(rolled)
        * shooter.bonus.damage_dealt_multiplier()
        * target.bonus.damage_taken_multiplier();
    let mut damage = (scaled as i32).max(0);

    let crit_chance = shooter.bonus.critical_chance();
    let critical = crit_chance > 0.0 && dice.unit() < crit_chance;
    if critical {
        damage = ((f64::from(damage) * rules.critical_multiplier) as i32).max(0);
    }
    (damage, critical)
}

/// Resolves one shot along an already traced path and applies any damage to `target`.
///
/// Cover is checked before range: a blocked path is a miss no matter the distance.
pub fn resolve_shot<D: Dice + ?Sized>(
    shooter: &Combatant,
    target: &mut Combatant,
    path: &ShotPath,
    rules: &RulesConfig,
    dice: &mut D,
) -> Result<ShotResult, ShotRejected> {
    let distance = match path {
        ShotPath::Blocked { .. } => return Ok(ShotResult::Miss { cause: MissCause::Cover }),
        ShotPath::Clear { distance, .. } => *distance,
    };

    let effective_range = shooter.effective_range();
    if distance > effective_range {
        return Err(ShotRejected::OutOfRange { distance, effective_range });
    }

    let chance = hit_chance(shooter, distance, rules);
    if dice.unit() >= chance {
        return Ok(ShotResult::Miss { cause: MissCause::Accuracy });
    }

    let (damage, critical) = roll_damage(shooter, target, rules, dice);
    target.take_damage(damage);
    Ok(ShotResult::Hit {
        damage,
        critical,
        target_health: target.current_health,
        killed: !target.is_alive(),
    })
}
