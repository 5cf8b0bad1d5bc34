//! Reactive opponent behavior.
//! This module picks one intent for a side from the current state alone.
//! It does not apply intents or keep memory between turns.

use super::*;
use crate::config::PolicyTuning;
use crate::seed::{mix_seed_stream, random_usize, unit_interval};

fn side_stream(side: Side) -> u64 {
    match side {
        Side::Player => 0,
        Side::Opponent => 1,
    }
}

/// Fire when the foe is in range and visible and the aggression roll passes;
/// otherwise close the distance. Falls back to `Wait` when boxed in.
pub fn choose_intent(state: &GameState, side: Side, tuning: &PolicyTuning, seed: u64) -> Intent {
    let me = state.combatant(side);
    let foe = state.combatant(side.other());
    let turn_seed = mix_seed_stream(seed, state.turn * 2 + side_stream(side));

    let gap = distance(me.pos, foe.pos);
    let range = me.effective_range();
    if gap <= range && has_line_of_sight(&state.grid, me.pos, foe.pos) {
        let mut eagerness = tuning.aggression;
        if gap < range * tuning.close_range_fraction {
            eagerness += tuning.close_range_bonus;
        }
        if unit_interval(turn_seed, 0) < eagerness {
            return Intent::Fire;
        }
    }

    approach_order(me.pos, foe.pos, turn_seed)
        .into_iter()
        .find(|dir| {
            let dest = me.pos.step(*dir);
            state.grid.is_walkable(dest) && !state.is_occupied(dest)
        })
        .map_or(Intent::Wait, Intent::Move)
}

/// Directions to try, best first: along the longer axis toward the foe, then
/// the shorter one, then everything else in a seeded order.
fn approach_order(from: Pos, to: Pos, turn_seed: u64) -> Vec<Direction> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let horizontal = match dx.signum() {
        1 => Some(Direction::Right),
        -1 => Some(Direction::Left),
        _ => None,
    };
    let vertical = match dy.signum() {
        1 => Some(Direction::Down),
        -1 => Some(Direction::Up),
        _ => None,
    };
    let preferred =
        if dx.abs() >= dy.abs() { [horizontal, vertical] } else { [vertical, horizontal] };

    let mut order: Vec<Direction> = preferred.into_iter().flatten().collect();
    let mut rest: Vec<Direction> =
        Direction::ALL.into_iter().filter(|dir| !order.contains(dir)).collect();
    for idx in (1..rest.len()).rev() {
        let swap = random_usize(turn_seed, 1 + idx as u64, 0, idx);
        rest.swap(idx, swap);
    }
    order.extend(rest);
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::WeaponKind;
    use crate::game::test_support::*;

    fn eager() -> PolicyTuning {
        PolicyTuning { aggression: 1.0, ..PolicyTuning::default() }
    }

    fn patient() -> PolicyTuning {
        PolicyTuning { aggression: 0.0, close_range_bonus: 0.0, ..PolicyTuning::default() }
    }

    #[test]
    fn fires_when_in_range_with_clear_sight() {
        let state = duel_state(&["..........."], Pos { y: 0, x: 0 }, Pos { y: 0, x: 10 });
        assert_eq!(choose_intent(&state, Side::Opponent, &eager(), 5), Intent::Fire);
    }

    #[test]
    fn closes_in_along_the_longer_axis() {
        let state = duel_state(
            &["..........", "..........", "..........", ".........."],
            Pos { y: 0, x: 0 },
            Pos { y: 1, x: 9 },
        );
        assert_eq!(
            choose_intent(&state, Side::Opponent, &patient(), 5),
            Intent::Move(Direction::Left)
        );
        assert_eq!(
            choose_intent(&state, Side::Player, &patient(), 5),
            Intent::Move(Direction::Right)
        );
    }

    #[test]
    fn walks_around_cover_instead_of_shooting_into_it() {
        let state = duel_state(&["...", ".#.", "..."], Pos { y: 1, x: 0 }, Pos { y: 1, x: 2 });
        let intent = choose_intent(&state, Side::Player, &eager(), 9);
        assert!(matches!(intent, Intent::Move(Direction::Up | Direction::Down)), "{intent:?}");
    }

    #[test]
    fn does_not_shoot_beyond_effective_range() {
        let mut state =
            duel_state(&["..........................."], Pos { y: 0, x: 0 }, Pos { y: 0, x: 26 });
        state.player = fighter_at(WeaponKind::Shotgun, None, Pos { y: 0, x: 0 });
        assert_eq!(
            choose_intent(&state, Side::Player, &eager(), 1),
            Intent::Move(Direction::Right)
        );
    }

    #[test]
    fn boxed_in_fighter_waits() {
        let state = duel_state(&["#####", "#.#.#", "#####"], Pos { y: 1, x: 1 }, Pos { y: 1, x: 3 });
        assert_eq!(choose_intent(&state, Side::Player, &patient(), 2), Intent::Wait);
    }

    #[test]
    fn decision_is_a_pure_function_of_its_inputs() {
        let state = duel_state(
            &["..........", "..........", ".........."],
            Pos { y: 0, x: 0 },
            Pos { y: 2, x: 6 },
        );
        let tuning = PolicyTuning::default();
        for seed in 0..50 {
            assert_eq!(
                choose_intent(&state, Side::Player, &tuning, seed),
                choose_intent(&state, Side::Player, &tuning, seed)
            );
        }
    }
}
