//! Shared test fixtures for the `game` submodule test suites.
//! This module exists to avoid repeating arena and combatant setup across many tests.
//! It does not own production gameplay logic.

use std::collections::VecDeque;

use super::*;
use crate::content::{BonusKind, WeaponKind};
use crate::mapgen::FixedArena;

/// Dice that hand out prepared values in order and panic when a test draws
/// more than it scripted.
pub(crate) struct ScriptedDice {
    units: VecDeque<f64>,
    rolls: VecDeque<i32>,
}

impl ScriptedDice {
    pub(crate) fn new(units: &[f64], rolls: &[i32]) -> Self {
        Self { units: units.iter().copied().collect(), rolls: rolls.iter().copied().collect() }
    }
}

impl Dice for ScriptedDice {
    fn unit(&mut self) -> f64 {
        self.units.pop_front().expect("unscripted unit draw")
    }

    fn roll_inclusive(&mut self, min: i32, max: i32) -> i32 {
        let value = self.rolls.pop_front().expect("unscripted damage roll");
        assert!((min..=max).contains(&value), "scripted roll {value} outside [{min}, {max}]");
        value
    }
}

pub(crate) fn fighter(weapon: WeaponKind, bonus: Option<BonusKind>) -> Combatant {
    fighter_at(weapon, bonus, Pos { y: 0, x: 0 })
}

pub(crate) fn fighter_at(weapon: WeaponKind, bonus: Option<BonusKind>, pos: Pos) -> Combatant {
    Combatant::new("Player", pos, 100, Loadout { weapon, bonus }, &RulesConfig::default())
}

/// Open grid with the shooter near the west edge and the target five cells
/// short of the east edge, both on the middle row.
pub(crate) fn open_lane_fixture(width: usize, height: usize) -> (Grid, Pos, Pos) {
    let row = (height / 2) as i32;
    let grid = Grid::new(width, height);
    (grid, Pos { y: row, x: 1 }, Pos { y: row, x: width as i32 - 5 })
}

pub(crate) fn duel_state(rows: &[&str], player: Pos, opponent: Pos) -> GameState {
    let rules = RulesConfig::default();
    GameState {
        grid: Grid::from_rows(rows),
        player: Combatant::new(PLAYER_NAME, player, 100, Loadout::default(), &rules),
        opponent: Combatant::new(OPPONENT_NAME, opponent, 100, Loadout::default(), &rules),
        turn_owner: Side::Player,
        phase: Phase::InProgress,
        winner: None,
        turn: 0,
    }
}

pub(crate) fn arena(rows: &[&str], player_start: Pos, opponent_start: Pos) -> FixedArena {
    FixedArena(Arena { grid: Grid::from_rows(rows), player_start, opponent_start })
}

/// A started match on a fixed open arena with the given distance between the duelists.
pub(crate) fn started_game_at_distance(gap: i32, player: Loadout, opponent: Loadout) -> Game {
    started_game_with_rules(RulesConfig::default(), gap, player, opponent)
}

/// Rules where every in-range shot with a clear path connects.
pub(crate) fn sure_shot_rules() -> RulesConfig {
    RulesConfig { accuracy_floor: 1.0, ..RulesConfig::default() }
}

pub(crate) fn started_game_with_rules(
    rules: RulesConfig,
    gap: i32,
    player: Loadout,
    opponent: Loadout,
) -> Game {
    let width = (gap + 3) as usize;
    let row = ".".repeat(width);
    let provider = arena(&[&row, &row, &row], Pos { y: 1, x: 1 }, Pos { y: 1, x: 1 + gap });
    let mut game = Game::new(42, rules, Box::new(provider));
    game.equip(Side::Player, player).expect("setup");
    game.equip(Side::Opponent, opponent).expect("setup");
    game.begin().expect("begin");
    game
}
