//! The duel engine: owns one match, validates intents for the side whose turn
//! it is, and reports every resolved action as a [`TurnRecord`].

mod ballistics;
mod combat;
mod dice;
mod hash;
mod policy;
#[cfg(test)]
mod test_support;

use log::{debug, info, warn};

use crate::config::RulesConfig;
use crate::journal::InputJournal;
use crate::mapgen::ArenaProvider;
use crate::seed::derive_rematch_seed;
use crate::state::{Arena, Combatant, GameState, Grid};
use crate::types::*;

pub use ballistics::{distance, has_line_of_sight, line_cells, trace_shot};
pub use combat::{base_accuracy, hit_chance, resolve_shot};
pub use dice::{Dice, SeededDice};
pub use policy::choose_intent;

pub const PLAYER_NAME: &str = "Player";
pub const OPPONENT_NAME: &str = "Bandit";

pub struct Game {
    seed: u64,
    rules: RulesConfig,
    provider: Box<dyn ArenaProvider>,
    dice: SeededDice,
    state: GameState,
    log: Vec<LogEvent>,
    journal: InputJournal,
    next_input_seq: u64,
    abandoned: bool,
}

fn base_health(rules: &RulesConfig, side: Side) -> i32 {
    match side {
        Side::Player => rules.player_max_health,
        Side::Opponent => rules.opponent_max_health,
    }
}

fn side_name(side: Side) -> &'static str {
    match side {
        Side::Player => PLAYER_NAME,
        Side::Opponent => OPPONENT_NAME,
    }
}

fn build_state(arena: Arena, rules: &RulesConfig, player: Loadout, opponent: Loadout) -> GameState {
    let player_health = base_health(rules, Side::Player);
    let opponent_health = base_health(rules, Side::Opponent);
    GameState {
        grid: arena.grid,
        player: Combatant::new(PLAYER_NAME, arena.player_start, player_health, player, rules),
        opponent: Combatant::new(OPPONENT_NAME, arena.opponent_start, opponent_health, opponent, rules),
        turn_owner: Side::Player,
        phase: Phase::Setup,
        winner: None,
        turn: 0,
    }
}

impl Game {
    /// Fetches an arena for `seed` and seats both duelists with default loadouts.
    pub fn new(seed: u64, rules: RulesConfig, provider: Box<dyn ArenaProvider>) -> Self {
        let arena = provider.provide(seed);
        let state = build_state(arena, &rules, Loadout::default(), Loadout::default());
        Self {
            seed,
            dice: SeededDice::new(seed),
            journal: InputJournal::new(seed, Loadout::default(), Loadout::default()),
            rules,
            provider,
            state,
            log: Vec::new(),
            next_input_seq: 0,
            abandoned: false,
        }
    }

    pub fn equip(&mut self, side: Side, loadout: Loadout) -> Result<(), TurnError> {
        if self.abandoned {
            return Err(TurnError::MatchAbandoned);
        }
        if self.state.phase != Phase::Setup {
            return Err(TurnError::NotInSetup);
        }
        let pos = self.state.combatant(side).pos;
        let health = base_health(&self.rules, side);
        *self.state.combatant_mut(side) =
            Combatant::new(side_name(side), pos, health, loadout, &self.rules);
        self.journal.set_loadout(side, loadout);
        debug!("{side:?} equipped {loadout:?}");
        Ok(())
    }

    pub fn begin(&mut self) -> Result<(), TurnError> {
        if self.abandoned {
            return Err(TurnError::MatchAbandoned);
        }
        if self.state.phase != Phase::Setup {
            return Err(TurnError::NotInSetup);
        }
        self.state.phase = Phase::InProgress;
        self.state.turn_owner = Side::Player;
        self.journal.mark_started();
        self.log.push(LogEvent::MatchStarted { seed: self.seed });
        info!("duel started with seed {}", self.seed);
        Ok(())
    }

    /// Applies one intent for the current turn owner. A rejected intent leaves
    /// the state untouched and the same side still to act.
    pub fn submit(&mut self, intent: Intent) -> Result<TurnRecord, TurnError> {
        let actor = self.state.turn_owner;
        let result = self.dispatch(actor, intent);
        match &result {
            Ok(record) => {
                if !matches!(record.action, TurnAction::Restarted) {
                    self.journal.append(self.next_input_seq, actor, intent);
                    self.next_input_seq += 1;
                }
                debug!("turn {}: {}", record.turn, record.message());
            }
            Err(error) => {
                self.log.push(LogEvent::Rejected { side: actor, error: *error });
                debug!("{actor:?} intent {intent:?} rejected: {error}");
            }
        }
        result
    }

    fn dispatch(&mut self, actor: Side, intent: Intent) -> Result<TurnRecord, TurnError> {
        if self.abandoned {
            return Err(TurnError::MatchAbandoned);
        }
        match (self.state.phase, intent) {
            (_, Intent::Quit) => Ok(self.quit(actor)),
            (Phase::GameOver, Intent::RestartIfGameOver) => Ok(self.restart(actor)),
            (_, Intent::RestartIfGameOver) => Err(TurnError::NotGameOver),
            (Phase::GameOver, _) => Err(TurnError::ActionAfterGameOver),
            (Phase::Setup, _) => Err(TurnError::NotStarted),
            (Phase::InProgress, Intent::Move(direction)) => self.apply_move(actor, direction),
            (Phase::InProgress, Intent::Fire) => self.apply_fire(actor),
            (Phase::InProgress, Intent::Wait) => {
                self.log.push(LogEvent::Waited { side: actor });
                Ok(self.finish_turn(actor, TurnAction::Waited))
            }
        }
    }

    fn apply_move(&mut self, actor: Side, direction: Direction) -> Result<TurnRecord, TurnError> {
        let from = self.state.combatant(actor).pos;
        let to = from.step(direction);
        if !self.state.grid.is_walkable(to) || self.state.is_occupied(to) {
            return Err(TurnError::InvalidMove { to });
        }
        self.state.combatant_mut(actor).pos = to;
        self.log.push(LogEvent::Moved { side: actor, to });
        Ok(self.finish_turn(actor, TurnAction::Moved { from, to }))
    }

    fn apply_fire(&mut self, actor: Side) -> Result<TurnRecord, TurnError> {
        let from = self.state.combatant(actor).pos;
        let to = self.state.combatant(actor.other()).pos;
        let gap = distance(from, to);
        let effective_range = self.state.combatant(actor).effective_range();
        if gap > effective_range {
            return Err(TurnError::OutOfRange { distance: gap, effective_range });
        }

        let path = trace_shot(&self.state.grid, from, to)?;
        let (shooter, target) = self.state.duelists_mut(actor);
        let result = resolve_shot(shooter, target, &path, &self.rules, &mut self.dice)?;
        let bullet_end = ballistics::bullet_end(&self.state.grid, &path, result, to);
        self.log.push(LogEvent::ShotFired { side: actor, result });
        Ok(self.finish_turn(actor, TurnAction::Fired(ShotReport { path, result, bullet_end })))
    }

    fn finish_turn(&mut self, actor: Side, action: TurnAction) -> TurnRecord {
        let turn = self.state.turn;
        let winner = match (self.state.player.is_alive(), self.state.opponent.is_alive()) {
            (true, true) => {
                self.state.turn_owner = actor.other();
                self.state.turn += 1;
                return self.record(actor, turn, action, false);
            }
            (true, false) => Some(Side::Player),
            (false, true) => Some(Side::Opponent),
            (false, false) => None,
        };
        self.state.phase = Phase::GameOver;
        self.state.winner = winner;
        self.log.push(LogEvent::GameOver { winner });
        info!("duel over on turn {turn}, winner {winner:?}");
        self.record(actor, turn, action, true)
    }

    fn quit(&mut self, actor: Side) -> TurnRecord {
        self.abandoned = true;
        self.log.push(LogEvent::Abandoned { side: actor });
        info!("{actor:?} abandoned the duel");
        self.record(actor, self.state.turn, TurnAction::Quit, false)
    }

    /// Builds a fresh match on a new arena, keeping both loadouts. The event log
    /// and journal both start over with the new seed.
    fn restart(&mut self, actor: Side) -> TurnRecord {
        let seed = derive_rematch_seed(self.seed);
        let player = self.state.player.loadout;
        let opponent = self.state.opponent.loadout;
        let arena = self.provider.provide(seed);

        self.seed = seed;
        self.state = build_state(arena, &self.rules, player, opponent);
        self.dice = SeededDice::new(seed);
        self.journal = InputJournal::new(seed, player, opponent);
        self.next_input_seq = 0;
        self.log.clear();
        self.log.push(LogEvent::Restarted { seed });
        info!("rematch with seed {seed}");
        self.record(actor, 0, TurnAction::Restarted, true)
    }

    fn record(&self, actor: Side, turn: u64, action: TurnAction, phase_changed: bool) -> TurnRecord {
        let shooter = self.state.combatant(actor);
        TurnRecord {
            turn,
            actor,
            actor_name: shooter.name,
            target_name: self.state.combatant(actor.other()).name,
            weapon_name: shooter.weapon.name,
            action,
            player_health: self.state.player.current_health,
            opponent_health: self.state.opponent.current_health,
            phase: self.state.phase,
            winner: self.state.winner,
            phase_changed,
        }
    }

    /// What the reactive policy would do for whoever owns the current turn.
    pub fn policy_intent(&self) -> Intent {
        choose_intent(&self.state, self.state.turn_owner, &self.rules.policy, self.seed)
    }

    /// Submits the policy's intent, waiting instead if the engine refuses it.
    pub fn play_policy_turn(&mut self) -> Result<TurnRecord, TurnError> {
        let intent = self.policy_intent();
        match self.submit(intent) {
            Err(error) if self.state.phase == Phase::InProgress && !self.abandoned => {
                warn!("policy intent {intent:?} rejected ({error}); waiting instead");
                self.submit(Intent::Wait)
            }
            other => other,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn journal(&self) -> &InputJournal {
        &self.journal
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn current_turn(&self) -> u64 {
        self.state.turn
    }

    pub fn turn_owner(&self) -> Side {
        self.state.turn_owner
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn winner(&self) -> Option<Side> {
        self.state.winner
    }

    pub fn is_abandoned(&self) -> bool {
        self.abandoned
    }
}
