//! Tests for how a duel ends and what is still accepted afterwards.

use super::support::*;

fn shotgun() -> Loadout {
    Loadout { weapon: WeaponKind::Shotgun, bonus: None }
}

#[test]
fn lethal_hit_ends_the_duel_with_the_shooter_winning() {
    let mut game = started_game_with_rules(sure_shot_rules(), 2, shotgun(), shotgun());
    game.state.opponent.current_health = 5;

    let record = game.submit(Intent::Fire).expect("in range");
    assert!(matches!(
        record.action,
        TurnAction::Fired(ShotReport {
            result: ShotResult::Hit { target_health: 0, killed: true, .. },
            ..
        })
    ));
    assert!(record.message().ends_with("Bandit is dead!"), "{}", record.message());
    assert!(record.phase_changed);
    assert_eq!(record.phase, Phase::GameOver);
    assert_eq!(record.winner, Some(Side::Player));
    assert_eq!(record.opponent_health, 0);
    assert_eq!(game.state.opponent.current_health, 0);
    assert_eq!(game.winner(), Some(Side::Player));
    assert!(matches!(game.log().last(), Some(LogEvent::GameOver { winner: Some(Side::Player) })));
}

#[test]
fn opponent_can_win_too() {
    let mut game = started_game_with_rules(sure_shot_rules(), 2, shotgun(), shotgun());
    game.state.player.current_health = 1;
    game.submit(Intent::Wait).expect("player waits");
    let record = game.submit(Intent::Fire).expect("in range");
    assert_eq!(record.actor, Side::Opponent);
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.winner(), Some(Side::Opponent));
}

#[test]
fn nothing_but_restart_or_quit_after_game_over() {
    let mut game = started_game_with_rules(sure_shot_rules(), 2, shotgun(), shotgun());
    game.state.opponent.current_health = 1;
    game.submit(Intent::Fire).expect("lethal shot");
    let after = game.snapshot_hash();

    for intent in [Intent::Fire, Intent::Wait, Intent::Move(Direction::Up)] {
        assert_eq!(game.submit(intent), Err(TurnError::ActionAfterGameOver));
    }
    assert_eq!(game.snapshot_hash(), after);
}

#[test]
fn simultaneous_death_is_a_draw() {
    let mut game = started_game_with_rules(sure_shot_rules(), 2, shotgun(), shotgun());
    game.state.player.current_health = 0;
    game.state.opponent.current_health = 0;

    let record = game.finish_turn(Side::Player, TurnAction::Waited);
    assert_eq!(record.phase, Phase::GameOver);
    assert_eq!(record.winner, None);
    assert_eq!(game.winner(), None);
}

#[test]
fn duel_stays_open_while_both_stand() {
    let mut game = started_game_with_rules(sure_shot_rules(), 2, shotgun(), shotgun());
    let record = game.submit(Intent::Fire).expect("in range");
    assert!(!record.phase_changed);
    assert_eq!(record.phase, Phase::InProgress);
    assert!(game.state.opponent.current_health > 0);
    assert_eq!(game.turn_owner(), Side::Opponent);
}
