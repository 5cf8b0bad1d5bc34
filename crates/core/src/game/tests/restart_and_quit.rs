//! Tests for abandoning a duel and starting a rematch.

use super::support::*;
use crate::seed::derive_rematch_seed;

fn finished_game() -> Game {
    let rifle = Loadout { weapon: WeaponKind::Rifle, bonus: Some(BonusKind::Gunslinger) };
    let pistol = Loadout { weapon: WeaponKind::Pistol, bonus: Some(BonusKind::Tough) };
    let mut game = started_game_with_rules(sure_shot_rules(), 4, rifle, pistol);
    game.state.opponent.current_health = 1;
    game.submit(Intent::Fire).expect("lethal shot");
    assert_eq!(game.phase(), Phase::GameOver);
    game
}

#[test]
fn quitting_abandons_the_match() {
    let mut game = started_game_at_distance(5, Loadout::default(), Loadout::default());
    let record = game.submit(Intent::Quit).expect("quit is always accepted");
    assert_eq!(record.action, TurnAction::Quit);
    assert!(game.is_abandoned());

    assert_eq!(game.submit(Intent::Wait), Err(TurnError::MatchAbandoned));
    assert_eq!(game.submit(Intent::RestartIfGameOver), Err(TurnError::MatchAbandoned));
    assert_eq!(game.equip(Side::Player, Loadout::default()), Err(TurnError::MatchAbandoned));
    assert!(game.log().contains(&LogEvent::Abandoned { side: Side::Player }));
}

#[test]
fn restart_is_refused_mid_duel() {
    let mut game = started_game_at_distance(5, Loadout::default(), Loadout::default());
    assert_eq!(game.submit(Intent::RestartIfGameOver), Err(TurnError::NotGameOver));
    assert_eq!(game.phase(), Phase::InProgress);
}

#[test]
fn rematch_keeps_loadouts_and_resets_everything_else() {
    let mut game = finished_game();
    let old_seed = game.seed();
    let player_loadout = game.state.player.loadout;
    let opponent_loadout = game.state.opponent.loadout;

    let record = game.submit(Intent::RestartIfGameOver).expect("game is over");
    assert_eq!(record.action, TurnAction::Restarted);
    assert!(record.phase_changed);

    assert_eq!(game.seed(), derive_rematch_seed(old_seed));
    assert_eq!(game.phase(), Phase::Setup);
    assert_eq!(game.winner(), None);
    assert_eq!(game.current_turn(), 0);
    assert_eq!(game.state.player.loadout, player_loadout);
    assert_eq!(game.state.opponent.loadout, opponent_loadout);
    assert_eq!(game.state.opponent.current_health, 120);
    assert_eq!(game.state.player.pos, Pos { y: 1, x: 1 });
    assert_eq!(game.state.opponent.pos, Pos { y: 1, x: 5 });

    assert_eq!(game.log(), &[LogEvent::Restarted { seed: game.seed() }]);

    let journal = game.journal();
    assert_eq!(journal.seed, game.seed());
    assert!(journal.inputs.is_empty());
    assert!(!journal.started);
    assert_eq!(journal.opponent_loadout, opponent_loadout);

    game.begin().expect("rematch begins");
    assert!(game.journal().started);
    game.submit(Intent::Wait).expect("fresh duel accepts intents");
}
