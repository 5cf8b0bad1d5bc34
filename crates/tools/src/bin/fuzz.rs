use anyhow::{Result, bail};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use sundown_core::{
    BonusKind, Direction, FrontierMapGenerator, Game, Intent, Loadout, Phase, RulesConfig, Side,
    WeaponKind,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 5000)]
    intents: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn random_loadout(rng: &mut ChaCha8Rng) -> Loadout {
    let weapon = choose(rng, &WeaponKind::ALL);
    let bonus = choose(rng, &BonusKind::ALL);
    let bonus = choose(rng, &[None, Some(bonus)]);
    Loadout { weapon, bonus }
}

fn check_invariants(game: &Game) -> Result<()> {
    let state = game.state();
    for side in [Side::Player, Side::Opponent] {
        let fighter = state.combatant(side);
        if fighter.current_health < 0 || fighter.current_health > fighter.max_health {
            bail!("{side:?} health {} outside [0, {}]", fighter.current_health, fighter.max_health);
        }
        if !state.grid.is_walkable(fighter.pos) {
            bail!("{side:?} standing on blocked cell {:?}", fighter.pos);
        }
    }
    if state.player.pos == state.opponent.pos {
        bail!("both duelists share {:?}", state.player.pos);
    }
    let someone_down = !state.player.is_alive() || !state.opponent.is_alive();
    if someone_down != (state.phase == Phase::GameOver) {
        bail!("phase {:?} disagrees with health", state.phase);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Starting Fuzz harness on seed {} for {} intents...", args.seed, args.intents);
    let rules = RulesConfig::default();
    let provider = Box::new(FrontierMapGenerator::new(rules.map.clone()));
    let mut game = Game::new(args.seed, rules, provider);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut duels = 0;
    let mut rejected = 0;
    for _ in 0..args.intents {
        if game.phase() == Phase::Setup {
            game.equip(Side::Player, random_loadout(&mut rng))?;
            game.equip(Side::Opponent, random_loadout(&mut rng))?;
            game.begin()?;
        }

        let intent = if game.phase() == Phase::GameOver {
            duels += 1;
            Intent::RestartIfGameOver
        } else {
            choose(
                &mut rng,
                &[
                    Intent::Move(Direction::Up),
                    Intent::Move(Direction::Down),
                    Intent::Move(Direction::Left),
                    Intent::Move(Direction::Right),
                    Intent::Fire,
                    Intent::Fire,
                    Intent::Wait,
                    game.policy_intent(),
                ],
            )
        };

        let owner = game.turn_owner();
        let before = game.snapshot_hash();
        if game.submit(intent).is_err() {
            rejected += 1;
            if game.snapshot_hash() != before || game.turn_owner() != owner {
                bail!("rejected {intent:?} changed the duel");
            }
        }
        check_invariants(&game)?;
    }

    println!("Fuzzing completed successfully: {duels} duels finished, {rejected} intents rejected.");
    Ok(())
}
