use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs;
use std::path::PathBuf;
use sundown_core::{
    BonusKind, FrontierMapGenerator, Game, Loadout, Phase, RulesConfig, Side, WeaponKind,
};

/// Runs a headless duel with both sides driven by the reactive policy.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Player weapon: pistol, rifle, shotgun (or 1-3)
    #[arg(short, long, default_value = "pistol")]
    weapon: WeaponKind,
    /// Player bonus: tough, long-shot, quickdraw, eagle-eye, gunslinger, desperado (or 1-6)
    #[arg(short, long)]
    bonus: Option<BonusKind>,
    #[arg(long, default_value = "pistol")]
    opponent_weapon: WeaponKind,
    #[arg(long)]
    opponent_bonus: Option<BonusKind>,
    /// TOML file overriding balance and map tuning
    #[arg(short, long)]
    rules: Option<PathBuf>,
    #[arg(short = 't', long, default_value_t = 500)]
    max_turns: u32,
    /// Where to write the input journal as JSON
    #[arg(short, long)]
    journal_out: Option<PathBuf>,
}

fn load_rules(path: Option<&PathBuf>) -> Result<RulesConfig> {
    match path {
        Some(path) => RulesConfig::load(path)
            .with_context(|| format!("Failed to load rules file: {}", path.display())),
        None => Ok(RulesConfig::default()),
    }
}

fn describe(loadout: Loadout) -> String {
    match loadout.bonus {
        Some(bonus) => format!("{} + {}", loadout.weapon.name(), bonus.name()),
        None => loadout.weapon.name().to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let rules = load_rules(args.rules.as_ref())?;
    let provider = Box::new(FrontierMapGenerator::new(rules.map.clone()));
    let mut game = Game::new(args.seed, rules, provider);

    let player = Loadout { weapon: args.weapon, bonus: args.bonus };
    let opponent = Loadout { weapon: args.opponent_weapon, bonus: args.opponent_bonus };
    game.equip(Side::Player, player).context("Failed to equip player")?;
    game.equip(Side::Opponent, opponent).context("Failed to equip opponent")?;
    game.begin().context("Failed to start the duel")?;

    println!("Duel on seed {}: {} vs {}", args.seed, describe(player), describe(opponent));
    for _ in 0..args.max_turns {
        if game.phase() != Phase::InProgress {
            break;
        }
        let record = game.play_policy_turn().context("Policy turn was rejected")?;
        println!(
            "[{:>4}] {} (Player {} / Bandit {})",
            record.turn,
            record.message(),
            record.player_health,
            record.opponent_health
        );
    }

    let turns = game.current_turn();
    match (game.phase(), game.winner()) {
        (Phase::GameOver, Some(Side::Player)) => println!("The player wins on turn {turns}."),
        (Phase::GameOver, Some(Side::Opponent)) => println!("The bandit wins on turn {turns}."),
        (Phase::GameOver, None) => println!("Both duelists fall. Nobody wins."),
        _ => println!("No winner after {} turns.", args.max_turns),
    }
    println!("Snapshot Hash: {}", game.snapshot_hash());

    if let Some(path) = &args.journal_out {
        let text = game.journal().to_json().context("Failed to serialize journal")?;
        fs::write(path, text)
            .with_context(|| format!("Failed to write journal file: {}", path.display()))?;
        info!("journal written to {}", path.display());
    }

    Ok(())
}
