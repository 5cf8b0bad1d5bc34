use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use sundown_core::{FrontierMapGenerator, InputJournal, RulesConfig, replay_to_end};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the journal JSON file to replay
    #[arg(short, long)]
    journal: PathBuf,
    /// Rules file the duel was played with
    #[arg(short, long)]
    rules: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let journal_data = fs::read_to_string(&args.journal)
        .with_context(|| format!("Failed to read journal file: {}", args.journal.display()))?;
    let journal =
        InputJournal::from_json(&journal_data).context("Failed to deserialize journal JSON")?;

    let rules = match &args.rules {
        Some(path) => RulesConfig::load(path)
            .with_context(|| format!("Failed to load rules file: {}", path.display()))?,
        None => RulesConfig::default(),
    };
    let provider = Box::new(FrontierMapGenerator::new(rules.map.clone()));
    let result = replay_to_end(&rules, provider, &journal).context("Replay failed during execution")?;

    println!("Replay complete.");
    println!("Inputs: {}", journal.inputs.len());
    println!("Turns: {}", result.turns);
    println!("Phase: {:?}", result.phase);
    println!("Winner: {:?}", result.winner);
    println!("Snapshot Hash: {}", result.final_snapshot_hash);

    Ok(())
}
