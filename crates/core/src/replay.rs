use std::error::Error;
use std::fmt;

use crate::{
    config::RulesConfig,
    game::Game,
    journal::{InputJournal, JOURNAL_FORMAT_VERSION},
    mapgen::ArenaProvider,
    types::{Phase, Side, TurnError},
};

#[derive(Debug, PartialEq)]
pub enum ReplayError {
    UnsupportedVersion { found: u16 },
    /// The journal says one side acted while the engine expected the other.
    OwnerMismatch { seq: u64 },
    Rejected { seq: u64, error: TurnError },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found } => write!(
                f,
                "journal format version {found} is not supported (expected {JOURNAL_FORMAT_VERSION})"
            ),
            Self::OwnerMismatch { seq } => write!(f, "input {seq} was recorded for the wrong side"),
            Self::Rejected { seq, error } => write!(f, "input {seq} was rejected on replay: {error}"),
        }
    }
}

impl Error for ReplayError {}

#[derive(Debug, PartialEq)]
pub struct ReplayResult {
    pub phase: Phase,
    pub winner: Option<Side>,
    pub turns: u64,
    pub final_snapshot_hash: u64,
}

fn start_from_journal(game: &mut Game, journal: &InputJournal) -> Result<(), TurnError> {
    game.equip(Side::Player, journal.player_loadout)?;
    game.equip(Side::Opponent, journal.opponent_loadout)?;
    if journal.started { game.begin() } else { Ok(()) }
}

/// Re-runs a recorded match from its seed and loadouts, feeding every journaled intent.
pub fn replay_to_end(
    rules: &RulesConfig,
    provider: Box<dyn ArenaProvider>,
    journal: &InputJournal,
) -> Result<ReplayResult, ReplayError> {
    if journal.format_version != JOURNAL_FORMAT_VERSION {
        return Err(ReplayError::UnsupportedVersion { found: journal.format_version });
    }
    let mut game = Game::new(journal.seed, rules.clone(), provider);
    start_from_journal(&mut game, journal).map_err(|error| ReplayError::Rejected { seq: 0, error })?;

    for record in &journal.inputs {
        if record.side != game.turn_owner() {
            return Err(ReplayError::OwnerMismatch { seq: record.seq });
        }
        game.submit(record.intent)
            .map_err(|error| ReplayError::Rejected { seq: record.seq, error })?;
    }

    Ok(ReplayResult {
        phase: game.phase(),
        winner: game.winner(),
        turns: game.current_turn(),
        final_snapshot_hash: game.snapshot_hash(),
    })
}
