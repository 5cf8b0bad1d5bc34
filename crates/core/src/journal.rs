use crate::types::{Intent, Loadout, Side};

use serde::{Deserialize, Serialize};

pub const JOURNAL_FORMAT_VERSION: u16 = 2;

/// Every accepted intent of one match, enough to re-run it from its seed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub seed: u64,
    pub player_loadout: Loadout,
    pub opponent_loadout: Loadout,
    /// Whether the duel left setup. Inputs recorded before that run against a setup-phase match.
    pub started: bool,
    pub inputs: Vec<InputRecord>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub seq: u64,
    pub side: Side,
    pub intent: Intent,
}

impl InputJournal {
    pub fn new(seed: u64, player_loadout: Loadout, opponent_loadout: Loadout) -> Self {
        Self {
            format_version: JOURNAL_FORMAT_VERSION,
            seed,
            player_loadout,
            opponent_loadout,
            started: false,
            inputs: Vec::new(),
        }
    }

    pub fn set_loadout(&mut self, side: Side, loadout: Loadout) {
        match side {
            Side::Player => self.player_loadout = loadout,
            Side::Opponent => self.opponent_loadout = loadout,
        }
    }

    pub fn mark_started(&mut self) {
        self.started = true;
    }

    pub fn append(&mut self, seq: u64, side: Side, intent: Intent) {
        self.inputs.push(InputRecord { seq, side, intent });
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
