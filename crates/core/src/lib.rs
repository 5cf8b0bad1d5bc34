pub mod config;
pub mod content;
pub mod game;
pub mod journal;
pub mod mapgen;
pub mod replay;
mod seed;
pub mod state;
pub mod types;

pub use config::{ConfigError, RulesConfig};
pub use content::{BonusKind, BonusProfile, WeaponKind, WeaponProfile};
pub use game::{Dice, Game, SeededDice};
pub use journal::{InputJournal, InputRecord};
pub use mapgen::{ArenaProvider, FixedArena, FrontierMapGenerator};
pub use replay::*;
pub use state::{Arena, Combatant, GameState, Grid};
pub use types::*;
