//! Map providers: the seam between the engine and whatever builds the terrain.

mod generator;
mod spawns;

pub use generator::FrontierMapGenerator;
pub use spawns::walkable_region;

use crate::state::Arena;

/// Supplies a fully populated grid plus two walkable, mutually reachable start cells.
pub trait ArenaProvider {
    fn provide(&self, seed: u64) -> Arena;
}

/// Hands out the same prebuilt arena for every match.
#[derive(Clone, Debug)]
pub struct FixedArena(pub Arena);

impl ArenaProvider for FixedArena {
    fn provide(&self, _seed: u64) -> Arena {
        self.0.clone()
    }
}
