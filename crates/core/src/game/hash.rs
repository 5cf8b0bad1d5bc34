//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from turn resolution.
//! It does not own replay execution or journal policies.

use std::hash::Hasher;

use super::*;
use xxhash_rust::xxh3::Xxh3;

fn write_combatant(hasher: &mut Xxh3, fighter: &Combatant) {
    hasher.write_i32(fighter.pos.y);
    hasher.write_i32(fighter.pos.x);
    hasher.write_i32(fighter.max_health);
    hasher.write_i32(fighter.current_health);
    hasher.write_u8(fighter.loadout.weapon as u8);
    hasher.write_u8(fighter.loadout.bonus.map_or(0, |bonus| bonus as u8 + 1));
}

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.state.turn);
        hasher.write_u64(self.next_input_seq);
        hasher.write_u8(self.state.phase as u8);
        hasher.write_u8(self.state.turn_owner as u8);
        hasher.write_u8(match self.state.winner {
            None => 0,
            Some(Side::Player) => 1,
            Some(Side::Opponent) => 2,
        });
        hasher.write_u8(u8::from(self.abandoned));
        write_combatant(&mut hasher, &self.state.player);
        write_combatant(&mut hasher, &self.state.opponent);
        hasher.finish()
    }
}
