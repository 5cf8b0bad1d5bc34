use crate::config::RulesConfig;
use crate::content::{BonusProfile, WeaponProfile};
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<TerrainKind>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![TerrainKind::Open; width * height] }
    }

    /// Builds a grid from rows of map glyphs: `.` open, `#` wall, `~` water,
    /// `T` tree, `R` rock, `H` ruin, `Y` cactus. Any other glyph is open ground.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                let kind = match glyph {
                    '#' => TerrainKind::Wall,
                    '~' => TerrainKind::Water,
                    'T' => TerrainKind::Tree,
                    'R' => TerrainKind::Rock,
                    'H' => TerrainKind::Ruin,
                    'Y' => TerrainKind::Cactus,
                    _ => TerrainKind::Open,
                };
                grid.cells[y * width + x] = kind;
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn cell_at(&self, pos: Pos) -> Result<TerrainKind, GridError> {
        if !self.in_bounds(pos) {
            return Err(GridError::OutOfBounds { pos });
        }
        Ok(self.cells[self.index(pos)])
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.cell_at(pos).is_ok_and(|kind| !kind.blocks_movement())
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| Pos { y: y as i32, x: x as i32 })
        })
    }

    pub(crate) fn set(&mut self, pos: Pos, kind: TerrainKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.cells[idx] = kind;
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

/// A generated map plus the two starting cells handed over by a map provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arena {
    pub grid: Grid,
    pub player_start: Pos,
    pub opponent_start: Pos,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Combatant {
    pub name: &'static str,
    pub pos: Pos,
    pub max_health: i32,
    pub current_health: i32,
    pub loadout: Loadout,
    pub weapon: WeaponProfile,
    pub bonus: BonusProfile,
}

impl Combatant {
    pub fn new(name: &'static str, pos: Pos, base_health: i32, loadout: Loadout, rules: &RulesConfig) -> Self {
        let weapon = loadout.weapon.profile(rules);
        let bonus = BonusProfile::for_kind(loadout.bonus, &rules.bonuses);
        let max_health = base_health + bonus.health_delta();
        Self { name, pos, max_health, current_health: max_health, loadout, weapon, bonus }
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    pub fn effective_range(&self) -> f64 {
        f64::from(self.weapon.max_range) * self.bonus.range_multiplier()
    }

    pub fn take_damage(&mut self, damage: i32) {
        self.current_health = (self.current_health - damage).max(0);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub grid: Grid,
    pub player: Combatant,
    pub opponent: Combatant,
    pub turn_owner: Side,
    pub phase: Phase,
    pub winner: Option<Side>,
    pub turn: u64,
}

impl GameState {
    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    /// Shooter first, target second.
    pub fn duelists_mut(&mut self, shooter: Side) -> (&mut Combatant, &mut Combatant) {
        match shooter {
            Side::Player => (&mut self.player, &mut self.opponent),
            Side::Opponent => (&mut self.opponent, &mut self.player),
        }
    }

    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.player.pos == pos || self.opponent.pos == pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{BonusKind, WeaponKind};

    #[test]
    fn cell_at_rejects_out_of_bounds() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.cell_at(Pos { y: 2, x: 3 }), Ok(TerrainKind::Open));
        assert_eq!(
            grid.cell_at(Pos { y: 3, x: 0 }),
            Err(GridError::OutOfBounds { pos: Pos { y: 3, x: 0 } })
        );
        assert!(grid.cell_at(Pos { y: 0, x: -1 }).is_err());
    }

    #[test]
    fn walkability_follows_terrain_table() {
        let grid = Grid::from_rows(&[".#~TRHY"]);
        let walkable: Vec<bool> = (0..7).map(|x| grid.is_walkable(Pos { y: 0, x })).collect();
        assert_eq!(walkable, vec![true, false, false, false, false, false, false]);
        assert!(!grid.is_walkable(Pos { y: 1, x: 0 }));
    }

    #[test]
    fn only_open_ground_and_cactus_let_bullets_through() {
        let see_through: Vec<TerrainKind> = [
            TerrainKind::Open,
            TerrainKind::Water,
            TerrainKind::Tree,
            TerrainKind::Rock,
            TerrainKind::Ruin,
            TerrainKind::Cactus,
            TerrainKind::Wall,
        ]
        .into_iter()
        .filter(|kind| !kind.blocks_line_of_sight())
        .collect();
        assert_eq!(see_through, vec![TerrainKind::Open, TerrainKind::Cactus]);
    }

    #[test]
    fn tough_bonus_raises_starting_health() {
        let rules = RulesConfig::default();
        let loadout = Loadout { weapon: WeaponKind::Rifle, bonus: Some(BonusKind::Tough) };
        let fighter = Combatant::new("Player", Pos { y: 1, x: 1 }, 100, loadout, &rules);
        assert_eq!(fighter.max_health, 120);
        assert_eq!(fighter.current_health, 120);
    }

    #[test]
    fn damage_never_drops_health_below_zero() {
        let rules = RulesConfig::default();
        let mut fighter = Combatant::new("Bandit", Pos { y: 1, x: 1 }, 100, Loadout::default(), &rules);
        fighter.take_damage(250);
        assert_eq!(fighter.current_health, 0);
        assert!(!fighter.is_alive());
    }
}
