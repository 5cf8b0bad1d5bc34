use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::content::{BonusKind, WeaponKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn step(self, direction: Direction) -> Pos {
        let (dy, dx) = direction.delta();
        Pos { y: self.y + dy, x: self.x + dx }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TerrainKind {
    Open,
    Water,
    Tree,
    Rock,
    Ruin,
    Cactus,
    Wall,
}

impl TerrainKind {
    pub fn blocks_movement(self) -> bool {
        !matches!(self, TerrainKind::Open)
    }

    /// Cacti slow a walker down to a stop but a bullet passes between the arms.
    pub fn blocks_line_of_sight(self) -> bool {
        !matches!(self, TerrainKind::Open | TerrainKind::Cactus)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    /// `(dy, dx)` for one step; `Up` decreases `y`.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Move(Direction),
    Fire,
    Wait,
    Quit,
    RestartIfGameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    pub weapon: WeaponKind,
    pub bonus: Option<BonusKind>,
}

impl Default for Loadout {
    fn default() -> Self {
        Self { weapon: WeaponKind::Pistol, bonus: None }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Setup,
    InProgress,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissCause {
    Cover,
    Accuracy,
}

/// Cells a bullet crosses on its way from shooter to target.
#[derive(Clone, Debug, PartialEq)]
pub enum ShotPath {
    Clear { cells: Vec<Pos>, distance: f64 },
    Blocked { cells: Vec<Pos>, at: Pos, terrain: TerrainKind },
}

impl ShotPath {
    pub fn cells(&self) -> &[Pos] {
        match self {
            ShotPath::Clear { cells, .. } | ShotPath::Blocked { cells, .. } => cells,
        }
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, ShotPath::Clear { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShotResult {
    Hit { damage: i32, critical: bool, target_health: i32, killed: bool },
    Miss { cause: MissCause },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShotReport {
    pub path: ShotPath,
    pub result: ShotResult,
    pub bullet_end: Pos,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TurnAction {
    Moved { from: Pos, to: Pos },
    Fired(ShotReport),
    Waited,
    Quit,
    Restarted,
}

/// Everything the presentation layer needs to animate one resolved intent.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnRecord {
    pub turn: u64,
    pub actor: Side,
    pub actor_name: &'static str,
    pub target_name: &'static str,
    pub weapon_name: &'static str,
    pub action: TurnAction,
    pub player_health: i32,
    pub opponent_health: i32,
    pub phase: Phase,
    pub winner: Option<Side>,
    pub phase_changed: bool,
}

impl TurnRecord {
    pub fn message(&self) -> String {
        let actor = self.actor_name;
        let target = self.target_name;
        let weapon = self.weapon_name;
        match &self.action {
            TurnAction::Moved { .. } => format!("{actor} moves."),
            TurnAction::Waited => format!("{actor} waits..."),
            TurnAction::Quit => format!("{actor} walks away from the duel."),
            TurnAction::Restarted => "A new duel is about to begin.".to_string(),
            TurnAction::Fired(report) => match report.result {
                ShotResult::Hit { damage, critical, killed, .. } => {
                    let mut text = format!("{actor}'s {weapon} hits {target} for {damage} damage!");
                    if critical {
                        text.push_str(" CRITICAL HIT!");
                    }
                    if killed {
                        text.push_str(&format!(" {target} is dead!"));
                    }
                    text
                }
                ShotResult::Miss { cause: MissCause::Cover } => {
                    format!("{actor}'s {weapon} shot hits cover!")
                }
                ShotResult::Miss { cause: MissCause::Accuracy } => {
                    format!("{actor}'s {weapon} misses {target}!")
                }
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    MatchStarted { seed: u64 },
    Moved { side: Side, to: Pos },
    ShotFired { side: Side, result: ShotResult },
    Waited { side: Side },
    Rejected { side: Side, error: TurnError },
    GameOver { winner: Option<Side> },
    Abandoned { side: Side },
    Restarted { seed: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridError {
    OutOfBounds { pos: Pos },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { pos } => write!(f, "cell ({}, {}) is outside the grid", pos.x, pos.y),
        }
    }
}

impl Error for GridError {}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TurnError {
    InvalidMove { to: Pos },
    OutOfRange { distance: f64, effective_range: f64 },
    ActionAfterGameOver,
    NotStarted,
    NotInSetup,
    NotGameOver,
    MatchAbandoned,
    OutOfBounds { pos: Pos },
}

// Distances come from integer grid offsets, never NaN.
impl Eq for TurnError {}

impl From<GridError> for TurnError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::OutOfBounds { pos } => TurnError::OutOfBounds { pos },
        }
    }
}

impl fmt::Display for TurnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMove { to } => write!(f, "cannot move to ({}, {})", to.x, to.y),
            Self::OutOfRange { distance, effective_range } => {
                write!(f, "target at {distance:.1} tiles is beyond effective range {effective_range:.1}")
            }
            Self::ActionAfterGameOver => write!(f, "the duel is over; only a restart is accepted"),
            Self::NotStarted => write!(f, "the duel has not started yet"),
            Self::NotInSetup => write!(f, "loadouts can only change before the duel starts"),
            Self::NotGameOver => write!(f, "restart is only available once the duel is over"),
            Self::MatchAbandoned => write!(f, "the duel was abandoned"),
            Self::OutOfBounds { pos } => write!(f, "cell ({}, {}) is outside the grid", pos.x, pos.y),
        }
    }
}

impl Error for TurnError {}

/// Resolver-level refusal to take a shot; nothing was drawn or changed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShotRejected {
    OutOfRange { distance: f64, effective_range: f64 },
}

impl fmt::Display for ShotRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { distance, effective_range } => {
                write!(f, "target at {distance:.1} tiles is beyond effective range {effective_range:.1}")
            }
        }
    }
}

impl Error for ShotRejected {}

impl From<ShotRejected> for TurnError {
    fn from(err: ShotRejected) -> Self {
        match err {
            ShotRejected::OutOfRange { distance, effective_range } => {
                TurnError::OutOfRange { distance, effective_range }
            }
        }
    }
}
