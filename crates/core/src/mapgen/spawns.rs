//! Starting positions for the two duelists.

use std::collections::VecDeque;

use crate::config::MapConfig;
use crate::seed::SeedStreams;
use crate::state::Grid;
use crate::types::{Direction, Pos, TerrainKind};

const START_ATTEMPTS: usize = 8;

fn manhattan(a: Pos, b: Pos) -> u32 {
    a.y.abs_diff(b.y) + a.x.abs_diff(b.x)
}

/// Every walkable cell reachable from `from` by orthogonal steps, `from` included.
/// Empty when `from` itself is not walkable.
pub fn walkable_region(grid: &Grid, from: Pos) -> Vec<Pos> {
    if !grid.is_walkable(from) {
        return Vec::new();
    }
    let mut seen = vec![false; grid.width() * grid.height()];
    let index = |pos: Pos| (pos.y as usize) * grid.width() + (pos.x as usize);
    let mut region = Vec::new();
    let mut queue = VecDeque::from([from]);
    seen[index(from)] = true;
    while let Some(pos) = queue.pop_front() {
        region.push(pos);
        for direction in Direction::ALL {
            let next = pos.step(direction);
            if grid.is_walkable(next) && !seen[index(next)] {
                seen[index(next)] = true;
                queue.push_back(next);
            }
        }
    }
    region
}

/// Picks connected starts: the player somewhere away from the border, the
/// opponent in the same walkable region and preferably more than
/// `spawn_min_distance` steps off. Maps without two connected walkable cells
/// get their interior cleared first.
pub(super) fn choose_spawns(grid: &mut Grid, streams: &mut SeedStreams, config: &MapConfig) -> (Pos, Pos) {
    if let Some(starts) = pick_starts(grid, streams, config) {
        return starts;
    }
    log::warn!("no connected spawn pair on generated terrain; clearing interior");
    clear_interior(grid);
    pick_starts(grid, streams, config).unwrap_or_else(|| fixed_starts(grid))
}

fn pick_starts(grid: &Grid, streams: &mut SeedStreams, config: &MapConfig) -> Option<(Pos, Pos)> {
    let candidates = spawn_candidates(grid, config.spawn_border_margin);
    if candidates.is_empty() {
        return None;
    }

    let mut fallback = None;
    for _ in 0..START_ATTEMPTS {
        let player = candidates[streams.usize_in((0, candidates.len() - 1))];
        let region: Vec<Pos> =
            walkable_region(grid, player).into_iter().filter(|pos| *pos != player).collect();
        if region.is_empty() {
            continue;
        }

        let far: Vec<Pos> = region
            .iter()
            .copied()
            .filter(|pos| candidates.contains(pos))
            .filter(|pos| manhattan(*pos, player) > config.spawn_min_distance)
            .collect();
        if !far.is_empty() {
            let opponent = far[streams.usize_in((0, far.len() - 1))];
            return Some((player, opponent));
        }
        if fallback.is_none() {
            let opponent = region[streams.usize_in((0, region.len() - 1))];
            fallback = Some((player, opponent));
        }
    }
    fallback
}

fn spawn_candidates(grid: &Grid, margin: usize) -> Vec<Pos> {
    let margin = margin as i32;
    let max_x = grid.width() as i32 - margin;
    let max_y = grid.height() as i32 - margin;
    let inner: Vec<Pos> = grid
        .positions()
        .filter(|pos| pos.x >= margin && pos.x < max_x && pos.y >= margin && pos.y < max_y)
        .filter(|pos| grid.is_walkable(*pos))
        .collect();
    if inner.is_empty() {
        grid.positions().filter(|pos| grid.is_walkable(*pos)).collect()
    } else {
        inner
    }
}

fn clear_interior(grid: &mut Grid) {
    let width = grid.width() as i32;
    let height = grid.height() as i32;
    let interior: Vec<Pos> = grid
        .positions()
        .filter(|pos| pos.x > 0 && pos.y > 0 && pos.x < width - 1 && pos.y < height - 1)
        .collect();
    for pos in interior {
        grid.set(pos, TerrainKind::Open);
    }
}

/// Last resort: two neighbouring interior cells, forced open. The generator
/// never builds grids smaller than `MIN_MAP_SIDE`, so both lie inside the border.
fn fixed_starts(grid: &mut Grid) -> (Pos, Pos) {
    let player = Pos { y: 1, x: 1 };
    let opponent = Pos { y: 1, x: 2 };
    grid.set(player, TerrainKind::Open);
    grid.set(opponent, TerrainKind::Open);
    (player, opponent)
}
