//! Old-West terrain dressing: rivers and ponds, tree clusters, rock formations,
//! cactus patches, ruined buildings, and scattered cover walls.
//!
//! Every draw comes from a [`SeedStreams`] over the match seed, so the same
//! seed and config always produce the same arena.

use crate::config::{MIN_MAP_SIDE, MapConfig};
use crate::seed::SeedStreams;
use crate::state::{Arena, Grid};
use crate::types::{Pos, TerrainKind};

use super::ArenaProvider;
use super::spawns::choose_spawns;

#[derive(Clone, Debug, Default)]
pub struct FrontierMapGenerator {
    config: MapConfig,
}

impl FrontierMapGenerator {
    pub fn new(config: MapConfig) -> Self {
        Self { config }
    }

    pub fn generate(&self, seed: u64) -> Arena {
        let config = &self.config;
        let mut streams = SeedStreams::new(seed);
        let mut grid = Grid::new(config.width.max(MIN_MAP_SIDE), config.height.max(MIN_MAP_SIDE));

        build_border_walls(&mut grid);
        add_water_features(&mut grid, &mut streams, config);
        add_tree_clusters(&mut grid, &mut streams, config);
        add_rock_formations(&mut grid, &mut streams, config);
        add_cactus_patches(&mut grid, &mut streams, config);
        add_building_ruins(&mut grid, &mut streams, config);
        add_cover_walls(&mut grid, &mut streams, config);

        let (player_start, opponent_start) = choose_spawns(&mut grid, &mut streams, config);
        Arena { grid, player_start, opponent_start }
    }
}

impl ArenaProvider for FrontierMapGenerator {
    fn provide(&self, seed: u64) -> Arena {
        self.generate(seed)
    }
}

fn dims(grid: &Grid) -> (i32, i32) {
    (grid.width() as i32, grid.height() as i32)
}

/// Only bare ground gets dressed, so features never overwrite each other.
fn place_on_open(grid: &mut Grid, pos: Pos, kind: TerrainKind) {
    if grid.cell_at(pos) == Ok(TerrainKind::Open) {
        grid.set(pos, kind);
    }
}

fn build_border_walls(grid: &mut Grid) {
    let (width, height) = dims(grid);
    for x in 0..width {
        grid.set(Pos { y: 0, x }, TerrainKind::Wall);
        grid.set(Pos { y: height - 1, x }, TerrainKind::Wall);
    }
    for y in 0..height {
        grid.set(Pos { y, x: 0 }, TerrainKind::Wall);
        grid.set(Pos { y, x: width - 1 }, TerrainKind::Wall);
    }
}

fn add_water_features(grid: &mut Grid, streams: &mut SeedStreams, config: &MapConfig) {
    for _ in 0..streams.usize_in(config.water_features) {
        if streams.chance(0.5) {
            carve_river(grid, streams);
        } else {
            carve_pond(grid, streams, config);
        }
    }
}

fn carve_river(grid: &mut Grid, streams: &mut SeedStreams) {
    let (width, height) = dims(grid);
    let horizontal = streams.chance(0.5);
    let (span, across) = if horizontal { (width, height) } else { (height, width) };
    let center = streams.i32_in(across / 4, 3 * across / 4);
    for along in 2..(span - 2) {
        let offset = streams.i32_in(-2, 2);
        let line = (center + offset).clamp(2, (across - 3).max(2));
        let half_width = streams.i32_in(1, 2);
        for spread in -half_width..=half_width {
            let pos = if horizontal {
                Pos { y: line + spread, x: along }
            } else {
                Pos { y: along, x: line + spread }
            };
            if grid.in_bounds(pos) && grid.cell_at(pos) != Ok(TerrainKind::Wall) {
                grid.set(pos, TerrainKind::Water);
            }
        }
    }
}

fn carve_pond(grid: &mut Grid, streams: &mut SeedStreams, config: &MapConfig) {
    let (width, height) = dims(grid);
    let center = Pos { y: streams.i32_in(5, height - 6), x: streams.i32_in(5, width - 6) };
    let radius = (streams.usize_in(config.water_size) / 2) as i32;
    for y in (center.y - radius)..=(center.y + radius) {
        for x in (center.x - radius)..=(center.x + radius) {
            let pos = Pos { y, x };
            let distance = (x - center.x).abs() + (y - center.y).abs();
            let ragged_edge = radius + streams.i32_in(-1, 1);
            if distance <= ragged_edge {
                place_on_open(grid, pos, TerrainKind::Water);
            }
        }
    }
}

/// Scatters `size` cells of `kind` within `spread` of a random anchor.
fn scatter_cluster(
    grid: &mut Grid,
    streams: &mut SeedStreams,
    kind: TerrainKind,
    anchor_margin: i32,
    spread: i32,
    size: usize,
) {
    let (width, height) = dims(grid);
    let anchor = Pos {
        y: streams.i32_in(anchor_margin, height - anchor_margin - 1),
        x: streams.i32_in(anchor_margin, width - anchor_margin - 1),
    };
    for _ in 0..size {
        let pos = Pos {
            y: anchor.y + streams.i32_in(-spread, spread),
            x: anchor.x + streams.i32_in(-spread, spread),
        };
        place_on_open(grid, pos, kind);
    }
}

fn add_tree_clusters(grid: &mut Grid, streams: &mut SeedStreams, config: &MapConfig) {
    for _ in 0..streams.usize_in(config.tree_clusters) {
        let size = streams.usize_in(config.tree_cluster_size);
        scatter_cluster(grid, streams, TerrainKind::Tree, 3, 3, size);
    }
}

fn add_rock_formations(grid: &mut Grid, streams: &mut SeedStreams, config: &MapConfig) {
    for _ in 0..streams.usize_in(config.rock_formations) {
        let size = streams.usize_in((2, 5));
        scatter_cluster(grid, streams, TerrainKind::Rock, 3, 2, size);
    }
}

fn add_cactus_patches(grid: &mut Grid, streams: &mut SeedStreams, config: &MapConfig) {
    for _ in 0..streams.usize_in(config.cactus_patches) {
        let size = streams.usize_in((1, 4));
        scatter_cluster(grid, streams, TerrainKind::Cactus, 2, 4, size);
    }
}

/// Rectangular outlines with roughly a third of the wall segments missing.
fn add_building_ruins(grid: &mut Grid, streams: &mut SeedStreams, config: &MapConfig) {
    let (width, height) = dims(grid);
    for _ in 0..streams.usize_in(config.building_ruins) {
        let origin = Pos { y: streams.i32_in(4, height - 8), x: streams.i32_in(4, width - 8) };
        let ruin_width = streams.i32_in(3, 6);
        let ruin_height = streams.i32_in(3, 5);
        for y in origin.y..(origin.y + ruin_height) {
            for x in origin.x..(origin.x + ruin_width) {
                let on_edge = x == origin.x
                    || x == origin.x + ruin_width - 1
                    || y == origin.y
                    || y == origin.y + ruin_height - 1;
                if on_edge && streams.chance(0.7) {
                    place_on_open(grid, Pos { y, x }, TerrainKind::Ruin);
                }
            }
        }
    }
}

/// Short random walks of wall cells.
fn add_cover_walls(grid: &mut Grid, streams: &mut SeedStreams, config: &MapConfig) {
    let (width, height) = dims(grid);
    for _ in 0..streams.usize_in(config.wall_clusters) {
        let mut pos = Pos { y: streams.i32_in(2, height - 3), x: streams.i32_in(2, width - 3) };
        for _ in 0..streams.usize_in(config.wall_cluster_size) {
            place_on_open(grid, pos, TerrainKind::Wall);
            pos = Pos { y: pos.y + streams.i32_in(-1, 1), x: pos.x + streams.i32_in(-1, 1) };
        }
    }
}
