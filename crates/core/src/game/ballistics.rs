//! Line-of-sight rasterization and shot tracing over the terrain grid.
//! This module owns which cells a bullet crosses and where it stops.
//! It does not roll accuracy or touch combatant health.

use super::*;

pub fn distance(from: Pos, to: Pos) -> f64 {
    f64::from(to.x - from.x).hypot(f64::from(to.y - from.y))
}

/// Bresenham cells from `from` to `to`, both endpoints included.
///
/// The line is always rasterized from the smaller endpoint and reversed when
/// needed, so swapping the endpoints yields the same cells in reverse order.
pub fn line_cells(from: Pos, to: Pos) -> Vec<Pos> {
    if to < from {
        let mut cells = rasterize(to, from);
        cells.reverse();
        cells
    } else {
        rasterize(from, to)
    }
}

fn rasterize(start: Pos, end: Pos) -> Vec<Pos> {
    let dx = (end.x - start.x).abs();
    let dy = -(end.y - start.y).abs();
    let sx = (end.x - start.x).signum();
    let sy = (end.y - start.y).signum();
    let mut err = dx + dy;
    let (mut x, mut y) = (start.x, start.y);
    let mut cells = Vec::with_capacity((dx - dy + 1) as usize);

    loop {
        cells.push(Pos { y, x });
        if x == end.x && y == end.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    cells
}

/// Walks the line from shooter to target and stops at the first interior cell
/// that blocks line of sight. Endpoints are never treated as cover.
pub fn trace_shot(grid: &Grid, from: Pos, to: Pos) -> Result<ShotPath, GridError> {
    grid.cell_at(from)?;
    grid.cell_at(to)?;

    let cells = line_cells(from, to);
    let interior = 1..cells.len().saturating_sub(1);
    for idx in interior {
        let at = cells[idx];
        let terrain = grid.cell_at(at)?;
        if terrain.blocks_line_of_sight() {
            return Ok(ShotPath::Blocked { cells: cells[..=idx].to_vec(), at, terrain });
        }
    }
    Ok(ShotPath::Clear { cells, distance: distance(from, to) })
}

pub fn has_line_of_sight(grid: &Grid, from: Pos, to: Pos) -> bool {
    trace_shot(grid, from, to).is_ok_and(|path| path.is_clear())
}

/// Where the tracer animation should end for a resolved shot.
pub(super) fn bullet_end(grid: &Grid, path: &ShotPath, result: ShotResult, target: Pos) -> Pos {
    match (path, result) {
        (ShotPath::Blocked { at, .. }, _) => *at,
        (_, ShotResult::Hit { .. }) => target,
        (ShotPath::Clear { cells, .. }, ShotResult::Miss { .. }) => {
            let [.., prev, last] = cells.as_slice() else {
                return target;
            };
            let overshoot =
                Pos { y: last.y + 2 * (last.y - prev.y), x: last.x + 2 * (last.x - prev.x) };
            if grid.in_bounds(overshoot) { overshoot } else { target }
        }
    }
}
