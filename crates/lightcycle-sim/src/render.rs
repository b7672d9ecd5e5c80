//! Read-only view handed to the drawing side between ticks.

use serde::{Deserialize, Serialize};

use crate::grid::{Cell, Direction, GridConfig};
use crate::pawn::{Pawn, PawnStatus};
use crate::trail::{TrailEdge, TrailStore};

/// A line to draw, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: [f32; 2],
    pub to: [f32; 2],
}

/// One trail cell as the renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailCell {
    pub cell: Cell,
    pub direction: Direction,
    pub tick: u64,
}

/// Everything a renderer needs after a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub position: [f32; 2],
    pub cell: Cell,
    /// Grid node nearest the pawn's pixel position.
    pub nearest_cell: Cell,
    pub progress: u32,
    pub direction: Direction,
    pub heading_degrees: f32,
    pub status: PawnStatus,
    pub crash_point: Option<Cell>,
    pub trail: Vec<TrailCell>,
    pub segments: Vec<Segment>,
}

fn node_pixels(cell: Cell, grid: &GridConfig) -> [f32; 2] {
    let size = grid.cell_size() as f32;
    [cell.x as f32 * size, cell.y as f32 * size]
}

fn edge_segment(edge: TrailEdge, grid: &GridConfig) -> Segment {
    Segment {
        from: node_pixels(edge.a, grid),
        to: node_pixels(edge.b, grid),
    }
}

/// Completed unit edges followed by the partial edge the pawn is drawing now.
/// The partial edge is omitted while the pawn sits exactly on a node.
pub fn trail_segments(trail: &TrailStore, pawn: &Pawn, grid: &GridConfig) -> Vec<Segment> {
    let mut segments: Vec<Segment> = trail.edges().map(|edge| edge_segment(edge, grid)).collect();
    if pawn.progress > 0 {
        let (x, y) = pawn.world_position(grid);
        segments.push(Segment {
            from: node_pixels(pawn.cell, grid),
            to: [x, y],
        });
    }
    segments
}

pub fn snapshot(tick: u64, pawn: &Pawn, trail: &TrailStore, grid: &GridConfig) -> Snapshot {
    let (x, y) = pawn.world_position(grid);
    Snapshot {
        tick,
        position: [x, y],
        cell: pawn.cell,
        nearest_cell: pawn.nearest_cell(),
        progress: pawn.progress,
        direction: pawn.direction,
        heading_degrees: pawn.direction.rotation_degrees(),
        status: pawn.status(),
        crash_point: pawn.crash_point,
        trail: trail
            .iter()
            .map(|(cell, mark)| TrailCell {
                cell,
                direction: mark.direction,
                tick: mark.tick,
            })
            .collect(),
        segments: trail_segments(trail, pawn, grid),
    }
}
