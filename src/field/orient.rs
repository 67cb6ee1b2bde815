// orient.rs - Per-cell orientation and neighbor coherence
//
// Pass 1 resolves every cell's angle from the noise field plus pointer
// repulsion. Pass 2 scores each cell against its grid neighbors to find
// locally aligned "wave" regions.

use std::f32::consts::{PI, TAU};

use super::grid::Grid;
use super::noise::noise;

/// Pointer perturbation reaches this far (viewport pixels).
pub const INFLUENCE_RADIUS: f32 = 150.0;

/// Blend ceiling: how completely a cell under the pointer gives up its
/// noise-derived angle.
pub const POINTER_BLEND: f32 = 0.85;

/// Unperturbed orientation from the noise field, full-circle range.
#[inline]
pub fn base_angle(x: f32, y: f32, t: f32) -> f32 {
    noise(x, y, t) * PI
}

/// Pointer influence on a cell at (x, y): quadratic ease-in from 0 at the
/// radius boundary to 1 at the pointer itself. Exactly 0 at or beyond the
/// radius.
#[inline]
pub fn pointer_influence(x: f32, y: f32, px: f32, py: f32) -> f32 {
    let dx = px - x;
    let dy = py - y;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist >= INFLUENCE_RADIUS {
        return 0.0;
    }
    let falloff = 1.0 - dist / INFLUENCE_RADIUS;
    falloff * falloff
}

/// Blend the base angle toward pointing away from the pointer. The +PI on
/// atan2 flips the direction vector so cells flee the pointer rather than
/// chase it.
#[inline]
pub fn resolve_angle(base: f32, x: f32, y: f32, px: f32, py: f32, influence: f32, k: f32) -> f32 {
    if influence <= 0.0 {
        return base;
    }
    let away = (py - y).atan2(px - x) + PI;
    let w = influence * k;
    base * (1.0 - w) + away * w
}

/// Angular distance normalized to [0, PI], wraparound-correct at 2*PI.
/// Symmetric in its arguments.
#[inline]
pub fn angle_diff(a: f32, b: f32) -> f32 {
    let mut d = (a - b).rem_euclid(TAU);
    if d > PI {
        d = TAU - d;
    }
    d
}

/// Alignment of one cell with the neighbors it actually has (up to 8,
/// fewer at edges - no wraparound across the grid). 1.0 = every neighbor
/// shares the exact direction, 0.0 = all neighbors are 90 degrees or more
/// away. Cells with no neighbors score 0.
pub fn neighbor_coherence(angles: &[f32], grid: &Grid, col: usize, row: usize) -> f32 {
    let own = angles[grid.index(col, row)];
    let mut sum = 0.0;
    let mut count = 0;

    for dr in -1i32..=1 {
        for dc in -1i32..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let nc = col as i32 + dc;
            let nr = row as i32 + dr;
            if nc < 0 || nr < 0 || nc >= grid.cols as i32 || nr >= grid.rows as i32 {
                continue;
            }
            let diff = angle_diff(own, angles[grid.index(nc as usize, nr as usize)]);
            sum += (1.0 - diff / (PI / 2.0)).max(0.0);
            count += 1;
        }
    }

    if count == 0 { 0.0 } else { sum / count as f32 }
}
