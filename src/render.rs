// render.rs - Per-cell style derivation and draw commands
//
// Everything here is a pure function of (position, time, influence,
// wave boost). The Surface trait is the seam to the actual drawing
// backend: canvas 2D in the browser, a recording buffer in tests.

use crate::field::grid::CELL_SIZE;
use crate::field::noise::noise;

/// Solid color, 8 bits per channel.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Fixed palette, indexed per cell from noise + time.
pub const PALETTE: [Rgb; 5] = [
    Rgb { r: 99, g: 102, b: 241 },
    Rgb { r: 139, g: 92, b: 246 },
    Rgb { r: 59, g: 130, b: 246 },
    Rgb { r: 14, g: 165, b: 233 },
    Rgb { r: 168, g: 85, b: 247 },
];

// Opacity model
const ALPHA_BASE: f32 = 0.30;
const ALPHA_JITTER: f32 = 0.10;
const ALPHA_INFLUENCE: f32 = 0.40;
const ALPHA_WAVE: f32 = 0.35;
const ALPHA_CEILING: f32 = 0.85;

// Line geometry
const LEN_BASE: f32 = CELL_SIZE * 0.45;
const WIDTH_BASE: f32 = 1.0;

// Tip marker thresholds
const TIP_INFLUENCE: f32 = 0.50;
const TIP_WAVE: f32 = 0.55;

/// Palette slot for a cell. Floor-then-abs rounding is deliberate: for
/// negative noise it shifts which color lands at a given phase compared
/// to a true mathematical modulo, and that shift is part of the look.
/// Always in range either way.
#[inline]
pub fn palette_index(x: f32, y: f32, t: f32) -> usize {
    let n = PALETTE.len();
    let raw = (noise(x * 0.5, y * 0.5, t * 2.0) * n as f32 + t * 0.3).floor();
    raw.abs() as usize % n
}

/// Resolved visual weight for one cell.
#[derive(Clone, Copy, Debug)]
pub struct CellStyle {
    pub color: Rgb,
    pub alpha: f32,
    pub width: f32,
    pub length: f32,
    pub tip: bool,
}

/// Derive a cell's style from its frame inputs. Influence and wave boost
/// brighten, widen and lengthen the vector; strongly active or coherent
/// cells also get a tip marker.
pub fn cell_style(x: f32, y: f32, t: f32, influence: f32, wave_boost: f32) -> CellStyle {
    let jitter = noise(x * 0.3, y * 0.3, t * 1.5) * ALPHA_JITTER;
    let alpha = (ALPHA_BASE + jitter + influence * ALPHA_INFLUENCE + wave_boost * ALPHA_WAVE)
        .clamp(0.0, ALPHA_CEILING);

    CellStyle {
        color: PALETTE[palette_index(x, y, t)],
        alpha,
        width: WIDTH_BASE + influence * 1.2 + wave_boost * 0.8,
        length: LEN_BASE * (1.0 + influence * 0.4 + wave_boost * 0.5),
        tip: influence > TIP_INFLUENCE || wave_boost > TIP_WAVE,
    }
}

/// Immediate-mode drawing backend.
pub trait Surface {
    /// Wipe the whole surface ahead of a frame.
    fn clear(&mut self, w: f32, h: f32);

    /// Stroke one line segment with round caps.
    fn stroke_segment(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgb, alpha: f32, width: f32);

    /// Fill a small circle (vector tip marker).
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgb, alpha: f32);
}

/// Issue the draw commands for one cell: a segment from the cell center
/// along its angle, plus the optional tip marker at the endpoint.
pub fn draw_cell(surface: &mut impl Surface, x: f32, y: f32, angle: f32, style: &CellStyle) {
    let ex = x + angle.cos() * style.length;
    let ey = y + angle.sin() * style.length;

    surface.stroke_segment(x, y, ex, ey, style.color, style.alpha, style.width);

    if style.tip {
        surface.fill_circle(ex, ey, 1.5 + style.width * 0.5, style.color, style.alpha);
    }
}
