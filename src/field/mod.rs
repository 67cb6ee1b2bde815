// field/ - Vector field simulation
//
// One compute + draw unit per display refresh. Pointer and resize events
// only mutate state here; all drawing happens inside frame().

pub mod grid;
pub mod noise;
pub mod orient;

pub use grid::{CELL_SIZE, Grid};
pub use orient::{INFLUENCE_RADIUS, POINTER_BLEND};

use crate::render::{Surface, cell_style, draw_cell};
use orient::{base_angle, neighbor_coherence, pointer_influence, resolve_angle};

/// Clock advance per frame. The clock only ever grows; apparent flow comes
/// from the continuity of the noise field, not from per-cell memory.
pub const TIME_STEP: f32 = 0.005;

/// Drawing surface dimensions, updated by resize events and read each frame.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub w: f32,
    pub h: f32,
}

/// Last known pointer position relative to the surface. `over` is false
/// until the pointer first enters and after it leaves.
#[derive(Clone, Copy, Debug)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
    pub over: bool,
}

/// Vector field background renderer.
///
/// Every per-frame quantity is a pure function of (viewport, pointer,
/// clock, grid position); the angle/influence buffers live only to feed
/// the coherence pass and are overwritten each frame.
pub struct FieldRenderer {
    viewport: Viewport,
    pointer: Pointer,
    time: f32,
    running: bool,

    // Pass-1 results, reused across frames to avoid per-frame allocation
    angles: Vec<f32>,
    influences: Vec<f32>,
}

impl FieldRenderer {
    pub fn new(w: f32, h: f32) -> Self {
        Self {
            viewport: Viewport { w, h },
            pointer: Pointer { x: 0.0, y: 0.0, over: false },
            time: 0.0,
            running: false,
            angles: Vec::new(),
            influences: Vec::new(),
        }
    }

    /// Adopt new surface dimensions. Takes effect on the next frame; the
    /// loop itself is untouched.
    pub fn resize(&mut self, w: f32, h: f32) {
        self.viewport = Viewport { w, h };
    }

    /// Record a pointer position in surface coordinates.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.pointer = Pointer { x, y, over: true };
    }

    /// Pointer left the surface: influence is 0 everywhere from the next
    /// frame on.
    pub fn pointer_leave(&mut self) {
        self.pointer.over = false;
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn width(&self) -> f32 {
        self.viewport.w
    }

    pub fn height(&self) -> f32 {
        self.viewport.h
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Grid the next frame will use.
    pub fn grid(&self) -> Grid {
        Grid::from_viewport(self.viewport.w, self.viewport.h)
    }

    /// Advance the clock and redraw every cell.
    ///
    /// Two passes: pass 1 resolves angle + pointer influence for the whole
    /// grid, pass 2 scores neighbor coherence (which needs every pass-1
    /// angle) and issues the draw commands.
    pub fn frame(&mut self, surface: &mut impl Surface) {
        self.time += TIME_STEP;

        surface.clear(self.viewport.w, self.viewport.h);

        let grid = self.grid();
        if grid.is_empty() {
            return;
        }

        self.angles.resize(grid.len(), 0.0);
        self.influences.resize(grid.len(), 0.0);

        // Pass 1: orientation
        for row in 0..grid.rows {
            for col in 0..grid.cols {
                let (x, y) = grid.center(col, row);
                let base = base_angle(x, y, self.time);

                let influence = if self.pointer.over {
                    pointer_influence(x, y, self.pointer.x, self.pointer.y)
                } else {
                    0.0
                };
                let angle = resolve_angle(
                    base, x, y,
                    self.pointer.x, self.pointer.y,
                    influence, POINTER_BLEND,
                );

                let i = grid.index(col, row);
                self.angles[i] = angle;
                self.influences[i] = influence;
            }
        }

        // Pass 2: coherence + draw
        for row in 0..grid.rows {
            for col in 0..grid.cols {
                let i = grid.index(col, row);
                let coherence = neighbor_coherence(&self.angles, &grid, col, row);
                let wave_boost = coherence * coherence;

                let (x, y) = grid.center(col, row);
                let style = cell_style(x, y, self.time, self.influences[i], wave_boost);
                draw_cell(surface, x, y, self.angles[i], &style);
            }
        }
    }
}
