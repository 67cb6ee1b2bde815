// grid.rs - Frame-derived cell grid
//
// Recomputed from the viewport every frame; never persisted. The grid is
// sized one cell past each edge and centered, so vectors reach all the way
// to the viewport border.

pub const CELL_SIZE: f32 = 38.0;

/// Cell layout for one frame.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Grid {
    pub cols: usize,
    pub rows: usize,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Grid {
    /// Derive the grid for a viewport. A non-positive dimension yields a
    /// 0x0 grid - the frame then draws nothing and the loop carries on.
    pub fn from_viewport(w: f32, h: f32) -> Self {
        if w <= 0.0 || h <= 0.0 {
            return Self { cols: 0, rows: 0, offset_x: 0.0, offset_y: 0.0 };
        }

        let cols = (w / CELL_SIZE) as usize + 2;
        let rows = (h / CELL_SIZE) as usize + 2;

        Self {
            cols,
            rows,
            offset_x: (w - cols as f32 * CELL_SIZE) / 2.0,
            offset_y: (h - rows as f32 * CELL_SIZE) / 2.0,
        }
    }

    /// Center of cell (col, row) in viewport coordinates.
    #[inline]
    pub fn center(&self, col: usize, row: usize) -> (f32, f32) {
        (
            self.offset_x + (col as f32 + 0.5) * CELL_SIZE,
            self.offset_y + (row as f32 + 0.5) * CELL_SIZE,
        )
    }

    /// Total cell count.
    #[inline]
    pub fn len(&self) -> usize {
        self.cols * self.rows
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat buffer index for cell (col, row).
    #[inline]
    pub fn index(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }
}
