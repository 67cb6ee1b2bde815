//! Flowfield Engine - animated vector field background
//!
//! A grid of short directional segments whose orientation is driven by a
//! smooth noise field, pushed away from the pointer within an influence
//! radius, and spatially scored against grid neighbors so locally aligned
//! regions brighten into visible wave streaks.
//!
//! The simulation core is pure Rust and runs natively for tests; the
//! browser front end (canvas 2D + requestAnimationFrame) is wasm-only.

pub mod field;
pub mod render;

#[cfg(target_arch = "wasm32")]
mod canvas;

pub use field::{CELL_SIZE, FieldRenderer, Grid, INFLUENCE_RADIUS, POINTER_BLEND, TIME_STEP};
pub use render::{CellStyle, PALETTE, Rgb, Surface};

#[cfg(target_arch = "wasm32")]
pub use canvas::{CanvasSurface, FieldBackground};

use wasm_bindgen::prelude::*;

/// Initialize the wasm module: panic messages go to the console.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"flowfield engine initialized".into());
}

/// Crate version, exposed for the embedding page.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
