// noise.rs - Procedural noise field
//
// Sum of sine/cosine products at mixed spatial and temporal frequencies.
// Continuous in x, y and t so adjacent cells and consecutive frames never
// pop. Output stays within [-2, 2].
// No state, no allocation - just math.

/// Field noise at position (x, y) and time t. Deterministic: identical
/// inputs always produce an identical output.
#[inline]
pub fn noise(x: f32, y: f32, t: f32) -> f32 {
    (x * 0.010 + t).sin() * (y * 0.010 + t).cos()
        + (x * 0.020 - t).cos() * (y * 0.015 + t).sin()
}
