/// Barycentric scan-fill of projected triangles
use crate::error::DegenerateTriangle;
use crate::framebuffer::FrameBuffer;
use crate::projection::{ProjectionMode, ScreenVertex};

/// Smallest doubled screen area a triangle may have and still be filled
pub const DEGENERATE_EPSILON: f32 = 1e-6;

/// Fill a projected triangle into the framebuffer
///
/// Every integer cell inside the clamped bounding box whose barycentric
/// weights are all non-negative is depth tested; edges are inclusive.
/// Returns the number of cells written.
pub fn fill_triangle(
    buffer: &mut FrameBuffer,
    vertices: &[ScreenVertex; 3],
    glyph: char,
    mode: ProjectionMode,
) -> Result<usize, DegenerateTriangle> {
    let [v0, v1, v2] = *vertices;

    // Doubled signed area, the barycentric determinant
    let determinant = (v1.y - v2.y) * (v0.x - v2.x) + (v2.x - v1.x) * (v0.y - v2.y);
    if !determinant.is_finite() || determinant.abs() < DEGENERATE_EPSILON {
        return Err(DegenerateTriangle { determinant });
    }
    let inverse = 1.0 / determinant;

    if buffer.width() == 0 || buffer.height() == 0 {
        return Ok(0);
    }

    // Bounding box, clamped to the screen
    let max_x = buffer.width() as i64 - 1;
    let max_y = buffer.height() as i64 - 1;
    let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i64).max(0);
    let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i64).max(0);
    let max_x = (v0.x.max(v1.x).max(v2.x).floor() as i64).min(max_x);
    let max_y = (v0.y.max(v1.y).max(v2.y).floor() as i64).min(max_y);

    let mut written = 0;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let px = x as f32;
            let py = y as f32;

            let lambda0 = ((v1.y - v2.y) * (px - v2.x) + (v2.x - v1.x) * (py - v2.y)) * inverse;
            let lambda1 = ((v2.y - v0.y) * (px - v2.x) + (v0.x - v2.x) * (py - v2.y)) * inverse;
            let lambda2 = 1.0 - lambda0 - lambda1;

            let inside = lambda0 >= 0.0 && lambda1 >= 0.0 && lambda2 >= 0.0;
            if !inside {
                continue;
            }

            let depth = match mode {
                // Inverse depth is linear in screen space under perspective
                ProjectionMode::Perspective => lambda0 / v0.z + lambda1 / v1.z + lambda2 / v2.z,
                ProjectionMode::Orthographic => {
                    1.0 / (lambda0 * v0.z + lambda1 * v1.z + lambda2 * v2.z)
                }
            };

            if buffer.test_and_set(x as usize, y as usize, depth, glyph) {
                written += 1;
            }
        }
    }

    Ok(written)
}
