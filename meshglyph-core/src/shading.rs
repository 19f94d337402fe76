/// Per-triangle glyph selection
use nalgebra::Vector3;

use crate::clip::CameraTriangle;
use crate::geometry::face_normal;

/// Glyph for faces turned towards the light
pub const LIT_GLYPH: char = '#';

/// Glyph for faces turned away from the light
pub const SHADOW_GLYPH: char = '!';

/// Glyphs handed out round-robin in material mode
pub const MATERIAL_PALETTE: [char; 16] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p',
];

/// Camera-space light direction
pub fn light_direction() -> Vector3<f32> {
    Vector3::new(-1.0, 2.0, 0.0).normalize()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingMode {
    /// Two-tone Lambertian lighting
    Lit,
    /// Fixed palette, one glyph per input triangle
    Material,
}

impl ShadingMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Lit => Self::Material,
            Self::Material => Self::Lit,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Lit => "light",
            Self::Material => "material",
        }
    }
}

impl Default for ShadingMode {
    fn default() -> Self {
        Self::Lit
    }
}

/// Lambert term of a camera-space triangle
///
/// Faces whose normal points away from the viewer are flipped, so either
/// side of a one-sided mesh shades as if it were the front. Degenerate
/// triangles get zero.
pub fn lambert(triangle: &CameraTriangle) -> f32 {
    let Some(normal) = face_normal(triangle) else {
        return 0.0;
    };

    let intensity = normal.dot(&light_direction());
    if normal.z > 0.0 {
        -intensity
    } else {
        intensity
    }
}

/// Palette glyph for the triangle at `input_index` in mesh order
pub fn material_glyph(input_index: usize) -> char {
    MATERIAL_PALETTE[input_index % MATERIAL_PALETTE.len()]
}

/// Pick the glyph for a triangle
///
/// `input_index` is the position of the original mesh triangle, shared by
/// every piece clipping split it into.
pub fn shade(mode: ShadingMode, triangle: &CameraTriangle, input_index: usize) -> char {
    match mode {
        ShadingMode::Lit => {
            if lambert(triangle) < 0.0 {
                SHADOW_GLYPH
            } else {
                LIT_GLYPH
            }
        }
        ShadingMode::Material => material_glyph(input_index),
    }
}
