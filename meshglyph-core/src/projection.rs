/// Camera conventions and the camera-to-screen projection
///
/// The camera sits at the origin of camera space. Geometry is in front of it
/// when `z >= NEAR_PLANE`; screen x is mirrored (`x / -z`) and screen rows
/// grow downward while camera y grows upward.
use nalgebra::Vector3;

use crate::framebuffer::FrameBuffer;

/// Camera-space z below which geometry is clipped
pub const NEAR_PLANE: f32 = 0.2;

/// Initial distance between the camera and the model origin
pub const START_DISTANCE: f32 = 5.0;

/// Width over height of one character cell
pub const FONT_ASPECT: f32 = 0.5;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

impl ProjectionMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Orthographic => Self::Perspective,
            Self::Perspective => Self::Orthographic,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Orthographic => "ortho",
            Self::Perspective => "perspective",
        }
    }
}

impl Default for ProjectionMode {
    fn default() -> Self {
        Self::Perspective
    }
}

/// A projected vertex: screen cell coordinates plus its camera-space depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Maps camera-space positions onto a framebuffer of a given size
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    pub mode: ProjectionMode,
    width: usize,
    height: usize,
    aspect: f32,
    camera_distance: f32,
}

impl Projector {
    pub fn new(mode: ProjectionMode, width: usize, height: usize, camera_distance: f32) -> Self {
        Self {
            mode,
            width,
            height,
            aspect: screen_aspect(width, height),
            camera_distance,
        }
    }

    /// A projector matching the dimensions of a framebuffer
    pub fn for_buffer(mode: ProjectionMode, buffer: &FrameBuffer, camera_distance: f32) -> Self {
        Self {
            mode,
            width: buffer.width(),
            height: buffer.height(),
            aspect: buffer.aspect(),
            camera_distance,
        }
    }

    /// Project a camera-space point that is in front of the near plane
    pub fn project(&self, point: &Vector3<f32>) -> ScreenVertex {
        let divisor = match self.mode {
            ProjectionMode::Perspective => -point.z,
            // Parallel projection scales everything by the origin's depth,
            // kept in front of the near plane so the divisor never vanishes
            ProjectionMode::Orthographic => -self.camera_distance.max(NEAR_PLANE),
        };

        let width = self.width as f32;
        let height = self.height as f32;
        // Screen center sits on a whole cell, as integer division gives it
        let center_x = (self.width / 2) as f32;
        let center_y = (self.height / 2) as f32;

        ScreenVertex {
            x: point.x / divisor * width + center_x,
            y: point.y / divisor * height * self.aspect + center_y,
            z: point.z,
        }
    }
}

/// Aspect correction for a `width` x `height` grid of character cells
pub fn screen_aspect(width: usize, height: usize) -> f32 {
    if height == 0 {
        return FONT_ASPECT;
    }
    width as f32 / height as f32 * FONT_ASPECT
}
