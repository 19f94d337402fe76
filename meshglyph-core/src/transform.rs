/// Cumulative model-to-camera transform
use std::f32::consts::{PI, TAU};

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::projection::START_DISTANCE;

/// Sign applied to incremental rotations about each axis.
///
/// X rotates right-handed. Y and Z take the opposite sign; with the mirrored
/// screen x of the projector this is what lets the default half-turn about Y
/// show the mesh front-facing.
pub const ROTATION_SIGN_X: f32 = 1.0;
pub const ROTATION_SIGN_Y: f32 = -1.0;
pub const ROTATION_SIGN_Z: f32 = -1.0;

/// Wrap an angle into `[0, 2π)`
pub fn normalized_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid may round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Accumulated rotation around the three axes (in radians)
///
/// Only used for reporting; the transform itself is the matrix in
/// [`TransformStack`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Rotate by delta amounts, keeping each angle in `[0, 2π)`
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x = normalized_angle(self.x + dx);
        self.y = normalized_angle(self.y + dy);
        self.z = normalized_angle(self.z + dz);
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// A single affine transform: a 3x3 linear part plus a translation column
///
/// Incremental rotations and scales are left-multiplied into the linear part,
/// translations are added to the translation column. The mesh itself is never
/// touched; camera-space positions are recomputed from this every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformStack {
    linear: Matrix3<f32>,
    translation: Vector3<f32>,
    rotation: RotationState,
}

impl TransformStack {
    /// A transform at the initial view
    pub fn new() -> Self {
        let mut transform = Self {
            linear: Matrix3::identity(),
            translation: Vector3::zeros(),
            rotation: RotationState::zero(),
        };
        transform.reset();
        transform
    }

    /// Restore the initial view: camera pulled back by [`START_DISTANCE`],
    /// mesh turned half a revolution about Y
    pub fn reset(&mut self) {
        self.linear = Matrix3::identity();
        self.translation = Vector3::zeros();
        self.rotation = RotationState::zero();

        self.translate(0.0, 0.0, START_DISTANCE);
        self.rotate_y(PI);
    }

    /// Move the mesh; x is mirrored to match the projector's screen x
    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.translation.x -= dx;
        self.translation.y += dy;
        self.translation.z += dz;
    }

    pub fn rotate_x(&mut self, angle: f32) {
        self.rotation.rotate(angle, 0.0, 0.0);
        self.update(&axis_rotation(Vector3::x_axis(), ROTATION_SIGN_X * angle));
    }

    pub fn rotate_y(&mut self, angle: f32) {
        self.rotation.rotate(0.0, angle, 0.0);
        self.update(&axis_rotation(Vector3::y_axis(), ROTATION_SIGN_Y * angle));
    }

    pub fn rotate_z(&mut self, angle: f32) {
        self.rotation.rotate(0.0, 0.0, angle);
        self.update(&axis_rotation(Vector3::z_axis(), ROTATION_SIGN_Z * angle));
    }

    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) {
        self.update(&Matrix3::from_diagonal(&Vector3::new(sx, sy, sz)));
    }

    /// Left-multiply an incremental update into the linear part
    fn update(&mut self, update: &Matrix3<f32>) {
        let previous = self.linear;
        self.linear = update * previous;
    }

    /// Map an object-space position into camera space
    pub fn apply(&self, point: &Vector3<f32>) -> Vector3<f32> {
        self.linear * point + self.translation
    }

    pub fn linear(&self) -> &Matrix3<f32> {
        &self.linear
    }

    pub fn translation(&self) -> &Vector3<f32> {
        &self.translation
    }

    /// Accumulated rotation angles, for display
    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    /// Distance along z from the camera to the model origin
    pub fn camera_distance(&self) -> f32 {
        self.translation.z
    }

    /// One line description of the current transform
    pub fn summary(&self) -> String {
        format!(
            "pos ({:.2}, {:.2}, {:.2}) rot ({:.0}°, {:.0}°, {:.0}°)",
            -self.translation.x,
            self.translation.y,
            self.translation.z,
            self.rotation.x.to_degrees(),
            self.rotation.y.to_degrees(),
            self.rotation.z.to_degrees(),
        )
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

fn axis_rotation(axis: nalgebra::Unit<Vector3<f32>>, angle: f32) -> Matrix3<f32> {
    Rotation3::from_axis_angle(&axis, angle).into_inner()
}
