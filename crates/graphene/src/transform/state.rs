//! Shared transform state

use super::TransformError;
use crate::foundation::math::{utils, Mat3, Mat4, Quaternion, Vec3};

/// Rotation, translation and scaling of one spatial object
///
/// Besides the object-space matrices the state keeps a view-space pair
/// (`opposite_rotation`, `opposite_translation`) that undoes them. Cameras
/// feed that pair into the view matrix and lights into their view-space
/// direction. The rows of `opposite_rotation` are the object's right, up and
/// target basis vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformState {
    rotation: Mat4,
    opposite_rotation: Mat4,
    rotation_angles: Vec3,
    translation: Mat4,
    opposite_translation: Mat4,
    scaling: Mat4,
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformState {
    /// Identity transform at the origin with unit scale
    pub fn new() -> Self {
        Self {
            rotation: Mat4::identity(),
            opposite_rotation: Mat4::identity(),
            rotation_angles: Vec3::ZERO,
            translation: Mat4::identity(),
            opposite_translation: Mat4::identity(),
            scaling: Mat4::identity(),
        }
    }

    /// Rotate by `angle` degrees about `axis`
    ///
    /// Returns the 3x3 block of the applied rotation so callers can carry
    /// other vectors (light directions, child positions) along with it.
    ///
    /// # Errors
    /// [`TransformError::ZeroAxis`] when `axis` is the zero vector. The state
    /// is left untouched in that case.
    pub fn rotate(&mut self, axis: Vec3, angle: f32) -> Result<Mat3, TransformError> {
        if axis == Vec3::ZERO {
            log::warn!("Rejected rotation about a zero axis");
            return Err(TransformError::ZeroAxis);
        }

        let mut q = Quaternion::from_axis_angle(axis.normalized(), utils::deg_to_rad(angle));
        q.normalize();

        let delta = q.extract_euler_angles();
        self.rotation_angles += Vec3::new(
            utils::rad_to_deg(delta.x()),
            utils::rad_to_deg(delta.y()),
            utils::rad_to_deg(delta.z()),
        );

        let matrix = q.extract_mat4();
        self.rotation = matrix * self.rotation;

        let block = matrix.extract_mat3();
        let up = block * self.up();
        let target = block * self.target();
        let right = up.cross(&target).normalized();
        self.opposite_rotation.set_row_vec3(0, right);
        self.opposite_rotation.set_row_vec3(1, up);
        self.opposite_rotation.set_row_vec3(2, target);

        log::trace!("Rotated {angle} degrees about {axis:?}, angles now {:?}", self.rotation_angles);
        Ok(block)
    }

    /// Set the absolute position
    pub fn translate(&mut self, position: Vec3) {
        self.translation.set_translation(position);
        self.opposite_translation.set_translation(-position);
    }

    /// Shift the position by `delta`
    pub fn move_by(&mut self, delta: Vec3) {
        self.translate(self.position() + delta);
    }

    /// Multiply the scaling factors by `factors`
    ///
    /// # Errors
    /// [`TransformError::NonPositiveFactor`] when any factor is `<= 0`.
    pub fn scale(&mut self, factors: Vec3) -> Result<(), TransformError> {
        validate_factors(factors)?;
        let current = self.scaling_factors();
        self.scaling.set(0, 0, current.x() * factors.x());
        self.scaling.set(1, 1, current.y() * factors.y());
        self.scaling.set(2, 2, current.z() * factors.z());
        Ok(())
    }

    /// Object-space rotation matrix
    pub const fn rotation(&self) -> &Mat4 {
        &self.rotation
    }

    /// View-space rotation matrix, rows are right/up/target
    pub const fn opposite_rotation(&self) -> &Mat4 {
        &self.opposite_rotation
    }

    /// Accumulated Euler angles in degrees
    pub const fn rotation_angles(&self) -> Vec3 {
        self.rotation_angles
    }

    /// Translation matrix, position in the last column
    pub const fn translation(&self) -> &Mat4 {
        &self.translation
    }

    /// Negated translation matrix
    pub const fn opposite_translation(&self) -> &Mat4 {
        &self.opposite_translation
    }

    /// Diagonal scaling matrix
    pub const fn scaling(&self) -> &Mat4 {
        &self.scaling
    }

    /// Current position
    pub fn position(&self) -> Vec3 {
        self.translation.translation()
    }

    /// Current scaling factors
    pub fn scaling_factors(&self) -> Vec3 {
        self.scaling.diagonal3()
    }

    /// Right basis vector
    pub fn right(&self) -> Vec3 {
        self.opposite_rotation.row_vec3(0)
    }

    /// Up basis vector
    pub fn up(&self) -> Vec3 {
        self.opposite_rotation.row_vec3(1)
    }

    /// Target (forward) basis vector
    pub fn target(&self) -> Vec3 {
        self.opposite_rotation.row_vec3(2)
    }
}

/// Reject factor sets containing a zero or negative entry
pub(crate) fn validate_factors(factors: Vec3) -> Result<(), TransformError> {
    if factors.data().iter().any(|factor| *factor <= 0.0) {
        log::warn!("Rejected scaling factors {factors:?}");
        return Err(TransformError::NonPositiveFactor(factors));
    }
    Ok(())
}
