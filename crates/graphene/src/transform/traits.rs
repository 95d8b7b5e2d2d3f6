//! Capability traits over [`TransformState`]

use super::{TransformError, TransformState};
use crate::foundation::math::{utils, Vec3};

/// Access to the embedded transform state
pub trait Transformable {
    /// Shared transform state
    fn transform(&self) -> &TransformState;

    /// Mutable transform state
    fn transform_mut(&mut self) -> &mut TransformState;
}

/// Orientation operations
///
/// The default `roll`, `yaw` and `pitch` turn about the world X, Y and Z
/// axes. Cameras override them to turn about their own right, up and target
/// vectors.
pub trait Rotatable: Transformable {
    /// Rotate by `angle` degrees about `axis`
    ///
    /// # Errors
    /// [`TransformError::ZeroAxis`] when `axis` is the zero vector.
    fn rotate(&mut self, axis: Vec3, angle: f32) -> Result<(), TransformError> {
        self.transform_mut().rotate(axis, angle).map(|_| ())
    }

    /// Rotate about the X axis
    fn roll(&mut self, angle: f32) -> Result<(), TransformError> {
        self.rotate(Vec3::UNIT_X, angle)
    }

    /// Rotate about the Y axis
    fn yaw(&mut self, angle: f32) -> Result<(), TransformError> {
        self.rotate(Vec3::UNIT_Y, angle)
    }

    /// Rotate about the Z axis
    fn pitch(&mut self, angle: f32) -> Result<(), TransformError> {
        self.rotate(Vec3::UNIT_Z, angle)
    }

    /// Turn the target vector towards `point`
    ///
    /// # Errors
    /// [`TransformError::ZeroTarget`] when `point` is the zero vector or
    /// coincides with the current position.
    fn target_at(&mut self, point: Vec3) -> Result<(), TransformError> {
        let offset = point - self.transform().position();
        if point == Vec3::ZERO || offset == Vec3::ZERO {
            log::warn!("Rejected target point {point:?}");
            return Err(TransformError::ZeroTarget);
        }

        let direction = offset.normalized();
        let current = self.target();
        let cosine = current.dot(&direction).clamp(-1.0, 1.0);
        let axis = current.cross(&direction);

        if axis.square_length() <= f32::EPSILON {
            if cosine > 0.0 {
                return Ok(());
            }
            let up = self.up();
            return self.rotate(up, 180.0);
        }

        self.rotate(axis, utils::rad_to_deg(cosine.acos()))
    }

    /// Accumulated Euler angles in degrees
    fn rotation_angles(&self) -> Vec3 {
        self.transform().rotation_angles()
    }

    /// Right basis vector
    fn right(&self) -> Vec3 {
        self.transform().right()
    }

    /// Up basis vector
    fn up(&self) -> Vec3 {
        self.transform().up()
    }

    /// Target basis vector
    fn target(&self) -> Vec3 {
        self.transform().target()
    }
}

/// Position operations
pub trait Movable: Transformable {
    /// Set the absolute position
    fn translate(&mut self, position: Vec3) {
        self.transform_mut().translate(position);
    }

    /// Shift the position by `delta`
    fn move_by(&mut self, delta: Vec3) {
        self.transform_mut().move_by(delta);
    }

    /// Current position
    fn position(&self) -> Vec3 {
        self.transform().position()
    }
}

/// Scale operations, factors accumulate multiplicatively
pub trait Scalable: Transformable {
    /// Multiply the scaling factors by `factors`
    ///
    /// # Errors
    /// [`TransformError::NonPositiveFactor`] when any factor is `<= 0`.
    fn scale(&mut self, factors: Vec3) -> Result<(), TransformError> {
        self.transform_mut().scale(factors)
    }

    /// Scale along X only
    fn scale_x(&mut self, factor: f32) -> Result<(), TransformError> {
        self.scale(Vec3::new(factor, 1.0, 1.0))
    }

    /// Scale along Y only
    fn scale_y(&mut self, factor: f32) -> Result<(), TransformError> {
        self.scale(Vec3::new(1.0, factor, 1.0))
    }

    /// Scale along Z only
    fn scale_z(&mut self, factor: f32) -> Result<(), TransformError> {
        self.scale(Vec3::new(1.0, 1.0, factor))
    }

    /// Current scaling factors
    fn scaling_factors(&self) -> Vec3 {
        self.transform().scaling_factors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-3;

    #[derive(Default)]
    struct Probe {
        transform: TransformState,
    }

    impl Transformable for Probe {
        fn transform(&self) -> &TransformState {
            &self.transform
        }

        fn transform_mut(&mut self) -> &mut TransformState {
            &mut self.transform
        }
    }

    impl Rotatable for Probe {}
    impl Movable for Probe {}
    impl Scalable for Probe {}

    #[test]
    fn test_roll_accumulates_angles() {
        let mut probe = Probe::default();
        probe.roll(30.0).unwrap();
        assert_relative_eq!(probe.rotation_angles(), Vec3::new(30.0, 0.0, 0.0), epsilon = EPSILON);
        probe.roll(60.0).unwrap();
        assert_relative_eq!(probe.rotation_angles(), Vec3::new(90.0, 0.0, 0.0), epsilon = EPSILON);
        probe.roll(90.0).unwrap();
        assert_relative_eq!(probe.rotation_angles(), Vec3::new(180.0, 0.0, 0.0), epsilon = EPSILON);
        probe.roll(120.0).unwrap();
        assert_relative_eq!(probe.rotation_angles(), Vec3::new(300.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_yaw_accumulates_angles() {
        let mut probe = Probe::default();
        for (angle, expected) in [(30.0, 30.0), (60.0, 90.0), (90.0, 180.0), (120.0, 300.0)] {
            probe.yaw(angle).unwrap();
            assert_relative_eq!(probe.rotation_angles(), Vec3::new(0.0, expected, 0.0), epsilon = EPSILON);
        }
    }

    #[test]
    fn test_pitch_angle_is_folded_by_asin() {
        let mut probe = Probe::default();
        probe.pitch(30.0).unwrap();
        probe.pitch(60.0).unwrap();
        assert_relative_eq!(probe.rotation_angles(), Vec3::new(0.0, 0.0, 90.0), epsilon = EPSILON);
        probe.pitch(120.0).unwrap();
        assert_relative_eq!(probe.rotation_angles(), Vec3::new(0.0, 0.0, 150.0), epsilon = EPSILON);
    }

    #[test]
    fn test_pitch_at_right_angle_is_nan() {
        let mut probe = Probe::default();
        probe.pitch(90.0).unwrap();
        assert!(probe.rotation_angles().z().is_nan());
        assert_relative_eq!(probe.right(), Vec3::new(0.0, 1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_split_roll_matches_single_roll() {
        let mut split = Probe::default();
        split.roll(30.0).unwrap();
        split.roll(60.0).unwrap();
        let mut single = Probe::default();
        single.roll(90.0).unwrap();

        assert_relative_eq!(split.right(), single.right(), epsilon = EPSILON);
        assert_relative_eq!(split.up(), single.up(), epsilon = EPSILON);
        assert_relative_eq!(split.target(), single.target(), epsilon = EPSILON);
        assert_relative_eq!(split.rotation_angles(), single.rotation_angles(), epsilon = EPSILON);
    }

    #[test]
    fn test_world_axis_rotations() {
        let mut probe = Probe::default();
        probe.roll(30.0).unwrap();
        assert_relative_eq!(probe.up(), Vec3::new(0.0, 0.866, 0.5), epsilon = EPSILON);
        assert_relative_eq!(probe.target(), Vec3::new(0.0, -0.5, 0.866), epsilon = EPSILON);

        let mut probe = Probe::default();
        probe.yaw(30.0).unwrap();
        assert_relative_eq!(probe.right(), Vec3::new(0.866, 0.0, -0.5), epsilon = EPSILON);
        assert_relative_eq!(probe.target(), Vec3::new(0.5, 0.0, 0.866), epsilon = EPSILON);
    }

    #[test]
    fn test_target_at() {
        let mut probe = Probe::default();
        probe.target_at(Vec3::UNIT_X).unwrap();
        assert_relative_eq!(probe.right(), Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
        assert_relative_eq!(probe.up(), Vec3::UNIT_Y, epsilon = EPSILON);
        assert_relative_eq!(probe.target(), Vec3::UNIT_X, epsilon = EPSILON);
        assert_relative_eq!(probe.rotation_angles(), Vec3::new(0.0, 90.0, 0.0), epsilon = EPSILON);

        probe.target_at(Vec3::UNIT_Y - Vec3::new(0.0005, 0.0, 0.0)).unwrap();
        assert_relative_eq!(probe.right(), Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
        assert_relative_eq!(probe.up(), Vec3::new(-1.0, 0.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(probe.target(), Vec3::UNIT_Y, epsilon = EPSILON);
    }

    #[test]
    fn test_target_at_parallel_directions() {
        let mut probe = Probe::default();
        probe.target_at(Vec3::new(0.0, 0.0, 5.0)).unwrap();
        assert_eq!(probe.transform(), &TransformState::new());

        probe.target_at(Vec3::new(0.0, 0.0, -5.0)).unwrap();
        assert_relative_eq!(probe.target(), Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
        assert_relative_eq!(probe.up(), Vec3::UNIT_Y, epsilon = EPSILON);
    }

    #[test]
    fn test_target_at_rejects_degenerate_points() {
        let mut probe = Probe::default();
        assert_eq!(probe.target_at(Vec3::ZERO), Err(TransformError::ZeroTarget));
        probe.translate(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(probe.target_at(Vec3::new(1.0, 2.0, 3.0)), Err(TransformError::ZeroTarget));
    }

    #[test]
    fn test_scale_accumulates() {
        let mut probe = Probe::default();
        probe.scale_x(2.4).unwrap();
        probe.scale_y(0.8).unwrap();
        probe.scale_z(1.1).unwrap();
        probe.scale(Vec3::new(0.2, 0.3, 0.4)).unwrap();
        assert_relative_eq!(probe.scaling_factors(), Vec3::new(0.48, 0.24, 0.44), epsilon = EPSILON);
        probe.scale(Vec3::new(0.2, 1.0, 0.2)).unwrap();
        assert_relative_eq!(probe.scaling_factors(), Vec3::new(0.096, 0.24, 0.088), epsilon = EPSILON);
        assert!(probe.scale_y(0.0).is_err());
    }

    #[test]
    fn test_translate_then_move() {
        let mut probe = Probe::default();
        probe.translate(Vec3::new(1.0, -2.3, 0.7));
        probe.move_by(Vec3::ZERO);
        assert_relative_eq!(probe.position(), Vec3::new(1.0, -2.3, 0.7), epsilon = EPSILON);
        probe.move_by(Vec3::new(0.0, 1.0, 1.0));
        assert_relative_eq!(probe.position(), Vec3::new(1.0, -1.3, 1.7), epsilon = EPSILON);
    }
}
