//! # Scene Camera
//!
//! Projection parameters plus the shared transform state. The view matrix is
//! not stored here; it depends on the camera's ancestors and is assembled by
//! [`Scene::calculate_model_view`](crate::scene::Scene::calculate_model_view).
//!
//! ## Orientation
//!
//! Unlike other objects a camera rolls, yaws and pitches about its own right,
//! up and target vectors, so repeated small turns behave like a flight
//! camera.

use crate::foundation::math::{utils, Mat4, Vec3};
use crate::transform::{Movable, Rotatable, Scalable, TransformError, TransformState, Transformable};
use serde::{Deserialize, Serialize};

/// Projection model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectionType {
    /// Perspective frustum from the field of view
    #[default]
    Perspective,
    /// Parallel projection scaled by the clip range
    Orthographic,
}

/// Camera object
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    transform: TransformState,
    projection_type: ProjectionType,
    fov: f32,
    aspect_ratio: f32,
    near_plane: f32,
    far_plane: f32,
    projection: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Default field of view in degrees
    pub const DEFAULT_FOV: f32 = 70.0;
    /// Default width over height
    pub const DEFAULT_ASPECT_RATIO: f32 = 1.3333;
    /// Default near clip distance
    pub const DEFAULT_NEAR_PLANE: f32 = 0.1;
    /// Default far clip distance
    pub const DEFAULT_FAR_PLANE: f32 = 100.0;

    /// Perspective camera with default parameters
    pub fn new() -> Self {
        let mut camera = Self {
            transform: TransformState::new(),
            projection_type: ProjectionType::Perspective,
            fov: Self::DEFAULT_FOV,
            aspect_ratio: Self::DEFAULT_ASPECT_RATIO,
            near_plane: Self::DEFAULT_NEAR_PLANE,
            far_plane: Self::DEFAULT_FAR_PLANE,
            projection: Mat4::identity(),
        };
        camera.update_projection();
        camera
    }

    /// Current projection model
    pub const fn projection_type(&self) -> ProjectionType {
        self.projection_type
    }

    /// Switch the projection model
    pub fn set_projection_type(&mut self, projection_type: ProjectionType) {
        self.projection_type = projection_type;
        self.update_projection();
    }

    /// Vertical field of view in degrees
    pub const fn fov(&self) -> f32 {
        self.fov
    }

    /// Set the field of view in degrees
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
        self.update_projection();
    }

    /// Width over height
    pub const fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Set width over height
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
        self.update_projection();
    }

    /// Near clipping distance
    pub const fn near_plane(&self) -> f32 {
        self.near_plane
    }

    /// Set the near clipping distance
    pub fn set_near_plane(&mut self, near_plane: f32) {
        self.near_plane = near_plane;
        self.update_projection();
    }

    /// Far clipping distance
    pub const fn far_plane(&self) -> f32 {
        self.far_plane
    }

    /// Set the far clipping distance
    pub fn set_far_plane(&mut self, far_plane: f32) {
        self.far_plane = far_plane;
        self.update_projection();
    }

    /// Projection matrix for the current parameters
    pub const fn projection(&self) -> &Mat4 {
        &self.projection
    }

    fn update_projection(&mut self) {
        let near = self.near_plane;
        let far = self.far_plane;
        let mut projection = Mat4::identity();

        match self.projection_type {
            ProjectionType::Perspective => {
                let half_fov = (utils::deg_to_rad(self.fov) / 2.0).tan();
                projection.set(0, 0, 1.0 / (half_fov * self.aspect_ratio));
                projection.set(1, 1, 1.0 / half_fov);
                projection.set(2, 2, -(near + far) / (near - far));
                projection.set(2, 3, 2.0 * near * far / (near - far));
                projection.set(3, 2, 1.0);
                projection.set(3, 3, 0.0);
            }
            ProjectionType::Orthographic => {
                let range = far - near;
                projection.set(0, 0, 1.0 / (range * self.aspect_ratio));
                projection.set(1, 1, 1.0 / range);
                projection.set(2, 2, 2.0 / range);
                projection.set(2, 3, -(far + near) / range);
            }
        }

        log::trace!("Camera projection updated: {:?}", self.projection_type);
        self.projection = projection;
    }
}

impl Transformable for Camera {
    fn transform(&self) -> &TransformState {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut TransformState {
        &mut self.transform
    }
}

impl Rotatable for Camera {
    fn roll(&mut self, angle: f32) -> Result<(), TransformError> {
        let axis = self.right();
        self.rotate(axis, angle)
    }

    fn yaw(&mut self, angle: f32) -> Result<(), TransformError> {
        let axis = self.up();
        self.rotate(axis, angle)
    }

    fn pitch(&mut self, angle: f32) -> Result<(), TransformError> {
        let axis = self.target();
        self.rotate(axis, angle)
    }
}

impl Movable for Camera {}
impl Scalable for Camera {}
