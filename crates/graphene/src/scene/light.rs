//! Light sources
//!
//! A light carries the shading parameters uploaded to the light pass as a
//! [`LightBlock`]. Its position comes from the scene traversal; its
//! direction is kept in object space and turned along with every rotation.

use crate::foundation::math::Vec3;
use crate::transform::{Movable, Rotatable, Scalable, TransformError, TransformState, Transformable};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Light emission model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LightType {
    /// Omnidirectional with distance falloff
    #[default]
    Point,
    /// Cone with angle and edge blend
    Spot,
    /// Parallel rays, position ignored
    Directed,
}

impl LightType {
    /// Integer tag used in the shader block
    pub const fn shader_index(self) -> i32 {
        match self {
            Self::Point => 0,
            Self::Spot => 1,
            Self::Directed => 2,
        }
    }
}

/// Per-light uniform block, std140 compatible
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LightBlock {
    /// Light colour
    pub color: [f32; 3],
    /// Energy multiplier
    pub energy: f32,
    /// World position
    pub position: [f32; 3],
    /// Falloff distance
    pub falloff: f32,
    /// View-space direction
    pub direction: [f32; 3],
    /// Spot cone angle in degrees
    pub angle: f32,
    /// Spot edge blend
    pub blend: f32,
    /// [`LightType::shader_index`]
    pub light_type: i32,
    _padding: [f32; 2],
}

/// Light object
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    transform: TransformState,
    light_type: LightType,
    color: Vec3,
    energy: f32,
    falloff: f32,
    angle: f32,
    blend: f32,
    direction: Vec3,
}

impl Default for Light {
    fn default() -> Self {
        Self::new(LightType::default())
    }
}

impl Light {
    /// White light of the given type with default parameters
    pub fn new(light_type: LightType) -> Self {
        Self {
            transform: TransformState::new(),
            light_type,
            color: Vec3::new(1.0, 1.0, 1.0),
            energy: 1.0,
            falloff: 25.0,
            angle: 45.0,
            blend: 0.15,
            direction: Vec3::UNIT_X,
        }
    }

    /// Light type
    pub const fn light_type(&self) -> LightType {
        self.light_type
    }

    /// Change the light type
    pub fn set_light_type(&mut self, light_type: LightType) {
        self.light_type = light_type;
    }

    /// Light colour
    pub const fn color(&self) -> Vec3 {
        self.color
    }

    /// Set the light colour
    pub fn set_color(&mut self, color: Vec3) {
        self.color = color;
    }

    /// Light energy
    pub const fn energy(&self) -> f32 {
        self.energy
    }

    /// Set the light energy
    pub fn set_energy(&mut self, energy: f32) {
        self.energy = energy;
    }

    /// Distance falloff
    pub const fn falloff(&self) -> f32 {
        self.falloff
    }

    /// Set the distance falloff
    pub fn set_falloff(&mut self, falloff: f32) {
        self.falloff = falloff;
    }

    /// Spot cone angle in degrees
    pub const fn angle(&self) -> f32 {
        self.angle
    }

    /// Set the spot cone angle in degrees
    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }

    /// Spot edge blend in `[0; 1]`
    pub const fn blend(&self) -> f32 {
        self.blend
    }

    /// Set the spot edge blend
    ///
    /// # Errors
    /// [`TransformError::BlendOutOfRange`] outside `[0, 1]`.
    pub fn set_blend(&mut self, blend: f32) -> Result<(), TransformError> {
        if !(0.0..=1.0).contains(&blend) {
            log::warn!("Rejected light blend {blend}");
            return Err(TransformError::BlendOutOfRange(blend));
        }
        self.blend = blend;
        Ok(())
    }

    /// Object-space direction
    pub const fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Set the object-space direction
    ///
    /// # Errors
    /// [`TransformError::ZeroDirection`] for the zero vector.
    pub fn set_direction(&mut self, direction: Vec3) -> Result<(), TransformError> {
        if direction == Vec3::ZERO {
            log::warn!("Rejected zero light direction");
            return Err(TransformError::ZeroDirection);
        }
        self.direction = direction;
        Ok(())
    }

    /// Uniform block for a light at `position` facing `direction`
    pub fn block(&self, position: Vec3, direction: Vec3) -> LightBlock {
        LightBlock {
            color: self.color.into(),
            energy: self.energy,
            position: position.into(),
            falloff: self.falloff,
            direction: direction.into(),
            angle: self.angle,
            blend: self.blend,
            light_type: self.light_type.shader_index(),
            _padding: [0.0; 2],
        }
    }
}

impl Transformable for Light {
    fn transform(&self) -> &TransformState {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut TransformState {
        &mut self.transform
    }
}

impl Rotatable for Light {
    fn rotate(&mut self, axis: Vec3, angle: f32) -> Result<(), TransformError> {
        let block = self.transform.rotate(axis, angle)?;
        self.direction = block * self.direction;
        Ok(())
    }
}

impl Movable for Light {}
impl Scalable for Light {}
