//! # Transform Traits
//!
//! Incremental orientation, position and scale for every spatial object.
//!
//! ## Architecture
//!
//! All state lives in one [`TransformState`] value. Entities, lights, cameras
//! and scene nodes embed it and expose it through [`Transformable`]. The
//! capability traits [`Rotatable`], [`Movable`] and [`Scalable`] provide the
//! operations as default methods over that state, so an object type only
//! overrides what it does differently (cameras roll about their own axes,
//! lights also turn their direction vector).
//!
//! ## Conventions
//!
//! - Angles passed to the traits are in degrees.
//! - `rotation_angles` is a running sum of the Euler angles of each
//!   individual rotation, not the Euler decomposition of the final
//!   orientation.
//! - Scale factors accumulate multiplicatively and are never reset.

mod state;
mod traits;

pub use state::TransformState;
pub(crate) use state::validate_factors;
pub use traits::{Movable, Rotatable, Scalable, Transformable};

use crate::foundation::math::Vec3;

/// Contract violations raised by transform operations
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Rotation axis was the zero vector
    #[error("Rotation axis cannot be of zero length")]
    ZeroAxis,

    /// Target vector was the zero vector
    #[error("Target vector cannot be of zero length")]
    ZeroTarget,

    /// At least one scaling factor was zero or negative
    #[error("Scaling factors must be greater than zero, got {0:?}")]
    NonPositiveFactor(Vec3),

    /// Light direction was the zero vector
    #[error("Light direction cannot be of zero length")]
    ZeroDirection,

    /// Spot light blend outside `[0, 1]`
    #[error("Blend {0} is not in [0.0; 1.0] range")]
    BlendOutOfRange(f32),
}
