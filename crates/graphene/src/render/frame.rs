//! Fullscreen quad and fixed binding slots shared by the deferred passes

use bytemuck::{Pod, Zeroable};

/// Texture units the geometry buffer textures are bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum TextureUnit {
    /// Albedo
    Diffuse = 0,
    /// Specular intensity
    Specular = 1,
    /// World positions
    Position = 2,
    /// World normals
    Normal = 3,
    /// Depth
    Depth = 4,
}

impl TextureUnit {
    /// Sampler uniform value
    pub const fn index(self) -> i32 {
        self as i32
    }
}

/// Uniform block bind point of the material block
pub const BIND_MATERIAL: u32 = 0;

/// Uniform block bind point of the light block
pub const BIND_LIGHT: u32 = 0;

/// Vertex data of the fullscreen quad
///
/// Four corners in clip space with zero normals, drawn as two triangles.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameGeometry {
    /// Corner positions
    pub positions: [[f32; 3]; 4],
    /// Corner normals
    pub normals: [[f32; 3]; 4],
    /// Corner texture coordinates
    pub uvs: [[f32; 2]; 4],
    /// Triangle indices
    pub faces: [u32; 6],
}

impl FrameGeometry {
    /// The quad covering the whole viewport
    pub const QUAD: Self = Self {
        positions: [[-1.0, -1.0, 0.0], [-1.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, -1.0, 0.0]],
        normals: [[0.0; 3]; 4],
        uvs: [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]],
        faces: [0, 1, 3, 1, 2, 3],
    };
}

impl Default for FrameGeometry {
    fn default() -> Self {
        Self::QUAD
    }
}
